use crate::fetch::Fetch;
use crate::urls::Urls;
use std::sync::Arc;
use url::Url;

pub mod cache;

pub type SharedState = axum::extract::State<Arc<State>>;
pub type NestedRouter = axum::Router<Arc<State>>;

pub struct State {
    pub fetcher: Arc<dyn Fetch>,
    pub urls: Urls,
    pub cache: cache::CachePolicy,
    pub members_url: Url,
}

impl State {
    pub fn new(config: &crate::config::Config, fetcher: Arc<dyn Fetch>) -> State {
        State {
            fetcher,
            urls: Urls::new(config.api_base_url.clone(), config.image_base_url.clone()),
            cache: cache::CachePolicy::new(config.cache_max_age),
            members_url: config.members_url.clone(),
        }
    }
}

impl std::fmt::Debug for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("State")
            .field("urls", &self.urls)
            .field("cache", &self.cache)
            .field("members_url", &self.members_url)
            .finish_non_exhaustive()
    }
}
