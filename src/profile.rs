use crate::fetch::{Fetch, FetchError};
use crate::member::{Contributions, MemberID, User, IMAGE_FILE_NAME};
use crate::state::State;
use crate::urls::{is_dot_segment, UrlError, Urls};
use axum::http::HeaderMap;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

const STATUS_OK: u16 = 200;

#[derive(Debug, Clone, PartialEq)]
pub struct ProfileData {
    pub image_link: String,
    pub user: User,
    pub contributions: Contributions,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("The user {0} you're trying to find doesn't exist with us, please go to members to see all the available members we have")]
    MemberNotFound(MemberID),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("unexpected {what} payload: {source}")]
    Payload {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not build url: {0}")]
    Url(#[from] UrlError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadErrorKind {
    MemberNotFound,
    UnexpectedFailure,
}

impl LoadError {
    pub fn kind(&self) -> LoadErrorKind {
        match self {
            LoadError::MemberNotFound(_) => LoadErrorKind::MemberNotFound,
            LoadError::Fetch(_) | LoadError::Payload { .. } | LoadError::Url(_) => {
                LoadErrorKind::UnexpectedFailure
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct MemberEnvelope {
    user: User,
}

pub async fn fetch_profile(
    fetcher: &dyn Fetch,
    urls: &Urls,
    member_id: &str,
) -> Result<ProfileData, LoadError> {
    if is_dot_segment(member_id) {
        return Err(LoadError::MemberNotFound(member_id.to_owned()));
    }

    let member_url = urls.member_data_url(member_id)?;
    let contributions_url = urls.contributions_url(member_id)?;

    let member_response = fetcher.get(&member_url).await?;
    // only the member lookup is status checked, contributions are taken as sent
    if member_response.status != STATUS_OK {
        debug!(
            member = member_id,
            status = member_response.status,
            "member lookup did not succeed"
        );
        return Err(LoadError::MemberNotFound(member_id.to_owned()));
    }
    let MemberEnvelope { user } = decode("member", member_response.data)?;

    let contributions_response = fetcher.get(&contributions_url).await?;
    let contributions = decode("contributions", contributions_response.data)?;

    let image_link = urls.image_url(member_id, IMAGE_FILE_NAME)?.to_string();

    Ok(ProfileData {
        image_link,
        user,
        contributions,
    })
}

fn decode<T: serde::de::DeserializeOwned>(what: &'static str, data: Value) -> Result<T, LoadError> {
    serde_json::from_value(data).map_err(|source| LoadError::Payload { what, source })
}

/// Everything the page renders from. Exactly one arm is meaningful: either the
/// profile fields, or a non-empty `error_message`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageProps {
    pub image_link: String,
    pub user: User,
    pub contributions: Contributions,
    pub error_message: String,
}

impl PageProps {
    pub fn from_result(result: Result<ProfileData, LoadError>) -> Self {
        match result {
            Ok(ProfileData {
                image_link,
                user,
                contributions,
            }) => PageProps {
                image_link,
                user,
                contributions,
                ..PageProps::default()
            },
            Err(err) => PageProps {
                error_message: err.to_string(),
                ..PageProps::default()
            },
        }
    }

    pub fn is_error(&self) -> bool {
        !self.error_message.is_empty()
    }
}

/// Sets the cache directive before any backend call is made, so it is present
/// on the response no matter how loading turns out.
pub async fn load_page_props(state: &State, member_id: &str, headers: &mut HeaderMap) -> PageProps {
    state.cache.apply(headers);

    let result = fetch_profile(state.fetcher.as_ref(), &state.urls, member_id).await;
    if let Err(err) = &result {
        warn!(member = member_id, kind = ?err.kind(), error = %err, "failed to load member profile");
    }

    PageProps::from_result(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::fetch::stub::StubFetcher;
    use axum::http::header::CACHE_CONTROL;
    use rstest::{fixture, rstest};
    use serde_json::json;
    use std::sync::Arc;

    const MEMBER_URL: &str = "https://api.example.test/users/u123";
    const CONTRIBUTIONS_URL: &str = "https://api.example.test/contributions/u123";

    fn config() -> Config {
        Config::from_lookup(|key| match key {
            "API_BASE_URL" => Some(String::from("https://api.example.test")),
            "IMAGE_BASE_URL" => Some(String::from("https://static.example.test/members")),
            "CACHE_MAX_AGE" => Some(String::from("120")),
            _ => None,
        })
        .expect("test config should parse")
    }

    fn state_with(fetcher: StubFetcher) -> (State, Arc<StubFetcher>) {
        let fetcher = Arc::new(fetcher);
        (State::new(&config(), fetcher.clone()), fetcher)
    }

    #[fixture]
    fn healthy() -> StubFetcher {
        StubFetcher::new()
            .reply(
                MEMBER_URL,
                200,
                json!({"message": "User returned successfully!", "user": {"first_name": "Jane", "last_name": "Doe"}}),
            )
            .reply(
                CONTRIBUTIONS_URL,
                200,
                json!({"noteworthy": [], "all": [{"id": 1}]}),
            )
    }

    #[rstest]
    #[tokio::test]
    async fn loads_member_and_contributions(healthy: StubFetcher) {
        let (state, fetcher) = state_with(healthy);

        let data = fetch_profile(state.fetcher.as_ref(), &state.urls, "u123")
            .await
            .expect("profile should load");

        assert_eq!(data.user.first_name.as_deref(), Some("Jane"));
        assert!(data.contributions.noteworthy.is_empty());
        assert_eq!(data.contributions.all.len(), 1);
        assert_eq!(
            data.image_link,
            "https://static.example.test/members/u123/img.png"
        );
        assert_eq!(fetcher.calls(), 2);
    }

    #[rstest]
    #[case(404)]
    #[case(500)]
    #[case(201)]
    #[tokio::test]
    async fn non_ok_member_status_is_not_found(#[case] status: u16) {
        let (state, fetcher) = state_with(
            StubFetcher::new().reply("https://api.example.test/users/ghost", status, json!({})),
        );

        let err = fetch_profile(state.fetcher.as_ref(), &state.urls, "ghost")
            .await
            .expect_err("lookup should fail");

        assert_eq!(err.kind(), LoadErrorKind::MemberNotFound);
        assert!(err.to_string().contains("ghost"));
        // contributions are never requested once the member is missing
        assert_eq!(fetcher.calls(), 1);
    }

    #[rstest]
    #[case(".")]
    #[case("..")]
    #[tokio::test]
    async fn dot_member_ids_are_not_found(#[case] member_id: &str) {
        let (state, fetcher) = state_with(
            StubFetcher::new().reply("https://api.example.test/", 200, json!({"user": {"first_name": "Root"}})),
        );

        let err = fetch_profile(state.fetcher.as_ref(), &state.urls, member_id)
            .await
            .expect_err("dot ids should not resolve");

        assert_eq!(err.kind(), LoadErrorKind::MemberNotFound);
        assert_eq!(fetcher.calls(), 0);
    }

    #[tokio::test]
    async fn contributions_status_is_not_checked() {
        let (state, _) = state_with(
            StubFetcher::new()
                .reply(MEMBER_URL, 200, json!({"user": {}}))
                .reply(CONTRIBUTIONS_URL, 503, json!({"message": "unavailable"})),
        );

        let data = fetch_profile(state.fetcher.as_ref(), &state.urls, "u123")
            .await
            .expect("profile should load");

        assert_eq!(data.contributions, Contributions::default());
    }

    #[tokio::test]
    async fn contributions_transport_failure_is_unexpected() {
        let (state, _) = state_with(
            StubFetcher::new()
                .reply(MEMBER_URL, 200, json!({"user": {}}))
                .fail(CONTRIBUTIONS_URL, "connection reset"),
        );

        let err = fetch_profile(state.fetcher.as_ref(), &state.urls, "u123")
            .await
            .expect_err("contributions should fail");

        assert_eq!(err.kind(), LoadErrorKind::UnexpectedFailure);
        assert!(err.to_string().contains("connection reset"));
    }

    #[rstest]
    #[case(json!({"message": "no user here"}))]
    #[case(json!("<html>oops</html>"))]
    #[tokio::test]
    async fn malformed_member_payload_is_unexpected(#[case] body: Value) {
        let (state, _) = state_with(StubFetcher::new().reply(MEMBER_URL, 200, body));

        let err = fetch_profile(state.fetcher.as_ref(), &state.urls, "u123")
            .await
            .expect_err("payload should be rejected");

        assert!(matches!(err, LoadError::Payload { what: "member", .. }));
        assert_eq!(err.kind(), LoadErrorKind::UnexpectedFailure);
    }

    #[rstest]
    #[tokio::test]
    async fn page_props_success_arm(healthy: StubFetcher) {
        let (state, _) = state_with(healthy);
        let mut headers = HeaderMap::new();

        let props = load_page_props(&state, "u123", &mut headers).await;

        assert!(!props.is_error());
        assert_eq!(props.error_message, "");
        assert!(props.image_link.ends_with("u123/img.png"));
        assert_eq!(headers[CACHE_CONTROL], "max-age=120");
    }

    #[tokio::test]
    async fn page_props_error_arm_keeps_defaults_and_header() {
        let (state, _) = state_with(StubFetcher::new());
        let mut headers = HeaderMap::new();

        let props = load_page_props(&state, "ghost", &mut headers).await;

        assert!(props.is_error());
        assert_eq!(props.image_link, "");
        assert_eq!(props.user, User::default());
        assert_eq!(props.contributions, Contributions::default());
        assert_eq!(headers[CACHE_CONTROL], "max-age=120");
    }

    #[rstest]
    #[tokio::test]
    async fn loading_twice_gives_identical_props(healthy: StubFetcher) {
        let (state, _) = state_with(healthy);

        let first = load_page_props(&state, "u123", &mut HeaderMap::new()).await;
        let second = load_page_props(&state, "u123", &mut HeaderMap::new()).await;

        assert_eq!(first, second);
    }
}
