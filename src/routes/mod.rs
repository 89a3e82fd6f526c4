use crate::state::State;
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

pub mod page;

pub fn app(state: Arc<State>) -> axum::Router {
    axum::Router::new()
        .merge(page::route())
        .with_state(state)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}
