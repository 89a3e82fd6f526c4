use crate::state::SharedState;
use axum::extract::State;
use axum::response::Redirect;

/// There is no index of its own, send visitors to the members listing.
pub(super) async fn get(State(state): SharedState) -> Redirect {
    Redirect::to(state.members_url.as_str())
}
