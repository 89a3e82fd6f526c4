use crate::state::NestedRouter;
use axum::routing::get;

mod home;
mod member;

pub fn route() -> NestedRouter {
    axum::Router::new()
        .route("/", get(home::get))
        .route("/:id", get(member::get))
}
