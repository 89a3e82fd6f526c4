use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("failed to render page: {0}")]
    Render(#[from] askama::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!(error = %self, "request failed");

        let status = match self {
            AppError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, "Something went wrong while rendering this page").into_response()
    }
}
