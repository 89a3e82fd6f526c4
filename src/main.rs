use axum::ServiceExt;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower::Layer;
use tower_http::normalize_path::NormalizePathLayer;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

mod config;
mod error;
mod fetch;
mod member;
mod profile;
mod routes;
mod state;
mod urls;
mod view;

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = config::Config::load().expect("Environment misconfigured!");
    let fetcher =
        fetch::HttpFetcher::new(config.fetch_timeout).expect("http client should build");
    let state = Arc::new(state::State::new(&config, Arc::new(fetcher)));

    let app = NormalizePathLayer::trim_trailing_slash().layer(routes::app(state));

    let address = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(address)
        .await
        .expect("Error binding listener");
    info!("Serving member pages on {address}");

    axum::serve(
        listener,
        ServiceExt::<axum::extract::Request>::into_make_service(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .expect("Error serving app");

    info!("Server shut down");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
