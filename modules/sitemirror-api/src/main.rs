use std::sync::Arc;

use anyhow::Result;
use axum::{
    routing::{delete, get, post},
    Router,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use gemini_client::GeminiClient;
use sitemirror_core::{Cloner, Scraper};

mod config;
mod jobs;
mod rest;

use config::Config;
use jobs::JobStore;

pub struct AppState {
    pub jobs: JobStore,
    pub scraper: Scraper,
    pub cloner: Cloner,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("sitemirror=info".parse()?),
        )
        .init();

    let config = Config::from_env();

    let scraper = Scraper::browserless(
        &config.browserless_url,
        config.browserless_token.as_deref(),
    );
    let cloner = Cloner::new(GeminiClient::new(&config.gemini_api_key, &config.gemini_model));

    let state = Arc::new(AppState {
        jobs: JobStore::new(),
        scraper,
        cloner,
    });

    let app = Router::new()
        .route("/", get(|| async { "ok" }))
        .route("/health", get(rest::api_health))
        .route("/clone", post(rest::api_clone))
        .route("/clone/{clone_id}/status", get(rest::api_clone_status))
        .route("/clone/{clone_id}/result", get(rest::api_clone_result))
        .route("/clone/{clone_id}", delete(rest::api_clone_delete))
        .route("/clones", get(rest::api_clones_list))
        .with_state(state)
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        );

    let addr = format!("{}:{}", config.web_host, config.web_port);
    info!("SiteMirror API starting on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
