use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde::Deserialize;
use tracing::{error, info};
use uuid::Uuid;

use crate::AppState;

#[derive(Deserialize)]
pub struct CloneRequest {
    url: String,
}

pub async fn api_clone(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CloneRequest>,
) -> impl IntoResponse {
    let url = body.url.trim().to_string();
    if url.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"error": "url is required"})),
        )
            .into_response();
    }

    let clone_id = state.jobs.insert(&url).await;
    info!(%clone_id, url, "Starting clone job");

    let worker_state = state.clone();
    tokio::spawn(async move {
        process_clone(worker_state, clone_id, url).await;
    });

    let job = match state.jobs.get(clone_id).await {
        Some(job) => job,
        None => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"error": "Failed to register clone job"})),
            )
                .into_response();
        }
    };

    Json(serde_json::json!({
        "clone_id": clone_id.to_string(),
        "status": job.status,
        "message": "Website cloning started. Use the clone_id to check status.",
        "url": job.url,
        "created_at": job.created_at,
    }))
    .into_response()
}

/// Background task: scrape, generate, record the outcome. Any failure marks
/// the job as errored; nothing here surfaces to an HTTP response directly.
async fn process_clone(state: Arc<AppState>, clone_id: Uuid, url: String) {
    let scrape = match state.scraper.scrape(&url).await {
        Ok(scrape) => scrape,
        Err(e) => {
            error!(%clone_id, url, error = %e, "Scrape failed");
            state.jobs.fail(clone_id, format!("Scraping failed: {e}")).await;
            return;
        }
    };

    match state.cloner.generate_clone(&scrape).await {
        Ok(artifact) => {
            info!(%clone_id, url, "Clone job completed");
            state.jobs.complete(clone_id, artifact).await;
        }
        Err(e) => {
            error!(%clone_id, url, error = %e, "Clone generation failed");
            state.jobs.fail(clone_id, format!("Clone generation failed: {e}")).await;
        }
    }
}

pub async fn api_clone_status(
    State(state): State<Arc<AppState>>,
    Path(clone_id): Path<Uuid>,
) -> impl IntoResponse {
    match state.jobs.get(clone_id).await {
        Some(job) => Json(serde_json::json!({
            "clone_id": job.clone_id.to_string(),
            "status": job.status,
            "url": job.url,
            "created_at": job.created_at,
            "completed_at": job.completed_at,
            "has_result": job.artifact.is_some(),
        }))
        .into_response(),
        None => not_found(),
    }
}

pub async fn api_clone_result(
    State(state): State<Arc<AppState>>,
    Path(clone_id): Path<Uuid>,
) -> impl IntoResponse {
    let job = match state.jobs.get(clone_id).await {
        Some(job) => job,
        None => return not_found(),
    };

    match job.artifact {
        Some(artifact) => Json(serde_json::json!({
            "clone_id": job.clone_id.to_string(),
            "status": job.status,
            "url": job.url,
            "created_at": job.created_at,
            "completed_at": job.completed_at,
            "html": artifact.html,
            "css": artifact.css,
            "javascript": artifact.javascript,
            "metadata": artifact.metadata,
        }))
        .into_response(),
        None => match job.error {
            Some(error) => Json(serde_json::json!({
                "clone_id": job.clone_id.to_string(),
                "status": job.status,
                "error": error,
            }))
            .into_response(),
            None => Json(serde_json::json!({
                "clone_id": job.clone_id.to_string(),
                "status": job.status,
                "message": "Clone is still being processed",
            }))
            .into_response(),
        },
    }
}

pub async fn api_clone_delete(
    State(state): State<Arc<AppState>>,
    Path(clone_id): Path<Uuid>,
) -> impl IntoResponse {
    if state.jobs.delete(clone_id).await {
        info!(%clone_id, "Deleted clone result");
        Json(serde_json::json!({"message": "Clone result deleted successfully"})).into_response()
    } else {
        not_found()
    }
}

pub async fn api_clones_list(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let jobs = state.jobs.list().await;
    let items: Vec<serde_json::Value> = jobs
        .iter()
        .map(|job| {
            serde_json::json!({
                "clone_id": job.clone_id.to_string(),
                "status": job.status,
                "url": job.url,
                "created_at": job.created_at,
                "completed_at": job.completed_at,
            })
        })
        .collect();
    Json(items).into_response()
}

pub async fn api_health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now(),
        "active_clones": state.jobs.active_count().await,
    }))
}

fn not_found() -> axum::response::Response {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({"error": "Clone not found"})),
    )
        .into_response()
}
