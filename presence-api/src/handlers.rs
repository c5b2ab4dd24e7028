//! API route handlers.

use std::collections::HashSet;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::SecondsFormat;
use tracing::info;

use presence_core::traits::PresenceRegistry;

use crate::dto::*;
use crate::error::ApiError;
use crate::state::AppState;

type Result<T> = std::result::Result<T, ApiError>;

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
    })
}

/// POST /api/register-job
pub async fn register_job(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterJobRequest>,
) -> Result<(StatusCode, Json<MessageResponse>)> {
    let entry = state
        .registry
        .register(
            req.receiver.as_deref().unwrap_or_default(),
            req.job_id.as_deref().unwrap_or_default(),
            req.server_id.as_deref().unwrap_or_default(),
        )
        .await?;

    info!(receiver = %entry.username, job_id = %entry.job_id, "Receiver registered");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::ok(format!("Registered {}", entry.username))),
    ))
}

/// POST /api/update-receiver
pub async fn update_receiver(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UpdateReceiverRequest>,
) -> Result<Json<MessageResponse>> {
    let receiver = req.receiver.as_deref().unwrap_or_default();
    let entry = state.registry.refresh_by_username(receiver).await?;

    info!(receiver = %entry.username, job_id = %entry.job_id, "Receiver refreshed");

    Ok(Json(MessageResponse::ok(format!("Updated {}", entry.username))))
}

/// GET /api/check-receivers?usernames=a,b,c
pub async fn check_receivers(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CheckReceiversQuery>,
) -> Result<Json<CheckReceiversResponse>> {
    let requested: HashSet<String> = query.usernames().into_iter().collect();
    let available = state.registry.find_present(&requested).await?;

    info!(
        requested = requested.len(),
        found = available.len(),
        "Checked receivers"
    );

    Ok(Json(CheckReceiversResponse {
        success: true,
        available_receivers: available,
    }))
}

/// DELETE /api/job/:jobId
pub async fn remove_job(
    State(state): State<Arc<AppState>>,
    Path(job_id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let username = state.registry.remove_by_job_id(&job_id).await?;

    info!(receiver = %username, job_id = %job_id, "Receiver unregistered");

    Ok(Json(MessageResponse::ok("Registration removed")))
}

/// GET /api/stats
pub async fn get_stats(State(state): State<Arc<AppState>>) -> Result<Json<StatsResponse>> {
    let stats = state.registry.stats().await?;

    Ok(Json(StatsResponse {
        success: true,
        stats: StatsDto {
            active_jobs: stats.count,
            active_receivers: stats.count,
            server_time: stats.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
        },
    }))
}
