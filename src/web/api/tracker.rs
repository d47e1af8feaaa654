use axum::{extract::State, Json};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::telemetry::{PathPoint, TelemetryRecord};
use crate::tracker::{SessionHandle, TrackerMode, TrackerStatus};
use crate::web::api::error::{ApiResult, ErrorResponse};
use crate::web::server::AppState;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RunRequest {
    pub tle: String,
}

#[utoipa::path(
    post,
    path = "/api/tracker/run",
    request_body = RunRequest,
    responses(
        (status = 200, description = "Tracking started", body = SessionHandle),
        (status = 400, description = "Invalid TLE", body = ErrorResponse),
        (status = 422, description = "SGP4 rejected the element set", body = ErrorResponse)
    ),
    tag = "tracker"
)]
pub async fn run(
    State(state): State<AppState>,
    Json(request): Json<RunRequest>,
) -> ApiResult<Json<SessionHandle>> {
    let mut tracker = state.tracker.lock().await;
    let handle = tracker.start_tracking(&request.tle).await?;
    Ok(Json(handle))
}

#[utoipa::path(
    post,
    path = "/api/tracker/stop",
    responses(
        (status = 200, description = "Tracker stopped", body = TrackerMode)
    ),
    tag = "tracker"
)]
pub async fn stop(State(state): State<AppState>) -> ApiResult<Json<TrackerMode>> {
    let mut tracker = state.tracker.lock().await;
    tracker.stop().await;
    Ok(Json(tracker.status().mode))
}

#[utoipa::path(
    get,
    path = "/api/tracker/status",
    responses(
        (status = 200, description = "Full tracker status", body = TrackerStatus)
    ),
    tag = "tracker"
)]
pub async fn status(State(state): State<AppState>) -> ApiResult<Json<TrackerStatus>> {
    let tracker = state.tracker.lock().await;
    Ok(Json(tracker.status()))
}

#[utoipa::path(
    get,
    path = "/api/tracker/status/mode",
    responses(
        (status = 200, description = "Tracker mode", body = TrackerMode)
    ),
    tag = "tracker"
)]
pub async fn status_mode(State(state): State<AppState>) -> ApiResult<Json<TrackerMode>> {
    let tracker = state.tracker.lock().await;
    Ok(Json(tracker.status().mode))
}

#[utoipa::path(
    get,
    path = "/api/tracker/status/sample",
    responses(
        (status = 200, description = "Latest telemetry", body = Option<TelemetryRecord>)
    ),
    tag = "tracker"
)]
pub async fn status_sample(
    State(state): State<AppState>,
) -> ApiResult<Json<Option<TelemetryRecord>>> {
    let tracker = state.tracker.lock().await;
    Ok(Json(tracker.status().last_sample))
}

#[utoipa::path(
    get,
    path = "/api/tracker/status/trajectory",
    responses(
        (status = 200, description = "Path around the session start", body = Vec<PathPoint>)
    ),
    tag = "tracker"
)]
pub async fn status_trajectory(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<PathPoint>>> {
    let tracker = state.tracker.lock().await;
    Ok(Json(tracker.status().trajectory))
}
