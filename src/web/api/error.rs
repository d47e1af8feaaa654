use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::tracker::TrackerError;

#[derive(Debug)]
pub enum ApiError {
    InvalidTle(String),
    Propagation(String),
}

impl From<TrackerError> for ApiError {
    fn from(e: TrackerError) -> Self {
        match e {
            TrackerError::InvalidTleFormat(e) => ApiError::InvalidTle(e.to_string()),
            TrackerError::Propagation(e) => ApiError::Propagation(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InvalidTle(msg) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::with_message("invalid_tle_format", &msg)),
            )
                .into_response(),
            ApiError::Propagation(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorResponse::with_message("propagation_error", &msg)),
            )
                .into_response(),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    pub fn with_message(error: &str, message: &str) -> Self {
        ErrorResponse {
            error: error.to_string(),
            message: Some(message.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tle::TleError;

    #[test]
    fn invalid_tle_maps_to_bad_request() {
        let err: ApiError = TrackerError::InvalidTleFormat(TleError::LineCount(1)).into();
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn propagation_maps_to_unprocessable() {
        let err: ApiError = TrackerError::Propagation(
            crate::predict::PropagationError::Initialization("bad".into()),
        )
        .into();
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn error_body_omits_missing_message() {
        let json = serde_json::to_value(ErrorResponse {
            error: "x".into(),
            message: None,
        }).unwrap();
        assert_eq!(json, serde_json::json!({ "error": "x" }));
    }
}
