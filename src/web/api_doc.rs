use utoipa::OpenApi;

use super::api::error::ErrorResponse;
use super::api::tracker::RunRequest;

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::tracker::run,
        super::api::tracker::stop,
        super::api::tracker::status,
        super::api::tracker::status_mode,
        super::api::tracker::status_sample,
        super::api::tracker::status_trajectory,
    ),
    components(
        schemas(
            RunRequest,
            ErrorResponse,
            crate::tracker::SessionHandle,
            crate::tracker::TrackerMode,
            crate::tracker::TrackerStatus,
            crate::tracker::SchedulerState,
            crate::telemetry::TelemetryRecord,
            crate::telemetry::PathPoint,
            crate::predict::GeodeticSample,
        )
    ),
    info(
        title = "Sat Tracker API",
        description = "Live SGP4 telemetry for a single tracked object",
        version = "0.1.0"
    ),
    tags(
        (name = "tracker", description = "Tracking session control and telemetry")
    )
)]
pub struct ApiDoc;
