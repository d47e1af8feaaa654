use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::telemetry::{PathSample, TelemetryRecord};
use crate::tle::OrbitalElementRecord;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SessionHandle {
    #[schema(value_type = String)]
    pub id: Uuid,
    pub name: String,
    pub catalog_id: u64,
    pub started_at: DateTime<Utc>,
}

impl SessionHandle {
    pub(crate) fn new(record: &OrbitalElementRecord, started_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: record.name().to_string(),
            catalog_id: record.catalog_id(),
            started_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TrackingSession {
    pub handle: SessionHandle,
    pub record: Arc<OrbitalElementRecord>,
    /// `None` until the first successful tick.
    pub telemetry: Option<TelemetryRecord>,
    pub path: PathSample,
    pub missed_ticks: u64,
}
