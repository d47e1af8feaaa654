use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use sgp4::{Constants, MinutesSinceEpoch};

use super::{PropagationError, StateVector};
use crate::tle::OrbitalElementRecord;

/// Element sets older or younger than this are not propagated.
pub const DEFAULT_MAX_EPOCH_OFFSET: Duration = Duration::days(30);

// WGS-72, matching the AFSPC constants the element sets are fitted with.
const EARTH_RADIUS_KM: f64 = 6378.135;

pub struct Propagator {
    record: Arc<OrbitalElementRecord>,
    constants: Constants,
    max_epoch_offset: Duration,
}

impl Propagator {
    pub fn new(
        record: Arc<OrbitalElementRecord>,
        max_epoch_offset: Duration,
    ) -> Result<Self, PropagationError> {
        let constants = Constants::from_elements_afspc_compatibility_mode(record.elements())
            .map_err(|e| PropagationError::Initialization(e.to_string()))?;

        Ok(Self {
            record,
            constants,
            max_epoch_offset,
        })
    }

    pub fn record(&self) -> &Arc<OrbitalElementRecord> {
        &self.record
    }

    pub fn minutes_since_epoch(&self, at: DateTime<Utc>) -> Result<f64, PropagationError> {
        (at - self.record.epoch())
            .num_microseconds()
            .map(|us| us as f64 / 60_000_000.0)
            .ok_or_else(|| PropagationError::Epoch(format!("{} is out of range", at)))
    }

    pub fn propagate(&self, at: DateTime<Utc>) -> Result<StateVector, PropagationError> {
        let minutes = self.minutes_since_epoch(at)?;

        let limit_minutes = self.max_epoch_offset.num_seconds() as f64 / 60.0;
        if minutes.abs() > limit_minutes {
            return Err(PropagationError::EpochOutOfRange {
                minutes,
                limit_minutes,
            });
        }

        let prediction = self
            .constants
            .propagate_afspc_compatibility_mode(MinutesSinceEpoch(minutes))
            .map_err(|e| PropagationError::Model {
                minutes,
                reason: e.to_string(),
            })?;

        let state = StateVector {
            epoch: at,
            position: prediction.position,
            velocity: prediction.velocity,
        };

        if !state.is_finite() {
            return Err(PropagationError::NonFinite);
        }
        let radius_km = state.radius_km();
        if radius_km < EARTH_RADIUS_KM {
            return Err(PropagationError::Decayed { radius_km });
        }

        Ok(state)
    }
}

impl fmt::Debug for Propagator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Propagator")
            .field("name", &self.record.name())
            .field("catalog_id", &self.record.catalog_id())
            .field("max_epoch_offset", &self.max_epoch_offset)
            .finish_non_exhaustive()
    }
}
