use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateVector {
    pub epoch: DateTime<Utc>,
    /// km
    pub position: [f64; 3],
    /// km/s
    pub velocity: [f64; 3],
}

impl StateVector {
    pub fn radius_km(&self) -> f64 {
        norm(self.position)
    }

    /// Inertial speed, not ground speed.
    pub fn speed_km_s(&self) -> f64 {
        norm(self.velocity)
    }

    pub fn is_finite(&self) -> bool {
        self.position
            .iter()
            .chain(self.velocity.iter())
            .all(|v| v.is_finite())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct GeodeticSample {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub altitude_km: f64,
}

pub(crate) fn norm(v: [f64; 3]) -> f64 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}
