use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::{normalize_longitude, TelemetryRecord};
use crate::predict::{frames, PropagationError, Propagator};

#[derive(Debug, Clone)]
pub struct TelemetrySampler {
    propagator: Arc<Propagator>,
}

impl TelemetrySampler {
    pub fn new(propagator: Arc<Propagator>) -> Self {
        Self { propagator }
    }

    pub fn sample(&self, now: DateTime<Utc>) -> Result<TelemetryRecord, PropagationError> {
        let state = self.propagator.propagate(now)?;
        let geo = frames::teme_to_geodetic(state.position, now);
        let record = self.propagator.record();

        Ok(TelemetryRecord {
            name: record.name().to_string(),
            catalog_id: record.catalog_id(),
            timestamp: now,
            latitude_deg: geo.latitude_deg,
            longitude_deg: normalize_longitude(geo.longitude_deg),
            altitude_km: geo.altitude_km,
            speed_km_s: state.speed_km_s(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predict::DEFAULT_MAX_EPOCH_OFFSET;
    use crate::tle::OrbitalElementRecord;
    use chrono::Duration;
    use float_cmp::approx_eq;

    const ISS: &str = "ISS (ZARYA)
1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927
2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537";

    fn sampler() -> (TelemetrySampler, DateTime<Utc>) {
        let record = Arc::new(OrbitalElementRecord::parse(ISS).unwrap());
        let epoch = record.epoch();
        let propagator = Propagator::new(record, DEFAULT_MAX_EPOCH_OFFSET).unwrap();
        (TelemetrySampler::new(Arc::new(propagator)), epoch)
    }

    #[test]
    fn iss_telemetry_at_epoch_matches_reference() {
        let (sampler, epoch) = sampler();
        let t = sampler.sample(epoch).unwrap();

        assert_eq!(t.name, "ISS (ZARYA)");
        assert_eq!(t.catalog_id, 25544);
        assert_eq!(t.timestamp, epoch);
        assert!(approx_eq!(f64, t.latitude_deg, 51.46364, epsilon = 1e-4), "lat {}", t.latitude_deg);
        assert!(approx_eq!(f64, t.longitude_deg, 160.14322, epsilon = 1e-4), "lon {}", t.longitude_deg);
        assert!(approx_eq!(f64, t.altitude_km, 355.0957, epsilon = 1e-3), "alt {}", t.altitude_km);
        assert!(approx_eq!(f64, t.speed_km_s, 7.704617, epsilon = 1e-5), "speed {}", t.speed_km_s);
    }

    #[test]
    fn latitude_stays_within_inclination_over_an_orbit() {
        let (sampler, epoch) = sampler();
        for minute in (0..92).step_by(4) {
            let t = sampler.sample(epoch + Duration::minutes(minute)).unwrap();
            assert!(t.latitude_deg.abs() <= 52.0, "lat {} at {minute}", t.latitude_deg);
            assert!(t.longitude_deg > -180.0 && t.longitude_deg <= 180.0);
        }
    }

    #[test]
    fn failure_is_reported_not_hidden() {
        let (sampler, epoch) = sampler();
        let far = epoch + Duration::days(400);
        assert!(matches!(
            sampler.sample(far),
            Err(PropagationError::EpochOutOfRange { .. })
        ));
    }
}
