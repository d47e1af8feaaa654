use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::config::humantime_duration;
use crate::predict::{frames, GeodeticSample, Propagator};

pub const DEFAULT_PATH_SAMPLES: usize = 360;
pub const DEFAULT_PATH_STEP: Duration = Duration::seconds(60);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PathConfig {
    #[serde(default = "default_samples")]
    pub samples: usize,
    #[serde(default = "default_step", deserialize_with = "humantime_duration")]
    pub step: Duration,
}

fn default_samples() -> usize {
    DEFAULT_PATH_SAMPLES
}

fn default_step() -> Duration {
    DEFAULT_PATH_STEP
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            samples: DEFAULT_PATH_SAMPLES,
            step: DEFAULT_PATH_STEP,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, utoipa::ToSchema)]
pub struct PathPoint {
    pub timestamp: DateTime<Utc>,
    /// Longitude is raw (not wrapped into ±180).
    #[serde(flatten)]
    pub geodetic: GeodeticSample,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, utoipa::ToSchema)]
pub struct PathSample {
    pub points: Vec<PathPoint>,
}

impl PathSample {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PathSampler {
    config: PathConfig,
}

impl PathSampler {
    pub fn new(config: PathConfig) -> Self {
        Self { config }
    }

    /// Sample epochs, centred on `now`: point `i` sits at `now + (i - samples/2) * step`.
    pub fn epochs(&self, now: DateTime<Utc>) -> impl Iterator<Item = DateTime<Utc>> {
        let samples = i64::try_from(self.config.samples).unwrap_or(i64::MAX);
        let half = samples / 2;
        let step_ms = self.config.step.num_milliseconds();
        (0..samples).filter_map(move |i| {
            (i - half)
                .checked_mul(step_ms)
                .and_then(Duration::try_milliseconds)
                .and_then(|offset| now.checked_add_signed(offset))
        })
    }

    pub fn sample(&self, propagator: &Propagator, now: DateTime<Utc>) -> PathSample {
        let mut points = Vec::new();

        for epoch in self.epochs(now) {
            match propagator.propagate(epoch) {
                Ok(state) => points.push(PathPoint {
                    timestamp: epoch,
                    geodetic: frames::teme_to_geodetic(state.position, epoch),
                }),
                Err(e) => log::debug!("Skipping path point at {}: {}", epoch, e),
            }
        }

        let skipped = self.config.samples.saturating_sub(points.len());

        if skipped > 0 {
            log::warn!(
                "Path for {} has {} of {} points missing",
                propagator.record().name(),
                skipped,
                self.config.samples
            );
        }

        PathSample { points }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predict::DEFAULT_MAX_EPOCH_OFFSET;
    use crate::tle::OrbitalElementRecord;
    use std::sync::Arc;

    const ISS: &str = "1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927
2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537";

    fn propagator(max_offset: Duration) -> Propagator {
        let record = Arc::new(OrbitalElementRecord::parse(ISS).unwrap());
        Propagator::new(record, max_offset).unwrap()
    }

    #[test]
    fn default_path_is_full_and_ordered() {
        let prop = propagator(DEFAULT_MAX_EPOCH_OFFSET);
        let now = prop.record().epoch();
        let path = PathSampler::default().sample(&prop, now);

        assert_eq!(path.len(), DEFAULT_PATH_SAMPLES);
        assert!(path.points.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
        assert_eq!(path.points[0].timestamp, now - Duration::minutes(180));
        assert_eq!(path.points[359].timestamp, now + Duration::minutes(179));
        assert_eq!(path.points[180].timestamp, now);
    }

    #[test]
    fn epochs_are_evenly_spaced() {
        let sampler = PathSampler::new(PathConfig {
            samples: 5,
            step: Duration::seconds(30),
        });
        let now: DateTime<Utc> = "2024-01-01T00:00:00Z".parse().unwrap();
        let offsets: Vec<i64> = sampler
            .epochs(now)
            .map(|t| (t - now).num_seconds())
            .collect();
        assert_eq!(offsets, vec![-60, -30, 0, 30, 60]);
    }

    #[test]
    fn failed_epochs_are_omitted() {
        // One hour validity: only the points within ±60 min survive.
        let prop = propagator(Duration::hours(1));
        let now = prop.record().epoch();
        let path = PathSampler::default().sample(&prop, now);

        assert_eq!(path.len(), 121);
        assert!(path.points.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
        assert_eq!(path.points[0].timestamp, now - Duration::minutes(60));
        assert_eq!(path.points[120].timestamp, now + Duration::minutes(60));
    }

    #[test]
    fn unrepresentable_epochs_are_dropped() {
        let sampler = PathSampler::new(PathConfig {
            samples: 360,
            step: Duration::days(365 * 2000),
        });
        let prop = propagator(DEFAULT_MAX_EPOCH_OFFSET);
        let now = prop.record().epoch();

        assert!(sampler.epochs(now).count() < 360);
        let path = sampler.sample(&prop, now);
        assert_eq!(path.len(), 1);
        assert_eq!(path.points[0].timestamp, now);
    }

    #[test]
    fn overflowing_offsets_are_dropped() {
        let sampler = PathSampler::new(PathConfig {
            samples: 4,
            step: Duration::MAX,
        });
        let now: DateTime<Utc> = "2024-01-01T00:00:00Z".parse().unwrap();
        let epochs: Vec<_> = sampler.epochs(now).collect();
        assert_eq!(epochs, vec![now]);
    }

    #[test]
    fn all_failing_epochs_give_empty_path() {
        let prop = propagator(Duration::hours(1));
        let now = prop.record().epoch() + Duration::days(10);
        let path = PathSampler::default().sample(&prop, now);
        assert!(path.is_empty());
    }

    #[test]
    fn path_keeps_raw_longitudes() {
        let prop = propagator(DEFAULT_MAX_EPOCH_OFFSET);
        let now = prop.record().epoch();
        let path = PathSampler::default().sample(&prop, now);
        for point in &path.points {
            assert!(point.geodetic.longitude_deg > -540.0 && point.geodetic.longitude_deg <= 180.0);
            assert!(point.geodetic.latitude_deg.abs() <= 52.0);
        }
    }
}
