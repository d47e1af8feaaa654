mod path;
mod sample;
mod sampler;

pub use path::{PathConfig, PathPoint, PathSample, PathSampler};
pub use sample::{normalize_longitude, TelemetryRecord};
pub use sampler::TelemetrySampler;
