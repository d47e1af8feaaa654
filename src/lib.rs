//! Single-object satellite tracker.

pub mod clock;
pub mod config;
pub mod predict;
pub mod telemetry;
pub mod tle;
pub mod tracker;
pub mod web;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{Config, TrackerConfig};
pub use tracker::{SessionHandle, TelemetryObserver, Tracker, TrackerError};
