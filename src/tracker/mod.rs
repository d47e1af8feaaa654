mod error;
mod observer;
mod scheduler;
mod session;
mod tracker;

pub use error::TrackerError;
pub use observer::{LogObserver, TelemetryObserver};
pub use scheduler::{SchedulerState, UpdateScheduler};
pub use session::{SessionHandle, TrackingSession};
pub use tracker::{Tracker, TrackerMode, TrackerStatus};
