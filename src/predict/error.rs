use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PropagationError {
    #[error("sgp4 initialisation failed: {0}")]
    Initialization(String),
    #[error("epoch conversion failed: {0}")]
    Epoch(String),
    #[error("epoch is {minutes:.1} min from the element set epoch, beyond the {limit_minutes:.0} min validity span")]
    EpochOutOfRange { minutes: f64, limit_minutes: f64 },
    #[error("sgp4 failed at {minutes:.3} min: {reason}")]
    Model { minutes: f64, reason: String },
    #[error("orbit decayed: geocentric radius {radius_km:.1} km")]
    Decayed { radius_km: f64 },
    #[error("propagation produced a non-finite state vector")]
    NonFinite,
}
