mod error;
pub mod frames;
mod propagator;
mod types;

pub use error::PropagationError;
pub use propagator::{Propagator, DEFAULT_MAX_EPOCH_OFFSET};
pub use types::{GeodeticSample, StateVector};
