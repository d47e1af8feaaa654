use thiserror::Error;

use crate::predict::PropagationError;
use crate::tle::TleError;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error(transparent)]
    InvalidTleFormat(#[from] TleError),
    #[error("propagation error: {0}")]
    Propagation(#[from] PropagationError),
}
