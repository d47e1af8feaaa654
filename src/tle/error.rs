use thiserror::Error;

#[derive(Debug, Error)]
pub enum TleError {
    #[error("invalid tle format: expected 2 or 3 non-empty lines, got {0}")]
    LineCount(usize),
    #[error("invalid tle format: line {line}: {reason}")]
    Line { line: u8, reason: String },
    #[error("invalid tle: {0}")]
    Elements(#[from] sgp4::TleError),
}
