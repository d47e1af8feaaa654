mod error;
mod parsing;
mod record;

pub use error::TleError;
pub use parsing::{checksum, parse_tle_lines, validate_line};
pub use record::OrbitalElementRecord;
