//! Error types for parsing in vitals-types.

use thiserror::Error;

/// Errors that can occur when parsing vital-sign input.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseError {
    /// The tag does not name a known sensor.
    #[error("Unknown sensor type: {0}")]
    UnknownSensor(String),
}

/// Result type alias using vitals-types' ParseError type.
pub type ParseResult<T> = std::result::Result<T, ParseError>;
