//! Errors raised while reading time values.

use thiserror::Error;

/// Errors that can occur while parsing a time against a [`TimeFormat`].
///
/// [`TimeFormat`]: crate::TimeFormat
#[derive(Debug, Error)]
pub enum TimeParseError {
    /// The input does not match the pattern.
    #[error("`{input}` does not match time format `{pattern}`: {source}")]
    Mismatch {
        /// Rejected input.
        input: String,
        /// Pattern the input was read with.
        pattern: String,
        /// Underlying chrono error.
        #[source]
        source: chrono::format::ParseError,
    },
    /// The pattern has no hour, minute or second token to read.
    #[error("time format `{0}` has no hour, minute or second token")]
    NoTimeFields(String),
}
