//! Error types for sayso-core

use thiserror::Error;

use crate::parser::ParseError;
use crate::types::RecordId;

/// Error type for assessment operations
#[derive(Debug, Error)]
pub enum SaysoError {
    /// A required request field was missing or empty
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A stored payload exists but could not be parsed into an assessment
    #[error("malformed payload for record {id}: {source}")]
    MalformedPayload {
        id: RecordId,
        #[source]
        source: ParseError,
    },

    /// Record store operation failed
    #[error("store error: {0}")]
    Store(String),
}

/// Result type alias for assessment operations
pub type Result<T> = std::result::Result<T, SaysoError>;
