//! Core domain errors.

use thiserror::Error;

use crate::envelope::ErrorEnvelope;

/// Errors produced while interpreting a catalog document.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Body is not valid JSON, or does not fit the catalog schema.
    #[error("Malformed catalog document: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Top-level JSON value is not an object.
    #[error("Malformed catalog document: expected a JSON object, found {0}")]
    NotAnObject(&'static str),

    /// The document is the server's error envelope.
    #[error("Server reported an error: {0}")]
    ServerReported(ErrorEnvelope),
}

impl CoreError {
    /// True for errors caused by an unparsable or mis-shaped body.
    pub fn is_data_format(&self) -> bool {
        matches!(self, Self::Malformed(_) | Self::NotAnObject(_))
    }
}
