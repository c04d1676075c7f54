//! Edition loading errors.

use thiserror::Error;

use crate::cards::EditionError;

/// Why an edition could not be loaded.
///
/// Loads are never retried automatically; the caller starts the game again.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("edition source '{reference}' unreachable: {reason}")]
    Unreachable { reference: String, reason: String },

    #[error("edition source '{reference}' is malformed: {source}")]
    Malformed {
        reference: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("edition source '{reference}' is not playable: {source}")]
    Invalid {
        reference: String,
        #[source]
        source: EditionError,
    },
}

impl LoadError {
    /// The reference that failed to load.
    #[must_use]
    pub fn reference(&self) -> &str {
        match self {
            LoadError::Unreachable { reference, .. }
            | LoadError::Malformed { reference, .. }
            | LoadError::Invalid { reference, .. } => reference,
        }
    }
}
