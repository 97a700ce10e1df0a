//! Engine error types

use setlist_store::StoreError;
use thiserror::Error;

/// Errors that can occur in the recommendation engine
#[derive(Error, Debug)]
pub enum EngineError {
    /// Seed input was malformed (not a list of strings)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Loading a corpus snapshot failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl EngineError {
    /// Whether the corpus source was missing
    pub fn is_not_found(&self) -> bool {
        matches!(self, EngineError::Store(StoreError::ModelNotFound(_)))
    }

    /// Whether the corpus was readable but failed validation
    pub fn is_corrupt(&self) -> bool {
        matches!(self, EngineError::Store(e) if e.is_corrupt())
    }
}
