use thiserror::Error;

/// Errors surfaced by the theme profile store.
#[derive(Error, Debug)]
pub enum ProfileStoreError {
    /// No row with this id.
    #[error("Theme profile {0} not found")]
    NotFound(i64),

    /// The underlying database failed (disk full, I/O error, locked file).
    #[error("Theme profile storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}

impl ProfileStoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Result type alias for store operations.
pub type StoreResult<T> = std::result::Result<T, ProfileStoreError>;
