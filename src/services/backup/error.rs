use thiserror::Error;

use crate::models::theme_profile::ProfileValidationError;
use crate::services::profile::ProfileStoreError;

/// Errors from the backup/restore flow.
#[derive(Error, Debug)]
pub enum BackupError {
    /// The caller-side cap on stored profiles is reached.
    #[error("Backup limit of {0} theme profiles reached")]
    LimitReached(usize),

    /// The profile failed validation before reaching the store.
    #[error("Invalid theme profile: {0}")]
    Invalid(#[from] ProfileValidationError),

    #[error(transparent)]
    Store(#[from] ProfileStoreError),

    /// Backup/restore is disabled for this session.
    #[error("Theme backups are unavailable: {0}")]
    Unavailable(String),

    #[error("Theme profile file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Theme profile file is not valid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize theme profile: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Applying a restored profile through the overlay service failed.
    #[error(transparent)]
    Apply(#[from] anyhow::Error),
}
