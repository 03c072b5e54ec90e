//! Error types for window state persistence.
//!
//! Nothing here is fatal: a malformed record is treated as a first run,
//! invalid restore targets are skipped, and store failures leave the
//! in-memory session usable.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Persisted record could not be parsed
    #[error("Malformed window state record: {0}")]
    MalformedSnapshot(#[source] serde_json::Error),

    /// Restore requested without the geometry it needs
    #[error("Cannot restore window: saved {field} is missing")]
    RestoreTargetInvalid { field: &'static str },

    /// Reading or writing the record failed
    #[error("Window state store unavailable at {}: {source}", path.display())]
    PersistenceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Record could not be serialized
    #[error("Failed to serialize window state: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
