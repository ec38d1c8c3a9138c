//! Error type shared by the store, storage backends and backups

use std::path::PathBuf;

/// Every failure is local and leaves in-memory state as it was, except
/// `Persistence`, which is raised after the mutation has already been applied.
#[derive(Debug, thiserror::Error)]
pub enum HabitError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("No habit with id {0}")]
    NotFound(String),

    #[error("Malformed document: {0}")]
    Format(String),

    #[error("Failed to persist {}: {source}", .path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Reset requires explicit confirmation")]
    Unconfirmed,
}

impl HabitError {
    pub(crate) fn persistence(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Persistence {
            path: path.into(),
            source,
        }
    }
}

impl From<serde_json::Error> for HabitError {
    fn from(err: serde_json::Error) -> Self {
        Self::Format(err.to_string())
    }
}
