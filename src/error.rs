//! Error type shared by the store, the repositories and the HTTP layer.

use crate::types::{CoasterId, WagonId};
use std::path::PathBuf;
use thiserror::Error;

/// Result alias for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

#[derive(Debug, Error)]
pub enum RegistryError {
    /// A required field was absent, zero or empty.
    #[error("missing required field '{field}'")]
    Validation { field: &'static str },

    #[error("coaster not found: {0}")]
    CoasterNotFound(CoasterId),

    #[error("wagon not found: {wagon_id} (coaster {coaster_id})")]
    WagonNotFound {
        coaster_id: CoasterId,
        wagon_id: WagonId,
    },

    /// The backing file exists but is not a JSON array of coasters.
    #[error("corrupt data in {}: {source}", path.display())]
    CorruptData {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("serialize coasters: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("store i/o: {0}")]
    Io(#[from] std::io::Error),

    /// The blocking task running a registry call panicked or was cancelled.
    #[error("registry task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl RegistryError {
    /// True for failures caused by the request rather than by the store.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            RegistryError::Validation { .. }
                | RegistryError::CoasterNotFound(_)
                | RegistryError::WagonNotFound { .. }
        )
    }
}
