//! Cart storage errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CartsStorageError {
    #[error("failed to access cart storage: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode cart: {0}")]
    Encode(#[from] serde_json::Error),
}
