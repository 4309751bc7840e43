//! Error types for file locking

use std::path::PathBuf;
use thiserror::Error;

use super::LockMode;

#[derive(Error, Debug)]
pub enum LockError {
    #[error("timeout waiting for {mode:?} lock on {}", path.display())]
    Timeout { path: PathBuf, mode: LockMode },

    #[error("I/O error during {operation} on {}: {source}", path.display())]
    Io {
        #[source]
        source: std::io::Error,
        path: PathBuf,
        operation: &'static str,
    },
}
