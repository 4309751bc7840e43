//! RAII lock guard

use std::fs::File;
use std::path::PathBuf;

use super::LockMode;

/// Holds an fs2 advisory lock until dropped.
///
/// fs2 locks are released when the file descriptor closes, so dropping the
/// guard (and with it `file`) is the unlock.
#[derive(Debug)]
pub struct LockGuard {
    #[allow(dead_code)]
    pub(crate) file: File,
    pub(crate) path: PathBuf,
    pub(crate) mode: LockMode,
}

impl LockGuard {
    pub fn mode(&self) -> LockMode {
        self.mode
    }
}

impl Drop for LockGuard {
    fn drop(&mut self) {
        tracing::trace!(path = %self.path.display(), mode = ?self.mode, "lock released");
    }
}
