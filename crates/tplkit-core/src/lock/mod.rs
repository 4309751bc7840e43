//! Advisory file locks guarding the shared cache index
//!
//! Two processes rendering with caching enabled both read-modify-write the same
//! `cache/0.cobj`. The cache manager serializes those writes by holding an
//! exclusive fs2 lock on a sibling `.lock` file, and takes a shared lock while
//! reading so a reader never observes a half-written index.

use std::path::Path;
use std::time::Duration;

mod acquire;
mod error;
mod guard;

pub use error::LockError;
pub use guard::LockGuard;


/// Lock flavour requested from [`acquire`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockMode {
    /// Single writer
    Exclusive,
    /// Many readers, no writer
    Shared,
}

/// Acquires a lock of the given mode on `lock_path`, retrying with
/// exponential backoff until `timeout` elapses.
///
/// The returned guard releases the lock when dropped.
///
/// # Examples
///
/// ```no_run
/// use tplkit_core::lock::{acquire, LockMode};
/// use std::time::Duration;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let lock_path = std::env::temp_dir().join("0.cobj.lock");
/// let guard = acquire(&lock_path, LockMode::Exclusive, Duration::from_secs(5))?;
/// // rewrite the cache index here
/// drop(guard);
/// # Ok(())
/// # }
/// ```
pub fn acquire(lock_path: &Path, mode: LockMode, timeout: Duration) -> Result<LockGuard, LockError> {
    acquire::acquire_with_retry(lock_path, mode, timeout)
}
