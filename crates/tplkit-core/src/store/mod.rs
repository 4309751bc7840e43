//! Storage boundary of the loader
//!
//! Everything the pipeline reads or writes goes through a [`ResourceStore`]:
//! template sources keyed `<name><ext>` and the cache index at
//! [`crate::config::consts::CACHE_FILE`]. Keys are `/`-separated and relative
//! to the templates folder.

mod fs;
mod memory;

pub use fs::FsStore;
pub use memory::MemoryStore;

use crate::error::Result;
use crate::lock::{LockGuard, LockMode};

/// Lock held on a resource for the duration of a read-modify-write
#[derive(Debug)]
pub enum StoreLock {
    /// Backing store has no cross-process contention
    Unlocked,
    /// fs2 advisory lock, released on drop
    File(LockGuard),
}

pub trait ResourceStore {
    fn exists(&self, key: &str) -> bool;

    /// Size of the resource in bytes
    fn size(&self, key: &str) -> Result<u64>;

    fn read_all(&self, key: &str) -> Result<Vec<u8>>;

    fn write_all(&self, key: &str, bytes: &[u8]) -> Result<()>;

    /// Remove the resource; removing a missing resource is not an error
    fn remove(&self, key: &str) -> Result<()>;

    /// Create the directory `key` (and parents); `""` is the store root
    fn ensure_directory(&self, key: &str) -> Result<()>;

    fn lock(&self, _key: &str, _mode: LockMode) -> Result<StoreLock> {
        Ok(StoreLock::Unlocked)
    }

    /// Read a resource as UTF-8 text, replacing invalid sequences
    fn read_to_string(&self, key: &str) -> Result<String> {
        let bytes = self.read_all(key)?;
        Ok(match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        })
    }
}

impl<S: ResourceStore + ?Sized> ResourceStore for &S {
    fn exists(&self, key: &str) -> bool {
        (**self).exists(key)
    }

    fn size(&self, key: &str) -> Result<u64> {
        (**self).size(key)
    }

    fn read_all(&self, key: &str) -> Result<Vec<u8>> {
        (**self).read_all(key)
    }

    fn write_all(&self, key: &str, bytes: &[u8]) -> Result<()> {
        (**self).write_all(key, bytes)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }

    fn ensure_directory(&self, key: &str) -> Result<()> {
        (**self).ensure_directory(key)
    }

    fn lock(&self, key: &str, mode: LockMode) -> Result<StoreLock> {
        (**self).lock(key, mode)
    }
}
