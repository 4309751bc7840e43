use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::PathBuf;

use super::ResourceStore;
use crate::error::{Result, TplkitError};

/// In-memory store for embedding and for exercising pipeline stages without a
/// filesystem.
///
/// Directories are tracked so [`ResourceStore::ensure_directory`] can be made
/// to fail with [`MemoryStore::deny_directory`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    files: RefCell<BTreeMap<String, Vec<u8>>>,
    dirs: RefCell<BTreeSet<String>>,
    denied_dirs: BTreeSet<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(self, key: &str, text: &str) -> Self {
        self.insert(key, text);
        self
    }

    pub fn insert(&self, key: &str, text: &str) {
        self.files
            .borrow_mut()
            .insert(key.to_string(), text.as_bytes().to_vec());
    }

    /// Make `ensure_directory(key)` fail with a permission error
    pub fn deny_directory(mut self, key: &str) -> Self {
        self.denied_dirs.insert(key.to_string());
        self
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.files
            .borrow()
            .get(key)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    pub fn has_directory(&self, key: &str) -> bool {
        self.dirs.borrow().contains(key)
    }
}

fn not_found(op: &'static str, key: &str) -> TplkitError {
    TplkitError::Store {
        op,
        path: PathBuf::from(key),
        source: io::Error::from(io::ErrorKind::NotFound),
    }
}

impl ResourceStore for MemoryStore {
    fn exists(&self, key: &str) -> bool {
        self.files.borrow().contains_key(key) || self.dirs.borrow().contains(key)
    }

    fn size(&self, key: &str) -> Result<u64> {
        self.files
            .borrow()
            .get(key)
            .map(|bytes| bytes.len() as u64)
            .ok_or_else(|| not_found("stat", key))
    }

    fn read_all(&self, key: &str) -> Result<Vec<u8>> {
        self.files
            .borrow()
            .get(key)
            .cloned()
            .ok_or_else(|| not_found("read", key))
    }

    fn write_all(&self, key: &str, bytes: &[u8]) -> Result<()> {
        self.files.borrow_mut().insert(key.to_string(), bytes.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.files.borrow_mut().remove(key);
        Ok(())
    }

    fn ensure_directory(&self, key: &str) -> Result<()> {
        if self.denied_dirs.contains(key) {
            return Err(TplkitError::Store {
                op: "create directory",
                path: PathBuf::from(key),
                source: io::Error::from(io::ErrorKind::PermissionDenied),
            });
        }
        self.dirs.borrow_mut().insert(key.to_string());
        Ok(())
    }
}
