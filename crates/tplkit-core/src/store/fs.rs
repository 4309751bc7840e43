use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tempfile::NamedTempFile;

use super::{ResourceStore, StoreLock};
use crate::error::{Result, TplkitError};
use crate::lock::{self, LockMode};

const WRITE_LOCK_TIMEOUT: Duration = Duration::from_secs(30);
// Readers: shorter timeout, a miss is cheap
const READ_LOCK_TIMEOUT: Duration = Duration::from_secs(5);

/// Store rooted at a templates folder on the local filesystem
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_of(&self, key: &str) -> PathBuf {
        if key.is_empty() {
            return self.root.clone();
        }
        key.split('/')
            .filter(|part| !part.is_empty())
            .fold(self.root.clone(), |path, part| path.join(part))
    }
}

fn store_err(op: &'static str, path: &Path) -> impl FnOnce(std::io::Error) -> TplkitError {
    let path = path.to_path_buf();
    move |source| TplkitError::Store { op, path, source }
}

impl ResourceStore for FsStore {
    fn exists(&self, key: &str) -> bool {
        self.path_of(key).exists()
    }

    fn size(&self, key: &str) -> Result<u64> {
        let path = self.path_of(key);
        let meta = fs::metadata(&path).map_err(store_err("stat", &path))?;
        Ok(meta.len())
    }

    fn read_all(&self, key: &str) -> Result<Vec<u8>> {
        let path = self.path_of(key);
        fs::read(&path).map_err(store_err("read", &path))
    }

    /// Write through a temp file in the same directory and persist over the
    /// target so readers never see a partial file.
    fn write_all(&self, key: &str, bytes: &[u8]) -> Result<()> {
        let path = self.path_of(key);
        let parent = path.parent().unwrap_or(&self.root).to_path_buf();
        fs::create_dir_all(&parent).map_err(store_err("create directory", &parent))?;

        let mut temp_file =
            NamedTempFile::new_in(&parent).map_err(store_err("create temp file in", &parent))?;
        temp_file
            .write_all(bytes)
            .map_err(store_err("write temp file for", &path))?;
        temp_file
            .as_file()
            .sync_all()
            .map_err(store_err("sync temp file for", &path))?;
        temp_file
            .persist(&path)
            .map_err(|e| store_err("persist", &path)(e.error))?;

        // Fsync parent directory for durability (Unix only)
        #[cfg(unix)]
        {
            let dir = File::open(&parent).map_err(store_err("open directory", &parent))?;
            dir.sync_all().map_err(store_err("sync directory", &parent))?;
        }

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_of(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(store_err("remove", &path)(e)),
        }
    }

    fn ensure_directory(&self, key: &str) -> Result<()> {
        let path = self.path_of(key);
        fs::create_dir_all(&path).map_err(store_err("create directory", &path))
    }

    fn lock(&self, key: &str, mode: LockMode) -> Result<StoreLock> {
        let mut lock_path = self.path_of(key).into_os_string();
        lock_path.push(".lock");
        let timeout = match mode {
            LockMode::Exclusive => WRITE_LOCK_TIMEOUT,
            LockMode::Shared => READ_LOCK_TIMEOUT,
        };
        let guard = lock::acquire(Path::new(&lock_path), mode, timeout)?;
        Ok(StoreLock::File(guard))
    }
}
