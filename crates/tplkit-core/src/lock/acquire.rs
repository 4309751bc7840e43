//! Lock acquisition with retry and timeout

use super::{LockError, LockGuard, LockMode};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

const INITIAL_RETRY_DELAY: Duration = Duration::from_millis(10);
const MAX_RETRY_DELAY: Duration = Duration::from_millis(500);
const SLOW_LOCK_THRESHOLD: Duration = Duration::from_secs(2);

pub(crate) fn acquire_with_retry(
    lock_path: &Path,
    mode: LockMode,
    timeout: Duration,
) -> Result<LockGuard, LockError> {
    if let Some(parent) = lock_path.parent() {
        fs::create_dir_all(parent).map_err(|e| LockError::Io {
            source: e,
            path: lock_path.to_path_buf(),
            operation: "create parent directories",
        })?;
    }

    let start = Instant::now();
    let mut retry_delay = INITIAL_RETRY_DELAY;
    let mut reported_slow = false;

    loop {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(lock_path)
            .map_err(|e| LockError::Io {
                source: e,
                path: lock_path.to_path_buf(),
                operation: "open lock file",
            })?;

        match try_lock(&file, mode) {
            Ok(()) => {
                return Ok(LockGuard {
                    file,
                    path: lock_path.to_path_buf(),
                    mode,
                });
            }
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => {
                let elapsed = start.elapsed();
                if elapsed >= timeout {
                    return Err(LockError::Timeout {
                        path: lock_path.to_path_buf(),
                        mode,
                    });
                }

                if !reported_slow && elapsed >= SLOW_LOCK_THRESHOLD {
                    tracing::warn!(
                        path = %lock_path.display(),
                        ?mode,
                        "waiting for lock held by another process"
                    );
                    reported_slow = true;
                }

                // Never sleep past the deadline; the next pass re-checks it
                thread::sleep(retry_delay.min(timeout.saturating_sub(elapsed)));
                retry_delay = (retry_delay * 2).min(MAX_RETRY_DELAY);
            }
            Err(e) => {
                return Err(LockError::Io {
                    source: e,
                    path: lock_path.to_path_buf(),
                    operation: "acquire lock",
                });
            }
        }
    }
}

fn try_lock(file: &File, mode: LockMode) -> io::Result<()> {
    let result = match mode {
        // std::fs::File has inherent lock methods with other signatures
        LockMode::Exclusive => FileExt::try_lock_exclusive(file),
        LockMode::Shared => FileExt::try_lock_shared(file),
    };
    // fs2 reports contention as a platform error on some targets
    result.map_err(|e| {
        if e.raw_os_error() == fs2::lock_contended_error().raw_os_error() {
            io::Error::from(io::ErrorKind::WouldBlock)
        } else {
            e
        }
    })
}
