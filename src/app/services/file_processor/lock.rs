//! Single-instance guard for an input directory

use std::fs::{File, OpenOptions, TryLockError};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum LockError {
    #[error("'{}' is held by another instance", .path.display())]
    Held { path: PathBuf },

    #[error("failed to lock '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Exclusive lock on a file inside the input directory
///
/// Acquired without waiting; released when the guard is dropped, so every
/// exit path of a run (including early returns and errors) unlocks it. The
/// lock file itself is left in place.
#[derive(Debug)]
pub struct DirectoryLock {
    file: File,
    path: PathBuf,
}

impl DirectoryLock {
    /// Try to lock `dir/lock_file_name`, failing fast if it is already held
    pub fn acquire(dir: &Path, lock_file_name: &str) -> Result<Self, LockError> {
        let path = dir.join(lock_file_name);

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .map_err(|source| LockError::Io {
                path: path.clone(),
                source,
            })?;

        match file.try_lock() {
            Ok(()) => {
                debug!("Acquired lock {}", path.display());
                Ok(Self { file, path })
            }
            Err(TryLockError::WouldBlock) => Err(LockError::Held { path }),
            Err(TryLockError::Error(source)) => Err(LockError::Io { path, source }),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for DirectoryLock {
    fn drop(&mut self) {
        match self.file.unlock() {
            Ok(()) => debug!("Released lock {}", self.path.display()),
            Err(e) => warn!("Failed to release lock {}: {}", self.path.display(), e),
        }
    }
}
