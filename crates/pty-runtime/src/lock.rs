//! # Ledger File Locking
//!
//! One invocation at a time per ledger file. The engine itself has no
//! concurrency control, so every invocation holds an exclusive advisory lock
//! on `<data-file>.lock` from before the first read until after the last
//! write.
//!
//! Uses `fs2` (flock on Unix, LockFile on Windows).

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use thiserror::Error;
use tracing::debug;

/// Errors from ledger locking.
#[derive(Debug, Error)]
pub enum LockError {
    #[error("failed to create lock file {path}: {source}")]
    CreateFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Non-blocking acquisition found the lock held.
    #[error("ledger already in use{} ({})", .pid.map(|p| format!(" by process {p}")).unwrap_or_default(), .path.display())]
    AlreadyLocked { pid: Option<u32>, path: PathBuf },

    #[error("failed to lock {path}: {source}")]
    LockFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write PID to lock file: {0}")]
    WriteFailed(#[source] io::Error),
}

/// Exclusive lock on a ledger file, released on drop.
#[derive(Debug)]
pub struct LedgerLock {
    file: File,
    path: PathBuf,
    pid: u32,
}

impl LedgerLock {
    /// Block until the lock is free, then take it.
    pub fn acquire(lock_path: &Path) -> Result<Self, LockError> {
        let file = Self::open(lock_path)?;
        file.lock_exclusive().map_err(|source| LockError::LockFailed {
            path: lock_path.to_path_buf(),
            source,
        })?;
        Self::finish(file, lock_path)
    }

    /// Take the lock or fail with `AlreadyLocked`.
    pub fn try_acquire(lock_path: &Path) -> Result<Self, LockError> {
        let file = Self::open(lock_path)?;
        if file.try_lock_exclusive().is_err() {
            return Err(LockError::AlreadyLocked {
                pid: Self::read_existing_pid(lock_path),
                path: lock_path.to_path_buf(),
            });
        }
        Self::finish(file, lock_path)
    }

    pub fn pid(&self) -> u32 {
        self.pid
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(lock_path: &Path) -> Result<File, LockError> {
        let create_failed = |source| LockError::CreateFailed {
            path: lock_path.to_path_buf(),
            source,
        };
        if let Some(parent) = lock_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(create_failed)?;
            }
        }
        // No truncation before the lock is held; the PID of a holder must survive.
        OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(lock_path)
            .map_err(create_failed)
    }

    fn finish(mut file: File, lock_path: &Path) -> Result<Self, LockError> {
        let pid = std::process::id();
        file.set_len(0).map_err(LockError::WriteFailed)?;
        writeln!(file, "{pid}").map_err(LockError::WriteFailed)?;
        file.sync_all().map_err(LockError::WriteFailed)?;
        debug!(path = %lock_path.display(), pid, "Ledger lock acquired");

        Ok(Self {
            file,
            path: lock_path.to_path_buf(),
            pid,
        })
    }

    fn read_existing_pid(path: &Path) -> Option<u32> {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|s| s.trim().parse().ok())
    }
}

impl Drop for LedgerLock {
    fn drop(&mut self) {
        // The file stays; removing it would race a waiting process.
        let _ = self.file.unlock();
    }
}
