//! Per-path mutual exclusion
//!
//! Runs serialize on the spec file they mutate and on the project
//! directory they write. Callers always take the spec lock before the
//! project lock. Locks are process-local.

use dashmap::DashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Async mutex per filesystem path
#[derive(Debug, Clone, Default)]
pub struct PathLocks {
    inner: Arc<DashMap<PathBuf, Arc<Mutex<()>>>>,
}

impl PathLocks {
    /// Create empty lock table
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `path`
    pub async fn lock(&self, path: impl AsRef<Path>) -> OwnedMutexGuard<()> {
        let mutex = self
            .inner
            .entry(path.as_ref().to_path_buf())
            .or_default()
            .clone();
        mutex.lock_owned().await
    }

    /// Number of distinct paths seen
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Whether no path was ever locked
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
