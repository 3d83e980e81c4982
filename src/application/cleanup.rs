//! Cleanup of temporary pipeline artifacts
//!
//! `CleanupRegistry` owns every temporary file and directory a run creates.
//! It is shared (via `Arc`) between the pipeline's `CleanupGuard` and the
//! interrupt handler; whichever gets there first does the work, the other is
//! a no-op.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tempfile::TempDir;

#[derive(Default)]
struct TrackedResources {
    files: Vec<PathBuf>,
    dirs: Vec<TempDir>,
}

/// What a cleanup pass removed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanupReport {
    pub removed: Vec<PathBuf>,
    pub errors: Vec<String>,
}

impl CleanupReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Registry of resources to release when the run ends
#[derive(Default)]
pub struct CleanupRegistry {
    resources: Mutex<TrackedResources>,
    ran: AtomicBool,
}

impl CleanupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a file path. The file does not need to exist yet.
    pub fn track_file(&self, path: impl Into<PathBuf>) {
        let path = path.into();
        let mut resources = self.lock();
        if self.has_run() {
            drop(resources);
            // Registered after cleanup: nothing will come back for it.
            let _ = remove_file_if_present(&path);
            return;
        }
        resources.files.push(path);
    }

    /// Take ownership of a temporary directory; returns its path.
    pub fn track_dir(&self, dir: TempDir) -> PathBuf {
        let path = dir.path().to_path_buf();
        let mut resources = self.lock();
        if self.has_run() {
            drop(resources);
            let _ = dir.close();
            return path;
        }
        resources.dirs.push(dir);
        path
    }

    /// Stop tracking a file that the caller already removed.
    pub fn forget_file(&self, path: &Path) {
        self.lock().files.retain(|p| p != path);
    }

    pub fn has_run(&self) -> bool {
        self.ran.load(Ordering::SeqCst)
    }

    /// Remove everything tracked. Returns `None` if cleanup already ran.
    pub fn run(&self) -> Option<CleanupReport> {
        // Flag and drain under one lock: a concurrent `track_*` either lands
        // in this pass or sees the flag and removes its own resource.
        let TrackedResources { files, dirs } = {
            let mut resources = self.lock();
            if self.ran.swap(true, Ordering::SeqCst) {
                return None;
            }
            std::mem::take(&mut *resources)
        };
        let mut report = CleanupReport::default();

        for file in files {
            match remove_file_if_present(&file) {
                Ok(true) => report.removed.push(file),
                Ok(false) => {}
                Err(e) => report.errors.push(format!("{}: {}", file.display(), e)),
            }
        }

        for dir in dirs {
            let path = dir.path().to_path_buf();
            let existed = path.exists();
            match dir.close() {
                Ok(()) if existed => report.removed.push(path),
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => report.errors.push(format!("{}: {}", path.display(), e)),
            }
        }

        Some(report)
    }

    // A poisoned lock still holds valid paths; keep going.
    fn lock(&self) -> MutexGuard<'_, TrackedResources> {
        self.resources
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn remove_file_if_present(path: &Path) -> io::Result<bool> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

/// Scoped acquisition: cleanup runs when the guard goes out of scope,
/// on success, early return or panic alike.
pub struct CleanupGuard {
    registry: Arc<CleanupRegistry>,
}

impl CleanupGuard {
    pub fn new(registry: Arc<CleanupRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &CleanupRegistry {
        &self.registry
    }

    /// Run cleanup now and return what was removed.
    pub fn finish(self) -> Option<CleanupReport> {
        self.registry.run()
    }
}

impl Drop for CleanupGuard {
    fn drop(&mut self) {
        let _ = self.registry.run();
    }
}
