//! Persistence for review progress.
//!
//! Stores always hand back a usable snapshot on load: a missing or damaged
//! backing file reads as "nothing reviewed yet". Saves overwrite the whole
//! snapshot and report failures to the caller.

use crate::error::StoreError;
use crate::types::ProgressSnapshot;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;

/// Durable storage for the review snapshot.
pub trait ReviewStore: Send + Sync {
    /// Load the stored snapshot, or an empty one if none can be read.
    fn load(&self) -> ProgressSnapshot;

    /// Overwrite the stored snapshot.
    fn save(&self, snapshot: &ProgressSnapshot) -> Result<(), StoreError>;
}

impl<T: ReviewStore + ?Sized> ReviewStore for Arc<T> {
    fn load(&self) -> ProgressSnapshot {
        (**self).load()
    }

    fn save(&self, snapshot: &ProgressSnapshot) -> Result<(), StoreError> {
        (**self).save(snapshot)
    }
}

/// JSON file store written via a unique temp file and rename.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory the snapshot lives in, created if missing.
    fn ensure_dir(&self) -> Result<PathBuf, StoreError> {
        match self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                fs::create_dir_all(parent)?;
                Ok(parent.to_path_buf())
            }
            None => Ok(PathBuf::from(".")),
        }
    }

    fn read(&self) -> Result<ProgressSnapshot, StoreError> {
        let content = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

impl ReviewStore for JsonFileStore {
    fn load(&self) -> ProgressSnapshot {
        if !self.path.exists() {
            tracing::info!(path = %self.path.display(), "no review progress yet, starting fresh");
            return ProgressSnapshot::default();
        }

        match self.read() {
            Ok(snapshot) => {
                tracing::info!(
                    path = %self.path.display(),
                    items = snapshot.items.len(),
                    "loaded review progress"
                );
                snapshot
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "review progress unreadable, starting fresh"
                );
                ProgressSnapshot::default()
            }
        }
    }

    fn save(&self, snapshot: &ProgressSnapshot) -> Result<(), StoreError> {
        let dir = self.ensure_dir()?;

        // One temp file per save; it is removed on drop if never persisted.
        let mut tmp = NamedTempFile::new_in(&dir)?;
        write_snapshot(tmp.as_file_mut(), snapshot)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

fn write_snapshot(file: &mut fs::File, snapshot: &ProgressSnapshot) -> Result<(), StoreError> {
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, snapshot)?;
    writer.flush()?;
    Ok(())
}

/// In-memory store, mainly for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    snapshot: Mutex<ProgressSnapshot>,
    failing: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: ProgressSnapshot) -> Self {
        Self {
            snapshot: Mutex::new(snapshot),
            failing: AtomicBool::new(false),
        }
    }

    /// Make subsequent saves fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Copy of what was last saved.
    pub fn saved(&self) -> ProgressSnapshot {
        self.snapshot
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }
}

impl ReviewStore for MemoryStore {
    fn load(&self) -> ProgressSnapshot {
        self.saved()
    }

    fn save(&self, snapshot: &ProgressSnapshot) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store set to fail".to_string()));
        }
        let mut stored = self
            .snapshot
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store poisoned".to_string()))?;
        *stored = snapshot.clone();
        Ok(())
    }
}
