//! Key-value persistence
//!
//! The history log never talks to storage directly; it goes through a
//! [`KeyValueStore`] so the host decides where blocks live.

use crate::error::StoreError;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Minimal get/set/remove storage keyed by slot name
pub trait KeyValueStore {
    /// Read a slot; `Ok(None)` when it was never written
    ///
    /// # Errors
    /// Returns error if the backing storage cannot be read.
    fn get(&self, slot: &str) -> Result<Option<String>, StoreError>;

    /// Overwrite a slot
    ///
    /// # Errors
    /// Returns error if the backing storage cannot be written.
    fn set(&self, slot: &str, value: &str) -> Result<(), StoreError>;

    /// Delete a slot; removing a missing slot is not an error
    ///
    /// # Errors
    /// Returns error if the backing storage cannot be modified.
    fn remove(&self, slot: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, slot: &str) -> Result<Option<String>, StoreError> {
        (**self).get(slot)
    }

    fn set(&self, slot: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(slot, value)
    }

    fn remove(&self, slot: &str) -> Result<(), StoreError> {
        (**self).remove(slot)
    }
}

/// In-process store
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of written slots
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.lock().len()
    }

    /// True when no slot is written
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.lock().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, slot: &str) -> Result<Option<String>, StoreError> {
        Ok(self.slots.lock().get(slot).cloned())
    }

    fn set(&self, slot: &str, value: &str) -> Result<(), StoreError> {
        self.slots.lock().insert(slot.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, slot: &str) -> Result<(), StoreError> {
        self.slots.lock().remove(slot);
        Ok(())
    }
}

/// Directory-backed store, one `<slot>.json` file per slot
///
/// Writes go to a sibling temporary file first and are renamed into place,
/// so a crash never leaves a half-written slot behind.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Create store rooted at `dir`; the directory is created on first write
    #[inline]
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Root directory
    #[inline]
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_of(&self, slot: &str) -> Result<PathBuf, StoreError> {
        let valid = !slot.is_empty()
            && slot
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
            && !slot.starts_with('.');
        if !valid {
            return Err(StoreError::InvalidSlot(slot.to_string()));
        }
        Ok(self.dir.join(format!("{slot}.json")))
    }
}

fn io_error(path: &Path, source: std::io::Error) -> StoreError {
    StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, slot: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_of(slot)?;
        match std::fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(&path, e)),
        }
    }

    fn set(&self, slot: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_of(slot)?;
        std::fs::create_dir_all(&self.dir).map_err(|e| io_error(&self.dir, e))?;

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value).map_err(|e| io_error(&tmp, e))?;
        std::fs::rename(&tmp, &path).map_err(|e| io_error(&path, e))?;

        tracing::debug!(path = %path.display(), bytes = value.len(), "slot written");
        Ok(())
    }

    fn remove(&self, slot: &str) -> Result<(), StoreError> {
        let path = self.path_of(slot)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(&path, e)),
        }
    }
}
