//! Persisted history log

use crate::block::HistoryBlock;
use crate::error::HistoryError;
use crate::store::KeyValueStore;

/// Append-only list of [`HistoryBlock`]s kept as JSON under one slot
///
/// Every operation reads the slot fresh, so several logs over the same
/// store observe each other's writes.
#[derive(Debug)]
pub struct HistoryLog<S> {
    store: S,
    slot: String,
}

impl<S: KeyValueStore> HistoryLog<S> {
    /// Create log over `store` at `slot`
    #[inline]
    #[must_use]
    pub fn new(store: S, slot: impl Into<String>) -> Self {
        Self {
            store,
            slot: slot.into(),
        }
    }

    /// Backing store
    #[inline]
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Slot name
    #[inline]
    #[must_use]
    pub fn slot(&self) -> &str {
        &self.slot
    }

    /// All blocks, oldest first
    ///
    /// A missing, unreadable or corrupt slot reads as an empty log.
    #[must_use]
    pub fn load(&self) -> Vec<HistoryBlock> {
        self.try_load().unwrap_or_else(|e| {
            tracing::warn!(slot = %self.slot, error = %e, "history slot unreadable");
            Vec::new()
        })
    }

    /// All blocks, oldest first, failing when the store cannot be read
    ///
    /// A missing or corrupt slot still reads as an empty log.
    ///
    /// # Errors
    /// Returns `HistoryError::Store` if the backing store fails.
    pub fn try_load(&self) -> Result<Vec<HistoryBlock>, HistoryError> {
        let Some(text) = self.store.get(&self.slot)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str(&text) {
            Ok(blocks) => Ok(blocks),
            Err(e) => {
                tracing::warn!(slot = %self.slot, error = %e, "history slot corrupt, ignoring");
                Ok(Vec::new())
            }
        }
    }

    /// Number of stored blocks
    #[must_use]
    pub fn len(&self) -> usize {
        self.load().len()
    }

    /// True when no block is stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append a block; returns the new block count
    ///
    /// # Errors
    /// Returns error if the log cannot be read, serialized or written; the
    /// stored blocks are left untouched.
    pub fn append(&self, block: HistoryBlock) -> Result<usize, HistoryError> {
        let mut blocks = self.try_load()?;
        tracing::info!(
            slot = %self.slot,
            saved_at = %block.saved_at,
            changes = block.len(),
            "history block appended"
        );
        blocks.push(block);
        self.persist(&blocks)?;
        Ok(blocks.len())
    }

    /// Remove the block at `position` (0 = oldest) and return it
    ///
    /// # Errors
    /// Returns `BlockOutOfRange` for a bad position, or a store error.
    pub fn remove(&self, position: usize) -> Result<HistoryBlock, HistoryError> {
        let mut blocks = self.try_load()?;
        if position >= blocks.len() {
            return Err(HistoryError::BlockOutOfRange {
                position,
                len: blocks.len(),
            });
        }
        let removed = blocks.remove(position);
        self.persist(&blocks)?;
        tracing::info!(slot = %self.slot, position, "history block removed");
        Ok(removed)
    }

    /// Delete every block
    ///
    /// # Errors
    /// Returns error if the slot cannot be removed.
    pub fn clear(&self) -> Result<(), HistoryError> {
        self.store.remove(&self.slot)?;
        tracing::info!(slot = %self.slot, "history cleared");
        Ok(())
    }

    fn persist(&self, blocks: &[HistoryBlock]) -> Result<(), HistoryError> {
        let text = serde_json::to_string(blocks)?;
        self.store.set(&self.slot, &text)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::store::MemoryStore;
    use std::cell::Cell;

    fn block(at: &str) -> HistoryBlock {
        HistoryBlock::new(at, Vec::new())
    }

    #[test]
    fn append_remove_clear() {
        let log = HistoryLog::new(MemoryStore::new(), "h");
        assert!(log.is_empty());

        assert_eq!(log.append(block("1")).unwrap(), 1);
        assert_eq!(log.append(block("2")).unwrap(), 2);
        assert_eq!(log.append(block("3")).unwrap(), 3);

        let removed = log.remove(1).unwrap();
        assert_eq!(removed.saved_at, "2");
        let left: Vec<_> = log.load().into_iter().map(|b| b.saved_at).collect();
        assert_eq!(left, vec!["1", "3"]);

        log.clear().unwrap();
        assert!(log.is_empty());
        assert!(log.store().is_empty());
    }

    #[test]
    fn remove_out_of_range() {
        let log = HistoryLog::new(MemoryStore::new(), "h");
        log.append(block("1")).unwrap();

        let err = log.remove(1).unwrap_err();
        assert!(matches!(
            err,
            HistoryError::BlockOutOfRange { position: 1, len: 1 }
        ));
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn corrupt_slot_reads_empty() {
        let store = MemoryStore::new();
        store.set("h", "{not json").unwrap();
        let log = HistoryLog::new(&store, "h");

        assert!(log.load().is_empty());

        // Appending replaces the corrupt payload.
        log.append(block("1")).unwrap();
        assert_eq!(log.len(), 1);
    }

    /// Store whose reads fail while `broken` is set
    struct FlakyStore {
        inner: MemoryStore,
        broken: Cell<bool>,
    }

    impl KeyValueStore for FlakyStore {
        fn get(&self, slot: &str) -> Result<Option<String>, StoreError> {
            if self.broken.get() {
                return Err(StoreError::Io {
                    path: slot.into(),
                    source: std::io::Error::new(std::io::ErrorKind::Other, "disk gone"),
                });
            }
            self.inner.get(slot)
        }

        fn set(&self, slot: &str, value: &str) -> Result<(), StoreError> {
            self.inner.set(slot, value)
        }

        fn remove(&self, slot: &str) -> Result<(), StoreError> {
            self.inner.remove(slot)
        }
    }

    #[test]
    fn read_failure_keeps_stored_blocks() {
        let store = FlakyStore {
            inner: MemoryStore::new(),
            broken: Cell::new(false),
        };
        let log = HistoryLog::new(&store, "h");
        log.append(block("1")).unwrap();
        log.append(block("2")).unwrap();

        store.broken.set(true);
        assert!(log.load().is_empty());
        assert!(matches!(log.try_load(), Err(HistoryError::Store(_))));
        assert!(matches!(log.append(block("3")), Err(HistoryError::Store(_))));
        assert!(matches!(log.remove(0), Err(HistoryError::Store(_))));

        store.broken.set(false);
        let kept: Vec<_> = log.load().into_iter().map(|b| b.saved_at).collect();
        assert_eq!(kept, vec!["1", "2"]);
    }

    #[test]
    fn slots_are_independent() {
        let store = MemoryStore::new();
        let a = HistoryLog::new(&store, "a");
        let b = HistoryLog::new(&store, "b");

        a.append(block("1")).unwrap();
        assert_eq!(a.len(), 1);
        assert!(b.is_empty());
    }
}
