//! Local key-value storage for note collections.
//!
//! Each video's notes live under a single key, `notes-<videoId>`, whose value
//! is the JSON-encoded array of notes. Writes always replace the whole value.

use crate::error::StorageError;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Sled tree holding the note collections.
pub const NOTES_TREE: &str = "video_notes";

/// Storage key of a video's note collection.
pub fn notes_key(video_id: &str) -> String {
    format!("notes-{}", video_id)
}

/// A last-write-wins byte store.
pub trait KeyValueStore: Clone + Send + Sync + 'static {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;
    fn put(&self, key: &str, value: &[u8]) -> Result<(), StorageError>;
}

// ============================================================================
// Sled Backend
// ============================================================================

#[derive(Clone)]
pub struct SledStore {
    tree: sled::Tree,
}

impl SledStore {
    pub fn open(db: &sled::Db) -> Result<Self, StorageError> {
        let tree = db.open_tree(NOTES_TREE)?;
        Ok(Self { tree })
    }
}

impl KeyValueStore for SledStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.tree.get(key.as_bytes())?.map(|v| v.to_vec()))
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        self.tree.insert(key.as_bytes(), value)?;
        self.tree.flush()?;
        Ok(())
    }
}

// ============================================================================
// In-Memory Backend
// ============================================================================

/// Process-local store; contents vanish with the process.
#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| StorageError::Unavailable("memory store lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| StorageError::Unavailable("memory store lock poisoned".to_string()))?;
        entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }
}
