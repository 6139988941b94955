//! Per-video note collections.
//!
//! A `NoteStore` is opened for one video identifier over an explicit
//! storage handle. Every mutation rewrites the whole collection under the
//! video's key. When a write fails the in-memory collection keeps the change
//! and stays authoritative for the rest of the session.

use crate::error::StorageError;
use crate::models::{Note, NOTE_DATE_FORMAT};
use crate::storage::{notes_key, KeyValueStore};
use chrono::{DateTime, Local, Utc};

pub struct NoteStore<S: KeyValueStore> {
    store: S,
    video_id: String,
    notes: Vec<Note>,
}

/// Result of opening a collection: the store plus any read failure that was
/// degraded to an empty collection.
pub struct Loaded<S: KeyValueStore> {
    pub store: NoteStore<S>,
    pub read_error: Option<StorageError>,
}

impl<S: KeyValueStore> NoteStore<S> {
    /// Open the collection for `video_id`.
    ///
    /// Absent or unparseable data yields an empty collection.
    pub fn load(store: S, video_id: &str) -> Self {
        Self::load_checked(store, video_id).store
    }

    /// Like [`NoteStore::load`], but reports a backend read failure.
    pub fn load_checked(store: S, video_id: &str) -> Loaded<S> {
        let key = notes_key(video_id);
        let (notes, read_error) = match store.get(&key) {
            Ok(Some(bytes)) => (decode_notes(video_id, &bytes), None),
            Ok(None) => (Vec::new(), None),
            Err(e) => {
                tracing::warn!(video_id, error = %e, "Cannot read notes, starting empty");
                (Vec::new(), Some(e))
            }
        };

        Loaded {
            store: Self {
                store,
                video_id: video_id.to_string(),
                notes,
            },
            read_error,
        }
    }

    pub fn video_id(&self) -> &str {
        &self.video_id
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn get(&self, id: i64) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    /// Pick an id for a note created at `now_ms`, unique in this collection.
    pub fn next_id(&self, now_ms: i64) -> i64 {
        match self.notes.iter().map(|n| n.id).max() {
            Some(max) if max >= now_ms => max + 1,
            _ => now_ms,
        }
    }

    /// Append a note and persist. A note whose id is already taken is given
    /// a fresh one so ids stay unique.
    pub fn add(&mut self, mut note: Note) -> Result<&[Note], StorageError> {
        if self.get(note.id).is_some() {
            note.id = self.next_id(note.id);
        }
        tracing::debug!(video_id = %self.video_id, note_id = note.id, "Adding note");
        self.notes.push(note);
        self.persist()?;
        Ok(&self.notes)
    }

    /// Replace the content and image of note `id`, keeping its date and time.
    /// An unknown id leaves the collection as is but still persists.
    pub fn update(
        &mut self,
        id: i64,
        content: String,
        image: Option<String>,
    ) -> Result<&[Note], StorageError> {
        match self.notes.iter_mut().find(|n| n.id == id) {
            Some(note) => {
                note.content = content;
                note.image = image;
            }
            None => tracing::debug!(video_id = %self.video_id, note_id = id, "Update of unknown note"),
        }
        self.persist()?;
        Ok(&self.notes)
    }

    pub fn delete(&mut self, id: i64) -> Result<&[Note], StorageError> {
        self.notes.retain(|n| n.id != id);
        self.persist()?;
        Ok(&self.notes)
    }

    fn persist(&self) -> Result<(), StorageError> {
        let json = serde_json::to_vec(&self.notes)?;
        self.store.put(&notes_key(&self.video_id), &json)
    }
}

fn decode_notes(video_id: &str, bytes: &[u8]) -> Vec<Note> {
    match serde_json::from_slice::<Vec<Note>>(bytes) {
        Ok(notes) => notes,
        Err(e) => {
            tracing::warn!(video_id, error = %e, "Stored notes are corrupt, treating as empty");
            Vec::new()
        }
    }
}

/// Build a new note stamped with the creation date.
pub fn new_note(id: i64, time: f64, content: String, image: Option<String>, now: DateTime<Utc>) -> Note {
    Note {
        id,
        time,
        date: now.with_timezone(&Local).format(NOTE_DATE_FORMAT).to_string(),
        content,
        image,
    }
}
