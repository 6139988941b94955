//! Note editor state machine.
//!
//! The editor stages a draft before it is committed to the note store:
//!
//! ```text
//! Idle --open_new--> Composing --commit--> Idle   (create)
//! any  --begin_edit--> Editing --commit--> Idle   (update)
//! Composing / Editing --cancel--> Idle            (discard)
//! ```

use crate::models::Note;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Idle,
    Composing,
    Editing { note_id: i64 },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Draft {
    pub content: String,
    pub image: Option<String>,
}

/// What a successful commit asks the store to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Commit {
    Create(Draft),
    Update { note_id: i64, draft: Draft },
}

#[derive(Debug, Clone)]
pub struct NoteEditor {
    mode: EditorMode,
    draft: Draft,
}

impl Default for NoteEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl NoteEditor {
    pub fn new() -> Self {
        Self {
            mode: EditorMode::Idle,
            draft: Draft::default(),
        }
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn is_open(&self) -> bool {
        self.mode != EditorMode::Idle
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn editing_id(&self) -> Option<i64> {
        match self.mode {
            EditorMode::Editing { note_id } => Some(note_id),
            _ => None,
        }
    }

    /// Open an empty editor for a new note. Does nothing if already open.
    pub fn open_new(&mut self) -> bool {
        if self.is_open() {
            return false;
        }
        self.mode = EditorMode::Composing;
        true
    }

    /// Load `note` into the draft for editing, discarding any draft in progress.
    pub fn begin_edit(&mut self, note: &Note) {
        self.mode = EditorMode::Editing { note_id: note.id };
        self.draft = Draft {
            content: note.content.clone(),
            image: note.image.clone(),
        };
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        if self.is_open() {
            self.draft.content = content.into();
        }
    }

    pub fn set_image(&mut self, image: String) {
        if self.is_open() {
            self.draft.image = Some(image);
        }
    }

    pub fn clear_image(&mut self) {
        self.draft.image = None;
    }

    /// Close the editor and hand back the draft.
    ///
    /// Returns `None`, leaving the editor untouched, when the editor is idle
    /// or the draft has no visible text.
    pub fn commit(&mut self) -> Option<Commit> {
        if is_blank_markup(&self.draft.content) {
            return None;
        }

        let commit = match self.mode {
            EditorMode::Idle => return None,
            EditorMode::Composing => Commit::Create(std::mem::take(&mut self.draft)),
            EditorMode::Editing { note_id } => Commit::Update {
                note_id,
                draft: std::mem::take(&mut self.draft),
            },
        };
        self.mode = EditorMode::Idle;
        Some(commit)
    }

    /// Close the editor without saving.
    pub fn cancel(&mut self) {
        self.reset();
    }

    pub fn reset(&mut self) {
        self.mode = EditorMode::Idle;
        self.draft = Draft::default();
    }
}

/// True when `markup` has no visible text, e.g. `""`, `"  "` or `"<p><br></p>"`.
pub fn is_blank_markup(markup: &str) -> bool {
    if markup.trim().is_empty() {
        return true;
    }
    let text = ammonia::Builder::empty().clean(markup).to_string();
    text.replace("&nbsp;", " ")
        .replace('\u{a0}', " ")
        .trim()
        .is_empty()
}
