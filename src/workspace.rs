//! The interactive page's state: active video, its notes, the editor, the
//! player and the metadata block.
//!
//! Everything that depends on "which video is active" hangs off this one
//! value, so separate workspaces (e.g. in tests) never interfere.

use crate::editor::{Commit, EditorMode, NoteEditor};
use crate::metadata::{FetchTicket, MetadataSlot};
use crate::models::{MetadataState, Note};
use crate::notes::{new_note, NoteStore};
use crate::player::{EmbeddedPlayer, PlayerAdapter};
use crate::storage::KeyValueStore;
use crate::video_id::extract_video_id;
use chrono::{DateTime, Utc};

/// How a save treats the draft's image.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageChange {
    Keep,
    Replace(String),
    Remove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveRefusal {
    NoActiveVideo,
    EditorClosed,
    BlankContent,
    PlayerNotReady,
}

impl SaveRefusal {
    pub fn message(&self) -> &'static str {
        match self {
            SaveRefusal::NoActiveVideo => "Enter a video URL first.",
            SaveRefusal::EditorClosed => "The editor is not open.",
            SaveRefusal::BlankContent => "Write something before saving.",
            SaveRefusal::PlayerNotReady => "The player is not ready yet.",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    Created { note_id: i64 },
    Updated { note_id: i64 },
    Refused(SaveRefusal),
}

pub struct Workspace<S: KeyValueStore> {
    backend: S,
    notes: Option<NoteStore<S>>,
    editor: NoteEditor,
    player: PlayerAdapter<EmbeddedPlayer>,
    metadata: MetadataSlot,
    notice: Option<String>,
}

impl<S: KeyValueStore> Workspace<S> {
    pub fn new(backend: S) -> Self {
        Self {
            backend,
            notes: None,
            editor: NoteEditor::new(),
            player: PlayerAdapter::new(),
            metadata: MetadataSlot::default(),
            notice: None,
        }
    }

    // ------------------------------------------------------------------------
    // Video selection
    // ------------------------------------------------------------------------

    /// Handle the URL field. A URL with no recognizable video clears the
    /// active video. Returns a ticket when metadata should be fetched.
    pub fn select_video(&mut self, input: &str) -> Option<FetchTicket> {
        match extract_video_id(input) {
            Some(id) => self.open_video(&id),
            None => {
                if self.notes.is_some() {
                    tracing::info!("No video in input, clearing active video");
                }
                self.notes = None;
                self.editor.reset();
                self.player.reset();
                self.metadata.clear();
                None
            }
        }
    }

    /// Make `video_id` active, reloading its notes. Reselecting the active
    /// video keeps the current state and returns `None`.
    pub fn open_video(&mut self, video_id: &str) -> Option<FetchTicket> {
        if self.video_id() == Some(video_id) {
            return None;
        }

        tracing::info!(video_id, "Switching active video");
        let loaded = NoteStore::load_checked(self.backend.clone(), video_id);
        if let Some(e) = loaded.read_error {
            self.notice = Some(format!("Could not read saved notes: {}", e));
        }
        self.notes = Some(loaded.store);
        self.editor.reset();
        self.player.reset();
        Some(self.metadata.begin(video_id))
    }

    pub fn video_id(&self) -> Option<&str> {
        self.notes.as_ref().map(|n| n.video_id())
    }

    pub fn notes(&self) -> &[Note] {
        self.notes.as_ref().map(|n| n.notes()).unwrap_or(&[])
    }

    /// Notes of `video_id` if it is the active video. The in-memory list is
    /// authoritative for the active video even when a write failed.
    pub fn active_notes(&self, video_id: &str) -> Option<&[Note]> {
        self.notes
            .as_ref()
            .filter(|n| n.video_id() == video_id)
            .map(|n| n.notes())
    }

    // ------------------------------------------------------------------------
    // Metadata
    // ------------------------------------------------------------------------

    pub fn metadata(&self) -> &MetadataState {
        self.metadata.state()
    }

    /// Apply a metadata response; stale responses are dropped.
    pub fn apply_metadata(&mut self, ticket: &FetchTicket, state: MetadataState) -> bool {
        self.metadata.apply(ticket, state)
    }

    // ------------------------------------------------------------------------
    // Player
    // ------------------------------------------------------------------------

    /// Record the playback position the browser reported. The first report
    /// after a video loads is the player's ready signal.
    pub fn report_position(&mut self, seconds: f64) {
        if self.video_id().is_none() {
            return;
        }
        match self.player.handle_mut() {
            Some(handle) => handle.report_position(seconds),
            None => self.player.ready(EmbeddedPlayer::at(seconds)),
        }
    }

    pub fn player_ready(&self) -> bool {
        self.player.is_ready()
    }

    /// Seek the player to note `id`. No-op before the player is ready.
    pub fn jump_to(&mut self, id: i64) -> bool {
        let Some(time) = self.notes().iter().find(|n| n.id == id).map(|n| n.time) else {
            return false;
        };
        self.player.seek_to(time)
    }

    pub fn take_pending_seek(&mut self) -> Option<f64> {
        self.player.handle_mut().and_then(|h| h.take_pending_seek())
    }

    // ------------------------------------------------------------------------
    // Editor
    // ------------------------------------------------------------------------

    pub fn editor(&self) -> &NoteEditor {
        &self.editor
    }

    pub fn open_editor(&mut self) -> bool {
        if self.video_id().is_none() {
            return false;
        }
        self.editor.open_new()
    }

    pub fn edit_note(&mut self, id: i64) -> bool {
        let Some(note) = self.notes().iter().find(|n| n.id == id).cloned() else {
            return false;
        };
        self.editor.begin_edit(&note);
        true
    }

    pub fn cancel_edit(&mut self) {
        self.editor.cancel();
    }

    /// Keep submitted text in the open draft when a save is turned away
    /// before it reaches the store.
    pub fn stage_draft(&mut self, content: String) {
        self.editor.set_content(content);
    }

    /// Commit the draft with `content` as its body.
    ///
    /// Creating a note needs a ready player to stamp the offset; updating
    /// keeps the note's original offset.
    pub fn save_draft(&mut self, content: String, image: ImageChange, now: DateTime<Utc>) -> SaveOutcome {
        if self.notes.is_none() {
            return SaveOutcome::Refused(SaveRefusal::NoActiveVideo);
        }
        if !self.editor.is_open() {
            return SaveOutcome::Refused(SaveRefusal::EditorClosed);
        }

        self.editor.set_content(content);
        match image {
            ImageChange::Keep => {}
            ImageChange::Replace(uri) => self.editor.set_image(uri),
            ImageChange::Remove => self.editor.clear_image(),
        }

        let time = self.player.current_time();
        if self.editor.mode() == EditorMode::Composing && time.is_none() {
            return SaveOutcome::Refused(SaveRefusal::PlayerNotReady);
        }

        let Some(commit) = self.editor.commit() else {
            return SaveOutcome::Refused(SaveRefusal::BlankContent);
        };

        let Some(store) = self.notes.as_mut() else {
            return SaveOutcome::Refused(SaveRefusal::NoActiveVideo);
        };

        let (outcome, result) = match commit {
            Commit::Create(draft) => {
                let id = store.next_id(now.timestamp_millis());
                let note = new_note(id, time.unwrap_or(0.0), draft.content, draft.image, now);
                let result = store.add(note).map(|_| ());
                (SaveOutcome::Created { note_id: id }, result)
            }
            Commit::Update { note_id, draft } => {
                let result = store.update(note_id, draft.content, draft.image).map(|_| ());
                (SaveOutcome::Updated { note_id }, result)
            }
        };

        if let Err(e) = result {
            tracing::warn!(error = %e, "Notes kept in memory only");
            self.notice = Some(format!("Could not save notes: {}", e));
        }
        outcome
    }

    pub fn delete_note(&mut self, id: i64) {
        let Some(store) = self.notes.as_mut() else {
            return;
        };
        if let Err(e) = store.delete(id) {
            tracing::warn!(error = %e, "Notes kept in memory only");
            self.notice = Some(format!("Could not save notes: {}", e));
        }
        if self.editor.editing_id() == Some(id) {
            self.editor.reset();
        }
    }

    // ------------------------------------------------------------------------
    // Notices
    // ------------------------------------------------------------------------

    pub fn set_notice(&mut self, message: impl Into<String>) {
        self.notice = Some(message.into());
    }

    /// Take the pending notice; each is shown once.
    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::models::VideoMetadata;
    use crate::storage::MemoryStore;
    use chrono::TimeZone;

    const VIDEO: &str = "abc12345678";
    const OTHER: &str = "zyx98765432";

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 17, 9, 30, 0).unwrap()
    }

    fn workspace_with_video() -> Workspace<MemoryStore> {
        let mut ws = Workspace::new(MemoryStore::new());
        ws.select_video(&format!("https://www.youtube.com/watch?v={}", VIDEO));
        ws
    }

    fn add_note(ws: &mut Workspace<MemoryStore>, at: f64, content: &str) -> i64 {
        ws.report_position(at);
        assert!(ws.open_editor());
        match ws.save_draft(content.to_string(), ImageChange::Keep, now()) {
            SaveOutcome::Created { note_id } => note_id,
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_great_intro_scenario() {
        let backend = MemoryStore::new();
        let mut ws = Workspace::new(backend.clone());
        ws.select_video(VIDEO);
        let id = add_note(&mut ws, 12.5, "Great intro");

        // Simulated page reload
        let mut reloaded = Workspace::new(backend);
        reloaded.select_video(VIDEO);
        assert_eq!(reloaded.notes().len(), 1);
        assert_eq!(reloaded.notes()[0].content, "Great intro");
        assert_eq!(reloaded.notes()[0].time, 12.5);

        assert!(reloaded.edit_note(id));
        let outcome = reloaded.save_draft("Great intro, revised".to_string(), ImageChange::Keep, now());
        assert_eq!(outcome, SaveOutcome::Updated { note_id: id });
        assert_eq!(reloaded.notes().len(), 1);
        assert_eq!(reloaded.notes()[0].time, 12.5);
        assert_eq!(reloaded.notes()[0].content, "Great intro, revised");
    }

    #[test]
    fn test_switch_and_back_reloads_unchanged() {
        let mut ws = workspace_with_video();
        add_note(&mut ws, 1.0, "first");
        add_note(&mut ws, 2.0, "second");
        let before = ws.notes().to_vec();

        assert!(ws.select_video(OTHER).is_some());
        assert!(ws.notes().is_empty());
        assert!(ws.select_video(VIDEO).is_some());
        assert_eq!(ws.notes(), &before[..]);
    }

    #[test]
    fn test_switch_discards_draft_and_player() {
        let mut ws = workspace_with_video();
        ws.report_position(5.0);
        ws.open_editor();
        ws.select_video(OTHER);
        assert_eq!(ws.editor().mode(), EditorMode::Idle);
        assert!(!ws.player_ready());
    }

    #[test]
    fn test_unrecognized_url_clears_video() {
        let mut ws = workspace_with_video();
        assert!(ws.select_video("https://example.com/nothing").is_none());
        assert_eq!(ws.video_id(), None);
        assert!(ws.notes().is_empty());
        assert!(!ws.open_editor());
        assert_eq!(ws.metadata().title(), "");
    }

    #[test]
    fn test_reselecting_same_video_keeps_state() {
        let mut ws = workspace_with_video();
        ws.open_editor();
        assert!(ws.select_video(&format!("https://youtu.be/{}", VIDEO)).is_none());
        assert_eq!(ws.editor().mode(), EditorMode::Composing);
    }

    #[test]
    fn test_save_needs_ready_player() {
        let mut ws = workspace_with_video();
        ws.open_editor();
        let outcome = ws.save_draft("<p>hi</p>".to_string(), ImageChange::Keep, now());
        assert_eq!(outcome, SaveOutcome::Refused(SaveRefusal::PlayerNotReady));
        assert_eq!(ws.editor().draft().content, "<p>hi</p>");

        ws.report_position(3.0);
        let outcome = ws.save_draft("<p>hi</p>".to_string(), ImageChange::Keep, now());
        assert!(matches!(outcome, SaveOutcome::Created { .. }));
        assert_eq!(ws.notes()[0].time, 3.0);
    }

    #[test]
    fn test_blank_save_is_refused() {
        let mut ws = workspace_with_video();
        ws.report_position(3.0);
        ws.open_editor();
        let outcome = ws.save_draft("<p><br></p>".to_string(), ImageChange::Keep, now());
        assert_eq!(outcome, SaveOutcome::Refused(SaveRefusal::BlankContent));
        assert!(ws.notes().is_empty());
        assert!(ws.editor().is_open());
    }

    #[test]
    fn test_save_with_closed_editor() {
        let mut ws = workspace_with_video();
        let outcome = ws.save_draft("text".to_string(), ImageChange::Keep, now());
        assert_eq!(outcome, SaveOutcome::Refused(SaveRefusal::EditorClosed));
    }

    #[test]
    fn test_image_changes_on_update() {
        let mut ws = workspace_with_video();
        ws.report_position(1.0);
        ws.open_editor();
        let uri = "data:image/png;base64,AA==".to_string();
        let SaveOutcome::Created { note_id } =
            ws.save_draft("pic".to_string(), ImageChange::Replace(uri.clone()), now())
        else {
            panic!("note not created");
        };
        assert_eq!(ws.notes()[0].image.as_deref(), Some(uri.as_str()));

        ws.edit_note(note_id);
        ws.save_draft("pic".to_string(), ImageChange::Keep, now());
        assert_eq!(ws.notes()[0].image.as_deref(), Some(uri.as_str()));

        ws.edit_note(note_id);
        ws.save_draft("pic".to_string(), ImageChange::Remove, now());
        assert_eq!(ws.notes()[0].image, None);
    }

    #[test]
    fn test_ids_unique_within_same_millisecond() {
        let mut ws = workspace_with_video();
        let a = add_note(&mut ws, 1.0, "a");
        let b = add_note(&mut ws, 2.0, "b");
        assert_ne!(a, b);
    }

    #[test]
    fn test_jump_requires_ready_player() {
        let backend = MemoryStore::new();
        let mut ws = Workspace::new(backend.clone());
        ws.select_video(VIDEO);
        let id = add_note(&mut ws, 42.0, "moment");

        let mut fresh = Workspace::new(backend);
        fresh.select_video(VIDEO);
        assert!(!fresh.jump_to(id));
        assert_eq!(fresh.take_pending_seek(), None);

        fresh.report_position(0.0);
        assert!(fresh.jump_to(id));
        assert_eq!(fresh.take_pending_seek(), Some(42.0));
        assert!(!fresh.jump_to(id + 1000));
    }

    #[test]
    fn test_delete_closes_editor_for_that_note() {
        let mut ws = workspace_with_video();
        let id = add_note(&mut ws, 1.0, "gone");
        ws.edit_note(id);
        ws.delete_note(id);
        assert!(ws.notes().is_empty());
        assert_eq!(ws.editor().mode(), EditorMode::Idle);
    }

    #[test]
    fn test_stale_metadata_dropped_after_switch() {
        let mut ws = Workspace::new(MemoryStore::new());
        let first = ws.select_video(VIDEO).unwrap();
        let second = ws.select_video(OTHER).unwrap();
        assert_eq!(first.video_id(), VIDEO);

        let stale = MetadataState::Available(VideoMetadata {
            title: "Old video".to_string(),
            description: String::new(),
        });
        assert!(!ws.apply_metadata(&first, stale));
        assert_eq!(ws.metadata(), &MetadataState::Pending);

        let fresh = MetadataState::Available(VideoMetadata {
            title: "New video".to_string(),
            description: "d".to_string(),
        });
        assert!(ws.apply_metadata(&second, fresh));
        assert_eq!(ws.metadata().title(), "New video");
    }

    #[test]
    fn test_staged_text_survives_rejected_save() {
        let mut ws = workspace_with_video();
        ws.open_editor();
        ws.stage_draft("<p>typed before the upload failed</p>".to_string());
        assert!(ws.editor().is_open());
        assert_eq!(ws.editor().draft().content, "<p>typed before the upload failed</p>");

        // Nothing to stage into once the editor is closed
        ws.cancel_edit();
        ws.stage_draft("<p>late</p>".to_string());
        assert_eq!(ws.editor().draft().content, "");
    }

    #[derive(Clone)]
    struct FullStore;

    impl KeyValueStore for FullStore {
        fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, StorageError> {
            Ok(None)
        }

        fn put(&self, _key: &str, _value: &[u8]) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("quota exceeded".to_string()))
        }
    }

    #[test]
    fn test_write_failure_sets_notice_and_keeps_note() {
        let mut ws = Workspace::new(FullStore);
        ws.select_video(VIDEO);
        ws.report_position(1.0);
        ws.open_editor();
        let outcome = ws.save_draft("kept".to_string(), ImageChange::Keep, now());
        assert!(matches!(outcome, SaveOutcome::Created { .. }));
        assert_eq!(ws.notes().len(), 1);

        let notice = ws.take_notice().unwrap();
        assert!(notice.contains("quota exceeded"));
        assert_eq!(ws.take_notice(), None);
    }

    #[test]
    fn test_active_notes_outlive_write_failure() {
        let mut ws = Workspace::new(FullStore);
        ws.select_video(VIDEO);
        ws.report_position(4.0);
        ws.open_editor();
        ws.save_draft("only in memory".to_string(), ImageChange::Keep, now());

        assert!(NoteStore::load(FullStore, VIDEO).notes().is_empty());
        let active = ws.active_notes(VIDEO).unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].content, "only in memory");
        assert_eq!(ws.active_notes(OTHER), None);
    }
}
