//! Video notes library - re-exports for testing and external use.
//!
//! Paste a video URL, watch it, and keep timestamped rich-text notes per
//! video in a local sled database.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use std::sync::{Arc, Mutex, MutexGuard};
use tower_http::trace::TraceLayer;

pub mod config;
pub mod editor;
pub mod error;
pub mod handlers;
pub mod images;
pub mod metadata;
pub mod models;
pub mod notes;
pub mod player;
pub mod storage;
pub mod templates;
pub mod timestamp;
pub mod video_id;
pub mod workspace;

use config::Config;
use error::StorageError;
use metadata::MetadataFetcher;
use storage::SledStore;
use workspace::Workspace;

/// Room for the note body and form framing on top of the image itself.
const BODY_LIMIT_MARGIN: usize = 1024 * 1024;

// ============================================================================
// Application State
// ============================================================================

pub struct AppState {
    pub config: Config,
    pub store: SledStore,
    pub fetcher: MetadataFetcher,
    workspace: Mutex<Workspace<SledStore>>,
}

impl AppState {
    /// Open the database at `config.db_path`.
    pub fn open(config: Config) -> Result<Self, StorageError> {
        let db = sled::open(&config.db_path)?;
        Self::with_db(config, db)
    }

    pub fn with_db(config: Config, db: sled::Db) -> Result<Self, StorageError> {
        let store = SledStore::open(&db)?;
        let fetcher = MetadataFetcher::from_config(&config);
        let workspace = Mutex::new(Workspace::new(store.clone()));

        Ok(Self {
            config,
            store,
            fetcher,
            workspace,
        })
    }

    /// Lock the page state. Never hold the guard across an `.await`.
    pub fn workspace(&self) -> MutexGuard<'_, Workspace<SledStore>> {
        self.workspace.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Activate the configured default video and fetch its metadata.
pub async fn load_default_video(state: Arc<AppState>) {
    let Some(video_id) = state.config.default_video_id.clone() else {
        return;
    };
    let ticket = state.workspace().open_video(&video_id);
    if let Some(ticket) = ticket {
        handlers::refresh_metadata(&state, ticket).await;
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn router(state: Arc<AppState>) -> Router {
    let body_limit = state.config.max_image_bytes.saturating_add(BODY_LIMIT_MARGIN);

    Router::new()
        // Page
        .route("/", get(handlers::index))
        .route("/video", post(handlers::select_video))
        // Editor and note actions
        .route("/notes/new", post(handlers::open_editor))
        .route("/notes/cancel", post(handlers::cancel_editor))
        .route("/notes/save", post(handlers::save_note))
        .route("/notes/{id}/edit", post(handlers::edit_note))
        .route("/notes/{id}/delete", post(handlers::delete_note))
        .route("/notes/{id}/jump", post(handlers::jump_to_note))
        // JSON API
        .route("/api/notes/{video_id}", get(handlers::export_notes))
        .route("/api/video-title", get(handlers::video_title))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// Re-export commonly used types
pub use editor::{Commit, Draft, EditorMode, NoteEditor};
pub use error::{AppError, ImageError, MetadataError};
pub use models::{MetadataState, Note, VideoMetadata};
pub use notes::NoteStore;
pub use storage::{KeyValueStore, MemoryStore};
pub use timestamp::{format_timestamp, parse_timestamp};
pub use video_id::{extract_video_id, is_valid_video_id};
pub use workspace::{ImageChange, SaveOutcome, SaveRefusal};
