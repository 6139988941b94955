//! HTTP route handlers for the web application.
//!
//! Page actions are plain form posts that update the workspace and redirect
//! back to `/`. The JSON routes export notes and proxy the metadata lookup.

use crate::error::{AppError, AppResult, MetadataError};
use crate::images::image_data_uri;
use crate::metadata::FetchTicket;
use crate::models::{Note, VideoTitleResponse};
use crate::notes::NoteStore;
use crate::templates::{render_page, PageView};
use crate::timestamp::parse_timestamp;
use crate::video_id::is_valid_video_id;
use crate::workspace::{ImageChange, SaveOutcome};
use crate::AppState;
use axum::{
    extract::{Multipart, Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;

// ============================================================================
// Page
// ============================================================================

pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    let mut ws = state.workspace();
    let notice = ws.take_notice();
    let start_at = ws.take_pending_seek();

    let html = render_page(&PageView {
        video_id: ws.video_id(),
        notes: ws.notes(),
        editor: ws.editor(),
        metadata: ws.metadata(),
        notice: notice.as_deref(),
        start_at,
        max_image_bytes: state.config.max_image_bytes,
    });

    Html(html)
}

fn back_to_page() -> Response {
    Redirect::to("/").into_response()
}

// ============================================================================
// Video Selection
// ============================================================================

#[derive(Deserialize)]
pub struct VideoForm {
    #[serde(default)]
    pub url: String,
}

pub async fn select_video(State(state): State<Arc<AppState>>, Form(form): Form<VideoForm>) -> Response {
    let ticket = state.workspace().select_video(&form.url);
    if let Some(ticket) = ticket {
        refresh_metadata(&state, ticket).await;
    }
    back_to_page()
}

/// Fetch metadata for `ticket` and apply it if it is still current.
pub async fn refresh_metadata(state: &AppState, ticket: FetchTicket) {
    let result = state.fetcher.fetch(ticket.video_id()).await;
    let applied = state.workspace().apply_metadata(&ticket, result);
    if !applied {
        tracing::debug!(video_id = %ticket.video_id(), "Active video changed during metadata fetch");
    }
}

// ============================================================================
// Editor Transitions
// ============================================================================

/// Optional playback position sent along with note actions.
#[derive(Deserialize, Default)]
pub struct PositionForm {
    pub time: Option<String>,
}

impl PositionForm {
    fn seconds(&self) -> Option<f64> {
        parse_seconds(self.time.as_deref())
    }
}

/// Accepts plain seconds (`12.5`) or a display timestamp (`01:15`).
fn parse_seconds(value: Option<&str>) -> Option<f64> {
    let text = value?.trim();
    text.parse::<f64>()
        .ok()
        .or_else(|| parse_timestamp(text))
        .filter(|t| t.is_finite())
}

pub async fn open_editor(State(state): State<Arc<AppState>>) -> Response {
    state.workspace().open_editor();
    back_to_page()
}

pub async fn cancel_editor(State(state): State<Arc<AppState>>) -> Response {
    state.workspace().cancel_edit();
    back_to_page()
}

pub async fn edit_note(Path(id): Path<i64>, State(state): State<Arc<AppState>>) -> Response {
    let mut ws = state.workspace();
    if !ws.edit_note(id) {
        ws.set_notice("That note no longer exists.");
    }
    drop(ws);
    back_to_page()
}

pub async fn delete_note(Path(id): Path<i64>, State(state): State<Arc<AppState>>) -> Response {
    state.workspace().delete_note(id);
    back_to_page()
}

pub async fn jump_to_note(
    Path(id): Path<i64>,
    State(state): State<Arc<AppState>>,
    Form(form): Form<PositionForm>,
) -> Response {
    let mut ws = state.workspace();
    if let Some(seconds) = form.seconds() {
        ws.report_position(seconds);
    }
    if !ws.jump_to(id) {
        tracing::debug!(note_id = id, "Jump ignored, player not ready or note missing");
    }
    drop(ws);
    back_to_page()
}

// ============================================================================
// Saving
// ============================================================================

#[derive(Default)]
struct SaveForm {
    content: String,
    time: Option<f64>,
    remove_image: bool,
    image: Option<(String, Vec<u8>)>,
}

/// Read the note form. On failure the fields read so far come back with
/// the error so the typed text is not lost.
async fn read_save_form(multipart: &mut Multipart) -> Result<SaveForm, (SaveForm, String)> {
    let mut form = SaveForm::default();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return Err((form, format!("Upload rejected: {}", e))),
        };

        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "content" => match field.text().await {
                Ok(text) => form.content = text,
                Err(e) => return Err((form, format!("Cannot read note: {}", e))),
            },
            "time" => {
                let text = field.text().await.unwrap_or_default();
                form.time = parse_seconds(Some(&text));
            }
            "remove_image" => {
                let text = field.text().await.unwrap_or_default();
                form.remove_image = matches!(text.trim(), "true" | "on" | "1");
            }
            "image" => {
                let content_type = field.content_type().unwrap_or_default().to_string();
                let bytes = match field.bytes().await {
                    Ok(bytes) => bytes,
                    Err(e) => return Err((form, format!("Failed to read image: {}", e))),
                };
                // An empty file part means no file was chosen
                if !bytes.is_empty() {
                    form.image = Some((content_type, bytes.to_vec()));
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

/// Keep the typed text in the editor and show why the save did not happen.
fn turn_away(state: &AppState, content: String, message: String) -> Response {
    let mut ws = state.workspace();
    if !content.is_empty() {
        ws.stage_draft(content);
    }
    ws.set_notice(message);
    drop(ws);
    back_to_page()
}

pub async fn save_note(State(state): State<Arc<AppState>>, mut multipart: Multipart) -> Response {
    let form = match read_save_form(&mut multipart).await {
        Ok(form) => form,
        Err((partial, message)) => {
            tracing::warn!(error = %message, "Note form rejected");
            return turn_away(&state, partial.content, message);
        }
    };

    let image = match form.image {
        Some((content_type, bytes)) => {
            match image_data_uri(&content_type, &bytes, state.config.max_image_bytes) {
                Ok(uri) => ImageChange::Replace(uri),
                Err(e) => {
                    tracing::debug!(error = %e, "Image rejected");
                    return turn_away(&state, form.content, format!("Image not attached: {}", e));
                }
            }
        }
        None if form.remove_image => ImageChange::Remove,
        None => ImageChange::Keep,
    };

    let mut ws = state.workspace();
    if let Some(seconds) = form.time {
        ws.report_position(seconds);
    }

    match ws.save_draft(form.content, image, Utc::now()) {
        SaveOutcome::Created { note_id } => tracing::info!(note_id, "Note created"),
        SaveOutcome::Updated { note_id } => tracing::info!(note_id, "Note updated"),
        SaveOutcome::Refused(reason) => ws.set_notice(reason.message()),
    }
    drop(ws);

    back_to_page()
}

// ============================================================================
// JSON API
// ============================================================================

pub async fn export_notes(
    Path(video_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<Vec<Note>>> {
    if !is_valid_video_id(&video_id) {
        return Err(AppError::BadRequest("Invalid video ID".to_string()));
    }
    let active = state.workspace().active_notes(&video_id).map(<[Note]>::to_vec);
    let notes = match active {
        Some(notes) => notes,
        None => NoteStore::load(state.store.clone(), &video_id).notes().to_vec(),
    };
    Ok(Json(notes))
}

#[derive(Deserialize)]
pub struct VideoTitleQuery {
    #[serde(rename = "videoId")]
    pub video_id: Option<String>,
}

/// GET /api/video-title?videoId=...: server-side metadata lookup using the
/// server's credential.
pub async fn video_title(
    State(state): State<Arc<AppState>>,
    Query(query): Query<VideoTitleQuery>,
) -> AppResult<Json<VideoTitleResponse>> {
    let video_id = query
        .video_id
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::BadRequest("Video ID is required".to_string()))?;

    if !is_valid_video_id(&video_id) {
        return Err(AppError::BadRequest("Invalid video ID".to_string()));
    }

    match state.fetcher.lookup(&video_id).await {
        Ok(meta) => Ok(Json(VideoTitleResponse {
            title: meta.title,
            description: meta.description,
        })),
        Err(MetadataError::MissingApiKey) => Err(AppError::Internal("API key is missing".to_string())),
        Err(MetadataError::NotFound) => Err(AppError::NotFound("Video not found".to_string())),
        Err(e) => {
            tracing::warn!(video_id = %video_id, error = %e, "Video title lookup failed");
            Err(AppError::Internal("Failed to fetch video title".to_string()))
        }
    }
}
