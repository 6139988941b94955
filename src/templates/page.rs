//! The single interactive page: URL field, player, metadata, editor and
//! the note list.

use super::components::{base_html, html_escape, post_button, sanitize_markup};
use crate::editor::{EditorMode, NoteEditor};
use crate::images::is_image_data_uri;
use crate::models::{MetadataState, Note};
use crate::timestamp::format_timestamp;

/// Everything the page needs, borrowed from the workspace for one render.
pub struct PageView<'a> {
    pub video_id: Option<&'a str>,
    pub notes: &'a [Note],
    pub editor: &'a NoteEditor,
    pub metadata: &'a MetadataState,
    pub notice: Option<&'a str>,
    /// Offset the player should start at after a jump.
    pub start_at: Option<f64>,
    pub max_image_bytes: usize,
}

pub fn render_page(view: &PageView) -> String {
    let mut html = String::from("<h1>Video Player with Notes</h1>");

    if let Some(notice) = view.notice {
        html.push_str(&format!(r#"<div class="notice">{}</div>"#, html_escape(notice)));
    }

    html.push_str(&render_url_form(view.video_id));

    if let Some(video_id) = view.video_id {
        html.push_str(&render_player(video_id, view.start_at));
        html.push_str(&render_metadata(view.metadata));
        html.push_str(&render_notes_panel(view));
    }

    base_html("Video Notes", &html)
}

fn render_url_form(video_id: Option<&str>) -> String {
    let value = video_id
        .map(|id| format!("https://www.youtube.com/watch?v={}", id))
        .unwrap_or_default();

    format!(
        r#"<form class="url-form" method="post" action="/video">
            <input type="text" name="url" placeholder="Enter YouTube video URL" value="{}">
            <button type="submit" class="btn">Load</button>
        </form>"#,
        html_escape(&value)
    )
}

fn render_player(video_id: &str, start_at: Option<f64>) -> String {
    let start = start_at.map(|s| s.floor() as u64);
    let data_start = start.map(|s| format!(r#" data-start="{}""#, s)).unwrap_or_default();
    let embed_start = start.map(|s| format!("?start={}", s)).unwrap_or_default();
    let id = html_escape(video_id);

    format!(
        r#"<div class="player-frame">
            <div id="player" data-video-id="{id}"{data_start}></div>
            <noscript><iframe width="640" height="360" src="https://www.youtube.com/embed/{id}{embed_start}" allowfullscreen></iframe></noscript>
        </div>"#,
        id = id,
        data_start = data_start,
        embed_start = embed_start,
    )
}

fn render_metadata(metadata: &MetadataState) -> String {
    format!(
        r#"<div class="video-meta">
            <h2 class="title">{}</h2>
            <p class="description">{}</p>
        </div>"#,
        html_escape(metadata.title()),
        html_escape(metadata.description())
    )
}

fn render_notes_panel(view: &PageView) -> String {
    let mut html = String::from(r#"<div class="notes-panel">"#);

    html.push_str(&format!(
        r#"<div class="notes-header">
            <div>
                <h2>My notes</h2>
                <p>All your notes at a single place. Click on any note to go to specific timestamp in the video.</p>
            </div>
            {}
        </div>"#,
        post_button("/notes/new", "&#10753; Add new note", "btn secondary", false)
    ));

    if view.editor.is_open() {
        html.push_str(&render_editor(view.editor, view.max_image_bytes));
    }

    if view.notes.is_empty() {
        html.push_str(r#"<p class="empty-state">No notes for this video yet.</p>"#);
    }

    for note in view.notes {
        html.push_str(&render_note_card(note));
    }

    html.push_str("</div>");
    html
}

fn render_editor(editor: &NoteEditor, max_image_bytes: usize) -> String {
    let draft = editor.draft();
    let submit_label = match editor.mode() {
        EditorMode::Editing { .. } => "Update Note",
        _ => "Save Note",
    };

    let image_html = match draft.image.as_deref() {
        Some(uri) if is_image_data_uri(uri) => format!(
            r#"<img src="{}" alt="Uploaded">
            <label><input type="checkbox" name="remove_image" value="true"> Remove image</label>"#,
            uri
        ),
        _ => String::new(),
    };

    format!(
        r#"<form class="note-editor reports-position" method="post" action="/notes/save" enctype="multipart/form-data">
            <input type="hidden" name="content" value="{content_attr}">
            <input type="hidden" name="time" value="">
            <div id="quill-editor">{content_html}</div>
            <input type="file" name="image" accept="image/*" data-max-bytes="{max_bytes}">
            {image_html}
            <div class="editor-actions">
                <button type="submit" class="btn">{submit_label}</button>
                <button type="submit" class="btn secondary" formaction="/notes/cancel" formenctype="application/x-www-form-urlencoded">Cancel</button>
            </div>
        </form>"#,
        content_attr = html_escape(&draft.content),
        content_html = sanitize_markup(&draft.content),
        max_bytes = max_image_bytes,
        image_html = image_html,
        submit_label = submit_label,
    )
}

fn render_note_card(note: &Note) -> String {
    let image_html = match note.image.as_deref() {
        Some(uri) if is_image_data_uri(uri) => format!(r#"<img src="{}" alt="Note">"#, uri),
        _ => String::new(),
    };

    format!(
        r#"<div class="note-card" id="note-{id}">
            <div class="note-meta">
                <span class="date">{date}</span>
                {jump}
            </div>
            <div class="note-content">{content}</div>
            {image_html}
            <div class="note-actions">
                {delete}
                {edit}
            </div>
        </div>"#,
        id = note.id,
        date = html_escape(&note.date),
        jump = post_button(
            &format!("/notes/{}/jump", note.id),
            &format!("Timestamp: {} min", format_timestamp(note.time)),
            "timestamp-link",
            true,
        ),
        content = sanitize_markup(&note.content),
        image_html = image_html,
        delete = post_button(&format!("/notes/{}/delete", note.id), "Delete note", "btn danger", false),
        edit = post_button(&format!("/notes/{}/edit", note.id), "Edit note", "btn secondary", false),
    )
}
