//! CSS styles for the video notes page.

// ============================================================================
// CSS Styles
// ============================================================================

pub const STYLE: &str = r#"
/* Solarized Light Theme */
:root {
    --base01: #586e75;
    --base00: #657b83;
    --base1: #93a1a1;
    --base2: #eee8d5;
    --base3: #fdf6e3;

    --red: #dc322f;
    --blue: #268bd2;
    --cyan: #2aa198;
    --yellow: #b58900;

    --bg: var(--base3);
    --fg: var(--base00);
    --muted: var(--base1);
    --border: var(--base2);
    --link: var(--blue);
    --link-hover: var(--cyan);
    --accent: var(--base2);
}

* { box-sizing: border-box; margin: 0; padding: 0; }

body {
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "Helvetica Neue", Arial, sans-serif;
    line-height: 1.6;
    color: var(--fg);
    background: var(--bg);
}

.container {
    max-width: 900px;
    margin: 0 auto;
    padding: 1rem;
}

h1, h2, h3 { font-weight: 600; margin-top: 1.5em; margin-bottom: 0.5em; }
h1 { font-size: 1.5rem; }
h2 { font-size: 1.2rem; }

.notice {
    margin: 1rem 0;
    padding: 0.5rem 1rem;
    border-left: 3px solid var(--yellow);
    background: var(--accent);
}

.url-form { display: flex; gap: 0.5rem; margin-bottom: 1rem; }

.url-form input {
    flex: 1;
    padding: 0.5rem 0.75rem;
    border: 1px solid var(--border);
    border-radius: 4px;
    background: var(--bg);
    color: var(--fg);
}

.player-frame { display: flex; justify-content: center; margin: 1rem 0; }
.player-frame iframe { max-width: 100%; }

.video-meta { border-bottom: 2px solid var(--border); padding-bottom: 1rem; margin-bottom: 1rem; }
.video-meta .description { color: var(--muted); white-space: pre-line; }

.notes-panel {
    border: 1px solid var(--border);
    border-radius: 6px;
    padding: 1rem;
}

.notes-header {
    display: flex;
    justify-content: space-between;
    align-items: center;
    gap: 1rem;
    border-bottom: 2px solid var(--border);
    padding-bottom: 0.5rem;
    margin-bottom: 1rem;
}

.notes-header h2 { margin: 0; font-size: 0.9rem; }
.notes-header p { font-size: 0.85rem; color: var(--muted); }

.note-editor { margin-bottom: 1.5rem; }
.note-editor #quill-editor { background: white; min-height: 8rem; margin-bottom: 0.75rem; }
.note-editor input[type=file] { margin-bottom: 0.75rem; display: block; }
.editor-actions { display: flex; gap: 0.5rem; align-items: center; }

.note-card {
    border: 1px solid var(--border);
    border-radius: 6px;
    padding: 1rem;
    margin-bottom: 1rem;
}

.note-card .note-meta {
    display: flex;
    justify-content: space-between;
    align-items: center;
    margin-bottom: 0.5rem;
    color: var(--muted);
}

.note-card img, .note-editor img { max-width: 20rem; height: auto; margin-top: 0.5rem; display: block; }
.note-card .note-actions { display: flex; justify-content: flex-end; gap: 0.5rem; margin-top: 0.5rem; }

.inline-form { display: inline; }

.timestamp-link {
    background: none;
    border: none;
    color: var(--link);
    cursor: pointer;
    font-family: inherit;
    font-size: inherit;
}
.timestamp-link:hover { color: var(--link-hover); text-decoration: underline; }

.btn {
    padding: 0.5rem 1rem;
    border: 1px solid var(--base1);
    border-radius: 4px;
    background: var(--blue);
    color: var(--base3);
    cursor: pointer;
    font-size: 0.9rem;
    font-family: inherit;
    text-decoration: none;
    display: inline-block;
}

.btn:hover { background: var(--cyan); border-color: var(--cyan); }
.btn.secondary { background: var(--base2); color: var(--base00); border-color: var(--base1); }
.btn.secondary:hover { background: var(--base3); }
.btn.danger { background: var(--base2); color: var(--red); border-color: var(--base1); }

.empty-state { color: var(--muted); font-style: italic; }
"#;
