//! Shared HTML components: the base template, escaping, and small widgets.

use super::scripts::PAGE_SCRIPT;
use super::styles::STYLE;

const QUILL_VERSION: &str = "1.3.7";

// ============================================================================
// Text Escaping
// ============================================================================

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Sanitize note markup produced by the rich-text editor before display.
pub fn sanitize_markup(markup: &str) -> String {
    ammonia::clean(markup)
}

// ============================================================================
// Widgets
// ============================================================================

/// A one-button POST form. `reports_position` adds the hidden playback
/// position field the page script fills in.
pub fn post_button(action: &str, label: &str, class: &str, reports_position: bool) -> String {
    let (form_class, time_field) = if reports_position {
        (
            "inline-form reports-position",
            r#"<input type="hidden" name="time" value="">"#,
        )
    } else {
        ("inline-form", "")
    };

    format!(
        r#"<form class="{form_class}" method="post" action="{action}">{time_field}<button type="submit" class="{class}">{label}</button></form>"#,
        form_class = form_class,
        action = html_escape(action),
        time_field = time_field,
        class = class,
        label = label,
    )
}

// ============================================================================
// Base Template
// ============================================================================

pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <link rel="stylesheet" href="https://cdn.quilljs.com/{quill}/quill.snow.css">
    <style>{style}</style>
</head>
<body>
    <div class="container">
        {content}
    </div>
    <script src="https://cdn.quilljs.com/{quill}/quill.min.js"></script>
    <script src="https://www.youtube.com/iframe_api"></script>
    <script>{script}</script>
</body>
</html>"#,
        title = html_escape(title),
        quill = QUILL_VERSION,
        style = STYLE,
        content = content,
        script = PAGE_SCRIPT,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape(r#"<a href="x">'&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;");
    }

    #[test]
    fn test_sanitize_markup_strips_scripts() {
        let clean = sanitize_markup(r#"<p onclick="x()">hi</p><script>alert(1)</script>"#);
        assert_eq!(clean, "<p>hi</p>");
    }

    #[test]
    fn test_post_button_reports_position() {
        let html = post_button("/notes/1/jump", "Go", "btn", true);
        assert!(html.contains("reports-position"));
        assert!(html.contains(r#"name="time""#));
        assert!(!post_button("/notes/1/delete", "Delete", "btn", false).contains("name=\"time\""));
    }
}
