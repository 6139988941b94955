//! Browser-side glue: the embedded player, the rich-text editor, and
//! reporting the playback position with form submissions.

pub const PAGE_SCRIPT: &str = r#"
var player = null;
var playerReady = false;

function onYouTubeIframeAPIReady() {
    var el = document.getElementById('player');
    if (!el) return;
    var start = parseInt(el.dataset.start || '0', 10);
    player = new YT.Player('player', {
        videoId: el.dataset.videoId,
        playerVars: { start: start, autoplay: el.dataset.start ? 1 : 0 },
        events: {
            onReady: function() { playerReady = true; }
        }
    });
}

function currentPlayerTime() {
    if (player && playerReady && typeof player.getCurrentTime === 'function') {
        return player.getCurrentTime();
    }
    return null;
}

document.addEventListener('DOMContentLoaded', function() {
    // Every form that changes notes carries the playback position
    document.querySelectorAll('form.reports-position').forEach(function(form) {
        form.addEventListener('submit', function() {
            var input = form.querySelector('input[name="time"]');
            var time = currentPlayerTime();
            if (input && time !== null) {
                input.value = String(time);
            }
        });
    });

    var editorEl = document.getElementById('quill-editor');
    if (editorEl && window.Quill) {
        var quill = new Quill(editorEl, {
            theme: 'snow',
            placeholder: 'Write your note here...'
        });
        var form = editorEl.closest('form');
        form.addEventListener('submit', function() {
            form.querySelector('input[name="content"]').value = quill.root.innerHTML;
        });
    }

    var fileInput = document.querySelector('input[name="image"]');
    if (fileInput) {
        fileInput.addEventListener('change', function() {
            var file = fileInput.files[0];
            var limit = parseInt(fileInput.dataset.maxBytes || '0', 10);
            if (file && limit && file.size > limit) {
                alert('Image is too large (limit ' + Math.round(limit / 1024) + ' KiB).');
                fileInput.value = '';
            }
        });
    }
});
"#;
