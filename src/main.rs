//! Video notes - watch a video and keep timestamped notes on it.
//!
//! This is the main entry point for the web server.
//! The application is organized into the following modules:
//!
//! - `video_id`: Extracting video identifiers from pasted URLs
//! - `notes` / `storage`: Per-video note collections in sled
//! - `editor`: The note editor state machine
//! - `player`: Facade over the embedded player
//! - `metadata`: Remote title/description lookup
//! - `workspace`: The page state tying the above together
//! - `templates` / `handlers`: HTML rendering and HTTP routes

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use video_notes::config::Config;
use video_notes::{load_default_video, router, AppState};

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "video_notes=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env().expect("Invalid configuration");
    let state = Arc::new(AppState::open(config).expect("Failed to open database"));

    tokio::spawn(load_default_video(Arc::clone(&state)));

    let addr = state.config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| panic!("Failed to bind to {}: {}", addr, e));

    tracing::info!(%addr, "Video notes server running at http://{}", addr);
    tracing::info!(db = %state.config.db_path.display(), "Notes database");
    if state.fetcher.has_api_key() {
        tracing::info!("Video metadata: ENABLED");
    } else {
        tracing::info!("Video metadata: DISABLED (set YOUTUBE_API_KEY to enable)");
    }

    axum::serve(listener, router(state)).await.expect("Server error");
}
