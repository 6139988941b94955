//! Integration tests for the metadata proxy endpoint and metadata display.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, body_text, build_state, config_with_upstream, get_page, post_form, temp_db,
    test_config,
};

// ---------------------------------------------------------------------------
// Test: request validation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn missing_video_id_is_bad_request() {
    let state = build_state(test_config(), temp_db());

    for uri in ["/api/video-title", "/api/video-title?videoId=", "/api/video-title?videoId=%20"] {
        let response = get_page(&state, uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "for {}", uri);
        assert_eq!(body_json(response).await["error"], "Video ID is required");
    }
}

#[tokio::test]
async fn malformed_video_id_is_bad_request() {
    let state = build_state(test_config(), temp_db());
    let response = get_page(&state, "/api/video-title?videoId=not-an-id").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Invalid video ID");
}

#[tokio::test]
async fn missing_api_key_is_server_error() {
    let state = build_state(test_config(), temp_db());
    let response = get_page(&state, "/api/video-title?videoId=dQw4w9WgXcQ").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["error"], "API key is missing");
}

// ---------------------------------------------------------------------------
// Test: upstream outcomes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn successful_lookup_returns_title() {
    let state = build_state(config_with_upstream().await, temp_db());
    let response = get_page(&state, "/api/video-title?videoId=dQw4w9WgXcQ").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["title"], "Title dQw4w9WgXcQ");
    assert_eq!(json["description"], "About it");
}

#[tokio::test]
async fn upstream_forbidden_is_server_error() {
    let state = build_state(config_with_upstream().await, temp_db());
    let response = get_page(&state, "/api/video-title?videoId=forbidden00").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["error"], "Failed to fetch video title");
}

#[tokio::test]
async fn empty_items_is_not_found() {
    let state = build_state(config_with_upstream().await, temp_db());
    let response = get_page(&state, "/api/video-title?videoId=missingVid1").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"], "Video not found");
}

// ---------------------------------------------------------------------------
// Test: metadata shown on the page
// ---------------------------------------------------------------------------

#[tokio::test]
async fn page_shows_fetched_metadata() {
    let state = build_state(config_with_upstream().await, temp_db());
    post_form(&state, "/video", "url=dQw4w9WgXcQ").await;

    let html = body_text(get_page(&state, "/").await).await;
    assert!(html.contains(r#"<h2 class="title">Title dQw4w9WgXcQ</h2>"#));
    assert!(html.contains("About it"));
}

#[tokio::test]
async fn forbidden_metadata_leaves_page_blank() {
    let state = build_state(config_with_upstream().await, temp_db());
    let response = post_form(&state, "/video", "url=forbidden00").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let html = body_text(get_page(&state, "/").await).await;
    assert!(html.contains(r#"data-video-id="forbidden00""#));
    assert!(html.contains(r#"<h2 class="title"></h2>"#));
}
