//! Shared helpers for router integration tests.

#![allow(dead_code)]

use axum::body::Body;
use axum::extract::Query;
use axum::http::{header, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tower::ServiceExt;
use video_notes::config::Config;
use video_notes::AppState;

pub const BOUNDARY: &str = "video-notes-test-boundary";

/// Configuration with no default video and no metadata credential.
pub fn test_config() -> Config {
    Config {
        default_video_id: None,
        ..Config::default()
    }
}

pub fn temp_db() -> sled::Db {
    sled::Config::new().temporary(true).open().unwrap()
}

pub fn build_state(config: Config, db: sled::Db) -> Arc<AppState> {
    Arc::new(AppState::with_db(config, db).unwrap())
}

pub async fn send(state: &Arc<AppState>, request: Request<Body>) -> Response<Body> {
    video_notes::router(Arc::clone(state))
        .oneshot(request)
        .await
        .unwrap()
}

pub async fn get_page(state: &Arc<AppState>, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(state, request).await
}

pub async fn post_form(state: &Arc<AppState>, uri: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(state, request).await
}

/// POST a multipart note form. `image` is `(content_type, bytes)`.
pub async fn post_note(
    state: &Arc<AppState>,
    fields: &[(&str, &str)],
    image: Option<(&str, &[u8])>,
) -> Response<Body> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((content_type, bytes)) = image {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"upload\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    let request = Request::builder()
        .method("POST")
        .uri("/notes/save")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    send(state, request).await
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn assert_redirect_home(response: &Response<Body>) {
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");
}

// ---------------------------------------------------------------------------
// Fake metadata API
// ---------------------------------------------------------------------------

pub const TEST_API_KEY: &str = "test-key";

async fn upstream(Query(params): Query<HashMap<String, String>>) -> Response {
    if params.get("key").map(String::as_str) != Some(TEST_API_KEY) {
        return (StatusCode::FORBIDDEN, "bad key").into_response();
    }
    match params.get("id").map(String::as_str) {
        Some("forbidden00") => (StatusCode::FORBIDDEN, "quota exceeded").into_response(),
        Some("missingVid1") => Json(json!({ "items": [] })).into_response(),
        Some(id) => Json(json!({
            "items": [{ "snippet": { "title": format!("Title {}", id), "description": "About it" } }]
        }))
        .into_response(),
        None => StatusCode::BAD_REQUEST.into_response(),
    }
}

/// Serve the fake metadata API on an ephemeral port; returns its endpoint.
pub async fn spawn_upstream() -> String {
    let app = Router::new().route("/videos", get(upstream));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/videos", addr)
}

pub async fn config_with_upstream() -> Config {
    Config {
        api_key: Some(TEST_API_KEY.to_string()),
        metadata_endpoint: spawn_upstream().await,
        ..test_config()
    }
}
