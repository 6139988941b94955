//! Remote video metadata lookup.
//!
//! One best-effort GET per video against a YouTube Data API style endpoint.
//! Failures never reach the caller as errors from [`MetadataFetcher::fetch`];
//! they become [`MetadataState::Unavailable`] and the page shows blank fields.

use crate::config::Config;
use crate::error::MetadataError;
use crate::models::{MetadataState, VideoMetadata};
use std::time::Duration;
use url::Url;

// ============================================================================
// Fetcher
// ============================================================================

#[derive(Clone)]
pub struct MetadataFetcher {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl MetadataFetcher {
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>, timeout: Duration) -> Self {
        let client = match reqwest::Client::builder().timeout(timeout).build() {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(error = %e, "Cannot configure HTTP client, using defaults");
                reqwest::Client::new()
            }
        };

        Self {
            client,
            endpoint: endpoint.into(),
            api_key,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.metadata_endpoint.clone(),
            config.api_key.clone(),
            config.metadata_timeout,
        )
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Look up title and description, reporting why a lookup failed.
    pub async fn lookup(&self, video_id: &str) -> Result<VideoMetadata, MetadataError> {
        let api_key = self.api_key.as_deref().ok_or(MetadataError::MissingApiKey)?;

        let url = Url::parse_with_params(
            &self.endpoint,
            &[("id", video_id), ("part", "snippet"), ("key", api_key)],
        )?;

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(MetadataError::Status(status.as_u16()));
        }

        let json: serde_json::Value = response.json().await.map_err(|_| MetadataError::Malformed)?;
        parse_metadata_response(&json)
    }

    /// Look up metadata, degrading every failure to `Unavailable`.
    pub async fn fetch(&self, video_id: &str) -> MetadataState {
        match self.lookup(video_id).await {
            Ok(meta) => {
                tracing::debug!(video_id, title = %meta.title, "Fetched video metadata");
                MetadataState::Available(meta)
            }
            Err(e) => {
                tracing::warn!(video_id, error = %e, "Video metadata unavailable");
                MetadataState::Unavailable(e.to_string())
            }
        }
    }
}

/// Extract title and description from the first element of `items`.
///
/// Fields are read from `items[0].snippet` and, failing that, `items[0]`.
pub fn parse_metadata_response(json: &serde_json::Value) -> Result<VideoMetadata, MetadataError> {
    let items = json
        .get("items")
        .and_then(|i| i.as_array())
        .ok_or(MetadataError::Malformed)?;

    let first = items.first().ok_or(MetadataError::NotFound)?;
    let fields = first.get("snippet").unwrap_or(first);

    let title = fields
        .get("title")
        .and_then(|t| t.as_str())
        .ok_or(MetadataError::Malformed)?
        .to_string();
    let description = fields
        .get("description")
        .and_then(|d| d.as_str())
        .unwrap_or_default()
        .to_string();

    Ok(VideoMetadata { title, description })
}

// ============================================================================
// Request Generations
// ============================================================================

/// Identifies one metadata request. Only the newest ticket may be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    video_id: String,
}

impl FetchTicket {
    pub fn video_id(&self) -> &str {
        &self.video_id
    }
}

/// Metadata shown for the active video, guarded against stale responses.
#[derive(Debug, Clone)]
pub struct MetadataSlot {
    generation: u64,
    state: MetadataState,
}

impl Default for MetadataSlot {
    fn default() -> Self {
        Self {
            generation: 0,
            state: MetadataState::Pending,
        }
    }
}

impl MetadataSlot {
    pub fn state(&self) -> &MetadataState {
        &self.state
    }

    /// Start a request for `video_id`, invalidating any in flight.
    pub fn begin(&mut self, video_id: &str) -> FetchTicket {
        self.generation += 1;
        self.state = MetadataState::Pending;
        FetchTicket {
            generation: self.generation,
            video_id: video_id.to_string(),
        }
    }

    /// Invalidate any request in flight and show nothing.
    pub fn clear(&mut self) {
        self.generation += 1;
        self.state = MetadataState::Unavailable("no active video".to_string());
    }

    /// Apply a response. Returns `false` and drops it if a newer request
    /// has started since `ticket` was issued.
    pub fn apply(&mut self, ticket: &FetchTicket, state: MetadataState) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(video_id = %ticket.video_id, "Discarding stale metadata response");
            return false;
        }
        self.state = state;
        true
    }
}
