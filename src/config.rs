//! Server configuration loaded from environment variables.

use crate::error::ConfigError;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_METADATA_ENDPOINT: &str = "https://www.googleapis.com/youtube/v3/videos";
pub const DEFAULT_VIDEO_ID: &str = "M7lc1UVf-VE";
pub const DEFAULT_MAX_IMAGE_BYTES: usize = 2 * 1024 * 1024;

/// All fields have defaults suitable for running locally.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Directory of the sled database holding the note collections.
    pub db_path: PathBuf,
    /// Credential for the metadata API. Without it metadata is unavailable.
    pub api_key: Option<String>,
    pub metadata_endpoint: String,
    pub metadata_timeout: Duration,
    /// Largest accepted image upload, in bytes of the decoded file.
    pub max_image_bytes: usize,
    /// Video shown before the user enters a URL.
    pub default_video_id: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            db_path: PathBuf::from(".video_notes_db"),
            api_key: None,
            metadata_endpoint: DEFAULT_METADATA_ENDPOINT.to_string(),
            metadata_timeout: Duration::from_secs(10),
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
            default_video_id: Some(DEFAULT_VIDEO_ID.to_string()),
        }
    }
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// | Env Var                 | Default                    |
    /// |-------------------------|----------------------------|
    /// | `HOST`                  | `127.0.0.1`                |
    /// | `PORT`                  | `3000`                     |
    /// | `DB_PATH`               | `.video_notes_db`          |
    /// | `YOUTUBE_API_KEY`       | unset                      |
    /// | `METADATA_ENDPOINT`     | YouTube Data API videos    |
    /// | `METADATA_TIMEOUT_SECS` | `10`                       |
    /// | `MAX_IMAGE_BYTES`       | `2097152`                  |
    /// | `DEFAULT_VIDEO_ID`      | `M7lc1UVf-VE`              |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let host = lookup("HOST").unwrap_or(defaults.host);
        let port = parse_var(&lookup, "PORT", "a valid port number")?.unwrap_or(defaults.port);
        let db_path = lookup("DB_PATH").map(PathBuf::from).unwrap_or(defaults.db_path);
        let api_key = lookup("YOUTUBE_API_KEY").filter(|k| !k.trim().is_empty());
        let metadata_endpoint = lookup("METADATA_ENDPOINT").unwrap_or(defaults.metadata_endpoint);
        let metadata_timeout = parse_var::<u64, _>(&lookup, "METADATA_TIMEOUT_SECS", "a number of seconds")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.metadata_timeout);
        let max_image_bytes = parse_var(&lookup, "MAX_IMAGE_BYTES", "a byte count")?
            .unwrap_or(defaults.max_image_bytes);

        let default_video_id = match lookup("DEFAULT_VIDEO_ID") {
            Some(id) if id.trim().is_empty() => None,
            Some(id) => {
                let id = id.trim().to_string();
                if !crate::video_id::is_valid_video_id(&id) {
                    return Err(ConfigError::Invalid {
                        name: "DEFAULT_VIDEO_ID",
                        expected: "an 11-character video id",
                        value: id,
                    });
                }
                Some(id)
            }
            None => defaults.default_video_id,
        };

        Ok(Self {
            host,
            port,
            db_path,
            api_key,
            metadata_endpoint,
            metadata_timeout,
            max_image_bytes,
            default_video_id,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<T, F>(lookup: &F, name: &'static str, expected: &'static str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid {
                name,
                expected,
                value,
            }),
        None => Ok(None),
    }
}
