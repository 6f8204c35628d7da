//! Configuration for the booking client.
//!
//! Loads configuration from environment variables with sensible defaults.

use std::env;
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the remote booking service
    pub api_url: String,
    /// Path of the persisted session record
    pub session_file: PathBuf,
    /// Tracing filter directive (e.g. `cinebook=debug`)
    pub log_filter: String,
}

impl Config {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            api_url: env::var("CINEBOOK_API_URL")
                .unwrap_or_else(|_| "http://localhost:8000".to_string()),
            session_file: env::var("CINEBOOK_SESSION_FILE")
                .map_or_else(|_| Self::default_session_file(), PathBuf::from),
            log_filter: env::var("CINEBOOK_LOG").unwrap_or_else(|_| "cinebook=info".to_string()),
        }
    }

    /// Per-user data path for the session record, falling back to the
    /// working directory when no user data dir exists (e.g. minimal
    /// containers).
    #[must_use]
    pub fn default_session_file() -> PathBuf {
        dirs::data_dir().map_or_else(
            || PathBuf::from(".cinebook-session.json"),
            |dir| dir.join("cinebook").join("session.json"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_session_file_is_json() {
        let path = Config::default_session_file();
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("json"));
    }
}
