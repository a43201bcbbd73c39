//! Environment-driven client configuration.

use std::path::PathBuf;

pub const DEFAULT_API_URL: &str = "http://localhost:3001/api";
pub const DEFAULT_STATE_DIR: &str = ".foodbridge";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend REST API, including any path prefix.
    pub api_url: String,
    /// Directory used by the file-backed token store.
    pub state_dir: PathBuf,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        let api_url = std::env::var("FOODBRIDGE_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let state_dir = std::env::var("FOODBRIDGE_STATE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_STATE_DIR));
        Self { api_url, state_dir }
    }
}

impl Default for ClientConfig {
    fn default() -> Self { Self::from_env() }
}
