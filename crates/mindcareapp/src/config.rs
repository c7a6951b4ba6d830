//! # Configuration
//!
//! MindCare configuration is loaded with [`confique`] from environment
//! variables and an optional TOML file.
//!
//! ## Resolution Order
//!
//! 1. **Environment variables**: `MINDCARE_API_PREFIX`, `MINDCARE_NICKNAME`, etc.
//! 2. **Config file**: `<data dir>/mindcare.toml`.
//! 3. **Compiled defaults**: via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `api_prefix` | `/api` | Paths the mock interceptor answers |
//! | `api_base_url` | none | Real backend; without it the network is offline |
//! | `request_timeout_ms` | `3000` | Timeout for requests that reach the network |
//! | `export_file_name` | `mindcare-data.json` | Snapshot file name |
//! | `nickname` | `Anon` | Author name on posts and badges |
//! | `mock` | `true` | Install the mock interceptor |

use crate::commands::export::DEFAULT_EXPORT_FILE_NAME;
use crate::model::DEFAULT_NICKNAME;
use crate::transport::interceptor::DEFAULT_API_PREFIX;
use confique::Config;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const CONFIG_FILE_NAME: &str = "mindcare.toml";

/// Configuration for mindcare, stored in `mindcare.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MindcareConfig {
    /// Path prefix reserved for the mock API.
    #[config(env = "MINDCARE_API_PREFIX", default = "/api")]
    pub api_prefix: String,

    /// Base URL of a real backend. Requests the interceptor does not answer
    /// are sent here; when unset they fail immediately.
    #[config(env = "MINDCARE_API_BASE_URL")]
    pub api_base_url: Option<String>,

    #[config(env = "MINDCARE_REQUEST_TIMEOUT_MS", default = 3000)]
    pub request_timeout_ms: u64,

    #[config(env = "MINDCARE_EXPORT_FILE_NAME", default = "mindcare-data.json")]
    pub export_file_name: String,

    #[config(env = "MINDCARE_NICKNAME", default = "Anon")]
    pub nickname: String,

    /// Answer `/api` requests from local storage.
    #[config(env = "MINDCARE_MOCK", default = true)]
    pub mock: bool,
}

impl Default for MindcareConfig {
    fn default() -> Self {
        Self {
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            api_base_url: None,
            request_timeout_ms: 3000,
            export_file_name: DEFAULT_EXPORT_FILE_NAME.to_string(),
            nickname: DEFAULT_NICKNAME.to_string(),
            mock: true,
        }
    }
}

impl MindcareConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// The prefix with a leading slash and no trailing one.
    pub fn api_prefix(&self) -> String {
        let trimmed = self.api_prefix.trim().trim_matches('/');
        format!("/{}", trimmed)
    }

    /// The base URL, ignoring blank values.
    pub fn api_base_url(&self) -> Option<&str> {
        self.api_base_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MindcareConfig::default();
        assert_eq!(config.api_prefix(), "/api");
        assert_eq!(config.api_base_url(), None);
        assert_eq!(config.request_timeout(), Duration::from_secs(3));
        assert_eq!(config.export_file_name, "mindcare-data.json");
        assert_eq!(config.nickname, "Anon");
        assert!(config.mock);
    }

    #[test]
    fn test_api_prefix_normalization() {
        let config = MindcareConfig {
            api_prefix: "mock/".to_string(),
            ..Default::default()
        };
        assert_eq!(config.api_prefix(), "/mock");
    }

    #[test]
    fn test_blank_base_url_is_none() {
        let config = MindcareConfig {
            api_base_url: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(config.api_base_url(), None);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "nickname = \"Sky\"\nmock = false\n").unwrap();

        let config = MindcareConfig::builder().file(&path).load().unwrap();
        assert_eq!(config.nickname, "Sky");
        assert!(!config.mock);
        assert_eq!(config.api_prefix, "/api");
    }
}
