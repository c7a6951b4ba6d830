//! # Startup
//!
//! [`initialize`] turns a data directory into a ready-to-use
//! [`MindcareApi`]: it loads configuration, opens the file backend, builds
//! the network transport and installs the mock interceptor.
//!
//! ## Data Directory Resolution
//!
//! 1. An explicit override (the CLI's `--data` flag).
//! 2. The `MINDCARE_DATA` environment variable (used by tests to isolate
//!    state).
//! 3. The OS-appropriate data directory, via the `directories` crate.
//!
//! ## Network Selection
//!
//! With `api_base_url` configured, requests the interceptor does not answer
//! go to an [`HttpTransport`]. Without it they go to an [`OfflineTransport`]
//! and fail, which is what triggers the local fallbacks.

use crate::api::{ApiSettings, MindcareApi};
use crate::config::{MindcareConfig, CONFIG_FILE_NAME};
use crate::error::{MindcareError, Result};
use crate::store::fs_backend::FsBackend;
use crate::store::{StorageBackend, Store};
use crate::transport::http::{HttpTransport, OfflineTransport};
use crate::transport::{ApiClient, Interceptor};
use confique::Config;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const DATA_DIR_ENV: &str = "MINDCARE_DATA";

pub struct MindcareContext {
    pub api: MindcareApi<FsBackend>,
    pub config: MindcareConfig,
    pub data_dir: PathBuf,
}

pub fn resolve_data_dir(data_override: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = data_override {
        return Ok(path);
    }
    if let Some(path) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    ProjectDirs::from("com", "mindcare", "mindcare")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| MindcareError::Config("Could not determine data directory".to_string()))
}

/// Environment first, then `<data_dir>/mindcare.toml`, then defaults.
pub fn load_config(data_dir: &Path) -> Result<MindcareConfig> {
    MindcareConfig::builder()
        .env()
        .file(data_dir.join(CONFIG_FILE_NAME))
        .load()
        .map_err(|e| MindcareError::Config(e.to_string()))
}

/// Builds the client: network transport per config, interceptor on top
/// when `mock` is enabled.
pub fn build_client<B: StorageBackend>(
    config: &MindcareConfig,
    store: &Store<B>,
) -> Result<ApiClient<B>> {
    let mut client = match config.api_base_url() {
        Some(url) => {
            debug!(%url, "using HTTP transport");
            ApiClient::new(HttpTransport::new(url, config.request_timeout())?)
        }
        None => ApiClient::new(OfflineTransport),
    };
    if config.mock {
        client.install(Interceptor::new(store.clone()).with_prefix(&config.api_prefix()));
    }
    Ok(client)
}

pub fn settings_from(config: &MindcareConfig) -> ApiSettings {
    ApiSettings {
        api_prefix: config.api_prefix(),
        nickname: config.nickname.clone(),
        export_file_name: config.export_file_name.clone(),
    }
}

pub fn initialize(data_override: Option<PathBuf>) -> Result<MindcareContext> {
    let data_dir = resolve_data_dir(data_override)?;
    let config = load_config(&data_dir)?;

    let store = Store::new(FsBackend::new(data_dir.clone()));
    let client = build_client(&config, &store)?;
    info!(
        data_dir = %data_dir.display(),
        mock = client.is_intercepted(),
        "mindcare initialized"
    );
    let api = MindcareApi::new(store, client, settings_from(&config));

    Ok(MindcareContext {
        api,
        config,
        data_dir,
    })
}
