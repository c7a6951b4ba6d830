use super::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::StorageKey;
use crate::store::{StorageBackend, Store};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const DEFAULT_EXPORT_FILE_NAME: &str = "mindcare-data.json";

/// Every known key mapped to its stored value. Missing or unreadable
/// slots appear as `null`.
pub fn snapshot<B: StorageBackend>(store: &Store<B>) -> Map<String, Value> {
    StorageKey::ALL
        .into_iter()
        .map(|key| (key.as_str().to_string(), store.read_raw(key).unwrap_or(Value::Null)))
        .collect()
}

pub fn to_document<B: StorageBackend>(store: &Store<B>) -> Result<String> {
    Ok(serde_json::to_string_pretty(&Value::Object(snapshot(store)))?)
}

/// Writes the snapshot as `file_name` inside `dir`, creating `dir` if needed.
pub fn run<B: StorageBackend>(store: &Store<B>, dir: &Path, file_name: &str) -> Result<CmdResult> {
    let document = to_document(store)?;
    fs::create_dir_all(dir)?;
    let path: PathBuf = dir.join(file_name);
    fs::write(&path, document)?;
    info!(path = %path.display(), "snapshot exported");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Exported to {}", path.display())));
    Ok(result
        .with_snapshot_path(path)
        .with_keys(StorageKey::ALL.to_vec()))
}
