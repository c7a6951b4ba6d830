use super::{CmdMessage, CmdResult};
use crate::error::{MindcareError, Result};
use crate::model::StorageKey;
use crate::store::{StorageBackend, Store};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    /// Recognized keys that were written (or removed, for `null`).
    pub restored: Vec<StorageKey>,
    /// Property names that are not storage keys.
    pub ignored: Vec<String>,
}

/// Restores the recognized keys of a snapshot document.
///
/// The document must be a JSON object. Keys it does not mention are left
/// alone; a key set to `null` is removed. Validation is all-or-nothing: an
/// invalid document writes nothing. The writes themselves are per key, so a
/// backend failure partway leaves the keys before it restored.
pub fn apply<B: StorageBackend>(store: &Store<B>, text: &str) -> Result<ImportSummary> {
    let document: Value = serde_json::from_str(text)?;
    let Value::Object(entries) = document else {
        return Err(MindcareError::Validation(
            "Snapshot must be a JSON object".to_string(),
        ));
    };

    let mut summary = ImportSummary::default();
    let mut updates = Vec::new();
    for (name, value) in entries {
        match StorageKey::from_name(&name) {
            Some(key) => updates.push((key, value)),
            None => {
                debug!(%name, "ignoring unknown snapshot key");
                summary.ignored.push(name);
            }
        }
    }

    for (key, value) in updates {
        if value.is_null() {
            store.remove(key)?;
        } else {
            store.write(key, &value)?;
        }
        summary.restored.push(key);
    }
    summary.restored.sort();
    Ok(summary)
}

pub fn run<B: StorageBackend>(store: &Store<B>, path: &Path) -> Result<CmdResult> {
    let text = fs::read_to_string(path)?;
    let summary = apply(store, &text)?;
    info!(path = %path.display(), restored = summary.restored.len(), "snapshot imported");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Imported {} key(s) from {}",
        summary.restored.len(),
        path.display()
    )));
    if !summary.ignored.is_empty() {
        result.add_message(CmdMessage::warning(format!(
            "Ignored unknown keys: {}",
            summary.ignored.join(", ")
        )));
    }
    Ok(result.with_keys(summary.restored))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{clear, export};
    use crate::store::mem_backend::MemBackend;
    use serde_json::json;

    #[test]
    fn test_malformed_json_is_a_serialization_error() {
        let store = Store::new(MemBackend::new());
        let err = apply(&store, "{nope").unwrap_err();
        assert!(matches!(err, MindcareError::Serialization(_)));
    }

    #[test]
    fn test_non_object_is_a_validation_error() {
        let store = Store::new(MemBackend::new());
        for text in ["[1,2]", "null", "42", "\"moods\""] {
            let err = apply(&store, text).unwrap_err();
            assert!(matches!(err, MindcareError::Validation(_)), "{}", text);
        }
        assert!(store.backend().is_empty());
    }

    #[test]
    fn test_partial_merge_ignores_unknown_keys() {
        let store = Store::new(MemBackend::new());
        store.write(StorageKey::Habits, &vec!["Walk"]).unwrap();

        let summary = apply(&store, r#"{"points": 5, "foo": 1}"#).unwrap();
        assert_eq!(summary.restored, vec![StorageKey::Points]);
        assert_eq!(summary.ignored, vec!["foo".to_string()]);

        assert_eq!(store.read(StorageKey::Points, 0u64), 5);
        let habits: Vec<String> = store.read(StorageKey::Habits, Vec::new());
        assert_eq!(habits, vec!["Walk"]);
        assert!(store.backend().get_item("foo").unwrap().is_none());
    }

    #[test]
    fn test_null_removes_slot() {
        let store = Store::new(MemBackend::new());
        store.write(StorageKey::Sos, &json!([{"phone": "1234567890"}])).unwrap();
        apply(&store, r#"{"sos": null}"#).unwrap();
        assert!(store.read_raw(StorageKey::Sos).is_none());
    }

    #[test]
    fn test_export_clear_import_round_trip() {
        let store = Store::new(MemBackend::new());
        store.write(StorageKey::Points, &20u64).unwrap();
        store.write(StorageKey::Habits, &json!(["Exercise"])).unwrap();
        store
            .write(StorageKey::Posts, &json!([{"title": "t", "content": "c", "date": "2024-01-01T00:00:00Z", "nickname": "Anon"}]))
            .unwrap();
        let before = export::snapshot(&store);

        let document = export::to_document(&store).unwrap();
        clear::run(&store).unwrap();
        assert!(store.backend().is_empty());

        apply(&store, &document).unwrap();
        assert_eq!(export::snapshot(&store), before);
        assert_eq!(store.backend().len(), 3);
    }

    #[test]
    fn test_write_failure_surfaces_as_store_error() {
        let store = Store::new(MemBackend::new());
        store.backend().set_simulate_write_error(true);
        let err = apply(&store, r#"{"points": 5, "habits": ["Walk"]}"#).unwrap_err();
        assert!(matches!(err, MindcareError::Store(_)));
        assert!(store.backend().is_empty());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let store = Store::new(MemBackend::new());
        let err = run(&store, Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, MindcareError::Io(_)));
    }
}
