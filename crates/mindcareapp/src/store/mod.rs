//! # Storage Layer
//!
//! All persistent state goes through [`Store`], a typed adapter over a raw
//! [`StorageBackend`]. No other module parses or serializes slot contents.
//!
//! ## Slots
//!
//! Storage is a flat key-value space addressed by [`StorageKey`]. Each slot
//! holds one JSON document (a list, a number, ...) and is always replaced as
//! a whole; there are no partial updates and no cross-slot transactions.
//!
//! ## Reads Never Fail
//!
//! [`Store::read`] returns the caller's fallback when a slot is absent, holds
//! text that is not JSON, holds JSON of the wrong shape, or the backend fails
//! to read. Corrupt data is treated exactly like missing data. Writes do
//! return errors, since a disk can fill up.
//!
//! ## Capped Lists
//!
//! Lists are most-recent-first with a maximum length. [`Store::prepend_capped`]
//! is the one operation that grows a list: it works on raw JSON elements so an
//! entry this build does not understand is carried along instead of wiping
//! the list.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: one `<key>.json` file per slot, atomic writes.
//! - [`mem_backend::MemBackend`]: in-memory, for tests.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! ├── mindcare.toml     # Optional configuration
//! ├── moods.json
//! ├── posts.json
//! ├── ...
//! └── points.json
//! ```

use crate::error::Result;
use crate::model::StorageKey;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::rc::Rc;
use tracing::{debug, warn};

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;

pub use backend::StorageBackend;

/// Typed handle over a storage backend.
///
/// Cloning is cheap and every clone sees the same slots, which is how the
/// API facade and the request interceptor share one backend.
pub struct Store<B: StorageBackend> {
    backend: Rc<B>,
}

impl<B: StorageBackend> Clone for Store<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Rc::clone(&self.backend),
        }
    }
}

impl<B: StorageBackend> Store<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend: Rc::new(backend),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The parsed value under `key`, or `fallback` when absent or unreadable.
    pub fn read<T: DeserializeOwned>(&self, key: StorageKey, fallback: T) -> T {
        let Some(value) = self.read_raw(key) else {
            return fallback;
        };
        match serde_json::from_value(value) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(%key, error = %e, "stored value has unexpected shape, using fallback");
                fallback
            }
        }
    }

    /// The slot as untyped JSON. `None` when absent, unreadable or not JSON.
    pub fn read_raw(&self, key: StorageKey) -> Option<Value> {
        let text = match self.backend.get_item(key.as_str()) {
            Ok(Some(text)) => text,
            Ok(None) => return None,
            Err(e) => {
                warn!(%key, error = %e, "failed to read slot");
                return None;
            }
        };
        match serde_json::from_str(&text) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(%key, error = %e, "slot holds invalid JSON, treating as absent");
                None
            }
        }
    }

    /// Decodes a list slot element by element, dropping entries that do not
    /// match `T`. Absent or non-list slots read as empty.
    pub fn read_list<T: DeserializeOwned>(&self, key: StorageKey) -> Vec<T> {
        let items: Vec<Value> = self.read(key, Vec::new());
        let total = items.len();
        let parsed: Vec<T> = items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect();
        if parsed.len() != total {
            warn!(%key, skipped = total - parsed.len(), "skipped malformed list entries");
        }
        parsed
    }

    /// Serializes `value` and replaces the slot.
    pub fn write<T: Serialize + ?Sized>(&self, key: StorageKey, value: &T) -> Result<()> {
        let text = serde_json::to_string(value)?;
        self.backend.set_item(key.as_str(), &text)?;
        debug!(%key, bytes = text.len(), "slot written");
        Ok(())
    }

    pub fn remove(&self, key: StorageKey) -> Result<()> {
        self.backend.remove_item(key.as_str())?;
        debug!(%key, "slot removed");
        Ok(())
    }

    /// Inserts `item` at the front of the list under `key`, drops entries
    /// beyond `cap`, and persists. Returns the resulting list length.
    pub fn prepend_capped<T: Serialize>(&self, key: StorageKey, item: &T, cap: usize) -> Result<usize> {
        let mut items: Vec<Value> = self.read(key, Vec::new());
        items.insert(0, serde_json::to_value(item)?);
        items.truncate(cap);
        self.write(key, &items)?;
        Ok(items.len())
    }
}
