use super::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::StorageKey;
use crate::store::{StorageBackend, Store};
use tracing::info;

/// Removes every known key. Safe to repeat.
pub fn run<B: StorageBackend>(store: &Store<B>) -> Result<CmdResult> {
    for key in StorageKey::ALL {
        store.remove(key)?;
    }
    info!("all local data cleared");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success("All local data cleared."));
    Ok(result.with_keys(StorageKey::ALL.to_vec()))
}
