use super::{api_path, CmdMessage, CmdResult};
use crate::model::StorageKey;
use crate::store::{StorageBackend, Store};
use crate::transport::{Request, Transport};
use serde::de::DeserializeOwned;
use tracing::debug;

pub const MOODS_ROUTE: &str = "/mood";
pub const ASSESSMENTS_ROUTE: &str = "/assessments";
pub const BADGES_ROUTE: &str = "/gamification/badges";

/// Loads the three dashboard lists. Each list is fetched through the
/// transport and, if that fails, read straight from storage.
pub fn run<B: StorageBackend, T: Transport + ?Sized>(
    store: &Store<B>,
    transport: &T,
    prefix: &str,
) -> CmdResult {
    let mut result = CmdResult::default();
    let mut fallbacks = 0;

    let moods = fetch(store, transport, prefix, MOODS_ROUTE, StorageKey::Moods, &mut fallbacks);
    let assessments = fetch(
        store,
        transport,
        prefix,
        ASSESSMENTS_ROUTE,
        StorageKey::Assessments,
        &mut fallbacks,
    );
    let badges = fetch(store, transport, prefix, BADGES_ROUTE, StorageKey::Badges, &mut fallbacks);

    if fallbacks > 0 {
        result.add_message(CmdMessage::info("Showing locally stored data."));
    }
    result
        .with_moods(moods)
        .with_assessments(assessments)
        .with_badges(badges)
}

fn fetch<B, T, V>(
    store: &Store<B>,
    transport: &T,
    prefix: &str,
    route: &str,
    key: StorageKey,
    fallbacks: &mut usize,
) -> Vec<V>
where
    B: StorageBackend,
    T: Transport + ?Sized,
    V: DeserializeOwned,
{
    let remote = transport
        .send(&Request::get(api_path(prefix, route)))
        .ok()
        .filter(|response| response.is_success())
        .and_then(|response| response.json::<Vec<serde_json::Value>>().ok());
    match remote {
        Some(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        None => {
            debug!(%key, "dashboard fetch failed, reading local copy");
            *fallbacks += 1;
            store.read_list(key)
        }
    }
}
