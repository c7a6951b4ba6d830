use super::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Badge, StorageKey, BADGE_CAP};
use crate::store::{StorageBackend, Store};
use chrono::{DateTime, Utc};

pub const DEFAULT_BADGE_NAME: &str = "Beta Tester";
pub const DEFAULT_BADGE_DESCRIPTION: &str = "Early adopter";
pub const CHECK_IN_POINTS: u64 = 10;

/// Prepends a badge. Badges are never de-duplicated.
pub fn award<B: StorageBackend>(store: &Store<B>, badge: &Badge) -> Result<usize> {
    store.prepend_capped(StorageKey::Badges, badge, BADGE_CAP)
}

pub fn award_run<B: StorageBackend>(
    store: &Store<B>,
    name: Option<&str>,
    description: Option<&str>,
    nickname: &str,
    now: DateTime<Utc>,
) -> Result<CmdResult> {
    let name = non_empty(name).unwrap_or(DEFAULT_BADGE_NAME);
    let description = non_empty(description).unwrap_or(DEFAULT_BADGE_DESCRIPTION);
    let badge = Badge::new(name, description, Some(nickname.to_string()), now);
    award(store, &badge)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Badge earned: {}", badge.badge_name)));
    Ok(result.with_badges(vec![badge]))
}

/// Adds to the point total and returns the new total.
pub fn add_points<B: StorageBackend>(store: &Store<B>, amount: u64) -> Result<u64> {
    let total = points(store).saturating_add(amount);
    store.write(StorageKey::Points, &total)?;
    Ok(total)
}

pub fn add_points_run<B: StorageBackend>(store: &Store<B>, amount: u64) -> Result<CmdResult> {
    let total = add_points(store, amount)?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "+{} points ({} total)",
        amount, total
    )));
    Ok(result.with_points(total))
}

pub fn points<B: StorageBackend>(store: &Store<B>) -> u64 {
    store.read(StorageKey::Points, 0u64)
}

pub fn summary<B: StorageBackend>(store: &Store<B>) -> CmdResult {
    let badges: Vec<Badge> = store.read_list(StorageKey::Badges);
    let mut result = CmdResult::default();
    if badges.is_empty() {
        result.add_message(CmdMessage::info("No badges yet."));
    }
    result.with_badges(badges).with_points(points(store))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;

    #[test]
    fn test_award_defaults() {
        let store = Store::new(MemBackend::new());
        let result = award_run(&store, None, Some("  "), "Anon", Utc::now()).unwrap();
        let badge = &result.badges[0];
        assert_eq!(badge.badge_name, "Beta Tester");
        assert_eq!(badge.description, "Early adopter");
        assert_eq!(badge.nickname.as_deref(), Some("Anon"));
    }

    #[test]
    fn test_badges_are_not_deduplicated() {
        let store = Store::new(MemBackend::new());
        award_run(&store, Some("Helper"), None, "Anon", Utc::now()).unwrap();
        award_run(&store, Some("Helper"), None, "Anon", Utc::now()).unwrap();
        assert_eq!(summary(&store).badges.len(), 2);
    }

    #[test]
    fn test_badges_are_capped() {
        let store = Store::new(MemBackend::new());
        for i in 0..BADGE_CAP + 3 {
            award_run(&store, Some(&format!("b{}", i)), None, "Anon", Utc::now()).unwrap();
        }
        let badges = summary(&store).badges;
        assert_eq!(badges.len(), BADGE_CAP);
        assert_eq!(badges[0].badge_name, format!("b{}", BADGE_CAP + 2));
    }

    #[test]
    fn test_points_accumulate() {
        let store = Store::new(MemBackend::new());
        assert_eq!(points(&store), 0);
        add_points(&store, CHECK_IN_POINTS).unwrap();
        let result = add_points_run(&store, 5).unwrap();
        assert_eq!(result.points, Some(15));
        assert_eq!(summary(&store).points, Some(15));
    }

    #[test]
    fn test_points_saturate() {
        let store = Store::new(MemBackend::new());
        store.write(StorageKey::Points, &u64::MAX).unwrap();
        assert_eq!(add_points(&store, 1).unwrap(), u64::MAX);
    }

    #[test]
    fn test_corrupt_points_restart_from_zero() {
        let store = Store::new(MemBackend::new());
        store.backend().set_item("points", "many").unwrap();
        assert_eq!(add_points(&store, 10).unwrap(), 10);
    }
}
