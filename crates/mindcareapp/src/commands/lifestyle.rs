use super::{CmdMessage, CmdResult};
use crate::error::{MindcareError, Result};
use crate::model::{SleepLog, StorageKey, HABIT_CAP, SLEEP_CAP};
use crate::store::{StorageBackend, Store};
use chrono::{DateTime, Utc};

pub const MAX_SLEEP_HOURS: f64 = 24.0;

pub fn log_sleep<B: StorageBackend>(
    store: &Store<B>,
    hours: f64,
    now: DateTime<Utc>,
) -> Result<CmdResult> {
    if !hours.is_finite() || !(0.0..=MAX_SLEEP_HOURS).contains(&hours) {
        return Err(MindcareError::Validation(format!(
            "Sleep hours must be between 0 and {}",
            MAX_SLEEP_HOURS
        )));
    }
    let log = SleepLog { hours, date: now };
    store.prepend_capped(StorageKey::Sleep, &log, SLEEP_CAP)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Logged {} h of sleep", hours)));
    Ok(result.with_sleep_logs(vec![log]))
}

pub fn add_habit<B: StorageBackend>(store: &Store<B>, name: &str) -> Result<CmdResult> {
    let name = name.trim();
    if name.is_empty() {
        return Err(MindcareError::Validation(
            "Habit name cannot be empty".to_string(),
        ));
    }
    store.prepend_capped(StorageKey::Habits, &name, HABIT_CAP)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Habit added: {}", name)));
    Ok(result.with_habits(vec![name.to_string()]))
}

pub fn summary<B: StorageBackend>(store: &Store<B>) -> CmdResult {
    CmdResult::default()
        .with_sleep_logs(store.read_list(StorageKey::Sleep))
        .with_habits(store.read_list(StorageKey::Habits))
}
