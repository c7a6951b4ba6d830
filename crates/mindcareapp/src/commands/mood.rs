use super::gamification;
use super::{CmdMessage, CmdResult};
use crate::error::{MindcareError, Result};
use crate::model::{Badge, Mood, MoodEntry, StorageKey, MOOD_CAP};
use crate::store::{StorageBackend, Store};
use chrono::{DateTime, Days, NaiveDate, Utc};
use std::collections::HashSet;

pub const MAX_MOOD_SCORE: u8 = 3;
pub const STREAK_DAYS: usize = 7;
pub const STREAK_BADGE: &str = "7-day mood streak";
const STREAK_BADGE_DESCRIPTION: &str = "Logged moods 7 days straight";

pub fn log<B: StorageBackend>(
    store: &Store<B>,
    mood: Mood,
    score: Option<u8>,
    note: &str,
    nickname: &str,
    now: DateTime<Utc>,
) -> Result<CmdResult> {
    if let Some(score) = score {
        if score > MAX_MOOD_SCORE {
            return Err(MindcareError::Validation(format!(
                "Mood score must be between 0 and {}",
                MAX_MOOD_SCORE
            )));
        }
    }
    let entry = MoodEntry {
        mood,
        mood_score: score,
        note: note.trim().to_string(),
        date: now,
    };
    store.prepend_capped(StorageKey::Moods, &entry, MOOD_CAP)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Mood logged: {}", mood)));

    let moods: Vec<MoodEntry> = store.read_list(StorageKey::Moods);
    let mut badges = Vec::new();
    if streak_days(&moods, now.date_naive()) >= STREAK_DAYS {
        let badge = Badge::new(
            STREAK_BADGE,
            STREAK_BADGE_DESCRIPTION,
            Some(nickname.to_string()),
            now,
        );
        gamification::award(store, &badge)?;
        result.add_message(CmdMessage::success(format!("Badge earned: {}", STREAK_BADGE)));
        badges.push(badge);
    }
    Ok(result.with_moods(vec![entry]).with_badges(badges))
}

/// Consecutive days, ending at `today`, with at least one entry. Only the
/// last week is examined.
pub fn streak_days(moods: &[MoodEntry], today: NaiveDate) -> usize {
    let days: HashSet<NaiveDate> = moods.iter().map(|m| m.date.date_naive()).collect();
    (0..STREAK_DAYS as u64)
        .map_while(|back| today.checked_sub_days(Days::new(back)))
        .take_while(|day| days.contains(day))
        .count()
}

pub fn list<B: StorageBackend>(store: &Store<B>) -> CmdResult {
    CmdResult::default().with_moods(store.read_list(StorageKey::Moods))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;
    use chrono::{Duration, TimeZone};

    fn noon(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, day, 12, 0, 0).unwrap()
    }

    fn entry(date: DateTime<Utc>) -> MoodEntry {
        MoodEntry {
            mood: Mood::Happy,
            mood_score: Some(3),
            note: String::new(),
            date,
        }
    }

    #[test]
    fn test_log_prepends_entry() {
        let store = Store::new(MemBackend::new());
        log(&store, Mood::Sad, Some(1), " rough day ", "Anon", noon(1)).unwrap();
        log(&store, Mood::Happy, None, "", "Anon", noon(2)).unwrap();

        let moods = list(&store).moods;
        assert_eq!(moods.len(), 2);
        assert_eq!(moods[0].mood, Mood::Happy);
        assert_eq!(moods[0].mood_score, None);
        assert_eq!(moods[1].note, "rough day");
    }

    #[test]
    fn test_score_out_of_range_is_rejected() {
        let store = Store::new(MemBackend::new());
        assert!(log(&store, Mood::Happy, Some(4), "", "Anon", noon(1)).is_err());
        assert!(list(&store).moods.is_empty());
    }

    #[test]
    fn test_streak_counts_back_from_today() {
        let moods: Vec<MoodEntry> = (1..=5).map(|d| entry(noon(d))).collect();
        assert_eq!(streak_days(&moods, noon(5).date_naive()), 5);
        assert_eq!(streak_days(&moods, noon(6).date_naive()), 0);
    }

    #[test]
    fn test_streak_breaks_on_gap() {
        let moods = vec![entry(noon(10)), entry(noon(9)), entry(noon(7))];
        assert_eq!(streak_days(&moods, noon(10).date_naive()), 2);
    }

    #[test]
    fn test_seventh_consecutive_day_awards_badge() {
        let store = Store::new(MemBackend::new());
        let start = noon(1);
        for day in 0..6 {
            let result = log(&store, Mood::Neutral, Some(2), "", "Anon", start + Duration::days(day)).unwrap();
            assert!(result.badges.is_empty());
        }
        let result = log(&store, Mood::Neutral, Some(2), "", "Anon", start + Duration::days(6)).unwrap();
        assert_eq!(result.badges.len(), 1);

        let badges: Vec<Badge> = store.read_list(StorageKey::Badges);
        assert_eq!(badges[0].badge_name, STREAK_BADGE);
    }

    #[test]
    fn test_moods_are_capped() {
        let store = Store::new(MemBackend::new());
        let moods: Vec<MoodEntry> = (0..MOOD_CAP).map(|_| entry(noon(1))).collect();
        store.write(StorageKey::Moods, &moods).unwrap();
        log(&store, Mood::Anxious, Some(0), "", "Anon", noon(2)).unwrap();

        let moods = list(&store).moods;
        assert_eq!(moods.len(), MOOD_CAP);
        assert_eq!(moods[0].mood, Mood::Anxious);
    }
}
