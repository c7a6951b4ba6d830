use super::gamification;
use super::CmdResult;
use crate::model::{Assessment, Badge, MoodEntry, Post, SleepLog, SosRecord, StorageKey};
use crate::store::{StorageBackend, Store};
use serde::Serialize;
use serde_json::Value;

/// Aggregate view over everything stored locally.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub average_mood: Option<f64>,
    pub mood_count: usize,
    pub last_assessment: Option<Assessment>,
    pub average_sleep: Option<f64>,
    pub sleep_count: usize,
    pub points: u64,
    pub badge_count: usize,
    pub post_count: usize,
    pub habit_count: usize,
    pub sos_count: usize,
}

pub fn build<B: StorageBackend>(store: &Store<B>) -> Report {
    let moods: Vec<MoodEntry> = store.read_list(StorageKey::Moods);
    let assessments: Vec<Assessment> = store.read_list(StorageKey::Assessments);
    let sleep: Vec<SleepLog> = store.read_list(StorageKey::Sleep);
    let badges: Vec<Badge> = store.read_list(StorageKey::Badges);
    let posts: Vec<Post> = store.read_list(StorageKey::Posts);
    let sos: Vec<SosRecord> = store.read_list(StorageKey::Sos);
    let habits: Vec<Value> = store.read(StorageKey::Habits, Vec::new());

    Report {
        average_mood: mean(moods.iter().map(MoodEntry::effective_score)),
        mood_count: moods.len(),
        last_assessment: assessments.into_iter().next(),
        average_sleep: mean(sleep.iter().map(|s| s.hours)),
        sleep_count: sleep.len(),
        points: gamification::points(store),
        badge_count: badges.len(),
        post_count: posts.len(),
        habit_count: habits.len(),
        sos_count: sos.len(),
    }
}

pub fn run<B: StorageBackend>(store: &Store<B>) -> CmdResult {
    CmdResult::default().with_report(build(store))
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}
