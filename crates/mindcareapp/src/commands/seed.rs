//! Demo dataset generation.
//!
//! The shape is fixed (how many of each record, which keys) and the values
//! are drawn from the RNG the caller passes in, so a seeded RNG reproduces
//! the same dataset.

use super::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{
    AcademicStress, Assessment, Badge, Instrument, Mood, MoodEntry, Post, RiskLevel, SleepLog,
    SosRecord, StorageKey, DEFAULT_NICKNAME,
};
use crate::store::{StorageBackend, Store};
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use tracing::info;

pub const DEMO_MOOD_DAYS: i64 = 14;
pub const DEMO_SLEEP_DAYS: i64 = 7;
pub const DEMO_POINTS: u64 = 20;

#[derive(Debug, Clone, PartialEq)]
pub struct DemoDataset {
    pub moods: Vec<MoodEntry>,
    pub assessments: Vec<Assessment>,
    pub badges: Vec<Badge>,
    pub posts: Vec<Post>,
    pub sleep: Vec<SleepLog>,
    pub habits: Vec<String>,
    pub academic: Vec<AcademicStress>,
    pub sos: Vec<SosRecord>,
    pub points: u64,
}

pub fn generate<R: Rng>(rng: &mut R, now: DateTime<Utc>) -> DemoDataset {
    let moods = (0..DEMO_MOOD_DAYS)
        .map(|day| MoodEntry {
            mood: Mood::ALL[rng.random_range(0..Mood::ALL.len())],
            mood_score: Some(rng.random_range(0..=3)),
            note: "demo".to_string(),
            date: now - Duration::days(day),
        })
        .collect();

    let assessments = vec![
        Assessment {
            kind: Instrument::Phq9.name().to_string(),
            score: f64::from(rng.random_range(9..=18u32)),
            answers: Vec::new(),
            date: now,
        },
        Assessment {
            kind: Instrument::Gad7.name().to_string(),
            score: f64::from(rng.random_range(5..=12u32)),
            answers: Vec::new(),
            date: now,
        },
    ];

    let sleep = (0..DEMO_SLEEP_DAYS)
        .map(|day| SleepLog {
            hours: f64::from(rng.random_range(6..=8u32)),
            date: now - Duration::days(day),
        })
        .collect();

    DemoDataset {
        moods,
        assessments,
        badges: vec![Badge::new(
            "Demo Starter",
            "Seeded demo data",
            Some(DEFAULT_NICKNAME.to_string()),
            now,
        )],
        posts: vec![Post {
            title: "Welcome to MindCare".to_string(),
            content: "This is a demo post.".to_string(),
            date: now,
            nickname: DEFAULT_NICKNAME.to_string(),
        }],
        sleep,
        habits: vec!["Exercise".to_string(), "Meditation".to_string()],
        academic: vec![AcademicStress {
            course_load: 4,
            stress: 3,
            gpa: 3.0,
            level: RiskLevel::Medium,
            score: "0.55".to_string(),
            date: now,
        }],
        sos: Vec::new(),
        points: DEMO_POINTS,
    }
}

/// Writes all nine keys, replacing whatever was there.
pub fn write<B: StorageBackend>(store: &Store<B>, data: &DemoDataset) -> Result<()> {
    store.write(StorageKey::Moods, &data.moods)?;
    store.write(StorageKey::Assessments, &data.assessments)?;
    store.write(StorageKey::Badges, &data.badges)?;
    store.write(StorageKey::Posts, &data.posts)?;
    store.write(StorageKey::Sleep, &data.sleep)?;
    store.write(StorageKey::Habits, &data.habits)?;
    store.write(StorageKey::Academic, &data.academic)?;
    store.write(StorageKey::Sos, &data.sos)?;
    store.write(StorageKey::Points, &data.points)?;
    Ok(())
}

pub fn run<B: StorageBackend, R: Rng>(
    store: &Store<B>,
    rng: &mut R,
    now: DateTime<Utc>,
) -> Result<CmdResult> {
    let data = generate(rng, now);
    write(store, &data)?;
    info!(moods = data.moods.len(), "demo data seeded");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success("Demo data seeded."));
    Ok(result.with_keys(StorageKey::ALL.to_vec()))
}
