//! # Data Model
//!
//! Every record the app persists lives under one of nine fixed storage keys
//! ([`StorageKey`]). Lists are kept most-recent-first and capped; nothing has
//! a server-assigned identity.
//!
//! Field names are camelCase on the wire so that snapshots stay compatible
//! with files exported by the browser build of the app.

use crate::error::{MindcareError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const MOOD_CAP: usize = 200;
pub const ASSESSMENT_CAP: usize = 200;
pub const BADGE_CAP: usize = 50;
pub const POST_CAP: usize = 200;
pub const SLEEP_CAP: usize = 60;
pub const HABIT_CAP: usize = 50;
pub const SOS_CAP: usize = 200;

/// Score used for a mood entry that was logged without one.
pub const DEFAULT_MOOD_SCORE: f64 = 2.0;

pub const DEFAULT_NICKNAME: &str = "Anon";

/// The closed set of storage slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageKey {
    Moods,
    Assessments,
    Badges,
    Posts,
    Sleep,
    Habits,
    Sos,
    Academic,
    Points,
}

impl StorageKey {
    pub const ALL: [StorageKey; 9] = [
        StorageKey::Moods,
        StorageKey::Assessments,
        StorageKey::Badges,
        StorageKey::Posts,
        StorageKey::Sleep,
        StorageKey::Habits,
        StorageKey::Sos,
        StorageKey::Academic,
        StorageKey::Points,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::Moods => "moods",
            StorageKey::Assessments => "assessments",
            StorageKey::Badges => "badges",
            StorageKey::Posts => "posts",
            StorageKey::Sleep => "sleep",
            StorageKey::Habits => "habits",
            StorageKey::Sos => "sos",
            StorageKey::Academic => "academic",
            StorageKey::Points => "points",
        }
    }

    /// Looks up a key by its slot name. Unknown names yield `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == name)
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Neutral,
    Sad,
    Anxious,
}

impl Mood {
    pub const ALL: [Mood; 4] = [Mood::Happy, Mood::Neutral, Mood::Sad, Mood::Anxious];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Neutral => "neutral",
            Mood::Sad => "sad",
            Mood::Anxious => "anxious",
        }
    }
}

impl FromStr for Mood {
    type Err = MindcareError;

    fn from_str(s: &str) -> Result<Self> {
        Mood::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                MindcareError::Validation(format!(
                    "Unknown mood '{}' (expected happy, neutral, sad or anxious)",
                    s
                ))
            })
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntry {
    pub mood: Mood,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood_score: Option<u8>,
    #[serde(default)]
    pub note: String,
    pub date: DateTime<Utc>,
}

impl MoodEntry {
    /// The score used when aggregating; missing scores count as neutral.
    pub fn effective_score(&self) -> f64 {
        self.mood_score
            .map(f64::from)
            .unwrap_or(DEFAULT_MOOD_SCORE)
    }
}

/// Screening instruments the assessment center offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instrument {
    Phq9,
    Gad7,
    Ghq12,
    Dass21,
}

impl Instrument {
    pub const ALL: [Instrument; 4] = [
        Instrument::Phq9,
        Instrument::Gad7,
        Instrument::Ghq12,
        Instrument::Dass21,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Instrument::Phq9 => "PHQ-9",
            Instrument::Gad7 => "GAD-7",
            Instrument::Ghq12 => "GHQ-12",
            Instrument::Dass21 => "DASS-21",
        }
    }

    pub fn question_count(&self) -> usize {
        match self {
            Instrument::Phq9 => 9,
            Instrument::Gad7 => 7,
            Instrument::Ghq12 => 12,
            Instrument::Dass21 => 21,
        }
    }

    /// Each answer is scored 0-3.
    pub fn max_score(&self) -> u32 {
        self.question_count() as u32 * 3
    }

    /// Severity band for a total score.
    pub fn interpret(&self, score: u32) -> &'static str {
        match self {
            Instrument::Phq9 => match score {
                20.. => "Severe",
                15..=19 => "Moderately severe",
                10..=14 => "Moderate",
                5..=9 => "Mild",
                _ => "Minimal",
            },
            Instrument::Gad7 => match score {
                15.. => "Severe",
                10..=14 => "Moderate",
                5..=9 => "Mild",
                _ => "Minimal",
            },
            Instrument::Ghq12 => match score {
                21.. => "High distress",
                13..=20 => "Moderate distress",
                _ => "Low distress",
            },
            Instrument::Dass21 => match score {
                61.. => "Extremely severe",
                46..=60 => "Severe",
                31..=45 => "Moderate",
                _ => "Mild/Normal",
            },
        }
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Instrument {
    type Err = MindcareError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_uppercase();
        match normalized.as_str() {
            "PHQ9" => Ok(Instrument::Phq9),
            "GAD7" => Ok(Instrument::Gad7),
            "GHQ12" => Ok(Instrument::Ghq12),
            "DASS21" => Ok(Instrument::Dass21),
            _ => Err(MindcareError::Validation(format!(
                "Unknown assessment type '{}' (expected PHQ-9, GAD-7, GHQ-12 or DASS-21)",
                s
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    #[serde(rename = "type")]
    pub kind: String,
    pub score: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub answers: Vec<u32>,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub badge_name: String,
    pub description: String,
    pub earned_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
}

impl Badge {
    pub fn new(
        badge_name: impl Into<String>,
        description: impl Into<String>,
        nickname: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            badge_name: badge_name.into(),
            description: description.into(),
            earned_at: now,
            nickname,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub title: String,
    pub content: String,
    pub date: DateTime<Utc>,
    pub nickname: String,
}

impl Post {
    /// Builds a post from user input. Title and content are trimmed and must
    /// not be empty. Both the API call and the local fallback store exactly
    /// this value.
    pub fn new(title: &str, content: &str, nickname: &str, now: DateTime<Utc>) -> Result<Self> {
        let title = title.trim();
        let content = content.trim();
        if title.is_empty() || content.is_empty() {
            return Err(MindcareError::Validation(
                "Title and content are required.".to_string(),
            ));
        }
        Ok(Self {
            title: title.to_string(),
            content: content.to_string(),
            date: now,
            nickname: nickname.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepLog {
    pub hours: f64,
    pub date: DateTime<Utc>,
}

/// The payload of an SOS alert as sent by the client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SosAlert {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// An SOS alert as persisted: the payload plus the time it was recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SosRecord {
    #[serde(flatten)]
    pub alert: SosAlert,
    pub date: DateTime<Utc>,
}

impl SosRecord {
    pub fn stamp(alert: SosAlert, now: DateTime<Utc>) -> Self {
        Self { alert, date: now }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    pub score: f64,
}

/// Demo-only record; nothing but the seeder writes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcademicStress {
    pub course_load: u32,
    pub stress: u32,
    pub gpa: f64,
    pub level: RiskLevel,
    pub score: String,
    pub date: DateTime<Utc>,
}
