//! # Command Layer
//!
//! The business logic of mindcare. Each command lives in its own submodule
//! as plain functions over a [`Store`](crate::store::Store) and, for the
//! operations that nominally hit the API, a [`Transport`](crate::transport::Transport).
//!
//! ## What Commands Do NOT Do
//!
//! - **Any terminal I/O**: no stdout, stderr or styling
//! - **Argument parsing**: that is the CLI layer's job
//! - **Exit codes**: return `Result`, let the caller decide
//! - **User interaction**: no prompts or confirmations
//!
//! ## Structured Returns
//!
//! Commands return [`CmdResult`], not strings. It carries the records a
//! command touched or listed (posts, moods, badges, ...), scalar outcomes
//! such as points, risk or the report, the [`Delivery`] of write-through
//! actions, snapshot paths and keys, and leveled [`CmdMessage`]s. The UI
//! decides how to render them.
//!
//! ## Testing Strategy
//!
//! Most of the testing lives here. Command tests use `MemBackend` and either
//! an intercepted offline client or `RecordingTransport`, and check the
//! stored slots as well as the returned `CmdResult`.
//!
//! ## Command Modules
//!
//! - [`post`], [`sos`]: community posts and SOS alerts, with [`write_through`]
//! - [`mood`], [`assessment`], [`gamification`], [`lifestyle`]: wellness tracking
//! - [`risk`], [`dashboard`], [`report`]: read-side aggregation
//! - [`export`], [`import`], [`clear`], [`seed`]: snapshots

use crate::model::{
    Assessment, Badge, MoodEntry, Post, RiskAssessment, SleepLog, SosRecord, StorageKey,
};
use std::path::PathBuf;

pub mod assessment;
pub mod clear;
pub mod dashboard;
pub mod export;
pub mod gamification;
pub mod import;
pub mod lifestyle;
pub mod mood;
pub mod post;
pub mod report;
pub mod risk;
pub mod seed;
pub mod sos;
pub mod write_through;

pub use report::Report;
pub use write_through::Delivery;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// What a command hands back to the UI: the records it touched or listed,
/// plus human-readable messages. Fields a command does not use stay empty.
#[derive(Debug, Default)]
pub struct CmdResult {
    pub posts: Vec<Post>,
    pub sos_records: Vec<SosRecord>,
    pub moods: Vec<MoodEntry>,
    pub assessments: Vec<Assessment>,
    pub badges: Vec<Badge>,
    pub sleep_logs: Vec<SleepLog>,
    pub habits: Vec<String>,
    pub points: Option<u64>,
    pub risk: Option<RiskAssessment>,
    pub report: Option<Report>,
    pub delivery: Option<Delivery>,
    pub snapshot_path: Option<PathBuf>,
    pub keys: Vec<StorageKey>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_posts(mut self, posts: Vec<Post>) -> Self {
        self.posts = posts;
        self
    }

    pub fn with_sos_records(mut self, records: Vec<SosRecord>) -> Self {
        self.sos_records = records;
        self
    }

    pub fn with_moods(mut self, moods: Vec<MoodEntry>) -> Self {
        self.moods = moods;
        self
    }

    pub fn with_assessments(mut self, assessments: Vec<Assessment>) -> Self {
        self.assessments = assessments;
        self
    }

    pub fn with_badges(mut self, badges: Vec<Badge>) -> Self {
        self.badges = badges;
        self
    }

    pub fn with_sleep_logs(mut self, logs: Vec<SleepLog>) -> Self {
        self.sleep_logs = logs;
        self
    }

    pub fn with_habits(mut self, habits: Vec<String>) -> Self {
        self.habits = habits;
        self
    }

    pub fn with_points(mut self, points: u64) -> Self {
        self.points = Some(points);
        self
    }

    pub fn with_risk(mut self, risk: RiskAssessment) -> Self {
        self.risk = Some(risk);
        self
    }

    pub fn with_report(mut self, report: Report) -> Self {
        self.report = Some(report);
        self
    }

    pub fn with_delivery(mut self, delivery: Delivery) -> Self {
        self.delivery = Some(delivery);
        self
    }

    pub fn with_snapshot_path(mut self, path: PathBuf) -> Self {
        self.snapshot_path = Some(path);
        self
    }

    pub fn with_keys(mut self, keys: Vec<StorageKey>) -> Self {
        self.keys = keys;
        self
    }
}

/// Joins the API prefix and a route path.
pub(crate) fn api_path(prefix: &str, route: &str) -> String {
    format!("{}{}", prefix.trim_end_matches('/'), route)
}
