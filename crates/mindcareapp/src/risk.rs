//! Composite wellbeing risk score.
//!
//! ```text
//! score = 0.75 * (latestAssessmentScore / 27) + 0.25 * ((3 - avgMood) / 3)
//! ```
//!
//! `avgMood` is the mean of the recent mood scores, or 2 when there are none.
//! Levels: `High` at 0.7 and above, `Medium` at 0.4 and above, else `Low`.

use crate::model::{RiskAssessment, RiskLevel, DEFAULT_MOOD_SCORE};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const ASSESSMENT_WEIGHT: f64 = 0.75;
const MOOD_WEIGHT: f64 = 0.25;
const ASSESSMENT_SCALE: f64 = 27.0;
const MOOD_SCALE: f64 = 3.0;
const HIGH_THRESHOLD: f64 = 0.7;
const MEDIUM_THRESHOLD: f64 = 0.4;

/// Body of a risk request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskRequest {
    #[serde(default)]
    pub latest_assessment_score: f64,
    #[serde(default)]
    pub recent_mood_scores: Vec<f64>,
}

impl RiskRequest {
    pub fn new(latest_assessment_score: f64, recent_mood_scores: Vec<f64>) -> Self {
        Self {
            latest_assessment_score,
            recent_mood_scores,
        }
    }

    /// Lenient decoding of an arbitrary request body: a missing or
    /// non-numeric assessment score is 0, a missing or non-list mood field is
    /// an empty list, and non-numeric list entries are skipped.
    pub fn from_json(body: &Value) -> Self {
        let latest_assessment_score = body
            .get("latestAssessmentScore")
            .and_then(Value::as_f64)
            .unwrap_or(0.0);
        let recent_mood_scores = body
            .get("recentMoodScores")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_f64).collect())
            .unwrap_or_default();
        Self {
            latest_assessment_score,
            recent_mood_scores,
        }
    }
}

pub fn evaluate(request: &RiskRequest) -> RiskAssessment {
    let score = composite_score(request.latest_assessment_score, &request.recent_mood_scores);
    RiskAssessment {
        level: level_for(score),
        score,
    }
}

pub fn composite_score(latest_assessment_score: f64, recent_mood_scores: &[f64]) -> f64 {
    let assessment = latest_assessment_score / ASSESSMENT_SCALE;
    let avg = if recent_mood_scores.is_empty() {
        DEFAULT_MOOD_SCORE
    } else {
        recent_mood_scores.iter().sum::<f64>() / recent_mood_scores.len() as f64
    };
    let mood = (MOOD_SCALE - avg) / MOOD_SCALE;
    ASSESSMENT_WEIGHT * assessment + MOOD_WEIGHT * mood
}

pub fn level_for(score: f64) -> RiskLevel {
    if score >= HIGH_THRESHOLD {
        RiskLevel::High
    } else if score >= MEDIUM_THRESHOLD {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}
