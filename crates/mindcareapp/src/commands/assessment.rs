use super::gamification;
use super::{CmdMessage, CmdResult};
use crate::error::{MindcareError, Result};
use crate::model::{Assessment, Badge, Instrument, StorageKey, ASSESSMENT_CAP};
use crate::store::{StorageBackend, Store};
use chrono::{DateTime, Utc};

pub const MAX_ANSWER: u32 = 3;

/// Answers padded with zeros to the instrument's question count.
pub fn normalize_answers(instrument: Instrument, answers: &[u32]) -> Result<Vec<u32>> {
    let expected = instrument.question_count();
    if answers.len() > expected {
        return Err(MindcareError::Validation(format!(
            "{} has {} questions, got {} answers",
            instrument,
            expected,
            answers.len()
        )));
    }
    if let Some(bad) = answers.iter().find(|a| **a > MAX_ANSWER) {
        return Err(MindcareError::Validation(format!(
            "Answers must be between 0 and {}, got {}",
            MAX_ANSWER, bad
        )));
    }
    let mut padded = answers.to_vec();
    padded.resize(expected, 0);
    Ok(padded)
}

/// Scores at or above this earn the completion badge.
pub fn badge_threshold(instrument: Instrument) -> u32 {
    instrument.max_score() * 4 / 5
}

pub fn record<B: StorageBackend>(
    store: &Store<B>,
    instrument: Instrument,
    answers: &[u32],
    nickname: &str,
    now: DateTime<Utc>,
) -> Result<CmdResult> {
    let answers = normalize_answers(instrument, answers)?;
    let score: u32 = answers.iter().sum();
    let assessment = Assessment {
        kind: instrument.name().to_string(),
        score: f64::from(score),
        answers,
        date: now,
    };
    store.prepend_capped(StorageKey::Assessments, &assessment, ASSESSMENT_CAP)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "{} score {}/{}: {}",
        instrument,
        score,
        instrument.max_score(),
        instrument.interpret(score)
    )));

    let mut badges = Vec::new();
    if score >= badge_threshold(instrument) {
        let badge = Badge::new(
            format!("{} completed", instrument),
            format!("Completed {}", instrument),
            Some(nickname.to_string()),
            now,
        );
        gamification::award(store, &badge)?;
        result.add_message(CmdMessage::success(format!("Badge earned: {}", badge.badge_name)));
        badges.push(badge);
    }
    Ok(result.with_assessments(vec![assessment]).with_badges(badges))
}

pub fn list<B: StorageBackend>(store: &Store<B>) -> CmdResult {
    CmdResult::default().with_assessments(store.read_list(StorageKey::Assessments))
}

/// The most recent stored score for `instrument`, if any.
pub fn latest_score<B: StorageBackend>(store: &Store<B>, instrument: Instrument) -> Option<f64> {
    store
        .read_list::<Assessment>(StorageKey::Assessments)
        .into_iter()
        .find(|a| a.kind == instrument.name())
        .map(|a| a.score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;

    #[test]
    fn test_answers_are_padded() {
        let answers = normalize_answers(Instrument::Gad7, &[1, 2]).unwrap();
        assert_eq!(answers, vec![1, 2, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_invalid_answers_are_rejected() {
        assert!(normalize_answers(Instrument::Gad7, &[0; 8]).is_err());
        assert!(normalize_answers(Instrument::Phq9, &[4]).is_err());
    }

    #[test]
    fn test_record_sums_answers() {
        let store = Store::new(MemBackend::new());
        let result = record(&store, Instrument::Phq9, &[1, 1, 1, 2], "Anon", Utc::now()).unwrap();
        assert_eq!(result.assessments[0].score, 5.0);
        assert!(result.badges.is_empty());
        assert!(result.messages[0].content.contains("Mild"));

        let stored = list(&store).assessments;
        assert_eq!(stored[0].kind, "PHQ-9");
        assert_eq!(stored[0].answers.len(), 9);
    }

    #[test]
    fn test_high_score_awards_badge() {
        // floor(27 * 0.8) = 21
        assert_eq!(badge_threshold(Instrument::Phq9), 21);
        assert_eq!(badge_threshold(Instrument::Gad7), 16);

        let store = Store::new(MemBackend::new());
        let answers = [3, 3, 3, 3, 3, 3, 3, 0, 0];
        let result = record(&store, Instrument::Phq9, &answers, "Anon", Utc::now()).unwrap();
        assert_eq!(result.badges[0].badge_name, "PHQ-9 completed");
        assert_eq!(result.badges[0].description, "Completed PHQ-9");

        let badges: Vec<Badge> = store.read_list(StorageKey::Badges);
        assert_eq!(badges.len(), 1);
    }

    #[test]
    fn test_latest_score_picks_most_recent_of_type() {
        let store = Store::new(MemBackend::new());
        record(&store, Instrument::Phq9, &[1], "Anon", Utc::now()).unwrap();
        record(&store, Instrument::Phq9, &[2, 2], "Anon", Utc::now()).unwrap();
        record(&store, Instrument::Gad7, &[3], "Anon", Utc::now()).unwrap();
        assert_eq!(latest_score(&store, Instrument::Phq9), Some(4.0));
        assert_eq!(latest_score(&store, Instrument::Ghq12), None);
    }
}
