use super::{api_path, assessment, CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Instrument, MoodEntry, RiskAssessment, StorageKey};
use crate::risk::{self, RiskRequest};
use crate::store::{StorageBackend, Store};
use crate::transport::{Request, Transport};
use tracing::warn;

pub const ROUTE: &str = "/risk";

/// How many of the most recent mood entries feed the score.
pub const RISK_MOOD_WINDOW: usize = 14;

/// Latest PHQ-9 score (0 without one) and the recent mood scores.
pub fn build_request<B: StorageBackend>(store: &Store<B>) -> RiskRequest {
    let latest = assessment::latest_score(store, Instrument::Phq9).unwrap_or(0.0);
    let moods: Vec<MoodEntry> = store.read_list(StorageKey::Moods);
    let scores = moods
        .iter()
        .take(RISK_MOOD_WINDOW)
        .map(MoodEntry::effective_score)
        .collect();
    RiskRequest::new(latest, scores)
}

pub fn run<B: StorageBackend, T: Transport + ?Sized>(
    store: &Store<B>,
    transport: &T,
    prefix: &str,
) -> Result<CmdResult> {
    let request = build_request(store);
    let outgoing = Request::post_json(api_path(prefix, ROUTE), &request)?;

    let mut result = CmdResult::default();
    let remote = match transport.send(&outgoing) {
        Ok(response) if response.is_success() => response.json::<RiskAssessment>().ok(),
        Ok(response) => {
            warn!(status = response.status, "risk endpoint refused request");
            None
        }
        Err(e) => {
            warn!(error = %e, "risk endpoint unavailable");
            None
        }
    };
    let assessment = match remote {
        Some(assessment) => assessment,
        None => {
            result.add_message(CmdMessage::info("Computed locally."));
            risk::evaluate(&request)
        }
    };
    Ok(result.with_risk(assessment))
}
