//! # Mock API Interceptor
//!
//! Answers API-shaped requests from local storage. Only paths under the
//! reserved prefix (default `/api`) are considered, and of those only the
//! routes below; anything else is left for the network.
//!
//! | Method | Path | Response |
//! |--------|------|----------|
//! | GET | `/api/mood` | stored mood list |
//! | GET | `/api/assessments` | stored assessment list |
//! | GET | `/api/gamification/badges` | stored badge list |
//! | POST | `/api/risk` | `{level, score}`, no storage access |
//! | POST | `/api/community/post` | prepends the body as sent, `{ok: true}` |
//! | POST | `/api/sos` | prepends the body plus `date`, `{result: {ok, message, record}}` |
//!
//! Bodies are stored verbatim, unknown fields included; validating them is
//! the caller's job. A failed storage write gets a 500, so the caller sees an
//! unsuccessful response and its write-through fallback takes over.

use super::{Method, Request, Response};
use crate::commands::{post, sos};
use crate::model::StorageKey;
use crate::risk::{self, RiskRequest};
use crate::store::{StorageBackend, Store};
use chrono::Utc;
use serde_json::{json, Value};
use tracing::{debug, warn};

pub const DEFAULT_API_PREFIX: &str = "/api";
pub const SOS_ACK_MESSAGE: &str = "SOS recorded (mock)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    Moods,
    Assessments,
    Badges,
    Risk,
    CommunityPost,
    Sos,
}

pub struct Interceptor<B: StorageBackend> {
    store: Store<B>,
    prefix: String,
}

impl<B: StorageBackend> Interceptor<B> {
    pub fn new(store: Store<B>) -> Self {
        Self {
            store,
            prefix: DEFAULT_API_PREFIX.to_string(),
        }
    }

    pub fn with_prefix(mut self, prefix: &str) -> Self {
        self.prefix = prefix.trim_end_matches('/').to_string();
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Answers `request` if it matches a route, `None` otherwise.
    pub fn handle(&self, request: &Request) -> Option<Response> {
        let route = self.route(request)?;
        debug!(?route, path = %request.path, "intercepted request");
        let response = match route {
            Route::Moods => self.list(StorageKey::Moods),
            Route::Assessments => self.list(StorageKey::Assessments),
            Route::Badges => self.list(StorageKey::Badges),
            Route::Risk => self.risk(&request.body),
            Route::CommunityPost => self.community_post(&request.body),
            Route::Sos => self.sos(&request.body),
        };
        Some(response)
    }

    fn route(&self, request: &Request) -> Option<Route> {
        let rest = request.route_path().strip_prefix(self.prefix.as_str())?;
        match (request.method, rest) {
            (Method::Get, "/mood") => Some(Route::Moods),
            (Method::Get, "/assessments") => Some(Route::Assessments),
            (Method::Get, "/gamification/badges") => Some(Route::Badges),
            (Method::Post, "/risk") => Some(Route::Risk),
            (Method::Post, "/community/post") => Some(Route::CommunityPost),
            (Method::Post, "/sos") => Some(Route::Sos),
            _ => None,
        }
    }

    fn list(&self, key: StorageKey) -> Response {
        Response::ok(self.store.read(key, json!([])))
    }

    fn risk(&self, body: &Value) -> Response {
        let result = risk::evaluate(&RiskRequest::from_json(body));
        Response::ok(json!({ "level": result.level, "score": result.score }))
    }

    /// Stores the body as sent. Shape checks belong to the caller.
    fn community_post(&self, body: &Value) -> Response {
        match post::append(&self.store, body) {
            Ok(_) => Response::ok(json!({ "ok": true })),
            Err(e) => storage_failure(e),
        }
    }

    /// Stores the payload with a `date` added and echoes the stored record.
    fn sos(&self, body: &Value) -> Response {
        let record = sos::stamp_payload(body, Utc::now());
        match sos::append(&self.store, &record) {
            Ok(_) => Response::ok(json!({
                "result": { "ok": true, "message": SOS_ACK_MESSAGE, "record": record }
            })),
            Err(e) => storage_failure(e),
        }
    }
}

fn storage_failure(e: impl std::fmt::Display) -> Response {
    warn!(error = %e, "intercepted write failed");
    Response::with_status(500, json!({ "ok": false, "error": e.to_string() }))
}
