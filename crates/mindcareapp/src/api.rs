//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for every MindCare operation, regardless of the UI in front of it.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Supplies context** the commands need: the shared [`Store`], the
//!   [`ApiClient`] requests go through, the configured prefix and nickname,
//!   and the current time
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no printing and no formatting; that is the CLI's job.
//!
//! ## Generic Over StorageBackend
//!
//! `MindcareApi<B: StorageBackend>` is generic over the backend:
//! - Production: `MindcareApi<FsBackend>`
//! - Testing: `MindcareApi<MemBackend>`
//!
//! The store handle is shared with the interceptor installed on the client,
//! so a post made "through the API" and one written by the local fallback
//! land in the same slot.

use crate::commands::{self, CmdResult};
use crate::error::Result;
use crate::model::{Instrument, Mood, SosAlert, DEFAULT_NICKNAME};
use crate::store::{StorageBackend, Store};
use crate::transport::interceptor::DEFAULT_API_PREFIX;
use crate::transport::{ApiClient, Interceptor};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;

/// The parts of the configuration commands care about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiSettings {
    pub api_prefix: String,
    pub nickname: String,
    pub export_file_name: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            nickname: DEFAULT_NICKNAME.to_string(),
            export_file_name: commands::export::DEFAULT_EXPORT_FILE_NAME.to_string(),
        }
    }
}

pub struct MindcareApi<B: StorageBackend> {
    store: Store<B>,
    client: ApiClient<B>,
    settings: ApiSettings,
}

impl<B: StorageBackend> MindcareApi<B> {
    pub fn new(store: Store<B>, client: ApiClient<B>, settings: ApiSettings) -> Self {
        Self {
            store,
            client,
            settings,
        }
    }

    /// No network, interceptor installed, default settings.
    pub fn offline(backend: B) -> Self {
        let store = Store::new(backend);
        let client = ApiClient::offline().with_interceptor(Interceptor::new(store.clone()));
        Self::new(store, client, ApiSettings::default())
    }

    pub fn store(&self) -> &Store<B> {
        &self.store
    }

    pub fn client(&self) -> &ApiClient<B> {
        &self.client
    }

    pub fn settings(&self) -> &ApiSettings {
        &self.settings
    }

    pub fn create_post(&self, title: &str, content: &str) -> Result<CmdResult> {
        commands::post::run(
            &self.store,
            &self.client,
            &self.settings.api_prefix,
            title,
            content,
            &self.settings.nickname,
            Utc::now(),
        )
    }

    pub fn list_posts(&self) -> CmdResult {
        commands::post::list(&self.store)
    }

    pub fn send_sos(&self, alert: SosAlert) -> Result<CmdResult> {
        commands::sos::run(
            &self.store,
            &self.client,
            &self.settings.api_prefix,
            alert,
            Utc::now(),
        )
    }

    pub fn list_sos(&self) -> CmdResult {
        commands::sos::list(&self.store)
    }

    pub fn log_mood(&self, mood: Mood, score: Option<u8>, note: &str) -> Result<CmdResult> {
        commands::mood::log(
            &self.store,
            mood,
            score,
            note,
            &self.settings.nickname,
            Utc::now(),
        )
    }

    pub fn list_moods(&self) -> CmdResult {
        commands::mood::list(&self.store)
    }

    pub fn record_assessment(&self, instrument: Instrument, answers: &[u32]) -> Result<CmdResult> {
        commands::assessment::record(
            &self.store,
            instrument,
            answers,
            &self.settings.nickname,
            Utc::now(),
        )
    }

    pub fn list_assessments(&self) -> CmdResult {
        commands::assessment::list(&self.store)
    }

    pub fn award_badge(&self, name: Option<&str>, description: Option<&str>) -> Result<CmdResult> {
        commands::gamification::award_run(
            &self.store,
            name,
            description,
            &self.settings.nickname,
            Utc::now(),
        )
    }

    pub fn add_points(&self, amount: u64) -> Result<CmdResult> {
        commands::gamification::add_points_run(&self.store, amount)
    }

    pub fn gamification(&self) -> CmdResult {
        commands::gamification::summary(&self.store)
    }

    pub fn log_sleep(&self, hours: f64) -> Result<CmdResult> {
        commands::lifestyle::log_sleep(&self.store, hours, Utc::now())
    }

    pub fn add_habit(&self, name: &str) -> Result<CmdResult> {
        commands::lifestyle::add_habit(&self.store, name)
    }

    pub fn lifestyle(&self) -> CmdResult {
        commands::lifestyle::summary(&self.store)
    }

    pub fn risk(&self) -> Result<CmdResult> {
        commands::risk::run(&self.store, &self.client, &self.settings.api_prefix)
    }

    pub fn dashboard(&self) -> CmdResult {
        commands::dashboard::run(&self.store, &self.client, &self.settings.api_prefix)
    }

    pub fn report(&self) -> CmdResult {
        commands::report::run(&self.store)
    }

    /// Writes the snapshot into `dir` under the configured file name.
    pub fn export(&self, dir: &Path) -> Result<CmdResult> {
        commands::export::run(&self.store, dir, &self.settings.export_file_name)
    }

    pub fn import(&self, path: &Path) -> Result<CmdResult> {
        commands::import::run(&self.store, path)
    }

    pub fn clear_all(&self) -> Result<CmdResult> {
        commands::clear::run(&self.store)
    }

    /// Seeds the demo dataset. A fixed `seed` reproduces the same values.
    pub fn seed_demo(&self, seed: Option<u64>) -> Result<CmdResult> {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        commands::seed::run(&self.store, &mut rng, Utc::now())
    }
}
