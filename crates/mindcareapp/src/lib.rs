//! # MindCare Architecture
//!
//! MindCare is the **offline-first data layer** of a wellness demo app. It
//! lets every screen behave as if a backend existed: API-shaped requests are
//! answered from local storage, writes that cannot reach an API are applied
//! locally, and the whole dataset can be exported, imported, cleared and
//! seeded as a single snapshot.
//!
//! The crate is UI-agnostic. The `mindcare` CLI is one client of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (mindcare crate)                                       │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Supplies store, client, settings and the clock           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Validation, write-through fallback, snapshots, seeding   │
//! │  - Returns CmdResult, never prints                          │
//! └─────────────────────────────────────────────────────────────┘
//!                    │                         │
//!                    ▼                         ▼
//! ┌──────────────────────────────┐  ┌──────────────────────────┐
//! │  Transport (transport/)      │  │  Storage (store/)        │
//! │  - ApiClient + Interceptor   │─►│  - Store<B> typed adapter│
//! │  - Http / Offline network    │  │  - FsBackend, MemBackend │
//! └──────────────────────────────┘  └──────────────────────────┘
//! ```
//!
//! The interceptor writes through the same [`store::Store`] handle the
//! commands use, and both sides call the same per-entity `append`, so the
//! records they produce are identical.
//!
//! ## Testing Strategy
//!
//! 1. **Commands**: unit tests against `MemBackend`, where most tests live.
//! 2. **Transport**: routing and fall-through, using a recording transport.
//! 3. **API**: dispatch only.
//! 4. **Integration** (`tests/`): `FsBackend` in temporary directories.

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod init;
pub mod model;
pub mod risk;
pub mod store;
pub mod transport;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
