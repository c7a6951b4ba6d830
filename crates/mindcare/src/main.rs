//! # MindCare CLI Architecture
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, while this
//! file only invokes `cli::run()` and handles process termination.
//!
//! ## Workspace Structure
//!
//! - `crates/mindcareapp/`: the UI-agnostic data layer (store, mock
//!   transport, snapshots, write-through fallback)
//! - `crates/mindcare/`: this CLI, depends on `mindcareapp`
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/mindcare/src/cli/)                       │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Context wiring + dispatch (commands.rs)                  │
//! │  - Colored terminal output (render.rs)                      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (crates/mindcareapp/src/api.rs)                  │
//! │  - Dispatches to command modules                            │
//! │  - Returns structured `CmdResult` values                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (crates/mindcareapp/src/commands/*)          │
//! │  - Business logic over the store and the transport          │
//! │  - No knowledge of stdout/stderr or process exits           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Testing Approach
//!
//! - **Commands layer**: unit tests against the in-memory backend.
//! - **API layer**: dispatch tests over an offline client.
//! - **CLI layer**: argument parsing tests in `setup.rs`, plus end-to-end
//!   runs of the real binary against a temporary data directory in
//!   `tests/cli_e2e.rs`.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
