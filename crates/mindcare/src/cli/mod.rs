//! # CLI Behavior
//!
//! This is **one possible UI client** for mindcare, not the application
//! itself. For the overall architecture, see the crate-level documentation
//! in [`crate`].
//!
//! ## Naked Execution
//!
//! Running `mindcare` with no command prints the grouped help and exits
//! successfully without touching the data directory.
//!
//! ## Data Directory
//!
//! `--data <DIR>` wins over `MINDCARE_DATA`, which wins over the OS data
//! directory. A `mindcare.toml` inside the data directory configures the
//! API prefix, the backend URL and the mock interceptor.
//!
//! ## Destructive Commands
//!
//! `clear` asks for confirmation on a terminal and refuses to run
//! non-interactively without `--yes`. `seed` overwrites without asking.

mod commands;
mod render;
pub mod setup;

pub use commands::run;
