//! # Carehub CLI Architecture
//!
//! The `carehub` binary is a thin client of the `carehubapp` library: the CLI
//! lives in `src/cli/`, while this file only invokes `cli::run()` and handles
//! process termination.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/carehub/src/cli/)                        │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Context wiring + dispatch (commands.rs)                  │
//! │  - Draft files for listings and FAQs (drafts.rs)            │
//! │  - Terminal rendering (render.rs)                           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (carehubapp::api)                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything from the API inward is UI agnostic. The CLI owns all
//! user-facing concerns: argument parsing, draft files, the clipboard,
//! logging setup, rendering and exit codes.

mod cli;
mod clipboard;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
