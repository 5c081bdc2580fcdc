//! # CLI Behavior
//!
//! This is **one possible UI client** for carehub. The admin dashboard is a
//! set of subcommands over the same API layer a web front end would use.
//!
//! For the overall architecture, see the crate-level documentation in
//! `carehubapp`.
//!
//! ## Drafts
//!
//! Listings and FAQ lists are edited offline as JSON draft files. Every edit
//! command opens the draft, applies one change, and saves it back atomically:
//!
//! ```text
//! carehub listing new barry.json
//! carehub listing set barry.json homeName "Bellavista Barry"
//! carehub listing add-activity barry.json "Choir"
//! carehub listing move barry.json activities 2 up
//! carehub listing export barry.json
//! ```
//!
//! List indexes on the command line start at 1.
//!
//! ## Exports Go to the Clipboard
//!
//! `listing export`, `faq export` and `user export` copy their JSON to the
//! system clipboard. `--print` (or `--output json`) writes it to stdout
//! instead, and the JSON is printed anyway when no clipboard tool is
//! available.
//!
//! ## Leads
//!
//! `tours book` and `enquiries submit` save a copy on the server and in the
//! local lead log, then email the admins when the relay is configured. A
//! server outage is only a warning; the booking still counts as made.
//!
//! `watch <view>` keeps a lead listing on screen and redraws it on the
//! refresh interval, or as soon as the local log changes.

mod commands;
mod drafts;
mod render;
pub mod setup;

pub use commands::run;
