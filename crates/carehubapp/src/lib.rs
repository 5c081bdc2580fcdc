//! # Carehub Architecture
//!
//! Carehub is a **UI-agnostic content core** for a group of care homes: home
//! listings, news, FAQs and the leads coming in from the public forms (tour
//! bookings, care enquiries, job applications). The `carehub` binary is one
//! client of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (carehub crate)                                  │
//! │  - Parses arguments, reads/writes draft files, prints       │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Owns the service, the lead log and the notifier          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Validation and flow, returns CmdResult                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────────────────┬──────────────────────────────┐
//! │  Content Service (service/)  │  Lead Log (store/)           │
//! │  HttpService / MemService    │  FsLog / MemLog              │
//! └──────────────────────────────┴──────────────────────────────┘
//! ```
//!
//! Underneath the commands sit the domain pieces: the typed listing fields
//! ([`fields`]), list editing ([`lists`], [`editor`]), media normalization
//! ([`media`]), the public export and news form encoding ([`export`],
//! [`submission`]) and search ([`filter`]).
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward, code never writes to stdout/stderr and never exits
//! the process. Network and log access go through traits so every command is
//! tested against in-memory stand-ins.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: Business logic per command family
//! - [`config`]: Layered configuration
//! - [`init`]: Production wiring
//! - [`model`], [`leads`]: Data types
//! - [`notify`]: Lead notification emails
//! - [`refresh`]: Shared periodic refresh scheduler
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod editor;
pub mod error;
pub mod export;
pub mod fields;
pub mod filter;
pub mod init;
pub mod leads;
pub mod lists;
pub mod media;
pub mod model;
pub mod notify;
pub mod refresh;
pub mod service;
pub mod store;
pub mod submission;
