//! # Lead Log
//!
//! Leads submitted through the public forms are kept in a local append-only
//! log, one JSON array per key, newest entry first. The [`AppendLog`] trait
//! lets commands work against either backend:
//!
//! - [`fs_log::FsLog`]: one `<key>.json` file per key under the data directory
//! - [`mem_log::MemLog`]: for testing logic without filesystem I/O
//!
//! ## Storage Layout
//!
//! ```text
//! <data_dir>/
//! ├── scheduled_tours.json
//! ├── care_enquiries.json
//! └── career_applications.json
//! ```
//!
//! Entries are never edited or removed. `revision` changes whenever a key is
//! written, which is how the refresh scheduler notices writes made by another
//! process.

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;

pub mod fs_log;
pub mod mem_log;

pub use fs_log::FsLog;
pub use mem_log::MemLog;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogKey {
    ScheduledTours,
    CareEnquiries,
    CareerApplications,
}

impl LogKey {
    pub const ALL: [LogKey; 3] = [
        LogKey::ScheduledTours,
        LogKey::CareEnquiries,
        LogKey::CareerApplications,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LogKey::ScheduledTours => "scheduled_tours",
            LogKey::CareEnquiries => "care_enquiries",
            LogKey::CareerApplications => "career_applications",
        }
    }
}

impl fmt::Display for LogKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Abstract interface for the lead log.
pub trait AppendLog {
    /// Adds an entry at the front of the key's list.
    fn append(&self, key: LogKey, entry: Value) -> Result<()>;

    /// All entries for a key, newest first. A key never written is empty.
    fn list(&self, key: LogKey) -> Result<Vec<Value>>;

    /// An opaque value that changes whenever the key is written.
    fn revision(&self, key: LogKey) -> Result<u64>;

    fn append_record<T: Serialize>(&self, key: LogKey, record: &T) -> Result<()>
    where
        Self: Sized,
    {
        self.append(key, serde_json::to_value(record)?)
    }

    /// Typed view of [`AppendLog::list`]. Entries that do not parse are
    /// skipped with a warning.
    fn list_records<T: DeserializeOwned>(&self, key: LogKey) -> Result<Vec<T>>
    where
        Self: Sized,
    {
        let records = self
            .list(key)?
            .into_iter()
            .enumerate()
            .filter_map(|(position, entry)| match serde_json::from_value(entry) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(%key, position, error = %e, "skipping unreadable log entry");
                    None
                }
            })
            .collect();
        Ok(records)
    }
}
