//! # Command Layer
//!
//! This module contains the **core business logic** of carehub. Each command
//! family lives in its own submodule and implements plain functions over the
//! domain types, the [`ContentService`] and the [`AppendLog`].
//!
//! ## Role and Responsibilities
//!
//! Commands:
//! - Validate input before any side effect
//! - Talk to the REST collaborator and the local lead log
//! - Return a structured [`CmdResult`] with records and messages
//! - Are completely UI-agnostic
//!
//! Commands do not print, prompt, parse arguments or pick exit codes. Draft
//! files are read and written by the caller; commands only see the
//! [`ListingEditor`](crate::editor::ListingEditor).
//!
//! ## Failure Policy
//!
//! A validation error is returned as `Err` and nothing is changed. Secondary
//! effects (server copy of a lead, email notification) degrade to warning
//! messages so the primary record is never lost. List views fall back to an
//! empty collection; in [`RefreshMode::Background`] they do so silently.
//!
//! ## Command Modules
//!
//! - [`listing`]: Listing editor operations and the card export
//! - [`news`]: News list, detail, create, update, delete
//! - [`tours`]: Tour bookings
//! - [`enquiries`]: Care enquiries
//! - [`applications`]: Job applications
//! - [`faqs`]: FAQ list editing and export
//! - [`users`]: Admin user record export
//!
//! [`ContentService`]: crate::service::ContentService
//! [`AppendLog`]: crate::store::AppendLog

use crate::leads::{CareEnquiry, JobApplication, TourBooking};
use crate::model::{Faq, ListingRecord, NewsItem};
use crate::service::WriteAck;
use crate::store::{AppendLog, LogKey};
use serde::Serialize;

pub mod applications;
pub mod enquiries;
pub mod faqs;
pub mod listing;
pub mod news;
pub mod tours;
pub mod users;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// Whether a list was requested by the user or by the refresh scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshMode {
    Interactive,
    Background,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub listing: Option<ListingRecord>,
    pub news: Vec<NewsItem>,
    pub related_news: Vec<NewsItem>,
    pub tours: Vec<TourBooking>,
    pub enquiries: Vec<CareEnquiry>,
    pub applications: Vec<JobApplication>,
    pub faqs: Vec<Faq>,
    /// Pretty-printed JSON meant for the clipboard.
    pub export_json: Option<String>,
    /// A link the UI should open (e.g. a prefilled `mailto:`).
    pub open_link: Option<String>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_listing(mut self, listing: ListingRecord) -> Self {
        self.listing = Some(listing);
        self
    }

    pub fn with_news(mut self, news: Vec<NewsItem>) -> Self {
        self.news = news;
        self
    }

    pub fn with_related_news(mut self, news: Vec<NewsItem>) -> Self {
        self.related_news = news;
        self
    }

    pub fn with_tours(mut self, tours: Vec<TourBooking>) -> Self {
        self.tours = tours;
        self
    }

    pub fn with_enquiries(mut self, enquiries: Vec<CareEnquiry>) -> Self {
        self.enquiries = enquiries;
        self
    }

    pub fn with_applications(mut self, applications: Vec<JobApplication>) -> Self {
        self.applications = applications;
        self
    }

    pub fn with_faqs(mut self, faqs: Vec<Faq>) -> Self {
        self.faqs = faqs;
        self
    }

    pub fn with_export_json(mut self, json: String) -> Self {
        self.export_json = Some(json);
        self
    }

    pub fn with_open_link(mut self, link: String) -> Self {
        self.open_link = Some(link);
        self
    }

    pub fn has_warnings(&self) -> bool {
        self.messages
            .iter()
            .any(|m| matches!(m.level, MessageLevel::Warning | MessageLevel::Error))
    }
}

/// Turns a failed list fetch into an empty collection, with a warning only
/// when the user asked for it.
pub(crate) fn list_or_empty<T>(
    fetched: crate::error::Result<Vec<T>>,
    what: &str,
    mode: RefreshMode,
    result: &mut CmdResult,
) -> Vec<T> {
    match fetched {
        Ok(items) => items,
        Err(e) => {
            tracing::debug!(what, error = %e, "list fetch failed");
            if mode == RefreshMode::Interactive {
                result.add_message(CmdMessage::warning(format!(
                    "Could not load {}: {}",
                    what, e
                )));
            }
            Vec::new()
        }
    }
}

/// Keeps a new lead locally after the server copy was attempted.
///
/// The lead is lost only when both the server and the local log refuse it;
/// that is the one case returned as `Err`.
pub(crate) fn store_lead<L: AppendLog, T: Serialize>(
    server: crate::error::Result<WriteAck>,
    log: &L,
    key: LogKey,
    record: &T,
    result: &mut CmdResult,
) -> crate::error::Result<()> {
    let server_error = match server {
        Ok(_) => None,
        Err(e) => {
            tracing::warn!(%key, error = %e, "server did not accept lead");
            result.add_message(CmdMessage::warning(format!(
                "Server copy not saved: {}",
                e
            )));
            Some(e)
        }
    };

    match log.append_record(key, record) {
        Ok(()) => Ok(()),
        Err(e) if server_error.is_some() => Err(e),
        Err(e) => {
            tracing::warn!(%key, error = %e, "lead not written to local log");
            result.add_message(CmdMessage::warning(format!(
                "Local copy not saved: {}",
                e
            )));
            Ok(())
        }
    }
}

/// Folds a notification outcome into the result. `None` means email is off.
pub(crate) fn report_notification(
    outcome: Option<crate::error::Result<usize>>,
    result: &mut CmdResult,
) {
    match outcome {
        None => result.add_message(CmdMessage::info("Email notifications are not configured")),
        Some(Ok(sent)) => {
            tracing::debug!(sent, "lead notification sent");
        }
        Some(Err(e)) => result.add_message(CmdMessage::warning(format!(
            "Notification email failed: {}",
            e
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CareError;
    use crate::store::MemLog;
    use serde_json::json;

    #[test]
    fn lead_survives_server_failure() {
        let log = MemLog::new();
        let mut result = CmdResult::default();
        store_lead(
            Err(CareError::Api("down".into())),
            &log,
            LogKey::CareEnquiries,
            &json!({"id": "1"}),
            &mut result,
        )
        .unwrap();
        assert_eq!(log.list(LogKey::CareEnquiries).unwrap().len(), 1);
        assert!(result.has_warnings());
    }

    #[test]
    fn lead_lost_everywhere_is_an_error() {
        let log = MemLog::new();
        log.set_simulate_write_error(true);
        let mut result = CmdResult::default();
        let outcome = store_lead(
            Err(CareError::Api("down".into())),
            &log,
            LogKey::CareEnquiries,
            &json!({"id": "1"}),
            &mut result,
        );
        assert!(outcome.is_err());
    }

    #[test]
    fn local_failure_after_server_success_warns() {
        let log = MemLog::new();
        log.set_simulate_write_error(true);
        let mut result = CmdResult::default();
        store_lead(
            Ok(WriteAck::default()),
            &log,
            LogKey::ScheduledTours,
            &json!({"id": "1"}),
            &mut result,
        )
        .unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
    }

    #[test]
    fn background_failures_are_silent() {
        let mut result = CmdResult::default();
        let items: Vec<u8> = list_or_empty(
            Err(CareError::Api("down".into())),
            "tours",
            RefreshMode::Background,
            &mut result,
        );
        assert!(items.is_empty());
        assert!(result.messages.is_empty());
    }

    #[test]
    fn interactive_failures_warn() {
        let mut result = CmdResult::default();
        let items: Vec<u8> = list_or_empty(
            Err(CareError::Api("down".into())),
            "tours",
            RefreshMode::Interactive,
            &mut result,
        );
        assert!(items.is_empty());
        assert!(result.has_warnings());
    }
}
