//! # Content Service
//!
//! The REST collaborator that stores news and leads server-side. Commands talk
//! to it through [`ContentService`] so they can run against either:
//!
//! - [`http::HttpService`]: the real API over a blocking HTTP client
//! - [`memory::MemService`]: an in-process stand-in for tests
//!
//! ## Endpoints
//!
//! | Method | Path | Body |
//! |--------|------|------|
//! | `GET` / `POST` | `/news` | multipart on `POST` |
//! | `GET` / `PUT` / `DELETE` | `/news/{id}` | multipart on `PUT` |
//! | `GET` / `POST` | `/scheduled-tours` | JSON |
//! | `PUT` | `/scheduled-tours/{id}` | JSON |
//! | `GET` / `POST` | `/care-enquiries` | JSON |
//!
//! Each call is a single attempt. Failures surface as [`CareError`] at the
//! call site; nothing is retried.
//!
//! [`CareError`]: crate::error::CareError

use crate::error::Result;
use crate::leads::{CareEnquiry, TourBooking};
use crate::model::NewsItem;
use serde::{Deserialize, Serialize};

pub mod http;
pub mod memory;

pub use http::HttpService;
pub use memory::MemService;

/// Acknowledgement returned by write endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteAck {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub id: Option<String>,
}

/// Body of a tour status update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TourUpdate {
    pub status: String,
}

pub trait ContentService {
    /// All news items, newest first.
    fn list_news(&self) -> Result<Vec<NewsItem>>;

    /// One news item. Unknown ids are [`CareError::NotFound`].
    ///
    /// [`CareError::NotFound`]: crate::error::CareError::NotFound
    fn get_news(&self, id: &str) -> Result<NewsItem>;

    fn create_news(&self, item: &NewsItem) -> Result<WriteAck>;

    /// Replaces the item stored under `id`, which is always the id the item
    /// was first saved with.
    fn update_news(&self, id: &str, item: &NewsItem) -> Result<WriteAck>;

    fn delete_news(&self, id: &str) -> Result<()>;

    /// All tour bookings, newest first.
    fn list_tours(&self) -> Result<Vec<TourBooking>>;

    fn create_tour(&self, booking: &TourBooking) -> Result<WriteAck>;

    fn update_tour(&self, id: &str, update: &TourUpdate) -> Result<WriteAck>;

    /// All care enquiries, newest first.
    fn list_enquiries(&self) -> Result<Vec<CareEnquiry>>;

    fn create_enquiry(&self, enquiry: &CareEnquiry) -> Result<WriteAck>;
}
