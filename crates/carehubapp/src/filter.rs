//! View filtering.
//!
//! Every list view offers one search box. A record matches when any of its
//! search fields contains the query, case-insensitively. The fields searched
//! are fixed per record type by its [`Searchable`] impl.

use crate::leads::{CareEnquiry, JobApplication, TourBooking};
use crate::model::NewsItem;

/// A record that can be matched against a search query.
pub trait Searchable {
    /// The values searched, in no particular order. Empty values are skipped.
    fn search_fields(&self) -> Vec<&str>;
}

impl Searchable for TourBooking {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.phone.as_str(),
            self.email.as_str(),
            self.location.as_str(),
            self.preferred_date.as_str(),
            self.preferred_time.as_str(),
        ]
    }
}

impl Searchable for CareEnquiry {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.phone.as_str(),
            self.email.as_str(),
            self.enquiry_type.as_str(),
            self.location.as_str(),
            self.message.as_str(),
        ]
    }
}

impl Searchable for JobApplication {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.name.as_str(),
            self.phone.as_str(),
            self.position.as_str(),
            self.message.as_str(),
        ]
    }
}

impl Searchable for NewsItem {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.title.as_str(),
            self.excerpt.as_str(),
            self.category.as_str(),
            self.location.as_str(),
            self.author.as_str(),
        ]
    }
}

/// Whether `record` matches an already trimmed and lowercased query.
fn matches_normalized<T: Searchable>(record: &T, needle: &str) -> bool {
    record
        .search_fields()
        .into_iter()
        .filter(|value| !value.is_empty())
        .any(|value| value.to_lowercase().contains(needle))
}

/// Whether `record` matches `query`. A blank query matches everything.
pub fn matches<T: Searchable>(record: &T, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    needle.is_empty() || matches_normalized(record, &needle)
}

/// Keeps the records matching `query`, preserving order.
pub fn filter_records<T: Searchable + Clone>(records: &[T], query: &str) -> Vec<T> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return records.to_vec();
    }
    records
        .iter()
        .filter(|record| matches_normalized(*record, &needle))
        .cloned()
        .collect()
}
