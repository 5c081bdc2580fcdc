//! Core data types: listings, news items, FAQs and admin user records.
//!
//! Lead records (tour bookings, enquiries, applications) live in [`crate::leads`],
//! gallery entries in [`crate::media`].
//!
//! All wire names are camelCase, matching the JSON the REST collaborator and the
//! public site exchange.

use crate::error::{CareError, Result};
use crate::media::MediaRef;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Maximum length of a news excerpt, in characters.
pub const MAX_EXCERPT: usize = 180;

/// Maximum length of a generated news id.
pub const MAX_NEWS_ID: usize = 50;

pub const DEFAULT_NEWS_LOCATION: &str = "All Locations";
pub const DEFAULT_NEWS_AUTHOR: &str = "Bellavista Team";

/// Lowercases `name` and replaces every run of non-alphanumeric characters with
/// a single `-`.
///
/// Leading and trailing hyphens are kept: `"Home!"` becomes `"home-"`.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut in_gap = false;
    for c in name.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c);
            in_gap = false;
        } else if !in_gap {
            slug.push('-');
            in_gap = true;
        }
    }
    slug
}

/// Id for a lead or user record: the current time in milliseconds.
pub fn timestamp_id() -> String {
    Utc::now().timestamp_millis().to_string()
}

/// RFC 3339 timestamp with millisecond precision, as browsers produce it.
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Treats an explicit JSON `null` like an absent key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Reads a text column that the server may send as `null` or `""`, using
/// `default` in both cases.
pub(crate) fn null_or<'de, D>(
    deserializer: D,
    default: fn() -> String,
) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(default))
}

fn default_news_location() -> String {
    DEFAULT_NEWS_LOCATION.to_string()
}

fn default_news_author() -> String {
    DEFAULT_NEWS_AUTHOR.to_string()
}

fn news_location<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<String, D::Error> {
    null_or(d, default_news_location)
}

fn news_author<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<String, D::Error> {
    null_or(d, default_news_author)
}

/// Unknown, missing and `null` categories read as [`NewsCategory::Events`].
fn news_category<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<NewsCategory, D::Error> {
    let raw = Option::<String>::deserialize(d)?;
    Ok(match raw.as_deref().map(str::parse::<NewsCategory>) {
        Some(Ok(category)) => category,
        Some(Err(_)) => {
            tracing::debug!(category = ?raw, "unknown news category, using events");
            NewsCategory::default()
        }
        None => NewsCategory::default(),
    })
}

/// Stats arrive as numbers from the database, as strings from form inputs, and
/// as `""` when the input was cleared.
fn stat_value<'de, D>(deserializer: D) -> std::result::Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u32),
        Float(f64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(n)) => Ok(Some(n)),
        Some(Raw::Float(f)) if f >= 0.0 && f.fract() == 0.0 => Ok(Some(f as u32)),
        Some(Raw::Float(_)) => Ok(None),
        Some(Raw::Text(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Ok(None)
            } else {
                trimmed
                    .parse::<u32>()
                    .map(Some)
                    .map_err(serde::de::Error::custom)
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: String,
    #[serde(
        default,
        alias = "imageUrl",
        skip_serializing_if = "Option::is_none"
    )]
    pub image: Option<String>,
}

impl TeamMember {
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            image: None,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        let image = image.into();
        self.image = if image.trim().is_empty() {
            None
        } else {
            Some(image)
        };
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacilityHighlight {
    #[serde(default, deserialize_with = "null_as_default")]
    pub icon: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailedFacility {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
}

/// One editable care-home listing.
///
/// List order is display order; there is no separate rank field. The slug is
/// derived from `home_name` on export and never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListingRecord {
    pub home_name: String,
    pub home_location: String,
    pub home_image: String,
    pub home_badge: String,
    pub home_desc: String,
    pub admin_email: String,

    pub hero_title: String,
    pub hero_subtitle: String,
    pub hero_bg_image: String,
    pub hero_expanded_desc: String,

    pub ciw_report_url: String,
    pub newsletter_url: String,

    #[serde(deserialize_with = "stat_value")]
    pub stats_bedrooms: Option<u32>,
    #[serde(deserialize_with = "stat_value")]
    pub stats_premier: Option<u32>,

    pub team_members: Vec<TeamMember>,
    #[serde(alias = "teamGalleryImages")]
    pub team_gallery: Vec<MediaRef>,

    pub activities_intro: String,
    pub activities: Vec<String>,
    pub activity_images: Vec<MediaRef>,
    pub activities_modal_desc: String,

    pub facilities_intro: String,
    pub facilities_list: Vec<FacilityHighlight>,
    pub detailed_facilities: Vec<DetailedFacility>,
    #[serde(alias = "facilitiesGalleryImages")]
    pub facilities_gallery: Vec<MediaRef>,

    pub home_featured: bool,
}

impl ListingRecord {
    /// Shallow-merges an existing record over the defaults.
    ///
    /// Keys that are absent or `null` keep their default; unknown keys are
    /// ignored. The server's gallery names (`teamGalleryImages`,
    /// `facilitiesGalleryImages`) are read as their listing fields.
    pub fn merged_over_defaults(existing: &Value) -> Result<Self> {
        let Value::Object(source) = existing else {
            return Err(CareError::validation("Listing data must be a JSON object"));
        };

        let mut present: Map<String, Value> = Map::new();
        for (key, value) in source {
            if value.is_null() {
                continue;
            }
            let name = crate::fields::canonical_name(key);
            // The current name wins when a record carries both spellings.
            if name != key.as_str() && source.get(name).is_some_and(|v| !v.is_null()) {
                continue;
            }
            present.insert(name.to_string(), value.clone());
        }

        Ok(serde_json::from_value(Value::Object(present))?)
    }

    /// The URL slug for this listing, falling back to `home` for an unnamed one.
    pub fn slug(&self) -> String {
        if self.home_name.is_empty() {
            slugify("home")
        } else {
            slugify(&self.home_name)
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NewsCategory {
    #[default]
    Events,
    Community,
    Awards,
    Innovation,
    HealthUpdates,
}

impl NewsCategory {
    pub const ALL: [NewsCategory; 5] = [
        NewsCategory::Events,
        NewsCategory::Community,
        NewsCategory::Awards,
        NewsCategory::Innovation,
        NewsCategory::HealthUpdates,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NewsCategory::Events => "events",
            NewsCategory::Community => "community",
            NewsCategory::Awards => "awards",
            NewsCategory::Innovation => "innovation",
            NewsCategory::HealthUpdates => "health-updates",
        }
    }
}

impl fmt::Display for NewsCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NewsCategory {
    type Err = CareError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        NewsCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| CareError::validation(format!("Unknown news category: {}", s)))
    }
}

/// A news article.
///
/// The id is generated once from the title at first save and never
/// regenerated; updates address the article by its original id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewsItem {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub excerpt: String,
    #[serde(deserialize_with = "null_as_default")]
    pub full_description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub image: String,
    #[serde(deserialize_with = "news_category")]
    pub category: NewsCategory,
    #[serde(deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(deserialize_with = "news_location")]
    pub location: String,
    #[serde(deserialize_with = "news_author")]
    pub author: String,
    #[serde(deserialize_with = "null_as_default")]
    pub badge: String,
    #[serde(deserialize_with = "null_as_default")]
    pub important: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub gallery: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Default for NewsItem {
    fn default() -> Self {
        Self {
            id: String::new(),
            title: String::new(),
            excerpt: String::new(),
            full_description: String::new(),
            image: String::new(),
            category: NewsCategory::default(),
            date: String::new(),
            location: default_news_location(),
            author: default_news_author(),
            badge: String::new(),
            important: false,
            gallery: Vec::new(),
            video_url: None,
            video_description: None,
            created_at: None,
        }
    }
}

impl NewsItem {
    pub fn new(title: impl Into<String>, excerpt: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            excerpt: excerpt.into(),
            date: date.into(),
            ..Default::default()
        }
    }

    /// The id this item would be stored under on first save: the explicit id
    /// when one was typed, otherwise the title, slugified and capped.
    ///
    /// Runs of separators collapse to one `-`, so an article created by the
    /// older admin page (one `-` per character) may carry an id this would
    /// not generate. Stored ids are never regenerated, so both forms coexist.
    pub fn generated_id(&self) -> String {
        let source = if self.id.trim().is_empty() {
            &self.title
        } else {
            &self.id
        };
        slugify(source).chars().take(MAX_NEWS_ID).collect()
    }

    /// Body text for display, falling back to the excerpt.
    pub fn body(&self) -> &str {
        if self.full_description.is_empty() {
            &self.excerpt
        } else {
            &self.full_description
        }
    }

    /// Required-field check performed before any submission.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() || self.date.trim().is_empty() || self.excerpt.trim().is_empty()
        {
            return Err(CareError::validation(
                "Please fill in at least title, date, and summary",
            ));
        }
        let excerpt_len = self.excerpt.chars().count();
        if excerpt_len > MAX_EXCERPT {
            return Err(CareError::validation(format!(
                "Summary is {} characters; the limit is {}",
                excerpt_len, MAX_EXCERPT
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

impl Faq {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Result<Self> {
        let faq = Self {
            question: question.into(),
            answer: answer.into(),
        };
        if faq.question.trim().is_empty() || faq.answer.trim().is_empty() {
            return Err(CareError::validation("Please enter question and answer"));
        }
        Ok(faq)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    #[default]
    Admin,
    Editor,
    Viewer,
}

impl FromStr for UserRole {
    type Err = CareError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(UserRole::Admin),
            "editor" => Ok(UserRole::Editor),
            "viewer" => Ok(UserRole::Viewer),
            other => Err(CareError::validation(format!("Unknown role: {}", other))),
        }
    }
}

/// An admin console account, exported as JSON for manual provisioning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub created_at: String,
}

impl UserRecord {
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: UserRole) -> Result<Self> {
        let name = name.into();
        let email = email.into();
        if name.trim().is_empty() || email.trim().is_empty() {
            return Err(CareError::validation("Enter name and email"));
        }
        Ok(Self {
            id: timestamp_id(),
            name,
            email,
            role,
            created_at: now_iso(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn slugify_lowercases_and_hyphenates() {
        assert_eq!(slugify("Bellavista Cardiff"), "bellavista-cardiff");
    }

    #[test]
    fn slugify_collapses_runs() {
        assert_eq!(slugify("Waverley  Care & Centre"), "waverley-care-centre");
        assert_eq!(slugify("Home!"), "home-");
    }

    #[test]
    fn merge_keeps_defaults_for_absent_and_null_keys() {
        let existing = json!({
            "id": 1,
            "homeName": "Bellavista Barry",
            "homeBadge": null,
            "statsBedrooms": 48,
            "teamMembers": [{"name": "Ceri", "role": "Home Manager", "image": ""}]
        });

        let record = ListingRecord::merged_over_defaults(&existing).unwrap();
        assert_eq!(record.home_name, "Bellavista Barry");
        assert_eq!(record.home_badge, "");
        assert_eq!(record.stats_bedrooms, Some(48));
        assert_eq!(record.stats_premier, None);
        assert_eq!(record.team_members.len(), 1);
        assert!(record.activities.is_empty());
        assert!(!record.home_featured);
    }

    #[test]
    fn merge_rejects_non_objects() {
        assert!(ListingRecord::merged_over_defaults(&json!([1, 2])).is_err());
    }

    #[test]
    fn merge_reads_server_gallery_names() {
        let record = ListingRecord::merged_over_defaults(&json!({
            "homeName": "Bellavista Barry",
            "teamGalleryImages": ["http://x/t.jpg"],
            "facilitiesGalleryImages": [{"type": "video", "url": "http://x/f.mp4"}]
        }))
        .unwrap();
        assert_eq!(record.team_gallery.len(), 1);
        assert_eq!(record.facilities_gallery.len(), 1);
    }

    #[test]
    fn merge_prefers_listing_name_over_server_name() {
        let record = ListingRecord::merged_over_defaults(&json!({
            "teamGallery": ["http://x/new.jpg"],
            "teamGalleryImages": ["http://x/old.jpg", "http://x/older.jpg"],
            "facilitiesGallery": null,
            "facilitiesGalleryImages": ["http://x/f.jpg"]
        }))
        .unwrap();
        assert_eq!(record.team_gallery, vec![MediaRef::from("http://x/new.jpg")]);
        assert_eq!(record.facilities_gallery.len(), 1);
    }

    #[test]
    fn generated_id_collapses_separator_runs() {
        let item = NewsItem::new("Summer  Fete & Fair", "Stalls", "July 6");
        assert_eq!(item.generated_id(), "summer-fete-fair");
        let legacy = NewsItem {
            id: "summer--fete".into(),
            ..item
        };
        assert_eq!(legacy.generated_id(), "summer-fete");
    }

    #[test]
    fn news_nulls_fall_back_to_defaults() {
        let items: Vec<NewsItem> = serde_json::from_value(json!([
            {
                "id": "summer-fete",
                "title": "Summer Fete",
                "excerpt": "Stalls and games",
                "fullDescription": null,
                "image": null,
                "category": null,
                "date": "July 6",
                "location": null,
                "author": null,
                "badge": null,
                "important": null,
                "gallery": [],
                "videoUrl": null,
                "videoDescription": null
            },
            {
                "id": "choir-award",
                "title": "Choir Award",
                "excerpt": "Our choir won",
                "category": "Awards",
                "date": "May 2",
                "location": "",
                "author": "Ceri"
            }
        ]))
        .unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].location, DEFAULT_NEWS_LOCATION);
        assert_eq!(items[0].author, DEFAULT_NEWS_AUTHOR);
        assert_eq!(items[0].category, NewsCategory::Events);
        assert_eq!(items[0].badge, "");
        assert_eq!(items[1].category, NewsCategory::Awards);
        assert_eq!(items[1].location, DEFAULT_NEWS_LOCATION);
        assert_eq!(items[1].author, "Ceri");
    }

    #[test]
    fn unknown_news_category_reads_as_events() {
        let item: NewsItem = serde_json::from_value(json!({"category": "gala"})).unwrap();
        assert_eq!(item.category, NewsCategory::Events);
    }

    #[test]
    fn team_member_nulls_read_as_empty() {
        let member: TeamMember =
            serde_json::from_value(json!({"name": null, "role": "Nurse", "image": null})).unwrap();
        assert_eq!(member.name, "");
        assert_eq!(member.image, None);
    }

    #[test]
    fn stats_accept_strings_and_blanks() {
        let record: ListingRecord =
            serde_json::from_value(json!({"statsBedrooms": "62", "statsPremier": ""})).unwrap();
        assert_eq!(record.stats_bedrooms, Some(62));
        assert_eq!(record.stats_premier, None);
    }

    #[test]
    fn listing_slug_falls_back_to_home() {
        assert_eq!(ListingRecord::default().slug(), "home");
    }

    #[test]
    fn news_id_prefers_explicit_id_and_caps_length() {
        let mut item = NewsItem::new("Bollywood Night 2024", "x", "June 14, 2024");
        assert_eq!(item.generated_id(), "bollywood-night-2024");

        item.id = "custom id".into();
        assert_eq!(item.generated_id(), "custom-id");

        item.id.clear();
        item.title = "a".repeat(80);
        assert_eq!(item.generated_id().len(), MAX_NEWS_ID);
    }

    #[test]
    fn news_validation_requires_title_date_and_summary() {
        let item = NewsItem::new("Title", "", "June 1");
        assert!(matches!(item.validate(), Err(CareError::Validation(_))));

        let item = NewsItem::new("Title", "x".repeat(MAX_EXCERPT + 1), "June 1");
        assert!(item.validate().is_err());

        let item = NewsItem::new("Title", "Summary", "June 1");
        assert!(item.validate().is_ok());
    }

    #[test]
    fn news_defaults_apply_to_missing_fields() {
        let item: NewsItem = serde_json::from_value(json!({
            "id": "queen",
            "title": "Her Majesty",
            "badge": null,
            "gallery": null,
            "category": "community"
        }))
        .unwrap();
        assert_eq!(item.location, DEFAULT_NEWS_LOCATION);
        assert_eq!(item.author, DEFAULT_NEWS_AUTHOR);
        assert_eq!(item.category, NewsCategory::Community);
        assert!(item.gallery.is_empty());
        assert_eq!(item.badge, "");
    }

    #[test]
    fn category_parses_wire_names() {
        assert_eq!(
            "health-updates".parse::<NewsCategory>().unwrap(),
            NewsCategory::HealthUpdates
        );
        assert!("gossip".parse::<NewsCategory>().is_err());
    }

    #[test]
    fn faq_requires_both_parts() {
        assert!(Faq::new("Visiting hours?", "").is_err());
        assert!(Faq::new("Visiting hours?", "10am to 3pm").is_ok());
    }

    #[test]
    fn user_record_requires_name_and_email() {
        assert!(UserRecord::new("", "a@b.c", UserRole::Viewer).is_err());
        let user = UserRecord::new("Ann", "ann@example.com", UserRole::Editor).unwrap();
        assert!(user.id.parse::<i64>().is_ok());
    }
}
