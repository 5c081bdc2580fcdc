//! Clipboard exports: the public listing card, FAQs and admin user records.
//!
//! Each export is a small serializable struct; callers turn it into
//! pretty-printed JSON with [`to_pretty_json`].

use crate::error::Result;
use crate::media::normalize;
use crate::model::{Faq, ListingRecord, UserRecord};
use serde::Serialize;

const MAX_CARD_IMAGES: usize = 2;

/// The listing card consumed by the public homes index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingExport {
    pub id: String,
    pub name: String,
    pub location: String,
    pub description: String,
    pub features: Vec<String>,
    pub images: Vec<String>,
    pub link: String,
}

impl ListingExport {
    pub fn from_record(record: &ListingRecord) -> Self {
        let id = record.slug();

        let mut features = Vec::new();
        if let Some(n) = record.stats_bedrooms.filter(|n| *n > 0) {
            features.push(format!("{} Bedrooms", n));
        }
        if let Some(n) = record.stats_premier.filter(|n| *n > 0) {
            features.push(format!("{} Premier Rooms", n));
        }
        features.extend(
            record
                .facilities_list
                .iter()
                .map(|f| f.title.trim())
                .filter(|t| !t.is_empty())
                .map(str::to_string),
        );

        let second = record
            .activity_images
            .first()
            .and_then(normalize)
            .map(|item| item.url);

        let mut images: Vec<String> = Vec::with_capacity(MAX_CARD_IMAGES);
        let candidates = [Some(record.home_image.clone()), second];
        for url in candidates
            .into_iter()
            .flatten()
            .filter(|u| !u.trim().is_empty())
        {
            if !images.contains(&url) && images.len() < MAX_CARD_IMAGES {
                images.push(url);
            }
        }

        Self {
            link: format!("/{}", id),
            id,
            name: record.home_name.clone(),
            location: record.home_location.clone(),
            description: record.home_desc.clone(),
            features,
            images,
        }
    }
}

pub fn export_listing(record: &ListingRecord) -> Result<String> {
    to_pretty_json(&ListingExport::from_record(record))
}

pub fn export_faqs(faqs: &[Faq]) -> Result<String> {
    to_pretty_json(faqs)
}

pub fn export_user(user: &UserRecord) -> Result<String> {
    to_pretty_json(user)
}

pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::{MediaItem, MediaRef};
    use crate::model::{FacilityHighlight, UserRole};
    use serde_json::Value;

    fn cardiff() -> ListingRecord {
        ListingRecord {
            home_name: "Bellavista Cardiff".into(),
            home_location: "Cardiff Bay".into(),
            home_image: "http://x/main.jpg".into(),
            home_desc: "Waterfront care".into(),
            stats_bedrooms: Some(62),
            stats_premier: Some(0),
            facilities_list: vec![
                FacilityHighlight {
                    icon: "fa-tree".into(),
                    title: "Gardens".into(),
                },
                FacilityHighlight {
                    icon: "fa-x".into(),
                    title: " ".into(),
                },
            ],
            activity_images: vec![MediaRef::Item(MediaItem::image("http://x/second.jpg"))],
            ..Default::default()
        }
    }

    #[test]
    fn features_skip_zero_stats_and_blank_titles() {
        let export = ListingExport::from_record(&cardiff());
        assert_eq!(export.features, vec!["62 Bedrooms", "Gardens"]);
    }

    #[test]
    fn zero_bedrooms_are_omitted() {
        let record = ListingRecord {
            stats_bedrooms: Some(0),
            ..Default::default()
        };
        assert!(ListingExport::from_record(&record).features.is_empty());
    }

    #[test]
    fn id_and_link_come_from_the_name() {
        let export = ListingExport::from_record(&cardiff());
        assert_eq!(export.id, "bellavista-cardiff");
        assert_eq!(export.link, "/bellavista-cardiff");
    }

    #[test]
    fn images_are_deduplicated_and_capped() {
        let mut record = cardiff();
        assert_eq!(
            ListingExport::from_record(&record).images,
            vec!["http://x/main.jpg", "http://x/second.jpg"]
        );

        record.activity_images = vec![MediaRef::from("http://x/main.jpg")];
        assert_eq!(
            ListingExport::from_record(&record).images,
            vec!["http://x/main.jpg"]
        );

        record.home_image.clear();
        record.activity_images = vec![MediaRef::Missing];
        assert!(ListingExport::from_record(&record).images.is_empty());
    }

    #[test]
    fn unnamed_listing_exports_as_home() {
        let export = ListingExport::from_record(&ListingRecord::default());
        assert_eq!(export.link, "/home");
    }

    #[test]
    fn faq_export_is_a_plain_array() {
        let faqs = vec![Faq::new("Parking?", "Free on site").unwrap()];
        let json: Value = serde_json::from_str(&export_faqs(&faqs).unwrap()).unwrap();
        assert_eq!(json[0]["question"], "Parking?");
        assert_eq!(json[0]["answer"], "Free on site");
    }

    #[test]
    fn user_export_uses_wire_names() {
        let user = UserRecord::new("Ann", "ann@example.com", UserRole::Viewer).unwrap();
        let json: Value = serde_json::from_str(&export_user(&user).unwrap()).unwrap();
        assert_eq!(json["role"], "Viewer");
        assert!(json["createdAt"].is_string());
    }
}
