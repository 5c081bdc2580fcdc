//! # Field Store
//!
//! Uniform access to the attributes of one [`ListingRecord`]. Instead of each
//! caller touching struct fields directly, the store offers:
//!
//! - **Names**: [`ListingField`], parseable from the camelCase wire name
//! - **Specifications**: the [`FIELDS`] table recording each field's kind
//! - **Unified access**: [`ListingRecord::get`] / [`ListingRecord::set`]
//!
//! `set` is a pure replacement. It performs no content validation; the only
//! check is that the value has the right shape for the field.
//!
//! ```ignore
//! let mut record = ListingRecord::default();
//! record.set(ListingField::HomeName, FieldValue::Text("Bellavista Barry".into()))?;
//! assert_eq!(record.get(ListingField::HomeName).as_text(), Some("Bellavista Barry"));
//! ```

mod spec;
mod value;

pub use spec::{
    canonical_name, find_by_name, list_fields, spec_for, FieldKind, FieldSpec, FIELDS, SERVER_NAMES,
};
pub use value::FieldValue;

use crate::error::{CareError, Result};
use crate::model::ListingRecord;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListingField {
    HomeName,
    HomeLocation,
    HomeImage,
    HomeBadge,
    HomeDesc,
    AdminEmail,
    HomeFeatured,
    HeroTitle,
    HeroSubtitle,
    HeroBgImage,
    HeroExpandedDesc,
    CiwReportUrl,
    NewsletterUrl,
    StatsBedrooms,
    StatsPremier,
    TeamMembers,
    TeamGallery,
    ActivitiesIntro,
    Activities,
    ActivityImages,
    ActivitiesModalDesc,
    FacilitiesIntro,
    FacilitiesList,
    DetailedFacilities,
    FacilitiesGallery,
}

impl ListingField {
    pub const ALL: [ListingField; 25] = [
        ListingField::HomeName,
        ListingField::HomeLocation,
        ListingField::HomeImage,
        ListingField::HomeBadge,
        ListingField::HomeDesc,
        ListingField::AdminEmail,
        ListingField::HomeFeatured,
        ListingField::HeroTitle,
        ListingField::HeroSubtitle,
        ListingField::HeroBgImage,
        ListingField::HeroExpandedDesc,
        ListingField::CiwReportUrl,
        ListingField::NewsletterUrl,
        ListingField::StatsBedrooms,
        ListingField::StatsPremier,
        ListingField::TeamMembers,
        ListingField::TeamGallery,
        ListingField::ActivitiesIntro,
        ListingField::Activities,
        ListingField::ActivityImages,
        ListingField::ActivitiesModalDesc,
        ListingField::FacilitiesIntro,
        ListingField::FacilitiesList,
        ListingField::DetailedFacilities,
        ListingField::FacilitiesGallery,
    ];

    pub fn name(&self) -> &'static str {
        spec_for(*self).name
    }

    pub fn kind(&self) -> FieldKind {
        spec_for(*self).kind
    }
}

impl fmt::Display for ListingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ListingField {
    type Err = CareError;

    fn from_str(s: &str) -> Result<Self> {
        find_by_name(s.trim())
            .map(|spec| spec.field)
            .ok_or_else(|| CareError::validation(format!("Unknown field: {}", s)))
    }
}

impl ListingRecord {
    /// Reads a field by name.
    pub fn get(&self, field: ListingField) -> FieldValue {
        match field {
            ListingField::HomeName => FieldValue::Text(self.home_name.clone()),
            ListingField::HomeLocation => FieldValue::Text(self.home_location.clone()),
            ListingField::HomeImage => FieldValue::Text(self.home_image.clone()),
            ListingField::HomeBadge => FieldValue::Text(self.home_badge.clone()),
            ListingField::HomeDesc => FieldValue::Text(self.home_desc.clone()),
            ListingField::AdminEmail => FieldValue::Text(self.admin_email.clone()),
            ListingField::HomeFeatured => FieldValue::Flag(self.home_featured),
            ListingField::HeroTitle => FieldValue::Text(self.hero_title.clone()),
            ListingField::HeroSubtitle => FieldValue::Text(self.hero_subtitle.clone()),
            ListingField::HeroBgImage => FieldValue::Text(self.hero_bg_image.clone()),
            ListingField::HeroExpandedDesc => FieldValue::Text(self.hero_expanded_desc.clone()),
            ListingField::CiwReportUrl => FieldValue::Text(self.ciw_report_url.clone()),
            ListingField::NewsletterUrl => FieldValue::Text(self.newsletter_url.clone()),
            ListingField::StatsBedrooms => FieldValue::Number(self.stats_bedrooms),
            ListingField::StatsPremier => FieldValue::Number(self.stats_premier),
            ListingField::TeamMembers => FieldValue::Team(self.team_members.clone()),
            ListingField::TeamGallery => FieldValue::Media(self.team_gallery.clone()),
            ListingField::ActivitiesIntro => FieldValue::Text(self.activities_intro.clone()),
            ListingField::Activities => FieldValue::Strings(self.activities.clone()),
            ListingField::ActivityImages => FieldValue::Media(self.activity_images.clone()),
            ListingField::ActivitiesModalDesc => {
                FieldValue::Text(self.activities_modal_desc.clone())
            }
            ListingField::FacilitiesIntro => FieldValue::Text(self.facilities_intro.clone()),
            ListingField::FacilitiesList => FieldValue::Facilities(self.facilities_list.clone()),
            ListingField::DetailedFacilities => {
                FieldValue::Details(self.detailed_facilities.clone())
            }
            ListingField::FacilitiesGallery => {
                FieldValue::Media(self.facilities_gallery.clone())
            }
        }
    }

    /// Replaces a field's value.
    ///
    /// Fails with [`CareError::FieldType`] when the value's shape does not
    /// match the field; the record is left untouched in that case.
    pub fn set(&mut self, field: ListingField, value: FieldValue) -> Result<()> {
        let spec = spec_for(field);
        if value.kind() != spec.kind {
            return Err(CareError::FieldType {
                field: spec.name,
                expected: spec.kind.describe(),
            });
        }

        match (field, value) {
            (ListingField::HomeName, FieldValue::Text(v)) => self.home_name = v,
            (ListingField::HomeLocation, FieldValue::Text(v)) => self.home_location = v,
            (ListingField::HomeImage, FieldValue::Text(v)) => self.home_image = v,
            (ListingField::HomeBadge, FieldValue::Text(v)) => self.home_badge = v,
            (ListingField::HomeDesc, FieldValue::Text(v)) => self.home_desc = v,
            (ListingField::AdminEmail, FieldValue::Text(v)) => self.admin_email = v,
            (ListingField::HomeFeatured, FieldValue::Flag(v)) => self.home_featured = v,
            (ListingField::HeroTitle, FieldValue::Text(v)) => self.hero_title = v,
            (ListingField::HeroSubtitle, FieldValue::Text(v)) => self.hero_subtitle = v,
            (ListingField::HeroBgImage, FieldValue::Text(v)) => self.hero_bg_image = v,
            (ListingField::HeroExpandedDesc, FieldValue::Text(v)) => self.hero_expanded_desc = v,
            (ListingField::CiwReportUrl, FieldValue::Text(v)) => self.ciw_report_url = v,
            (ListingField::NewsletterUrl, FieldValue::Text(v)) => self.newsletter_url = v,
            (ListingField::StatsBedrooms, FieldValue::Number(v)) => self.stats_bedrooms = v,
            (ListingField::StatsPremier, FieldValue::Number(v)) => self.stats_premier = v,
            (ListingField::TeamMembers, FieldValue::Team(v)) => self.team_members = v,
            (ListingField::TeamGallery, FieldValue::Media(v)) => self.team_gallery = v,
            (ListingField::ActivitiesIntro, FieldValue::Text(v)) => self.activities_intro = v,
            (ListingField::Activities, FieldValue::Strings(v)) => self.activities = v,
            (ListingField::ActivityImages, FieldValue::Media(v)) => self.activity_images = v,
            (ListingField::ActivitiesModalDesc, FieldValue::Text(v)) => {
                self.activities_modal_desc = v
            }
            (ListingField::FacilitiesIntro, FieldValue::Text(v)) => self.facilities_intro = v,
            (ListingField::FacilitiesList, FieldValue::Facilities(v)) => self.facilities_list = v,
            (ListingField::DetailedFacilities, FieldValue::Details(v)) => {
                self.detailed_facilities = v
            }
            (ListingField::FacilitiesGallery, FieldValue::Media(v)) => {
                self.facilities_gallery = v
            }
            (field, value) => {
                return Err(CareError::FieldType {
                    field: field.name(),
                    expected: value.kind().describe(),
                })
            }
        }
        Ok(())
    }

    /// Parses `raw` for a scalar field and sets it.
    pub fn set_from_input(&mut self, field: ListingField, raw: &str) -> Result<()> {
        let value = FieldValue::parse_scalar(field.kind(), field.name(), raw)?;
        self.set(field, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::MediaRef;

    #[test]
    fn names_round_trip_through_parsing() {
        for field in ListingField::ALL {
            assert_eq!(field.name().parse::<ListingField>().unwrap(), field);
        }
        assert!("homeTitle".parse::<ListingField>().is_err());
    }

    #[test]
    fn set_replaces_only_the_named_field() {
        let mut record = ListingRecord {
            home_location: "Barry".into(),
            ..Default::default()
        };

        record
            .set(ListingField::HomeName, FieldValue::Text("Bellavista".into()))
            .unwrap();

        assert_eq!(record.home_name, "Bellavista");
        assert_eq!(record.home_location, "Barry");
    }

    #[test]
    fn set_does_not_validate_content() {
        let mut record = ListingRecord::default();
        record
            .set(ListingField::HomeName, FieldValue::Text(String::new()))
            .unwrap();
        record
            .set(ListingField::HomeImage, FieldValue::Text("not a url".into()))
            .unwrap();
        assert_eq!(record.home_image, "not a url");
    }

    #[test]
    fn wrong_shape_is_rejected_without_change() {
        let mut record = ListingRecord::default();
        let err = record
            .set(ListingField::StatsBedrooms, FieldValue::Text("62".into()))
            .unwrap_err();

        assert!(matches!(
            err,
            CareError::FieldType {
                field: "statsBedrooms",
                expected: "number"
            }
        ));
        assert_eq!(record.stats_bedrooms, None);
    }

    #[test]
    fn get_returns_what_set_stored() {
        let mut record = ListingRecord::default();
        let gallery = vec![MediaRef::from("http://x/a.png"), MediaRef::Missing];

        record
            .set(ListingField::TeamGallery, FieldValue::Media(gallery.clone()))
            .unwrap();

        assert_eq!(record.get(ListingField::TeamGallery), FieldValue::Media(gallery));
        assert_eq!(record.get(ListingField::ActivityImages), FieldValue::Media(vec![]));
    }

    #[test]
    fn set_from_input_parses_scalars() {
        let mut record = ListingRecord::default();
        record.set_from_input(ListingField::StatsBedrooms, "62").unwrap();
        record.set_from_input(ListingField::HomeFeatured, "yes").unwrap();
        assert_eq!(record.stats_bedrooms, Some(62));
        assert!(record.home_featured);

        assert!(record.set_from_input(ListingField::Activities, "Bingo").is_err());
    }
}
