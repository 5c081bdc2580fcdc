//! Field specifications and registry.
//!
//! Every listing field has exactly one entry here; [`ListingField`] parsing and
//! the shape check in `set` both go through this table.

use super::ListingField;

/// The shape of value a field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text (names, descriptions, URLs)
    Text,

    /// Optional non-negative count (bedrooms)
    Number,

    /// Simple boolean
    Flag,

    /// Ordered `TeamMember` list
    Team,

    /// Ordered list of plain strings (activities)
    Strings,

    /// Ordered `FacilityHighlight` list
    Facilities,

    /// Ordered `DetailedFacility` list
    Details,

    /// Ordered gallery of `MediaRef` entries
    Media,
}

impl FieldKind {
    pub fn is_list(&self) -> bool {
        !matches!(self, FieldKind::Text | FieldKind::Number | FieldKind::Flag)
    }

    /// Human name used in field-type errors.
    pub fn describe(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Number => "number",
            FieldKind::Flag => "true/false",
            FieldKind::Team => "team member list",
            FieldKind::Strings => "text list",
            FieldKind::Facilities => "facility list",
            FieldKind::Details => "detailed facility list",
            FieldKind::Media => "media list",
        }
    }
}

#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub field: ListingField,

    /// The wire name (camelCase)
    pub name: &'static str,

    pub kind: FieldKind,
}

impl FieldSpec {
    const fn new(field: ListingField, name: &'static str, kind: FieldKind) -> Self {
        Self { field, name, kind }
    }
}

pub const FIELDS: &[FieldSpec] = &[
    // Card
    FieldSpec::new(ListingField::HomeName, "homeName", FieldKind::Text),
    FieldSpec::new(ListingField::HomeLocation, "homeLocation", FieldKind::Text),
    FieldSpec::new(ListingField::HomeImage, "homeImage", FieldKind::Text),
    FieldSpec::new(ListingField::HomeBadge, "homeBadge", FieldKind::Text),
    FieldSpec::new(ListingField::HomeDesc, "homeDesc", FieldKind::Text),
    FieldSpec::new(ListingField::AdminEmail, "adminEmail", FieldKind::Text),
    FieldSpec::new(ListingField::HomeFeatured, "homeFeatured", FieldKind::Flag),
    // Hero
    FieldSpec::new(ListingField::HeroTitle, "heroTitle", FieldKind::Text),
    FieldSpec::new(ListingField::HeroSubtitle, "heroSubtitle", FieldKind::Text),
    FieldSpec::new(ListingField::HeroBgImage, "heroBgImage", FieldKind::Text),
    FieldSpec::new(
        ListingField::HeroExpandedDesc,
        "heroExpandedDesc",
        FieldKind::Text,
    ),
    FieldSpec::new(ListingField::CiwReportUrl, "ciwReportUrl", FieldKind::Text),
    FieldSpec::new(ListingField::NewsletterUrl, "newsletterUrl", FieldKind::Text),
    // Stats
    FieldSpec::new(ListingField::StatsBedrooms, "statsBedrooms", FieldKind::Number),
    FieldSpec::new(ListingField::StatsPremier, "statsPremier", FieldKind::Number),
    // Team
    FieldSpec::new(ListingField::TeamMembers, "teamMembers", FieldKind::Team),
    FieldSpec::new(ListingField::TeamGallery, "teamGallery", FieldKind::Media),
    // Activities
    FieldSpec::new(ListingField::ActivitiesIntro, "activitiesIntro", FieldKind::Text),
    FieldSpec::new(ListingField::Activities, "activities", FieldKind::Strings),
    FieldSpec::new(ListingField::ActivityImages, "activityImages", FieldKind::Media),
    FieldSpec::new(
        ListingField::ActivitiesModalDesc,
        "activitiesModalDesc",
        FieldKind::Text,
    ),
    // Facilities
    FieldSpec::new(ListingField::FacilitiesIntro, "facilitiesIntro", FieldKind::Text),
    FieldSpec::new(
        ListingField::FacilitiesList,
        "facilitiesList",
        FieldKind::Facilities,
    ),
    FieldSpec::new(
        ListingField::DetailedFacilities,
        "detailedFacilities",
        FieldKind::Details,
    ),
    FieldSpec::new(
        ListingField::FacilitiesGallery,
        "facilitiesGallery",
        FieldKind::Media,
    ),
];

pub fn spec_for(field: ListingField) -> &'static FieldSpec {
    FIELDS
        .iter()
        .find(|spec| spec.field == field)
        .unwrap_or(&FIELDS[0])
}

/// Names the REST collaborator uses for some listing fields.
pub const SERVER_NAMES: &[(&str, ListingField)] = &[
    ("teamGalleryImages", ListingField::TeamGallery),
    ("facilitiesGalleryImages", ListingField::FacilitiesGallery),
];

pub fn find_by_name(name: &str) -> Option<&'static FieldSpec> {
    FIELDS.iter().find(|spec| spec.name == name).or_else(|| {
        SERVER_NAMES
            .iter()
            .find(|(server, _)| *server == name)
            .map(|(_, field)| spec_for(*field))
    })
}

/// The listing's own name for `name`, which may be a server name.
pub fn canonical_name(name: &str) -> &str {
    SERVER_NAMES
        .iter()
        .find(|(server, _)| *server == name)
        .map_or(name, |(_, field)| spec_for(*field).name)
}

/// Names of every repeatable field, in registry order.
pub fn list_fields() -> impl Iterator<Item = &'static str> {
    FIELDS
        .iter()
        .filter(|spec| spec.kind.is_list())
        .map(|spec| spec.name)
}
