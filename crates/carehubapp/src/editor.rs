//! # Listing Editor
//!
//! Wraps one [`ListingRecord`] for an editing session. It opens in one of two
//! modes:
//!
//! - **Add**: start from defaults
//! - **Edit**: shallow-merge an existing JSON object over the defaults
//!
//! Typed `add_*` helpers check required inputs before touching the list and
//! return [`CareError::Validation`] otherwise. Nothing is persisted until
//! [`ListingEditor::save`] hands the record to the `on_save` callback.

use crate::error::{CareError, Result};
use crate::lists::{Direction, ListField, ListItem};
use crate::media::{MediaItem, MediaRef};
use crate::model::{DetailedFacility, FacilityHighlight, ListingRecord, TeamMember};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Add,
    Edit,
}

pub type SaveCallback = Box<dyn FnMut(&ListingRecord) -> Result<()>>;

pub struct ListingEditor {
    mode: EditorMode,
    record: ListingRecord,
    on_save: Option<SaveCallback>,
}

impl ListingEditor {
    pub fn add() -> Self {
        Self {
            mode: EditorMode::Add,
            record: ListingRecord::default(),
            on_save: None,
        }
    }

    pub fn edit(existing: &Value) -> Result<Self> {
        Ok(Self {
            mode: EditorMode::Edit,
            record: ListingRecord::merged_over_defaults(existing)?,
            on_save: None,
        })
    }

    /// Resumes editing an already-typed record (e.g. a draft file).
    pub fn from_record(record: ListingRecord, mode: EditorMode) -> Self {
        Self {
            mode,
            record,
            on_save: None,
        }
    }

    pub fn with_on_save<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&ListingRecord) -> Result<()> + 'static,
    {
        self.on_save = Some(Box::new(callback));
        self
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn record(&self) -> &ListingRecord {
        &self.record
    }

    pub fn record_mut(&mut self) -> &mut ListingRecord {
        &mut self.record
    }

    pub fn into_record(self) -> ListingRecord {
        self.record
    }

    pub fn add_team_member(&mut self, name: &str, role: &str, image: Option<&str>) -> Result<()> {
        if name.trim().is_empty() || role.trim().is_empty() {
            return Err(CareError::validation("Team member needs a name and a role"));
        }
        let mut member = TeamMember::new(name.trim(), role.trim());
        if let Some(image) = image {
            member = member.with_image(image.trim());
        }
        self.record
            .append_item(ListField::TeamMembers, ListItem::Member(member))
    }

    pub fn add_activity(&mut self, activity: &str) -> Result<()> {
        if activity.trim().is_empty() {
            return Err(CareError::validation("Activity cannot be empty"));
        }
        self.record.append_item(
            ListField::Activities,
            ListItem::Activity(activity.trim().to_string()),
        )
    }

    pub fn add_facility(&mut self, icon: &str, title: &str) -> Result<()> {
        if title.trim().is_empty() {
            return Err(CareError::validation("Facility needs a title"));
        }
        let facility = FacilityHighlight {
            icon: icon.trim().to_string(),
            title: title.trim().to_string(),
        };
        self.record
            .append_item(ListField::FacilitiesList, ListItem::Facility(facility))
    }

    pub fn add_detailed_facility(
        &mut self,
        title: &str,
        icon: Option<&str>,
        description: &str,
    ) -> Result<()> {
        if title.trim().is_empty() || description.trim().is_empty() {
            return Err(CareError::validation(
                "Detailed facility needs a title and a description",
            ));
        }
        let detail = DetailedFacility {
            title: title.trim().to_string(),
            icon: icon
                .map(str::trim)
                .filter(|i| !i.is_empty())
                .map(str::to_string),
            description: description.trim().to_string(),
        };
        self.record
            .append_item(ListField::DetailedFacilities, ListItem::Detail(detail))
    }

    /// Appends a typed item to one of the three galleries.
    pub fn add_media(&mut self, gallery: ListField, item: MediaItem) -> Result<()> {
        if !gallery.is_gallery() {
            return Err(CareError::validation(format!(
                "{} is not a gallery",
                gallery
            )));
        }
        if item.url.trim().is_empty() {
            return Err(CareError::validation("Media needs a URL"));
        }
        self.record
            .append_item(gallery, ListItem::Media(MediaRef::Item(item)))
    }

    pub fn remove(&mut self, field: ListField, index: usize) -> bool {
        self.record.remove_item(field, index)
    }

    pub fn move_item(&mut self, field: ListField, index: usize, direction: Direction) -> bool {
        self.record.move_item(field, index, direction)
    }

    /// Binds the URL shown on the second card image: `activityImages[0]`,
    /// appended when the gallery is empty.
    pub fn set_second_card_image(&mut self, url: &str) {
        let entry = MediaRef::Item(MediaItem::image(url.trim()));
        let gallery = &mut self.record.activity_images;
        if gallery.is_empty() {
            crate::lists::append(gallery, entry);
        } else {
            crate::lists::replace_at(gallery, 0, entry);
        }
    }

    /// The whole record as pretty-printed JSON.
    pub fn export_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.record)?)
    }

    /// Hands the record to the `on_save` callback.
    pub fn save(&mut self) -> Result<()> {
        let callback = self
            .on_save
            .as_mut()
            .ok_or_else(|| CareError::Store("No save handler configured".into()))?;
        callback(&self.record)?;
        tracing::info!(home = %self.record.home_name, "listing saved");
        Ok(())
    }
}
