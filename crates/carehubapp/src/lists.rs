//! # List Editor
//!
//! The repeatable listing fields (team, activities, facilities, galleries) all
//! support the same four operations:
//!
//! | Operation | Out of range | At boundary |
//! |-----------|--------------|-------------|
//! | [`append`] | n/a | n/a |
//! | [`remove_at`] | no-op | n/a |
//! | [`move_at`] | no-op | no-op |
//! | [`replace_at`] | no-op | n/a |
//!
//! The generic functions work on any `Vec`; [`ListField`] and [`ListItem`]
//! route them to the right field of a [`ListingRecord`]. No operation touches
//! any field other than the one named, and list order is the only ordering
//! signal.

use crate::error::{CareError, Result};
use crate::fields::ListingField;
use crate::media::MediaRef;
use crate::model::{DetailedFacility, FacilityHighlight, ListingRecord, TeamMember};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl FromStr for Direction {
    type Err = CareError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            other => Err(CareError::validation(format!(
                "Unknown direction: {} (expected up or down)",
                other
            ))),
        }
    }
}

/// Pushes to the end. No dedup.
pub fn append<T>(list: &mut Vec<T>, item: T) {
    list.push(item);
}

/// Removes the entry at `index`. Returns whether anything changed.
pub fn remove_at<T>(list: &mut Vec<T>, index: usize) -> bool {
    if index >= list.len() {
        return false;
    }
    list.remove(index);
    true
}

/// Swaps the entry at `index` with its neighbour. Returns whether anything
/// changed.
pub fn move_at<T>(list: &mut [T], index: usize, direction: Direction) -> bool {
    if index >= list.len() {
        return false;
    }
    let target = match direction {
        Direction::Up if index > 0 => index - 1,
        Direction::Down if index + 1 < list.len() => index + 1,
        _ => return false,
    };
    list.swap(index, target);
    true
}

/// Replaces the entry at `index`. Returns whether anything changed.
pub fn replace_at<T>(list: &mut [T], index: usize, item: T) -> bool {
    match list.get_mut(index) {
        Some(slot) => {
            *slot = item;
            true
        }
        None => false,
    }
}

/// The repeatable fields of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListField {
    TeamMembers,
    TeamGallery,
    Activities,
    ActivityImages,
    FacilitiesList,
    DetailedFacilities,
    FacilitiesGallery,
}

impl ListField {
    pub fn field(&self) -> ListingField {
        match self {
            ListField::TeamMembers => ListingField::TeamMembers,
            ListField::TeamGallery => ListingField::TeamGallery,
            ListField::Activities => ListingField::Activities,
            ListField::ActivityImages => ListingField::ActivityImages,
            ListField::FacilitiesList => ListingField::FacilitiesList,
            ListField::DetailedFacilities => ListingField::DetailedFacilities,
            ListField::FacilitiesGallery => ListingField::FacilitiesGallery,
        }
    }

    pub fn is_gallery(&self) -> bool {
        matches!(
            self,
            ListField::TeamGallery | ListField::ActivityImages | ListField::FacilitiesGallery
        )
    }
}

impl TryFrom<ListingField> for ListField {
    type Error = CareError;

    fn try_from(field: ListingField) -> Result<Self> {
        match field {
            ListingField::TeamMembers => Ok(ListField::TeamMembers),
            ListingField::TeamGallery => Ok(ListField::TeamGallery),
            ListingField::Activities => Ok(ListField::Activities),
            ListingField::ActivityImages => Ok(ListField::ActivityImages),
            ListingField::FacilitiesList => Ok(ListField::FacilitiesList),
            ListingField::DetailedFacilities => Ok(ListField::DetailedFacilities),
            ListingField::FacilitiesGallery => Ok(ListField::FacilitiesGallery),
            other => Err(CareError::validation(format!(
                "{} is not a list field",
                other
            ))),
        }
    }
}

impl FromStr for ListField {
    type Err = CareError;

    fn from_str(s: &str) -> Result<Self> {
        ListField::try_from(s.parse::<ListingField>()?)
    }
}

impl fmt::Display for ListField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field().name())
    }
}

/// One entry for any repeatable field.
#[derive(Debug, Clone, PartialEq)]
pub enum ListItem {
    Member(TeamMember),
    Activity(String),
    Facility(FacilityHighlight),
    Detail(DetailedFacility),
    Media(MediaRef),
}

/// Runs `$body` with `$list` bound to the vector behind `$field`.
macro_rules! with_list {
    ($record:expr, $field:expr, |$list:ident| $body:expr) => {
        match $field {
            ListField::TeamMembers => {
                let $list = &mut $record.team_members;
                $body
            }
            ListField::TeamGallery => {
                let $list = &mut $record.team_gallery;
                $body
            }
            ListField::Activities => {
                let $list = &mut $record.activities;
                $body
            }
            ListField::ActivityImages => {
                let $list = &mut $record.activity_images;
                $body
            }
            ListField::FacilitiesList => {
                let $list = &mut $record.facilities_list;
                $body
            }
            ListField::DetailedFacilities => {
                let $list = &mut $record.detailed_facilities;
                $body
            }
            ListField::FacilitiesGallery => {
                let $list = &mut $record.facilities_gallery;
                $body
            }
        }
    };
}

impl ListingRecord {
    pub fn list_len(&self, field: ListField) -> usize {
        match field {
            ListField::TeamMembers => self.team_members.len(),
            ListField::TeamGallery => self.team_gallery.len(),
            ListField::Activities => self.activities.len(),
            ListField::ActivityImages => self.activity_images.len(),
            ListField::FacilitiesList => self.facilities_list.len(),
            ListField::DetailedFacilities => self.detailed_facilities.len(),
            ListField::FacilitiesGallery => self.facilities_gallery.len(),
        }
    }

    pub fn append_item(&mut self, field: ListField, item: ListItem) -> Result<()> {
        match (field, item) {
            (ListField::TeamMembers, ListItem::Member(m)) => append(&mut self.team_members, m),
            (ListField::Activities, ListItem::Activity(a)) => append(&mut self.activities, a),
            (ListField::FacilitiesList, ListItem::Facility(f)) => {
                append(&mut self.facilities_list, f)
            }
            (ListField::DetailedFacilities, ListItem::Detail(d)) => {
                append(&mut self.detailed_facilities, d)
            }
            (ListField::TeamGallery, ListItem::Media(m)) => append(&mut self.team_gallery, m),
            (ListField::ActivityImages, ListItem::Media(m)) => {
                append(&mut self.activity_images, m)
            }
            (ListField::FacilitiesGallery, ListItem::Media(m)) => {
                append(&mut self.facilities_gallery, m)
            }
            (field, _) => return Err(item_mismatch(field)),
        }
        Ok(())
    }

    pub fn remove_item(&mut self, field: ListField, index: usize) -> bool {
        with_list!(self, field, |list| remove_at(list, index))
    }

    pub fn move_item(&mut self, field: ListField, index: usize, direction: Direction) -> bool {
        with_list!(self, field, |list| move_at(list, index, direction))
    }

    pub fn replace_item(&mut self, field: ListField, index: usize, item: ListItem) -> Result<bool> {
        let replaced = match (field, item) {
            (ListField::TeamMembers, ListItem::Member(m)) => {
                replace_at(&mut self.team_members, index, m)
            }
            (ListField::Activities, ListItem::Activity(a)) => {
                replace_at(&mut self.activities, index, a)
            }
            (ListField::FacilitiesList, ListItem::Facility(f)) => {
                replace_at(&mut self.facilities_list, index, f)
            }
            (ListField::DetailedFacilities, ListItem::Detail(d)) => {
                replace_at(&mut self.detailed_facilities, index, d)
            }
            (ListField::TeamGallery, ListItem::Media(m)) => {
                replace_at(&mut self.team_gallery, index, m)
            }
            (ListField::ActivityImages, ListItem::Media(m)) => {
                replace_at(&mut self.activity_images, index, m)
            }
            (ListField::FacilitiesGallery, ListItem::Media(m)) => {
                replace_at(&mut self.facilities_gallery, index, m)
            }
            (field, _) => return Err(item_mismatch(field)),
        };
        Ok(replaced)
    }
}

fn item_mismatch(field: ListField) -> CareError {
    let spec = crate::fields::spec_for(field.field());
    CareError::FieldType {
        field: spec.name,
        expected: spec.kind.describe(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letters() -> Vec<&'static str> {
        vec!["a", "b", "c"]
    }

    #[test]
    fn move_up_at_top_is_a_no_op() {
        let mut list = letters();
        assert!(!move_at(&mut list, 0, Direction::Up));
        assert_eq!(list, letters());
    }

    #[test]
    fn move_down_at_bottom_is_a_no_op() {
        let mut list = letters();
        assert!(!move_at(&mut list, 2, Direction::Down));
        assert_eq!(list, letters());
    }

    #[test]
    fn move_out_of_range_is_a_no_op() {
        let mut list = letters();
        assert!(!move_at(&mut list, 7, Direction::Up));
        assert_eq!(list, letters());

        let mut empty: Vec<&str> = Vec::new();
        assert!(!move_at(&mut empty, 0, Direction::Down));
    }

    #[test]
    fn move_swaps_with_neighbour() {
        let mut list = letters();
        assert!(move_at(&mut list, 1, Direction::Up));
        assert_eq!(list, vec!["b", "a", "c"]);
        assert!(move_at(&mut list, 1, Direction::Down));
        assert_eq!(list, vec!["b", "c", "a"]);
    }

    #[test]
    fn remove_shrinks_by_one_and_keeps_order() {
        let mut list = letters();
        assert!(remove_at(&mut list, 1));
        assert_eq!(list, vec!["a", "c"]);
    }

    #[test]
    fn remove_out_of_range_is_a_no_op() {
        let mut list = letters();
        assert!(!remove_at(&mut list, 3));
        assert_eq!(list, letters());
    }

    #[test]
    fn replace_out_of_range_is_a_no_op() {
        let mut list = letters();
        assert!(!replace_at(&mut list, 3, "z"));
        assert!(replace_at(&mut list, 0, "z"));
        assert_eq!(list, vec!["z", "b", "c"]);
    }

    #[test]
    fn append_allows_duplicates() {
        let mut list = letters();
        append(&mut list, "a");
        assert_eq!(list, vec!["a", "b", "c", "a"]);
    }

    #[test]
    fn record_operations_touch_only_the_named_field() {
        let mut record = ListingRecord {
            activities: vec!["Bingo".into(), "Music".into()],
            team_gallery: vec![MediaRef::from("http://x/a.png")],
            ..Default::default()
        };

        record
            .append_item(ListField::Activities, ListItem::Activity("Gardening".into()))
            .unwrap();
        assert!(record.move_item(ListField::Activities, 2, Direction::Up));
        assert!(record.remove_item(ListField::Activities, 0));

        assert_eq!(record.activities, vec!["Gardening", "Music"]);
        assert_eq!(record.team_gallery.len(), 1);
        assert!(record.team_members.is_empty());
    }

    #[test]
    fn mismatched_items_are_rejected() {
        let mut record = ListingRecord::default();
        let err = record
            .append_item(ListField::TeamMembers, ListItem::Activity("Bingo".into()))
            .unwrap_err();
        assert!(matches!(err, CareError::FieldType { field: "teamMembers", .. }));
        assert_eq!(record.list_len(ListField::TeamMembers), 0);
    }

    #[test]
    fn list_field_parses_only_repeatables() {
        assert_eq!(
            "activityImages".parse::<ListField>().unwrap(),
            ListField::ActivityImages
        );
        assert!("homeName".parse::<ListField>().is_err());
    }
}
