use super::{CmdMessage, CmdResult};
use crate::editor::ListingEditor;
use crate::error::{CareError, Result};
use crate::export::export_listing;
use crate::fields::ListingField;
use crate::lists::{Direction, ListField};
use crate::media::MediaItem;

/// One change to a listing being edited.
#[derive(Debug, Clone)]
pub enum ListingEdit {
    Set {
        field: ListingField,
        value: String,
    },
    AddTeamMember {
        name: String,
        role: String,
        image: Option<String>,
    },
    AddActivity(String),
    AddFacility {
        icon: String,
        title: String,
    },
    AddDetailedFacility {
        title: String,
        icon: Option<String>,
        description: String,
    },
    AddMedia {
        gallery: ListField,
        item: MediaItem,
    },
    Remove {
        field: ListField,
        index: usize,
    },
    Move {
        field: ListField,
        index: usize,
        direction: Direction,
    },
    SecondCardImage(String),
}

/// Applies one edit. Validation failures leave the listing untouched.
pub fn apply(editor: &mut ListingEditor, edit: ListingEdit) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    match edit {
        ListingEdit::Set { field, value } => {
            if field.kind().is_list() {
                return Err(CareError::validation(format!(
                    "{} is a list; use the add/remove/move commands",
                    field
                )));
            }
            editor.record_mut().set_from_input(field, &value)?;
            result.add_message(CmdMessage::success(format!("Set {}", field)));
        }
        ListingEdit::AddTeamMember { name, role, image } => {
            editor.add_team_member(&name, &role, image.as_deref())?;
            result.add_message(CmdMessage::success(format!("Added team member {}", name.trim())));
        }
        ListingEdit::AddActivity(activity) => {
            editor.add_activity(&activity)?;
            result.add_message(CmdMessage::success(format!("Added activity {}", activity.trim())));
        }
        ListingEdit::AddFacility { icon, title } => {
            editor.add_facility(&icon, &title)?;
            result.add_message(CmdMessage::success(format!("Added facility {}", title.trim())));
        }
        ListingEdit::AddDetailedFacility {
            title,
            icon,
            description,
        } => {
            editor.add_detailed_facility(&title, icon.as_deref(), &description)?;
            result.add_message(CmdMessage::success(format!(
                "Added detailed facility {}",
                title.trim()
            )));
        }
        ListingEdit::AddMedia { gallery, item } => {
            let kind = item.kind;
            editor.add_media(gallery, item)?;
            result.add_message(CmdMessage::success(format!("Added {} to {}", kind, gallery)));
        }
        ListingEdit::Remove { field, index } => {
            if editor.remove(field, index) {
                result.add_message(CmdMessage::success(format!(
                    "Removed entry {} from {}",
                    index + 1,
                    field
                )));
            } else {
                result.add_message(CmdMessage::info(format!(
                    "{} has no entry {}; nothing removed",
                    field,
                    index + 1
                )));
            }
        }
        ListingEdit::Move {
            field,
            index,
            direction,
        } => {
            if editor.move_item(field, index, direction) {
                result.add_message(CmdMessage::success(format!(
                    "Moved entry {} of {} {}",
                    index + 1,
                    field,
                    match direction {
                        Direction::Up => "up",
                        Direction::Down => "down",
                    }
                )));
            } else {
                result.add_message(CmdMessage::info(format!(
                    "Entry {} of {} cannot move further; nothing changed",
                    index + 1,
                    field
                )));
            }
        }
        ListingEdit::SecondCardImage(url) => {
            editor.set_second_card_image(&url);
            result.add_message(CmdMessage::success("Second card image updated"));
        }
    }

    Ok(result.with_listing(editor.record().clone()))
}

pub fn show(editor: &ListingEditor) -> Result<CmdResult> {
    Ok(CmdResult::default().with_listing(editor.record().clone()))
}

/// The public card JSON, ready for the clipboard.
pub fn export(editor: &ListingEditor) -> Result<CmdResult> {
    let json = export_listing(editor.record())?;
    Ok(CmdResult::default()
        .with_export_json(json)
        .with_message(CmdMessage::success("Listing JSON ready")))
}

/// The whole record as JSON, in the shape the listing was loaded from.
pub fn export_full(editor: &ListingEditor) -> Result<CmdResult> {
    Ok(CmdResult::default().with_export_json(editor.export_json()?))
}

pub fn save(editor: &mut ListingEditor) -> Result<CmdResult> {
    editor.save()?;
    let name = editor.record().home_name.clone();
    let label = if name.is_empty() { "listing".to_string() } else { name };
    Ok(CmdResult::default().with_message(CmdMessage::success(format!("Saved {}", label))))
}
