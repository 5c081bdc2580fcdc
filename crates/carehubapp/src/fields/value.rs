//! Runtime representation of listing field values.

use super::spec::FieldKind;
use crate::error::{CareError, Result};
use crate::media::MediaRef;
use crate::model::{DetailedFacility, FacilityHighlight, TeamMember};

/// A field value as read from or written to a listing.
///
/// Each variant corresponds to exactly one [`FieldKind`].
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(Option<u32>),
    Flag(bool),
    Team(Vec<TeamMember>),
    Strings(Vec<String>),
    Facilities(Vec<FacilityHighlight>),
    Details(Vec<DetailedFacility>),
    Media(Vec<MediaRef>),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Text(_) => FieldKind::Text,
            FieldValue::Number(_) => FieldKind::Number,
            FieldValue::Flag(_) => FieldKind::Flag,
            FieldValue::Team(_) => FieldKind::Team,
            FieldValue::Strings(_) => FieldKind::Strings,
            FieldValue::Facilities(_) => FieldKind::Facilities,
            FieldValue::Details(_) => FieldKind::Details,
            FieldValue::Media(_) => FieldKind::Media,
        }
    }

    /// Number of entries for list values, `None` for scalars.
    pub fn len(&self) -> Option<usize> {
        match self {
            FieldValue::Team(v) => Some(v.len()),
            FieldValue::Strings(v) => Some(v.len()),
            FieldValue::Facilities(v) => Some(v.len()),
            FieldValue::Details(v) => Some(v.len()),
            FieldValue::Media(v) => Some(v.len()),
            FieldValue::Text(_) | FieldValue::Number(_) | FieldValue::Flag(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<Option<u32>> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            FieldValue::Flag(b) => Some(*b),
            _ => None,
        }
    }

    /// Parses command-line input for a scalar field.
    ///
    /// Numbers accept an empty string as "unset"; flags accept
    /// `true/false`, `yes/no`, `on/off` and `1/0`.
    pub fn parse_scalar(kind: FieldKind, field: &'static str, raw: &str) -> Result<Self> {
        let mismatch = || CareError::FieldType {
            field,
            expected: kind.describe(),
        };

        match kind {
            FieldKind::Text => Ok(FieldValue::Text(raw.to_string())),
            FieldKind::Number => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    Ok(FieldValue::Number(None))
                } else {
                    trimmed
                        .parse::<u32>()
                        .map(|n| FieldValue::Number(Some(n)))
                        .map_err(|_| mismatch())
                }
            }
            FieldKind::Flag => match raw.trim().to_lowercase().as_str() {
                "true" | "yes" | "on" | "1" => Ok(FieldValue::Flag(true)),
                "false" | "no" | "off" | "0" | "" => Ok(FieldValue::Flag(false)),
                _ => Err(mismatch()),
            },
            _ => Err(mismatch()),
        }
    }

    /// Renders a scalar value the way it would be typed back in.
    pub fn display(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Number(Some(n)) => n.to_string(),
            FieldValue::Number(None) => String::new(),
            FieldValue::Flag(b) => b.to_string(),
            other => format!("[{} entries]", other.len().unwrap_or_default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_number_means_unset() {
        let value = FieldValue::parse_scalar(FieldKind::Number, "statsBedrooms", " ").unwrap();
        assert_eq!(value, FieldValue::Number(None));
    }

    #[test]
    fn bad_number_is_a_field_type_error() {
        let err = FieldValue::parse_scalar(FieldKind::Number, "statsBedrooms", "many").unwrap_err();
        assert!(matches!(
            err,
            CareError::FieldType {
                field: "statsBedrooms",
                ..
            }
        ));
    }

    #[test]
    fn flags_accept_common_spellings() {
        for raw in ["true", "YES", "on", "1"] {
            assert_eq!(
                FieldValue::parse_scalar(FieldKind::Flag, "homeFeatured", raw).unwrap(),
                FieldValue::Flag(true)
            );
        }
        assert!(FieldValue::parse_scalar(FieldKind::Flag, "homeFeatured", "maybe").is_err());
    }

    #[test]
    fn lists_cannot_be_parsed_as_scalars() {
        assert!(FieldValue::parse_scalar(FieldKind::Team, "teamMembers", "x").is_err());
    }

    #[test]
    fn list_values_report_length() {
        assert_eq!(FieldValue::Strings(vec!["a".into()]).len(), Some(1));
        assert_eq!(FieldValue::Flag(true).len(), None);
    }
}
