//! # Media References
//!
//! Gallery entries have been stored in three shapes over time:
//!
//! | Stored form | Meaning |
//! |-------------|---------|
//! | `"https://…/a.jpg"` | legacy bare URL, implicitly an image |
//! | `{"type": "video", "url": "…"}` | typed item |
//! | `null` | empty placeholder slot |
//!
//! [`MediaRef`] accepts all of them on read and writes them back unchanged.
//! Consumers call [`normalize`] / [`normalize_all`] to get uniform
//! [`MediaItem`]s; stored entries are never rewritten in place.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CareError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    #[default]
    Image,
    Video,
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Image => f.write_str("image"),
            MediaKind::Video => f.write_str("video"),
        }
    }
}

impl FromStr for MediaKind {
    type Err = CareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "image" => Ok(MediaKind::Image),
            "video" => Ok(MediaKind::Video),
            other => Err(CareError::validation(format!(
                "Unknown media type: {} (expected image or video)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MediaItem {
    #[serde(rename = "type", alias = "kind", default)]
    pub kind: MediaKind,
    pub url: String,
}

impl MediaItem {
    pub fn image(url: impl Into<String>) -> Self {
        Self {
            kind: MediaKind::Image,
            url: url.into(),
        }
    }

    pub fn video(url: impl Into<String>) -> Self {
        Self {
            kind: MediaKind::Video,
            url: url.into(),
        }
    }
}

/// A gallery entry as stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MediaRef {
    #[default]
    Missing,
    Url(String),
    Item(MediaItem),
}

impl From<MediaItem> for MediaRef {
    fn from(item: MediaItem) -> Self {
        MediaRef::Item(item)
    }
}

impl From<&str> for MediaRef {
    fn from(url: &str) -> Self {
        MediaRef::Url(url.to_string())
    }
}

impl MediaRef {
    /// The URL of this entry, if it has one.
    pub fn url(&self) -> Option<&str> {
        match self {
            MediaRef::Missing => None,
            MediaRef::Url(url) => Some(url),
            MediaRef::Item(item) => Some(&item.url),
        }
    }
}

/// Resolves a stored entry to a typed item. Placeholders resolve to `None`.
pub fn normalize(entry: &MediaRef) -> Option<MediaItem> {
    match entry {
        MediaRef::Missing => None,
        MediaRef::Url(url) => Some(MediaItem::image(url.clone())),
        MediaRef::Item(item) => Some(item.clone()),
    }
}

/// Normalizes a whole gallery, skipping placeholders and keeping order.
pub fn normalize_all(entries: &[MediaRef]) -> Vec<MediaItem> {
    entries.iter().filter_map(normalize).collect()
}

pub fn is_youtube(url: &str) -> bool {
    url.contains("youtube.com") || url.contains("youtu.be")
}

/// Extracts the 11 character video id that follows `v=` or a `/`.
fn youtube_id(url: &str) -> Option<&str> {
    let is_id_char = |b: u8| b.is_ascii_alphanumeric() || b == b'_' || b == b'-';
    let bytes = url.as_bytes();

    let mut start = 0;
    while start < bytes.len() {
        let after = if bytes[start..].starts_with(b"v=") {
            start + 2
        } else if bytes[start] == b'/' {
            start + 1
        } else {
            start += 1;
            continue;
        };

        let end = after + 11;
        if end <= bytes.len() && bytes[after..end].iter().all(|b| is_id_char(*b)) {
            return Some(&url[after..end]);
        }
        start += 1;
    }
    None
}

/// Embed URL for a YouTube link. Returns the input unchanged when no video id
/// can be found.
pub fn youtube_embed_url(url: &str) -> String {
    match youtube_id(url) {
        Some(id) => format!("https://www.youtube.com/embed/{}", id),
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bare_url_equals_typed_image() {
        let bare = MediaRef::from("http://x/a.png");
        let typed = MediaRef::Item(MediaItem::image("http://x/a.png"));
        assert_eq!(normalize(&bare), normalize(&typed));
    }

    #[test]
    fn normalize_is_idempotent() {
        let entry = MediaRef::from("http://x/a.png");
        let once = normalize(&entry).unwrap();
        let twice = normalize(&MediaRef::Item(once.clone())).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn placeholders_are_skipped() {
        let gallery: Vec<MediaRef> = serde_json::from_value(json!([
            "http://x/a.png",
            null,
            {"type": "video", "url": "http://x/b.mp4"},
            {"kind": "image", "url": "http://x/c.png"}
        ]))
        .unwrap();

        assert_eq!(gallery.len(), 4);
        assert_eq!(gallery[1], MediaRef::Missing);

        let items = normalize_all(&gallery);
        assert_eq!(
            items,
            vec![
                MediaItem::image("http://x/a.png"),
                MediaItem::video("http://x/b.mp4"),
                MediaItem::image("http://x/c.png"),
            ]
        );
    }

    #[test]
    fn stored_shapes_serialize_back_unchanged() {
        let gallery = vec![
            MediaRef::from("http://x/a.png"),
            MediaRef::Missing,
            MediaRef::Item(MediaItem::video("http://x/b.mp4")),
        ];
        assert_eq!(
            serde_json::to_value(&gallery).unwrap(),
            json!(["http://x/a.png", null, {"type": "video", "url": "http://x/b.mp4"}])
        );
    }

    #[test]
    fn youtube_links_become_embeds() {
        assert!(is_youtube("https://youtu.be/dQw4w9WgXcQ"));
        assert_eq!(
            youtube_embed_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            "https://www.youtube.com/embed/dQw4w9WgXcQ"
        );
        assert_eq!(
            youtube_embed_url("https://youtu.be/dQw4w9WgXcQ"),
            "https://www.youtube.com/embed/dQw4w9WgXcQ"
        );
    }

    #[test]
    fn unknown_links_are_returned_as_is() {
        assert!(!is_youtube("https://vimeo.com/1"));
        assert_eq!(youtube_embed_url("https://x.io/a"), "https://x.io/a");
    }
}
