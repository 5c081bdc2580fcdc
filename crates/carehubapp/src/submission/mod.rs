//! # Submission Adapter
//!
//! Turns a [`NewsItem`] into the multipart form the news endpoints accept.
//! The form is described as a list of [`FormPart`]s so it can be inspected in
//! tests and converted to a transport form at the edge
//! (see `service::http`).
//!
//! Image handling:
//!
//! | Field | Data URI | Anything else |
//! |-------|----------|---------------|
//! | `image` | file `main-image.jpg` | text part (when non-empty) |
//! | `gallery[i]` | file `gallery_<i>` named `gallery-<i>.jpg` | collected into one `gallery` JSON text part |
//!
//! Data URIs that fail to decode are dropped with a warning rather than
//! failing the whole submission.

mod data_uri;

pub use data_uri::{is_data_uri, DataUri};

use crate::error::Result;
use crate::model::NewsItem;

pub const MAIN_IMAGE_FILENAME: &str = "main-image.jpg";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormPart {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        filename: String,
        mime: String,
        bytes: Vec<u8>,
    },
}

impl FormPart {
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        FormPart::Text {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            FormPart::Text { name, .. } | FormPart::File { name, .. } => name,
        }
    }
}

/// The multipart parts for a news create or update.
pub fn news_form(item: &NewsItem) -> Result<Vec<FormPart>> {
    let mut parts = vec![
        FormPart::text("id", &item.id),
        FormPart::text("title", &item.title),
        FormPart::text("excerpt", &item.excerpt),
        FormPart::text("fullDescription", &item.full_description),
        FormPart::text("category", item.category.as_str()),
        FormPart::text("date", &item.date),
        FormPart::text("location", &item.location),
        FormPart::text("author", &item.author),
        FormPart::text("badge", &item.badge),
        FormPart::text("important", item.important.to_string()),
    ];
    if let Some(url) = &item.video_url {
        parts.push(FormPart::text("videoUrl", url));
    }
    if let Some(desc) = &item.video_description {
        parts.push(FormPart::text("videoDescription", desc));
    }

    if is_data_uri(&item.image) {
        if let Some(part) = file_part(&item.image, "image", MAIN_IMAGE_FILENAME) {
            parts.push(part);
        }
    } else if !item.image.trim().is_empty() {
        parts.push(FormPart::text("image", &item.image));
    }

    let mut kept_urls: Vec<&str> = Vec::new();
    for (position, entry) in item.gallery.iter().enumerate() {
        if is_data_uri(entry) {
            let name = format!("gallery_{}", position);
            let filename = format!("gallery-{}.jpg", position);
            if let Some(part) = file_part(entry, &name, &filename) {
                parts.push(part);
            }
        } else if !entry.trim().is_empty() {
            kept_urls.push(entry);
        }
    }
    parts.push(FormPart::text("gallery", serde_json::to_string(&kept_urls)?));

    Ok(parts)
}

fn file_part(uri: &str, name: &str, filename: &str) -> Option<FormPart> {
    match DataUri::parse(uri) {
        Ok(decoded) => Some(FormPart::File {
            name: name.to_string(),
            filename: filename.to_string(),
            mime: decoded.mime,
            bytes: decoded.bytes,
        }),
        Err(e) => {
            tracing::warn!(part = name, error = %e, "dropping undecodable image");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_value<'a>(parts: &'a [FormPart], wanted: &str) -> Option<&'a str> {
        parts.iter().find_map(|p| match p {
            FormPart::Text { name, value } if name == wanted => Some(value.as_str()),
            _ => None,
        })
    }

    fn item() -> NewsItem {
        NewsItem {
            id: "summer-fete".into(),
            ..NewsItem::new("Summer Fete", "Stalls and games", "July 6, 2024")
        }
    }

    #[test]
    fn scalar_fields_become_text_parts() {
        let parts = news_form(&item()).unwrap();
        assert_eq!(text_value(&parts, "title"), Some("Summer Fete"));
        assert_eq!(text_value(&parts, "category"), Some("events"));
        assert_eq!(text_value(&parts, "important"), Some("false"));
        assert_eq!(text_value(&parts, "location"), Some("All Locations"));
        assert_eq!(text_value(&parts, "videoUrl"), None);
    }

    #[test]
    fn data_uri_image_becomes_main_image_file() {
        let mut news = item();
        news.image = "data:image/png;base64,aGVsbG8=".into();

        let parts = news_form(&news).unwrap();
        let file = parts.iter().find(|p| p.name() == "image").unwrap();
        assert_eq!(
            file,
            &FormPart::File {
                name: "image".into(),
                filename: MAIN_IMAGE_FILENAME.into(),
                mime: "image/png".into(),
                bytes: b"hello".to_vec(),
            }
        );
    }

    #[test]
    fn url_image_is_sent_as_text() {
        let mut news = item();
        news.image = "https://cdn/x.jpg".into();
        let parts = news_form(&news).unwrap();
        assert_eq!(text_value(&parts, "image"), Some("https://cdn/x.jpg"));
    }

    #[test]
    fn empty_image_is_omitted() {
        let parts = news_form(&item()).unwrap();
        assert!(parts.iter().all(|p| p.name() != "image"));
    }

    #[test]
    fn gallery_splits_files_and_urls() {
        let mut news = item();
        news.gallery = vec![
            "https://cdn/a.jpg".into(),
            "data:image/jpeg;base64,aGVsbG8=".into(),
            "https://cdn/b.jpg".into(),
        ];

        let parts = news_form(&news).unwrap();
        let file = parts.iter().find(|p| p.name() == "gallery_1").unwrap();
        match file {
            FormPart::File { filename, .. } => assert_eq!(filename, "gallery-1.jpg"),
            other => panic!("expected file part, got {:?}", other),
        }
        assert_eq!(
            text_value(&parts, "gallery"),
            Some(r#"["https://cdn/a.jpg","https://cdn/b.jpg"]"#)
        );
    }

    #[test]
    fn broken_data_uri_is_dropped() {
        let mut news = item();
        news.gallery = vec!["data:image/jpeg;base64,@@@".into()];

        let parts = news_form(&news).unwrap();
        assert!(parts.iter().all(|p| p.name() != "gallery_0"));
        assert_eq!(text_value(&parts, "gallery"), Some("[]"));
    }
}
