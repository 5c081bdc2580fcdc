use super::{list_or_empty, CmdMessage, CmdResult, RefreshMode};
use crate::error::{CareError, Result};
use crate::filter::filter_records;
use crate::model::NewsItem;
use crate::service::ContentService;

pub const MAX_RELATED: usize = 3;

pub fn list<S: ContentService>(service: &S, query: &str, mode: RefreshMode) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let items = list_or_empty(service.list_news(), "news", mode, &mut result);
    Ok(result.with_news(filter_records(&items, query)))
}

/// Items in the same category as `current`, excluding it, in source order.
pub fn related(items: &[NewsItem], current: &NewsItem) -> Vec<NewsItem> {
    items
        .iter()
        .filter(|n| n.category == current.category && n.id != current.id)
        .take(MAX_RELATED)
        .cloned()
        .collect()
}

pub fn detail<S: ContentService>(service: &S, id: &str) -> Result<CmdResult> {
    let item = service.get_news(id)?;
    let others = match service.list_news() {
        Ok(items) => related(&items, &item),
        Err(e) => {
            tracing::debug!(error = %e, "related news unavailable");
            Vec::new()
        }
    };
    Ok(CmdResult::default()
        .with_news(vec![item])
        .with_related_news(others))
}

/// Saves a new item. Its id is generated here, once, from the explicit id or
/// the title.
pub fn create<S: ContentService>(service: &S, mut item: NewsItem) -> Result<CmdResult> {
    item.validate()?;
    item.id = item.generated_id();
    if item.id.trim_matches('-').is_empty() {
        return Err(CareError::validation(
            "Title must contain letters or digits to build an id",
        ));
    }

    let ack = service.create_news(&item)?;
    if let Some(id) = ack.id.filter(|id| !id.is_empty()) {
        item.id = id;
    }
    tracing::info!(id = %item.id, "news created");

    let message = CmdMessage::success(format!("Created news {}", item.id));
    Ok(CmdResult::default()
        .with_news(vec![item])
        .with_message(message))
}

/// Replaces the item stored under `original_id`. The id never changes, even
/// when the title does.
pub fn update<S: ContentService>(
    service: &S,
    original_id: &str,
    mut item: NewsItem,
) -> Result<CmdResult> {
    item.validate()?;
    item.id = original_id.to_string();

    service.update_news(original_id, &item)?;
    tracing::info!(id = %item.id, "news updated");

    let message = CmdMessage::success(format!("Updated news {}", item.id));
    Ok(CmdResult::default()
        .with_news(vec![item])
        .with_message(message))
}

pub fn delete<S: ContentService>(service: &S, id: &str) -> Result<CmdResult> {
    service.delete_news(id)?;
    tracing::info!(id, "news deleted");
    Ok(CmdResult::default().with_message(CmdMessage::success(format!("Deleted news {}", id))))
}
