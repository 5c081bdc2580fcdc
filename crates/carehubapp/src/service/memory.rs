use super::{ContentService, TourUpdate, WriteAck};
use crate::error::{CareError, Result};
use crate::leads::{CareEnquiry, TourBooking};
use crate::model::{now_iso, NewsItem, MAX_EXCERPT};
use std::cell::RefCell;

/// In-process content service for testing.
///
/// Collections are kept newest first, like the real API returns them.
#[derive(Default)]
pub struct MemService {
    news: RefCell<Vec<NewsItem>>,
    tours: RefCell<Vec<TourBooking>>,
    enquiries: RefCell<Vec<CareEnquiry>>,
    simulate_failure: RefCell<bool>,
}

impl MemService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call fail as if the server were unreachable.
    pub fn set_simulate_failure(&self, simulate: bool) {
        *self.simulate_failure.borrow_mut() = simulate;
    }

    pub fn with_news(self, items: Vec<NewsItem>) -> Self {
        *self.news.borrow_mut() = items;
        self
    }

    fn check(&self) -> Result<()> {
        if *self.simulate_failure.borrow() {
            return Err(CareError::Api("Simulated server failure".to_string()));
        }
        Ok(())
    }

    /// What the server does to a news item before storing it.
    fn stored(id: &str, item: &NewsItem, created_at: Option<String>) -> NewsItem {
        NewsItem {
            id: id.to_string(),
            excerpt: item.excerpt.chars().take(MAX_EXCERPT).collect(),
            created_at: created_at.or_else(|| Some(now_iso())),
            ..item.clone()
        }
    }
}

impl ContentService for MemService {
    fn list_news(&self) -> Result<Vec<NewsItem>> {
        self.check()?;
        Ok(self.news.borrow().clone())
    }

    fn get_news(&self, id: &str) -> Result<NewsItem> {
        self.check()?;
        self.news
            .borrow()
            .iter()
            .find(|n| n.id == id)
            .cloned()
            .ok_or_else(|| CareError::NotFound(format!("/news/{}", id)))
    }

    fn create_news(&self, item: &NewsItem) -> Result<WriteAck> {
        self.check()?;
        let id = if item.id.is_empty() {
            item.generated_id()
        } else {
            item.id.clone()
        };
        self.news
            .borrow_mut()
            .insert(0, Self::stored(&id, item, None));
        Ok(WriteAck { ok: true, id: Some(id) })
    }

    fn update_news(&self, id: &str, item: &NewsItem) -> Result<WriteAck> {
        self.check()?;
        let mut news = self.news.borrow_mut();
        let slot = news
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| CareError::NotFound(format!("/news/{}", id)))?;
        *slot = Self::stored(id, item, slot.created_at.clone());
        Ok(WriteAck { ok: true, id: None })
    }

    fn delete_news(&self, id: &str) -> Result<()> {
        self.check()?;
        let mut news = self.news.borrow_mut();
        let before = news.len();
        news.retain(|n| n.id != id);
        if news.len() == before {
            return Err(CareError::NotFound(format!("/news/{}", id)));
        }
        Ok(())
    }

    fn list_tours(&self) -> Result<Vec<TourBooking>> {
        self.check()?;
        Ok(self.tours.borrow().clone())
    }

    fn create_tour(&self, booking: &TourBooking) -> Result<WriteAck> {
        self.check()?;
        self.tours.borrow_mut().insert(0, booking.clone());
        Ok(WriteAck {
            ok: true,
            id: Some(booking.id.clone()),
        })
    }

    fn update_tour(&self, id: &str, update: &TourUpdate) -> Result<WriteAck> {
        self.check()?;
        let mut tours = self.tours.borrow_mut();
        let tour = tours
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| CareError::NotFound(format!("/scheduled-tours/{}", id)))?;
        tour.status = update.status.clone();
        Ok(WriteAck { ok: true, id: None })
    }

    fn list_enquiries(&self) -> Result<Vec<CareEnquiry>> {
        self.check()?;
        Ok(self.enquiries.borrow().clone())
    }

    fn create_enquiry(&self, enquiry: &CareEnquiry) -> Result<WriteAck> {
        self.check()?;
        self.enquiries.borrow_mut().insert(0, enquiry.clone());
        Ok(WriteAck {
            ok: true,
            id: Some(enquiry.id.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_keeps_id_and_creation_time() {
        let service = MemService::new();
        let item = NewsItem::new("Summer Fete", "Stalls", "July 6");
        let ack = service.create_news(&item).unwrap();
        let id = ack.id.unwrap();
        assert_eq!(id, "summer-fete");
        let created = service.get_news(&id).unwrap().created_at;

        let renamed = NewsItem {
            title: "Summer Fete Moved Indoors".into(),
            ..item
        };
        service.update_news(&id, &renamed).unwrap();

        let stored = service.get_news(&id).unwrap();
        assert_eq!(stored.title, "Summer Fete Moved Indoors");
        assert_eq!(stored.created_at, created);
        assert_eq!(service.list_news().unwrap().len(), 1);
    }

    #[test]
    fn unknown_ids_are_not_found() {
        let service = MemService::new();
        assert!(matches!(service.get_news("nope"), Err(CareError::NotFound(_))));
        assert!(matches!(service.delete_news("nope"), Err(CareError::NotFound(_))));
    }

    #[test]
    fn simulated_failure_blocks_every_call() {
        let service = MemService::new();
        service.set_simulate_failure(true);
        assert!(service.list_tours().is_err());
        assert!(service.list_enquiries().is_err());
    }
}
