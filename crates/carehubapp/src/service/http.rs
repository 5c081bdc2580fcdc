use super::{ContentService, TourUpdate, WriteAck};
use crate::error::{CareError, Result};
use crate::leads::{CareEnquiry, TourBooking};
use crate::model::NewsItem;
use crate::submission::{news_form, FormPart};
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

/// Error body the API returns on failure, e.g. `{"error": "Not found"}`.
#[derive(Deserialize)]
struct ApiErrorBody {
    error: String,
}

pub struct HttpService {
    base_url: String,
    client: Client,
}

impl HttpService {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn send(&self, request: RequestBuilder, path: &str) -> Result<Response> {
        let response = request.send()?;
        let status = response.status();
        tracing::debug!(path, %status, "api response");

        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(CareError::NotFound(path.to_string()));
        }

        let body = response.text().unwrap_or_default();
        let detail = serde_json::from_str::<ApiErrorBody>(&body)
            .map(|b| b.error)
            .unwrap_or(body);
        Err(CareError::Api(format!("{} {}: {}", status, path, detail.trim())))
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        tracing::debug!(path, "GET");
        let response = self.send(self.client.get(self.url(path)), path)?;
        Ok(response.json()?)
    }

    fn multipart(parts: Vec<FormPart>) -> Result<Form> {
        let mut form = Form::new();
        for part in parts {
            form = match part {
                FormPart::Text { name, value } => form.text(name, value),
                FormPart::File {
                    name,
                    filename,
                    mime,
                    bytes,
                } => form.part(name, Part::bytes(bytes).file_name(filename).mime_str(&mime)?),
            };
        }
        Ok(form)
    }
}

impl ContentService for HttpService {
    fn list_news(&self) -> Result<Vec<NewsItem>> {
        self.get_json("/news")
    }

    fn get_news(&self, id: &str) -> Result<NewsItem> {
        self.get_json(&format!("/news/{}", urlencoding::encode(id)))
    }

    fn create_news(&self, item: &NewsItem) -> Result<WriteAck> {
        let path = "/news";
        tracing::debug!(path, id = %item.id, "POST multipart");
        let form = Self::multipart(news_form(item)?)?;
        let response = self.send(self.client.post(self.url(path)).multipart(form), path)?;
        Ok(response.json()?)
    }

    fn update_news(&self, id: &str, item: &NewsItem) -> Result<WriteAck> {
        let path = format!("/news/{}", urlencoding::encode(id));
        tracing::debug!(path = %path, "PUT multipart");
        let form = Self::multipart(news_form(item)?)?;
        let response = self.send(self.client.put(self.url(&path)).multipart(form), &path)?;
        Ok(response.json()?)
    }

    fn delete_news(&self, id: &str) -> Result<()> {
        let path = format!("/news/{}", urlencoding::encode(id));
        tracing::debug!(path = %path, "DELETE");
        self.send(self.client.delete(self.url(&path)), &path)?;
        Ok(())
    }

    fn list_tours(&self) -> Result<Vec<TourBooking>> {
        self.get_json("/scheduled-tours")
    }

    fn create_tour(&self, booking: &TourBooking) -> Result<WriteAck> {
        let path = "/scheduled-tours";
        tracing::debug!(path, id = %booking.id, "POST");
        let response = self.send(self.client.post(self.url(path)).json(booking), path)?;
        Ok(response.json()?)
    }

    fn update_tour(&self, id: &str, update: &TourUpdate) -> Result<WriteAck> {
        let path = format!("/scheduled-tours/{}", urlencoding::encode(id));
        tracing::debug!(path = %path, status = %update.status, "PUT");
        let response = self.send(self.client.put(self.url(&path)).json(update), &path)?;
        Ok(response.json()?)
    }

    fn list_enquiries(&self) -> Result<Vec<CareEnquiry>> {
        self.get_json("/care-enquiries")
    }

    fn create_enquiry(&self, enquiry: &CareEnquiry) -> Result<WriteAck> {
        let path = "/care-enquiries";
        tracing::debug!(path, id = %enquiry.id, "POST");
        let response = self.send(self.client.post(self.url(path)).json(enquiry), path)?;
        Ok(response.json()?)
    }
}
