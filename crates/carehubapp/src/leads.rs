//! Lead records created by the public forms.
//!
//! Leads are append-only: the public side creates them, the admin side only
//! reads them (tour status being the one server-side update). Each record is
//! built through a `*Request` that carries the form input and validates it.

use crate::error::{CareError, Result};
use crate::model::{now_iso, null_as_default, null_or, timestamp_id};
use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_TOUR_LOCATION: &str = "Barry";
pub const CAREERS_EMAIL: &str = "admin@bellavistanursinghome.com";

fn status_requested() -> String {
    "requested".to_string()
}

fn status_received() -> String {
    "received".to_string()
}

fn status_submitted() -> String {
    "submitted".to_string()
}

fn default_tour_location() -> String {
    DEFAULT_TOUR_LOCATION.to_string()
}

fn tour_location<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<String, D::Error> {
    null_or(d, default_tour_location)
}

fn tour_status<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<String, D::Error> {
    null_or(d, status_requested)
}

fn enquiry_status<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<String, D::Error> {
    null_or(d, status_received)
}

fn application_status<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<String, D::Error> {
    null_or(d, status_submitted)
}

/// Ids are numbers on the browser side and strings here.
fn id_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "unexpected id value: {}",
            other
        ))),
    }
}

fn require(fields: &[(&str, &str)]) -> Result<()> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(CareError::validation(format!(
            "Please fill in: {}",
            missing.join(", ")
        )))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourBooking {
    #[serde(default, deserialize_with = "id_string")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub preferred_date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub preferred_time: String,
    #[serde(default = "default_tour_location", deserialize_with = "tour_location")]
    pub location: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(default = "status_requested", deserialize_with = "tour_status")]
    pub status: String,
}

#[derive(Debug, Clone, Default)]
pub struct TourRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub preferred_date: String,
    pub preferred_time: String,
    pub location: Option<String>,
    pub message: String,
}

impl TourRequest {
    pub fn into_booking(self) -> Result<TourBooking> {
        require(&[
            ("name", self.name.as_str()),
            ("email", self.email.as_str()),
            ("phone", self.phone.as_str()),
            ("preferred date", self.preferred_date.as_str()),
            ("preferred time", self.preferred_time.as_str()),
        ])?;
        Ok(TourBooking {
            id: timestamp_id(),
            name: self.name,
            email: self.email,
            phone: self.phone,
            preferred_date: self.preferred_date,
            preferred_time: self.preferred_time,
            location: self
                .location
                .filter(|l| !l.trim().is_empty())
                .unwrap_or_else(default_tour_location),
            message: self.message,
            created_at: now_iso(),
            status: status_requested(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareEnquiry {
    #[serde(default, deserialize_with = "id_string")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub enquiry_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub location: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(default = "status_received", deserialize_with = "enquiry_status")]
    pub status: String,
}

#[derive(Debug, Clone, Default)]
pub struct EnquiryRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub enquiry_type: String,
    pub location: String,
    pub message: String,
}

impl EnquiryRequest {
    pub fn into_enquiry(self) -> Result<CareEnquiry> {
        require(&[
            ("name", self.name.as_str()),
            ("email", self.email.as_str()),
            ("phone", self.phone.as_str()),
        ])?;
        Ok(CareEnquiry {
            id: timestamp_id(),
            name: self.name,
            email: self.email,
            phone: self.phone,
            enquiry_type: self.enquiry_type,
            location: self.location,
            message: self.message,
            created_at: now_iso(),
            status: status_received(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobApplication {
    #[serde(default, deserialize_with = "id_string")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub position: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub created_at: String,
    #[serde(default = "status_submitted", deserialize_with = "application_status")]
    pub status: String,
}

#[derive(Debug, Clone, Default)]
pub struct ApplicationRequest {
    pub name: String,
    pub phone: String,
    pub position: String,
    pub message: String,
}

impl ApplicationRequest {
    pub fn into_application(self) -> Result<JobApplication> {
        require(&[
            ("name", self.name.as_str()),
            ("phone", self.phone.as_str()),
            ("position", self.position.as_str()),
        ])?;
        Ok(JobApplication {
            id: timestamp_id(),
            name: self.name,
            phone: self.phone,
            position: self.position,
            message: self.message,
            created_at: now_iso(),
            status: status_submitted(),
        })
    }
}

impl JobApplication {
    /// A `mailto:` link that opens the applicant's mail client with the
    /// application prefilled, so they can attach a CV.
    pub fn mailto_link(&self) -> String {
        let subject = format!("Job Application: {} - {}", self.position, self.name);
        let body = format!(
            "Name: {}\r\nPhone: {}\r\nPosition: {}\r\nMessage: {}\r\n\r\nPlease attach your CV to this email.",
            self.name, self.phone, self.position, self.message
        );
        format!(
            "mailto:{}?subject={}&body={}",
            CAREERS_EMAIL,
            urlencoding::encode(&subject),
            urlencoding::encode(&body)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tour_request() -> TourRequest {
        TourRequest {
            name: "Ann".into(),
            email: "ann@example.com".into(),
            phone: "01446 000000".into(),
            preferred_date: "2024-07-01".into(),
            preferred_time: "10:00".into(),
            location: None,
            message: String::new(),
        }
    }

    #[test]
    fn tour_booking_gets_defaults() {
        let booking = tour_request().into_booking().unwrap();
        assert_eq!(booking.status, "requested");
        assert_eq!(booking.location, DEFAULT_TOUR_LOCATION);
        assert!(booking.id.parse::<i64>().is_ok());
        assert!(!booking.created_at.is_empty());
    }

    #[test]
    fn server_tours_with_nulls_parse() {
        let tours: Vec<TourBooking> = serde_json::from_value(json!([
            {
                "id": "1717000000000",
                "name": "Ann",
                "email": "ann@example.com",
                "phone": "01446 000000",
                "preferredDate": null,
                "preferredTime": null,
                "location": null,
                "message": null,
                "createdAt": "2024-05-29T16:26:40.123456",
                "status": null
            },
            {
                "id": "1717000000001",
                "name": "Bob",
                "email": "bob@example.com",
                "phone": "01446 111111",
                "location": "Cardiff",
                "status": "confirmed"
            }
        ]))
        .unwrap();

        assert_eq!(tours[0].location, DEFAULT_TOUR_LOCATION);
        assert_eq!(tours[0].status, "requested");
        assert_eq!(tours[0].preferred_date, "");
        assert_eq!(tours[1].location, "Cardiff");
        assert_eq!(tours[1].status, "confirmed");
    }

    #[test]
    fn blank_statuses_use_each_record_default() {
        let enquiry: CareEnquiry = serde_json::from_value(json!({"name": "C", "status": null})).unwrap();
        assert_eq!(enquiry.status, "received");
        let application: JobApplication =
            serde_json::from_value(json!({"name": "D", "status": ""})).unwrap();
        assert_eq!(application.status, "submitted");
    }

    #[test]
    fn tour_booking_names_missing_fields() {
        let request = TourRequest {
            phone: " ".into(),
            preferred_time: String::new(),
            ..tour_request()
        };
        let err = request.into_booking().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Please fill in: phone, preferred time"
        );
    }

    #[test]
    fn enquiry_requires_contact_details() {
        let request = EnquiryRequest {
            name: "Bob".into(),
            email: "bob@example.com".into(),
            ..Default::default()
        };
        assert!(request.into_enquiry().is_err());
    }

    #[test]
    fn stored_leads_accept_numeric_ids_and_missing_status() {
        let tour: TourBooking = serde_json::from_value(json!({
            "id": 1717171717171u64,
            "name": "Ann"
        }))
        .unwrap();
        assert_eq!(tour.id, "1717171717171");
        assert_eq!(tour.status, "requested");
        assert_eq!(tour.location, "Barry");

        let application: JobApplication =
            serde_json::from_value(json!({"id": "1", "name": "Cy"})).unwrap();
        assert_eq!(application.status, "submitted");
    }

    #[test]
    fn mailto_link_is_encoded() {
        let application = ApplicationRequest {
            name: "Dee Jones".into(),
            phone: "07700 900000".into(),
            position: "Care Assistant".into(),
            message: "Nights".into(),
        }
        .into_application()
        .unwrap();

        let link = application.mailto_link();
        assert!(link.starts_with("mailto:admin@bellavistanursinghome.com?subject="));
        assert!(link.contains("Job%20Application%3A%20Care%20Assistant%20-%20Dee%20Jones"));
        assert!(link.contains("Name%3A%20Dee%20Jones%0D%0APhone"));
        assert!(link.ends_with("Please%20attach%20your%20CV%20to%20this%20email."));
    }
}
