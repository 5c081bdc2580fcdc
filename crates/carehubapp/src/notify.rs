//! Email notifications for new leads.
//!
//! Every booking or enquiry is mailed to the global admin and to the admin of
//! the location it names. Routing is configuration-driven (see
//! [`EmailConfig`]); delivery goes through an [`EmailRelay`], normally the
//! EmailJS-compatible [`EmailJsRelay`].
//!
//! Notification is best-effort: callers turn failures into warnings and never
//! roll back the lead.

use crate::config::EmailConfig;
use crate::error::{CareError, Result};
use crate::leads::{CareEnquiry, TourBooking};
use reqwest::blocking::Client;
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::time::Duration;

pub type TemplateParams = Map<String, Value>;

/// Who receives mail about a lead at `location`, in send order.
pub fn recipients(config: &EmailConfig, location: &str) -> Vec<String> {
    let mut to = vec![config.global_admin.clone()];

    let needle = config.location_match.trim().to_lowercase();
    let location_admin = if !needle.is_empty() && location.to_lowercase().contains(&needle) {
        &config.location_admin
    } else {
        &config.fallback_admin
    };

    if !location_admin.trim().is_empty() && *location_admin != config.global_admin {
        to.push(location_admin.clone());
    }
    to
}

pub fn tour_params(booking: &TourBooking) -> TemplateParams {
    let notes = if booking.message.trim().is_empty() {
        "No additional notes"
    } else {
        booking.message.as_str()
    };
    params(json!({
        "from_name": booking.name,
        "from_email": booking.email,
        "phone": booking.phone,
        "tour_date": booking.preferred_date,
        "tour_time": booking.preferred_time,
        "location": booking.location,
        "notes": notes,
    }))
}

pub fn enquiry_params(enquiry: &CareEnquiry) -> TemplateParams {
    params(json!({
        "from_name": enquiry.name,
        "from_email": enquiry.email,
        "phone": enquiry.phone,
        "enquiry_type": enquiry.enquiry_type,
        "location": enquiry.location,
        "message": enquiry.message,
    }))
}

fn params(value: Value) -> TemplateParams {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// Delivers one templated email.
pub trait EmailRelay {
    fn send(&self, template_id: &str, params: &TemplateParams) -> Result<()>;
}

#[derive(Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a TemplateParams,
}

/// Relay speaking the EmailJS REST protocol.
pub struct EmailJsRelay {
    client: Client,
    endpoint: String,
    service_id: String,
    public_key: String,
}

impl EmailJsRelay {
    /// Builds a relay from configuration. Returns `None` when email is not
    /// configured.
    pub fn from_config(config: &EmailConfig, timeout: Duration) -> Result<Option<Self>> {
        if !config.is_enabled() {
            return Ok(None);
        }
        let (Some(service_id), Some(public_key)) = (&config.service_id, &config.public_key) else {
            return Ok(None);
        };
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Some(Self {
            client,
            endpoint: config.endpoint.clone(),
            service_id: service_id.clone(),
            public_key: public_key.clone(),
        }))
    }
}

impl EmailRelay for EmailJsRelay {
    fn send(&self, template_id: &str, params: &TemplateParams) -> Result<()> {
        let body = SendRequest {
            service_id: &self.service_id,
            template_id,
            user_id: &self.public_key,
            template_params: params,
        };
        tracing::debug!(endpoint = %self.endpoint, template_id, "sending email");
        let response = self.client.post(&self.endpoint).json(&body).send()?;
        let status = response.status();
        if !status.is_success() {
            let detail = response.text().unwrap_or_default();
            return Err(CareError::Api(format!(
                "email relay returned {}: {}",
                status,
                detail.trim()
            )));
        }
        Ok(())
    }
}

/// Routes lead notifications to the right recipients through a relay.
pub struct Notifier {
    relay: Box<dyn EmailRelay>,
    config: EmailConfig,
}

impl Notifier {
    pub fn new(relay: Box<dyn EmailRelay>, config: EmailConfig) -> Self {
        Self { relay, config }
    }

    /// Builds the EmailJS notifier, or `None` when email is not configured.
    pub fn from_config(config: &EmailConfig, timeout: Duration) -> Result<Option<Self>> {
        Ok(EmailJsRelay::from_config(config, timeout)?
            .map(|relay| Self::new(Box::new(relay), config.clone())))
    }

    pub fn notify_tour(&self, booking: &TourBooking) -> Result<usize> {
        let template = self
            .config
            .template_id
            .clone()
            .ok_or_else(|| CareError::Config("email.template_id is not set".into()))?;
        self.fan_out(&template, tour_params(booking), &booking.location)
    }

    pub fn notify_enquiry(&self, enquiry: &CareEnquiry) -> Result<usize> {
        let template = self
            .config
            .care_template()
            .map(str::to_string)
            .ok_or_else(|| CareError::Config("email.care_template_id is not set".into()))?;
        self.fan_out(&template, enquiry_params(enquiry), &enquiry.location)
    }

    /// Sends to every recipient, even after a failure. Returns how many were
    /// sent, or the first error.
    fn fan_out(&self, template: &str, base: TemplateParams, location: &str) -> Result<usize> {
        let mut sent = 0;
        let mut first_error = None;

        for to in recipients(&self.config, location) {
            let mut params = base.clone();
            params.insert("to_email".to_string(), Value::String(to.clone()));
            match self.relay.send(template, &params) {
                Ok(()) => sent += 1,
                Err(e) => {
                    tracing::warn!(to = %to, error = %e, "email not sent");
                    first_error.get_or_insert(e);
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(sent),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_relay {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records every send; optionally fails them all.
    #[derive(Clone, Default)]
    pub struct RecordingRelay {
        pub sent: Rc<RefCell<Vec<(String, TemplateParams)>>>,
        pub fail: bool,
    }

    impl EmailRelay for RecordingRelay {
        fn send(&self, template_id: &str, params: &TemplateParams) -> Result<()> {
            if self.fail {
                return Err(CareError::Api("relay down".into()));
            }
            self.sent
                .borrow_mut()
                .push((template_id.to_string(), params.clone()));
            Ok(())
        }
    }
}
