use super::{list_or_empty, report_notification, store_lead, CmdMessage, CmdResult, RefreshMode};
use crate::error::{CareError, Result};
use crate::filter::filter_records;
use crate::leads::TourRequest;
use crate::notify::Notifier;
use crate::service::{ContentService, TourUpdate};
use crate::store::{AppendLog, LogKey};

pub const STATUSES: [&str; 4] = ["requested", "confirmed", "completed", "cancelled"];

pub fn list<S: ContentService>(service: &S, query: &str, mode: RefreshMode) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let tours = list_or_empty(service.list_tours(), "tours", mode, &mut result);
    Ok(result.with_tours(filter_records(&tours, query)))
}

/// Books a tour from the public form.
///
/// The booking is sent to the server, kept in the local log and mailed to
/// the admins. Only a validation failure, or losing the booking in both
/// places, is an error.
pub fn book<S: ContentService, L: AppendLog>(
    service: &S,
    log: &L,
    notifier: Option<&Notifier>,
    request: TourRequest,
) -> Result<CmdResult> {
    let booking = request.into_booking()?;
    let mut result = CmdResult::default();

    store_lead(
        service.create_tour(&booking),
        log,
        LogKey::ScheduledTours,
        &booking,
        &mut result,
    )?;
    report_notification(notifier.map(|n| n.notify_tour(&booking)), &mut result);

    tracing::info!(id = %booking.id, location = %booking.location, "tour booked");
    result.add_message(CmdMessage::success(format!(
        "Tour requested for {} at {}",
        booking.preferred_date, booking.preferred_time
    )));
    Ok(result.with_tours(vec![booking]))
}

pub fn set_status<S: ContentService>(service: &S, id: &str, status: &str) -> Result<CmdResult> {
    let status = status.trim().to_lowercase();
    if !STATUSES.contains(&status.as_str()) {
        return Err(CareError::validation(format!(
            "Unknown status: {} (expected one of {})",
            status,
            STATUSES.join(", ")
        )));
    }

    service.update_tour(id, &TourUpdate { status: status.clone() })?;
    tracing::info!(id, status = %status, "tour status updated");
    Ok(CmdResult::default().with_message(CmdMessage::success(format!(
        "Tour {} is now {}",
        id, status
    ))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::config::EmailConfig;
    use crate::leads::TourBooking;
    use crate::notify::test_relay::RecordingRelay;
    use crate::service::MemService;
    use crate::store::MemLog;

    fn request() -> TourRequest {
        TourRequest {
            name: "Ann Evans".into(),
            email: "ann@example.com".into(),
            phone: "01446 000000".into(),
            preferred_date: "2024-07-01".into(),
            preferred_time: "10:00".into(),
            location: Some("Barry".into()),
            message: String::new(),
        }
    }

    fn notifier(relay: &RecordingRelay) -> Notifier {
        Notifier::new(
            Box::new(relay.clone()),
            EmailConfig {
                service_id: Some("svc".into()),
                template_id: Some("tour_tpl".into()),
                public_key: Some("key".into()),
                ..Default::default()
            },
        )
    }

    #[test]
    fn booking_appends_exactly_one_requested_record() {
        let service = MemService::new();
        let log = MemLog::new();

        book(&service, &log, None, request()).unwrap();

        let stored: Vec<TourBooking> = log.list_records(LogKey::ScheduledTours).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].status, "requested");
        assert!(stored[0].id.parse::<i64>().is_ok());
        assert_eq!(service.list_tours().unwrap().len(), 1);
    }

    #[test]
    fn invalid_booking_changes_nothing() {
        let service = MemService::new();
        let log = MemLog::new();
        let relay = RecordingRelay::default();

        let bad = TourRequest {
            email: String::new(),
            ..request()
        };
        assert!(book(&service, &log, Some(&notifier(&relay)), bad).is_err());

        assert!(log.list(LogKey::ScheduledTours).unwrap().is_empty());
        assert!(service.list_tours().unwrap().is_empty());
        assert!(relay.sent.borrow().is_empty());
    }

    #[test]
    fn server_failure_still_keeps_local_copy() {
        let service = MemService::new();
        service.set_simulate_failure(true);
        let log = MemLog::new();

        let result = book(&service, &log, None, request()).unwrap();

        assert!(result.has_warnings());
        assert_eq!(log.list(LogKey::ScheduledTours).unwrap().len(), 1);
    }

    #[test]
    fn booking_notifies_admins() {
        let relay = RecordingRelay::default();
        let result = book(
            &MemService::new(),
            &MemLog::new(),
            Some(&notifier(&relay)),
            request(),
        )
        .unwrap();

        assert!(!result.has_warnings());
        assert_eq!(relay.sent.borrow().len(), 2);
    }

    #[test]
    fn notification_failure_is_a_warning() {
        let relay = RecordingRelay {
            fail: true,
            ..Default::default()
        };
        let log = MemLog::new();
        let result = book(&MemService::new(), &log, Some(&notifier(&relay)), request()).unwrap();

        assert!(result
            .messages
            .iter()
            .any(|m| m.level == MessageLevel::Warning && m.content.contains("Notification")));
        assert_eq!(log.list(LogKey::ScheduledTours).unwrap().len(), 1);
    }

    #[test]
    fn status_must_be_known() {
        let service = MemService::new();
        assert!(matches!(
            set_status(&service, "1", "lost"),
            Err(CareError::Validation(_))
        ));
    }

    #[test]
    fn status_update_reaches_server() {
        let service = MemService::new();
        let log = MemLog::new();
        let booked = book(&service, &log, None, request()).unwrap();
        let id = booked.tours[0].id.clone();

        set_status(&service, &id, "Confirmed").unwrap();
        assert_eq!(service.list_tours().unwrap()[0].status, "confirmed");
    }
}
