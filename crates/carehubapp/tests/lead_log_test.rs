use carehubapp::api::CareApi;
use carehubapp::commands::RefreshMode;
use carehubapp::leads::{ApplicationRequest, EnquiryRequest, JobApplication, TourBooking, TourRequest};
use carehubapp::service::MemService;
use carehubapp::store::{AppendLog, FsLog, LogKey};
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

fn setup() -> (TempDir, CareApi<MemService, FsLog>) {
    let dir = TempDir::new().unwrap();
    let api = CareApi::new(MemService::new(), FsLog::new(dir.path()));
    (dir, api)
}

fn tour(name: &str) -> TourRequest {
    TourRequest {
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        phone: "01446 000000".to_string(),
        preferred_date: "2024-07-01".to_string(),
        preferred_time: "14:00".to_string(),
        location: None,
        message: String::new(),
    }
}

#[test]
fn test_tour_booking_lands_in_log_file() {
    let (dir, api) = setup();

    api.book_tour(tour("Ann")).unwrap();

    let path = dir.path().join("scheduled_tours.json");
    let on_disk: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let entries = on_disk.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["status"], "requested");
    assert_eq!(entries[0]["location"], "Barry");
    assert_eq!(entries[0]["preferredTime"], "14:00");
}

#[test]
fn test_log_is_newest_first() {
    let (_dir, api) = setup();

    api.book_tour(tour("Ann")).unwrap();
    api.book_tour(tour("Bea")).unwrap();

    let stored: Vec<TourBooking> = api.log().list_records(LogKey::ScheduledTours).unwrap();
    let names: Vec<_> = stored.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Bea", "Ann"]);
}

#[test]
fn test_server_outage_keeps_leads_locally() {
    let (_dir, api) = setup();
    api.service().set_simulate_failure(true);

    let result = api
        .submit_enquiry(EnquiryRequest {
            name: "Bob".into(),
            email: "bob@example.com".into(),
            phone: "1".into(),
            enquiry_type: "Nursing".into(),
            location: "Cardiff".into(),
            message: String::new(),
        })
        .unwrap();

    assert!(result.has_warnings());
    assert_eq!(api.log().list(LogKey::CareEnquiries).unwrap().len(), 1);
}

#[test]
fn test_applications_survive_reopen() {
    let dir = TempDir::new().unwrap();
    {
        let api = CareApi::new(MemService::new(), FsLog::new(dir.path()));
        api.submit_application(ApplicationRequest {
            name: "Dee".into(),
            phone: "07700 900000".into(),
            position: "Senior Carer".into(),
            message: "Weekends".into(),
        })
        .unwrap();
    }

    let reopened = CareApi::new(MemService::new(), FsLog::new(dir.path()));
    let result = reopened
        .list_applications("senior", RefreshMode::Interactive)
        .unwrap();
    assert_eq!(result.applications.len(), 1);
    assert_eq!(result.applications[0].position, "Senior Carer");
}

#[test]
fn test_legacy_entries_with_numeric_ids_are_read() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("career_applications.json"),
        r#"[{"id": 1717171717171, "name": "Eli", "phone": "1", "position": "Chef", "message": null}]"#,
    )
    .unwrap();

    let log = FsLog::new(dir.path());
    let stored: Vec<JobApplication> = log.list_records(LogKey::CareerApplications).unwrap();
    assert_eq!(stored[0].id, "1717171717171");
    assert_eq!(stored[0].status, "submitted");
    assert_eq!(stored[0].message, "");
}

#[test]
fn test_no_tmp_files_left_behind() {
    let (dir, api) = setup();
    api.book_tour(tour("Ann")).unwrap();

    for entry in fs::read_dir(dir.path()).unwrap() {
        let path = entry.unwrap().path();
        let name = path.file_name().unwrap().to_str().unwrap().to_string();
        assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {}", name);
    }
}
