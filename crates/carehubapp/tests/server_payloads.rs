//! Payloads shaped the way the REST server sends them: nullable columns come
//! back as `null`, ids may be numbers, and homes use the server's gallery
//! names.

use carehubapp::commands::{self, RefreshMode};
use carehubapp::editor::ListingEditor;
use carehubapp::export::ListingExport;
use carehubapp::leads::{CareEnquiry, JobApplication, TourBooking};
use carehubapp::model::{NewsCategory, NewsItem, DEFAULT_NEWS_AUTHOR, DEFAULT_NEWS_LOCATION};
use carehubapp::service::{ContentService, HttpService};
use carehubapp::store::{AppendLog, FsLog, LogKey};
use serde_json::json;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;
use std::time::Duration;

const NEWS: &str = r#"[
  {
    "id": "summer-fete",
    "title": "Summer Fete",
    "excerpt": "Stalls, games and a raffle",
    "fullDescription": null,
    "image": "/uploads/fete.jpg",
    "category": "events",
    "date": "2024-07-06",
    "location": "Bellavista Barry",
    "author": null,
    "badge": null,
    "important": false,
    "gallery": [],
    "videoUrl": null,
    "videoDescription": null,
    "createdAt": "2024-06-01T09:30:00.123456"
  },
  {
    "id": "choir-award",
    "title": "Choir Award",
    "excerpt": "Our residents' choir took first place",
    "fullDescription": "A full write-up.",
    "image": null,
    "category": null,
    "date": "2024-05-02",
    "location": null,
    "author": "Ceri",
    "badge": "Award",
    "important": null,
    "gallery": ["/uploads/a.jpg"],
    "videoUrl": null,
    "videoDescription": null,
    "createdAt": "2024-05-02T12:00:00"
  }
]"#;

const TOURS: &str = r#"[
  {
    "id": "1717000000001",
    "name": "Ann Jones",
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
    "id": "1717000000000",
    "name": "Bob Price",
    "email": "bob@example.com",
    "phone": "029 2000 0000",
    "preferredDate": "2024-06-03",
    "preferredTime": "14:00",
    "location": "Cardiff",
    "message": "Bringing my mother",
    "createdAt": "2024-05-28T10:00:00",
    "status": "confirmed"
  }
]"#;

const ENQUIRIES: &str = r#"[
  {
    "id": 1717000000002,
    "name": "Cara Evans",
    "email": "cara@example.com",
    "phone": "01446 222222",
    "enquiryType": null,
    "location": null,
    "message": null,
    "createdAt": "2024-05-30T08:00:00",
    "status": null
  }
]"#;

/// Serves `body` as the JSON response to one request.
fn serve_once(body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        let response = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).unwrap();
    });
    format!("http://{}", addr)
}

fn service_for(body: &'static str) -> HttpService {
    HttpService::new(&serve_once(body), Duration::from_secs(5)).unwrap()
}

#[test]
fn news_list_with_null_columns_loads() {
    let news = service_for(NEWS).list_news().unwrap();

    assert_eq!(news.len(), 2);
    assert_eq!(news[0].author, DEFAULT_NEWS_AUTHOR);
    assert_eq!(news[0].badge, "");
    assert_eq!(news[0].body(), "Stalls, games and a raffle");
    assert_eq!(news[1].location, DEFAULT_NEWS_LOCATION);
    assert_eq!(news[1].category, NewsCategory::Events);
    assert_eq!(news[1].image, "");
    assert!(!news[1].important);
}

#[test]
fn tour_list_with_null_columns_loads() {
    let service = service_for(TOURS);
    let result = commands::tours::list(&service, "", RefreshMode::Interactive).unwrap();

    assert!(result.messages.is_empty());
    assert_eq!(result.tours.len(), 2);
    assert_eq!(result.tours[0].location, "Barry");
    assert_eq!(result.tours[0].status, "requested");
    assert_eq!(result.tours[0].preferred_time, "");
    assert_eq!(result.tours[1].status, "confirmed");
}

#[test]
fn background_refresh_shows_rows_with_nulls() {
    let service = service_for(ENQUIRIES);
    let result = commands::enquiries::list(&service, "cara", RefreshMode::Background).unwrap();

    assert_eq!(result.enquiries.len(), 1);
    assert_eq!(result.enquiries[0].id, "1717000000002");
    assert_eq!(result.enquiries[0].status, "received");
    assert_eq!(result.enquiries[0].enquiry_type, "");
}

#[test]
fn payloads_parse_without_a_server() {
    let news: Vec<NewsItem> = serde_json::from_str(NEWS).unwrap();
    let tours: Vec<TourBooking> = serde_json::from_str(TOURS).unwrap();
    let enquiries: Vec<CareEnquiry> = serde_json::from_str(ENQUIRIES).unwrap();
    assert_eq!((news.len(), tours.len(), enquiries.len()), (2, 2, 1));
}

#[test]
fn server_home_opens_with_its_galleries() {
    let home = json!({
        "id": "3f2a",
        "homeName": "Bellavista Barry",
        "homeLocation": "Barry",
        "adminEmail": null,
        "homeImage": "/uploads/barry.jpg",
        "homeBadge": null,
        "homeDesc": "Nursing care by the sea",
        "heroTitle": null,
        "heroSubtitle": null,
        "heroBgImage": null,
        "heroExpandedDesc": null,
        "statsBedrooms": 62,
        "statsPremier": null,
        "teamMembers": [{"name": "Ceri", "role": "Home Manager", "image": null}],
        "teamGalleryImages": ["/uploads/team.jpg"],
        "activitiesIntro": null,
        "activities": ["Choir"],
        "activityImages": ["/uploads/choir.jpg", null],
        "activitiesModalDesc": null,
        "facilitiesIntro": null,
        "facilitiesList": [{"icon": "fa-tree", "title": "Garden"}],
        "detailedFacilities": [],
        "facilitiesGalleryImages": [{"type": "video", "url": "https://youtu.be/dQw4w9WgXcQ"}],
        "homeFeatured": true,
        "createdAt": "2024-01-10T09:00:00"
    });

    let editor = ListingEditor::edit(&home).unwrap();
    let record = editor.record();
    assert_eq!(record.team_gallery.len(), 1);
    assert_eq!(record.facilities_gallery.len(), 1);
    assert_eq!(record.admin_email, "");
    assert!(record.home_featured);

    let card = ListingExport::from_record(record);
    assert_eq!(card.features, vec!["62 Bedrooms", "Garden"]);
    assert_eq!(card.images, vec!["/uploads/barry.jpg", "/uploads/choir.jpg"]);
}

#[test]
fn legacy_log_entries_with_nulls_are_kept() {
    let dir = tempfile::tempdir().unwrap();
    let log = FsLog::new(dir.path());
    log.append(
        LogKey::CareerApplications,
        json!({
            "id": 1716000000000u64,
            "name": "Dee",
            "phone": "07700 900000",
            "position": "Care Assistant",
            "message": null,
            "createdAt": "2024-05-18T08:00:00.000Z",
            "status": null
        }),
    )
    .unwrap();

    let applications: Vec<JobApplication> = log.list_records(LogKey::CareerApplications).unwrap();
    assert_eq!(applications.len(), 1);
    assert_eq!(applications[0].status, "submitted");
    assert_eq!(applications[0].message, "");
}
