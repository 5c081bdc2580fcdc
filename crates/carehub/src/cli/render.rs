//! # Rendering
//!
//! Turns [`CmdResult`] values into terminal text or JSON. Every function here
//! returns a `String`; printing happens in `commands.rs`.
//!
//! Layout (width, truncation, padding) is Unicode-aware. Colors come from
//! `console` and switch off automatically when stdout is not a terminal.

use super::setup::OutputFormat;
use carehubapp::commands::{CmdMessage, CmdResult, MessageLevel};
use carehubapp::fields::FieldSpec;
use carehubapp::leads::{CareEnquiry, JobApplication, TourBooking};
use carehubapp::media::{normalize_all, MediaKind};
use carehubapp::model::{Faq, ListingRecord, NewsItem};
use chrono::{DateTime, Utc};
use console::style;
use serde::Serialize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const LINE_WIDTH: usize = 100;
pub const TIME_WIDTH: usize = 14;
const NAME_WIDTH: usize = 24;

/// Everything a command produced, in a shape suitable for `--output json`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonView<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    listing: Option<&'a ListingRecord>,
    #[serde(skip_serializing_if = "is_empty")]
    news: &'a [NewsItem],
    #[serde(skip_serializing_if = "is_empty")]
    related_news: &'a [NewsItem],
    #[serde(skip_serializing_if = "is_empty")]
    tours: &'a [TourBooking],
    #[serde(skip_serializing_if = "is_empty")]
    enquiries: &'a [CareEnquiry],
    #[serde(skip_serializing_if = "is_empty")]
    applications: &'a [JobApplication],
    #[serde(skip_serializing_if = "is_empty")]
    faqs: &'a [Faq],
    #[serde(skip_serializing_if = "Option::is_none")]
    open_link: Option<&'a str>,
    messages: &'a [CmdMessage],
}

fn is_empty<T>(items: &&[T]) -> bool {
    items.is_empty()
}

pub fn render_json(result: &CmdResult) -> String {
    let view = JsonView {
        listing: result.listing.as_ref(),
        news: &result.news,
        related_news: &result.related_news,
        tours: &result.tours,
        enquiries: &result.enquiries,
        applications: &result.applications,
        faqs: &result.faqs,
        open_link: result.open_link.as_deref(),
        messages: &result.messages,
    };
    match serde_json::to_string_pretty(&view) {
        Ok(json) => format!("{}\n", json),
        Err(e) => format!("{{\"error\": \"{}\"}}\n", e),
    }
}

pub fn render_messages(messages: &[CmdMessage]) -> String {
    let mut out = String::new();
    for msg in messages {
        let line = match msg.level {
            MessageLevel::Info => style(msg.content.as_str()).dim().to_string(),
            MessageLevel::Success => style(msg.content.as_str()).green().to_string(),
            MessageLevel::Warning => style(msg.content.as_str()).yellow().to_string(),
            MessageLevel::Error => style(msg.content.as_str()).red().bold().to_string(),
        };
        out.push_str(&line);
        out.push('\n');
    }
    out
}

fn truncate_to_width(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

fn pad_to_width(text: &str, width: usize) -> String {
    let text = truncate_to_width(text, width);
    let padding = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(padding))
}

fn format_time_ago(created_at: &str) -> String {
    let Ok(timestamp) = DateTime::parse_from_rfc3339(created_at) else {
        return format!("{:>width$}", "", width = TIME_WIDTH);
    };
    let duration = Utc::now().signed_duration_since(timestamp.with_timezone(&Utc));
    let time_str = timeago::Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

fn lead_line(index: usize, name: &str, detail: &str, created_at: &str) -> String {
    let idx = format!("{:>3}.", index + 1);
    let detail_width = LINE_WIDTH - 5 - NAME_WIDTH - 2 - TIME_WIDTH - 1;
    format!(
        "{} {}  {} {}\n",
        style(idx).dim(),
        style(pad_to_width(name, NAME_WIDTH)).bold(),
        pad_to_width(detail, detail_width),
        style(format_time_ago(created_at)).dim()
    )
}

fn empty(what: &str) -> String {
    format!("{}\n", style(format!("No {} found.", what)).dim())
}

pub fn render_tours(tours: &[TourBooking]) -> String {
    if tours.is_empty() {
        return empty("tour bookings");
    }
    tours
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let detail = format!(
                "{} {} · {} · {} · {}",
                t.preferred_date, t.preferred_time, t.location, t.status, t.phone
            );
            lead_line(i, &t.name, &detail, &t.created_at)
        })
        .collect()
}

pub fn render_enquiries(enquiries: &[CareEnquiry]) -> String {
    if enquiries.is_empty() {
        return empty("care enquiries");
    }
    enquiries
        .iter()
        .enumerate()
        .map(|(i, e)| {
            let detail = format!(
                "{} · {} · {} · {}",
                e.enquiry_type, e.location, e.phone, e.message
            );
            lead_line(i, &e.name, &detail, &e.created_at)
        })
        .collect()
}

pub fn render_applications(applications: &[JobApplication]) -> String {
    if applications.is_empty() {
        return empty("applications");
    }
    applications
        .iter()
        .enumerate()
        .map(|(i, a)| {
            let detail = format!("{} · {} · {}", a.position, a.phone, a.message);
            lead_line(i, &a.name, &detail, &a.created_at)
        })
        .collect()
}

pub fn render_news_list(news: &[NewsItem]) -> String {
    if news.is_empty() {
        return empty("news");
    }
    let mut out = String::new();
    for item in news {
        let marker = if item.important { "!" } else { " " };
        out.push_str(&format!(
            "{} {}  {}  {}\n",
            style(marker).red().bold(),
            style(pad_to_width(&item.id, 30)).dim(),
            pad_to_width(&item.title, 44),
            style(format!("{} · {}", item.category, item.date)).cyan()
        ));
    }
    out
}

pub fn render_news_detail(item: &NewsItem, related: &[NewsItem]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", style(&item.title).bold()));
    out.push_str(&format!(
        "{}\n",
        style(format!(
            "{} · {} · {} · {}",
            item.category, item.date, item.location, item.author
        ))
        .dim()
    ));
    if !item.badge.is_empty() {
        out.push_str(&format!("[{}]\n", style(&item.badge).yellow()));
    }
    out.push('\n');
    out.push_str(item.body());
    out.push('\n');

    if !item.image.is_empty() {
        out.push_str(&format!("\nImage: {}\n", item.image));
    }
    for (i, url) in item.gallery.iter().enumerate() {
        out.push_str(&format!("Gallery {}: {}\n", i + 1, url));
    }
    if let Some(video) = item.video_url.as_deref().filter(|v| !v.is_empty()) {
        out.push_str(&format!(
            "Video: {}\n",
            carehubapp::media::youtube_embed_url(video)
        ));
    }

    if !related.is_empty() {
        out.push_str(&format!("\n{}\n", style("Related").bold()));
        for other in related {
            out.push_str(&format!("  {}  {}\n", style(&other.id).dim(), other.title));
        }
    }
    out
}

fn section(out: &mut String, title: &str) {
    out.push_str(&format!("\n{}\n", style(title).bold().underlined()));
}

fn numbered<I: IntoIterator<Item = String>>(out: &mut String, lines: I) {
    let mut any = false;
    for (i, line) in lines.into_iter().enumerate() {
        out.push_str(&format!("  {} {}\n", style(format!("{:>2}.", i + 1)).dim(), line));
        any = true;
    }
    if !any {
        out.push_str(&format!("  {}\n", style("(none)").dim()));
    }
}

fn media_lines(entries: &[carehubapp::media::MediaRef]) -> Vec<String> {
    normalize_all(entries)
        .into_iter()
        .map(|item| match item.kind {
            MediaKind::Image => item.url,
            MediaKind::Video => format!("{} (video)", item.url),
        })
        .collect()
}

pub fn render_listing(record: &ListingRecord) -> String {
    let mut out = String::new();
    let name = if record.home_name.is_empty() {
        "(unnamed home)"
    } else {
        record.home_name.as_str()
    };
    out.push_str(&format!(
        "{}  {}\n",
        style(name).bold(),
        style(format!("/{}", record.slug())).dim()
    ));
    if !record.home_location.is_empty() {
        out.push_str(&format!("{}\n", record.home_location));
    }
    let stat = |v: Option<u32>| v.map(|n| n.to_string()).unwrap_or_else(|| "-".into());
    out.push_str(&format!(
        "Bedrooms: {}  Premier rooms: {}  Featured: {}\n",
        stat(record.stats_bedrooms),
        stat(record.stats_premier),
        if record.home_featured { "yes" } else { "no" }
    ));

    section(&mut out, "Team members");
    numbered(
        &mut out,
        record
            .team_members
            .iter()
            .map(|m| format!("{} ({})", m.name, m.role)),
    );
    section(&mut out, "Team gallery");
    numbered(&mut out, media_lines(&record.team_gallery));
    section(&mut out, "Activities");
    numbered(&mut out, record.activities.iter().cloned());
    section(&mut out, "Activity images");
    numbered(&mut out, media_lines(&record.activity_images));
    section(&mut out, "Facilities");
    numbered(
        &mut out,
        record
            .facilities_list
            .iter()
            .map(|f| format!("{} [{}]", f.title, f.icon)),
    );
    section(&mut out, "Detailed facilities");
    numbered(
        &mut out,
        record
            .detailed_facilities
            .iter()
            .map(|f| format!("{}: {}", f.title, f.description)),
    );
    section(&mut out, "Facilities gallery");
    numbered(&mut out, media_lines(&record.facilities_gallery));
    out
}

pub fn render_faqs(faqs: &[Faq]) -> String {
    if faqs.is_empty() {
        return empty("FAQs");
    }
    let mut out = String::new();
    for (i, faq) in faqs.iter().enumerate() {
        out.push_str(&format!(
            "{} {}\n     {}\n",
            style(format!("{:>3}.", i + 1)).dim(),
            style(&faq.question).bold(),
            faq.answer
        ));
    }
    out
}

pub fn render_fields(fields: &[FieldSpec]) -> String {
    fields
        .iter()
        .map(|spec| format!("{:<24} {}\n", spec.name, style(spec.kind.describe()).dim()))
        .collect()
}

/// Records first, then messages.
pub fn render_result(result: &CmdResult, format: OutputFormat) -> String {
    if format == OutputFormat::Json {
        return render_json(result);
    }

    let mut out = String::new();
    if let Some(listing) = &result.listing {
        out.push_str(&render_listing(listing));
    }
    if !result.news.is_empty() {
        out.push_str(&render_news_list(&result.news));
    }
    if !result.tours.is_empty() {
        out.push_str(&render_tours(&result.tours));
    }
    if !result.enquiries.is_empty() {
        out.push_str(&render_enquiries(&result.enquiries));
    }
    if !result.applications.is_empty() {
        out.push_str(&render_applications(&result.applications));
    }
    if !result.faqs.is_empty() {
        out.push_str(&render_faqs(&result.faqs));
    }
    if let Some(link) = &result.open_link {
        out.push_str(&format!("{}\n", link));
    }
    out.push_str(&render_messages(&result.messages));
    out
}
