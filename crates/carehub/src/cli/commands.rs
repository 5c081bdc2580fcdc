//! # CLI Layer
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Reads and writes draft files
//! - Handles argument parsing
//! - Formats output for human consumption
//!
//! ## Responsibilities
//!
//! 1. **Logging**: Install the `tracing` subscriber (`CAREHUB_LOG`, `-v`)
//! 2. **Context Setup**: Load configuration and build the API
//! 3. **Dispatch**: Route each subcommand to its handler
//! 4. **Output**: Render the `CmdResult` and copy exports to the clipboard

use super::drafts;
use super::render::{
    render_applications, render_enquiries, render_fields, render_messages, render_news_detail,
    render_result, render_tours,
};
use super::setup::{
    ApplicationCommands, Cli, Commands, EnquiryCommands, FaqCommands, ListingCommands,
    NewsCommands, NewsFields, OutputFormat, TourCommands, UserCommands,
};
use crate::clipboard::copy_to_clipboard;
use anyhow::{bail, Context, Result};
use carehubapp::api::CareApi;
use carehubapp::commands::listing::ListingEdit;
use carehubapp::commands::{self, CmdMessage, CmdResult, RefreshMode};
use carehubapp::config::CareConfig;
use carehubapp::editor::ListingEditor;
use carehubapp::fields::{ListingField, FIELDS};
use carehubapp::init::{initialize, resolve_data_dir, CareContext};
use carehubapp::leads::{ApplicationRequest, EnquiryRequest, TourRequest};
use carehubapp::lists::{Direction, ListField};
use carehubapp::media::{is_youtube, MediaItem, MediaKind};
use carehubapp::model::{NewsCategory, NewsItem, UserRole};
use carehubapp::refresh::{RefreshView, Scheduler, ViewGuard};
use carehubapp::service::{ContentService, HttpService};
use carehubapp::store::{AppendLog, FsLog};
use carehubapp::submission::{is_data_uri, DataUri};
use clap::Parser;
use std::path::Path;
use std::sync::mpsc;
use tracing_subscriber::EnvFilter;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Config { template } => handle_config(cli.config.as_deref(), cli.data, template),
        Commands::Watch {
            ref view,
            ref search,
            rounds,
        } => {
            let config = CareConfig::load(cli.config.as_deref())?;
            let data_dir = resolve_data_dir(&config, cli.data.clone());
            let view: RefreshView = view.parse()?;
            watch(
                &config,
                &data_dir,
                view,
                search.as_deref().unwrap_or(""),
                rounds,
                cli.output,
            )
        }
        command => {
            let ctx = initialize(cli.config.as_deref(), cli.data.clone())?;
            dispatch(&ctx, command, cli.output)
        }
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "carehub=debug,carehubapp=debug,info",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env("CAREHUB_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn print_result(result: &CmdResult, output: OutputFormat) {
    let text = render_result(result, output);
    if !text.is_empty() {
        print!("{}", text);
    }
}

fn dispatch(ctx: &CareContext, command: Commands, output: OutputFormat) -> Result<()> {
    let api = &ctx.api;
    match command {
        Commands::Listing(cmd) => handle_listing(api, cmd, output),
        Commands::News(cmd) => handle_news(api, cmd, output),
        Commands::Tours(cmd) => handle_tours(api, cmd, output),
        Commands::Enquiries(cmd) => handle_enquiries(api, cmd, output),
        Commands::Applications(cmd) => handle_applications(api, cmd, output),
        Commands::Faq(cmd) => handle_faq(api, cmd, output),
        Commands::User(cmd) => handle_user(api, cmd, output),
        Commands::Config { .. } | Commands::Watch { .. } => Ok(()),
    }
}

/// Converts a 1-based index typed by the user.
fn zero_based(index: usize) -> Result<usize> {
    match index.checked_sub(1) {
        Some(i) => Ok(i),
        None => bail!("Indexes start at 1"),
    }
}

/// Copies an export to the clipboard, printing it when asked to or when the
/// clipboard is unavailable.
fn deliver_export(mut result: CmdResult, print_only: bool, output: OutputFormat) -> Result<()> {
    let Some(json) = result.export_json.take() else {
        print_result(&result, output);
        return Ok(());
    };

    if print_only || output == OutputFormat::Json {
        println!("{}", json);
        return Ok(());
    }

    match copy_to_clipboard(&json) {
        Ok(()) => result.add_message(CmdMessage::success("Copied to clipboard")),
        Err(e) => {
            tracing::debug!(error = %e, "clipboard unavailable");
            println!("{}", json);
            result.add_message(CmdMessage::warning(format!(
                "Clipboard unavailable ({:#}); JSON printed above",
                e
            )));
        }
    }
    print_result(&result, output);
    Ok(())
}

// --- listing ---

fn parse_list_field(name: &str) -> Result<ListField> {
    Ok(name.parse::<ListField>()?)
}

fn parse_direction(name: &str) -> Result<Direction> {
    Ok(name.parse::<Direction>()?)
}

fn media_item(url: &str, kind: Option<&str>) -> Result<MediaItem> {
    let kind = match kind {
        Some(k) => k.parse::<MediaKind>()?,
        None if is_youtube(url) => MediaKind::Video,
        None => MediaKind::Image,
    };
    Ok(MediaItem {
        kind,
        url: url.to_string(),
    })
}

fn listing_edit(cmd: ListingCommands) -> Result<Option<(std::path::PathBuf, ListingEdit)>> {
    let edit = match cmd {
        ListingCommands::Set {
            draft,
            field,
            value,
        } => (
            draft,
            ListingEdit::Set {
                field: field.parse::<ListingField>()?,
                value,
            },
        ),
        ListingCommands::AddMember {
            draft,
            name,
            role,
            image,
        } => (draft, ListingEdit::AddTeamMember { name, role, image }),
        ListingCommands::AddActivity { draft, activity } => {
            (draft, ListingEdit::AddActivity(activity))
        }
        ListingCommands::AddFacility { draft, icon, title } => {
            (draft, ListingEdit::AddFacility { icon, title })
        }
        ListingCommands::AddDetail {
            draft,
            title,
            icon,
            description,
        } => (
            draft,
            ListingEdit::AddDetailedFacility {
                title,
                icon,
                description,
            },
        ),
        ListingCommands::AddMedia {
            draft,
            gallery,
            url,
            kind,
        } => {
            let gallery = parse_list_field(&gallery)?;
            if !gallery.is_gallery() {
                bail!("{} is not a gallery", gallery);
            }
            let item = media_item(&url, kind.as_deref())?;
            (draft, ListingEdit::AddMedia { gallery, item })
        }
        ListingCommands::Remove {
            draft,
            field,
            index,
        } => (
            draft,
            ListingEdit::Remove {
                field: parse_list_field(&field)?,
                index: zero_based(index)?,
            },
        ),
        ListingCommands::Move {
            draft,
            field,
            index,
            direction,
        } => (
            draft,
            ListingEdit::Move {
                field: parse_list_field(&field)?,
                index: zero_based(index)?,
                direction: parse_direction(&direction)?,
            },
        ),
        ListingCommands::CardImage { draft, url } => (draft, ListingEdit::SecondCardImage(url)),
        ListingCommands::New { .. }
        | ListingCommands::Show { .. }
        | ListingCommands::Fields
        | ListingCommands::Export { .. } => return Ok(None),
    };
    Ok(Some(edit))
}

fn handle_listing<S: ContentService, L: AppendLog>(
    api: &CareApi<S, L>,
    cmd: ListingCommands,
    output: OutputFormat,
) -> Result<()> {
    match cmd {
        ListingCommands::New { draft, force } => {
            let mut editor = drafts::new_listing(&draft, force)?;
            let result = api.save_listing(&mut editor)?;
            print_result(&result, output);
            println!("Draft created at {}", draft.display());
            Ok(())
        }
        ListingCommands::Show { draft } => {
            let editor = drafts::open_listing(&draft)?;
            print_result(&api.show_listing(&editor)?, output);
            Ok(())
        }
        ListingCommands::Fields => {
            print!("{}", render_fields(FIELDS));
            Ok(())
        }
        ListingCommands::Export { draft, full, print } => {
            let editor = drafts::open_listing(&draft)?;
            let result = if full {
                commands::listing::export_full(&editor)?
            } else {
                api.export_listing(&editor)?
            };
            deliver_export(result, print, output)
        }
        edit_cmd => {
            let Some((draft, edit)) = listing_edit(edit_cmd)? else {
                return Ok(());
            };
            let mut editor: ListingEditor = drafts::open_listing(&draft)?;
            let mut result = api.edit_listing(&mut editor, edit)?;
            result.listing = None;
            api.save_listing(&mut editor)?;
            print_result(&result, output);
            Ok(())
        }
    }
}

// --- news ---

/// Local image files become data URIs so they upload as files.
fn image_value(raw: &str) -> Result<String> {
    let path = Path::new(raw);
    if !is_data_uri(raw) && path.is_file() {
        let uri = DataUri::from_file(path)
            .with_context(|| format!("Cannot read image {}", path.display()))?;
        return Ok(uri.to_uri());
    }
    Ok(raw.to_string())
}

fn apply_news_fields(item: &mut NewsItem, fields: NewsFields) -> Result<()> {
    if let Some(v) = fields.title {
        item.title = v;
    }
    if let Some(v) = fields.summary {
        item.excerpt = v;
    }
    if let Some(v) = fields.date {
        item.date = v;
    }
    if let Some(v) = fields.body {
        item.full_description = v;
    }
    if let Some(v) = fields.category {
        item.category = v.parse::<NewsCategory>()?;
    }
    if let Some(v) = fields.location {
        item.location = v;
    }
    if let Some(v) = fields.author {
        item.author = v;
    }
    if let Some(v) = fields.badge {
        item.badge = v;
    }
    if let Some(v) = fields.important {
        item.important = v;
    }
    if let Some(v) = fields.image {
        item.image = image_value(&v)?;
    }
    if !fields.gallery.is_empty() {
        item.gallery = fields
            .gallery
            .iter()
            .map(|g| image_value(g))
            .collect::<Result<Vec<_>>>()?;
    }
    if let Some(v) = fields.video_url {
        item.video_url = Some(v);
    }
    if let Some(v) = fields.video_description {
        item.video_description = Some(v);
    }
    Ok(())
}

fn handle_news<S: ContentService, L: AppendLog>(
    api: &CareApi<S, L>,
    cmd: NewsCommands,
    output: OutputFormat,
) -> Result<()> {
    let result = match cmd {
        NewsCommands::List { search } => {
            api.list_news(search.as_deref().unwrap_or(""), RefreshMode::Interactive)?
        }
        NewsCommands::Show { id } => {
            let result = api.news_detail(&id)?;
            if output == OutputFormat::Text {
                if let Some(item) = result.news.first() {
                    print!("{}", render_news_detail(item, &result.related_news));
                    return Ok(());
                }
            }
            result
        }
        NewsCommands::Create { id, fields } => {
            let mut item = NewsItem {
                id: id.unwrap_or_default(),
                ..NewsItem::default()
            };
            apply_news_fields(&mut item, fields)?;
            api.create_news(item)?
        }
        NewsCommands::Update { id, fields } => {
            let current = api.news_detail(&id)?;
            let Some(mut item) = current.news.into_iter().next() else {
                bail!("News {} not found", id);
            };
            apply_news_fields(&mut item, fields)?;
            api.update_news(&id, item)?
        }
        NewsCommands::Delete { id } => api.delete_news(&id)?,
    };
    print_result(&result, output);
    Ok(())
}

// --- leads ---

fn handle_tours<S: ContentService, L: AppendLog>(
    api: &CareApi<S, L>,
    cmd: TourCommands,
    output: OutputFormat,
) -> Result<()> {
    let result = match cmd {
        TourCommands::List { search } => {
            api.list_tours(search.as_deref().unwrap_or(""), RefreshMode::Interactive)?
        }
        TourCommands::Book {
            name,
            email,
            phone,
            date,
            time,
            location,
            message,
        } => api.book_tour(TourRequest {
            name,
            email,
            phone,
            preferred_date: date,
            preferred_time: time,
            location,
            message,
        })?,
        TourCommands::Status { id, status } => api.set_tour_status(&id, &status)?,
    };
    print_result(&result, output);
    Ok(())
}

fn handle_enquiries<S: ContentService, L: AppendLog>(
    api: &CareApi<S, L>,
    cmd: EnquiryCommands,
    output: OutputFormat,
) -> Result<()> {
    let result = match cmd {
        EnquiryCommands::List { search } => {
            api.list_enquiries(search.as_deref().unwrap_or(""), RefreshMode::Interactive)?
        }
        EnquiryCommands::Submit {
            name,
            email,
            phone,
            enquiry_type,
            location,
            message,
        } => api.submit_enquiry(EnquiryRequest {
            name,
            email,
            phone,
            enquiry_type,
            location,
            message,
        })?,
    };
    print_result(&result, output);
    Ok(())
}

fn handle_applications<S: ContentService, L: AppendLog>(
    api: &CareApi<S, L>,
    cmd: ApplicationCommands,
    output: OutputFormat,
) -> Result<()> {
    let result = match cmd {
        ApplicationCommands::List { search } => {
            api.list_applications(search.as_deref().unwrap_or(""), RefreshMode::Interactive)?
        }
        ApplicationCommands::Submit {
            name,
            phone,
            position,
            message,
        } => api.submit_application(ApplicationRequest {
            name,
            phone,
            position,
            message,
        })?,
    };
    print_result(&result, output);
    Ok(())
}

// --- faqs and users ---

fn handle_faq<S: ContentService, L: AppendLog>(
    api: &CareApi<S, L>,
    cmd: FaqCommands,
    output: OutputFormat,
) -> Result<()> {
    match cmd {
        FaqCommands::List { file } => {
            let faqs = drafts::load_faqs(&file)?;
            print_result(&CmdResult::default().with_faqs(faqs), output);
        }
        FaqCommands::Add {
            file,
            question,
            answer,
        } => {
            let mut faqs = drafts::load_faqs(&file)?;
            let mut result = api.add_faq(&mut faqs, &question, &answer)?;
            drafts::save_faqs(&file, &faqs)?;
            result.faqs.clear();
            print_result(&result, output);
        }
        FaqCommands::Remove { file, index } => {
            let mut faqs = drafts::load_faqs(&file)?;
            let result = api.remove_faq(&mut faqs, zero_based(index)?)?;
            drafts::save_faqs(&file, &faqs)?;
            print_result(&result, output);
        }
        FaqCommands::Move {
            file,
            index,
            direction,
        } => {
            let mut faqs = drafts::load_faqs(&file)?;
            let result = api.move_faq(&mut faqs, zero_based(index)?, parse_direction(&direction)?)?;
            drafts::save_faqs(&file, &faqs)?;
            print_result(&result, output);
        }
        FaqCommands::Export { file, print } => {
            let faqs = drafts::load_faqs(&file)?;
            deliver_export(api.export_faqs(&faqs)?, print, output)?;
        }
    }
    Ok(())
}

fn handle_user<S: ContentService, L: AppendLog>(
    api: &CareApi<S, L>,
    cmd: UserCommands,
    output: OutputFormat,
) -> Result<()> {
    match cmd {
        UserCommands::Export {
            name,
            email,
            role,
            print,
        } => {
            let role: UserRole = role.parse()?;
            deliver_export(api.export_user(&name, &email, role)?, print, output)
        }
    }
}

// --- config and watch ---

fn handle_config(
    config_path: Option<&Path>,
    data: Option<std::path::PathBuf>,
    template: bool,
) -> Result<()> {
    if template {
        print!("{}", CareConfig::template());
        return Ok(());
    }
    let config = CareConfig::load(config_path)?;
    let data_dir = resolve_data_dir(&config, data);
    println!("{}", serde_json::to_string_pretty(&config)?);
    println!("data directory: {}", data_dir.display());
    println!(
        "email notifications: {}",
        if config.email.is_enabled() { "on" } else { "off" }
    );
    Ok(())
}

/// Shows a lead view and refreshes it on the shared scheduler until
/// interrupted or until `rounds` refreshes have been shown.
fn watch(
    config: &CareConfig,
    data_dir: &Path,
    view: RefreshView,
    query: &str,
    rounds: Option<usize>,
    output: OutputFormat,
) -> Result<()> {
    let service = HttpService::new(&config.api_base_url, config.request_timeout())?;
    let log = FsLog::new(data_dir);
    let scheduler = Scheduler::new()?;
    let guard = ViewGuard::new();
    let (tx, rx) = mpsc::channel();

    let task_guard = guard.clone();
    let task_log = log.clone();
    let query = query.to_string();
    let handle = scheduler.watch_view(view, log, move || {
        let ticket = task_guard.begin();
        let result = match view {
            RefreshView::Tours => commands::tours::list(&service, &query, RefreshMode::Background),
            RefreshView::Enquiries => {
                commands::enquiries::list(&service, &query, RefreshMode::Background)
            }
            RefreshView::Applications => {
                commands::applications::list(&task_log, &query, RefreshMode::Background)
            }
        };
        let _ = tx.send((ticket, result));
    });

    eprintln!(
        "Watching {} (every {}s, Ctrl-C to stop)",
        view,
        view.interval().as_secs()
    );

    let mut shown = 0;
    for (ticket, result) in rx.iter() {
        let Some(result) = guard.accept(ticket, result) else {
            continue;
        };
        match result {
            Ok(result) if output == OutputFormat::Text => {
                if shown > 0 {
                    println!();
                }
                let text = match view {
                    RefreshView::Tours => render_tours(&result.tours),
                    RefreshView::Enquiries => render_enquiries(&result.enquiries),
                    RefreshView::Applications => render_applications(&result.applications),
                };
                print!("{}{}", text, render_messages(&result.messages));
            }
            Ok(result) => print_result(&result, output),
            Err(e) => tracing::debug!(error = %e, "refresh failed"),
        }
        shown += 1;
        if rounds.is_some_and(|limit| shown >= limit) {
            break;
        }
    }

    guard.invalidate();
    handle.cancel();
    Ok(())
}
