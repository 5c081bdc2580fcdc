//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for carehub operations, whichever UI drives them.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Owns the collaborators**: content service, lead log, optional notifier
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no business logic, no printing and no draft file handling.
//! Listing and FAQ edits take the editor or the FAQ list by reference so the
//! caller decides where drafts live.
//!
//! ## Generic Over Service and Log
//!
//! `CareApi<S: ContentService, L: AppendLog>`:
//! - Production: `CareApi<HttpService, FsLog>`
//! - Testing: `CareApi<MemService, MemLog>`

use crate::commands::{self, listing::ListingEdit, CmdResult, RefreshMode};
use crate::editor::ListingEditor;
use crate::error::Result;
use crate::leads::{ApplicationRequest, EnquiryRequest, TourRequest};
use crate::lists::Direction;
use crate::model::{Faq, NewsItem, UserRole};
use crate::notify::Notifier;
use crate::service::ContentService;
use crate::store::AppendLog;

pub struct CareApi<S: ContentService, L: AppendLog> {
    service: S,
    log: L,
    notifier: Option<Notifier>,
}

impl<S: ContentService, L: AppendLog> CareApi<S, L> {
    pub fn new(service: S, log: L) -> Self {
        Self {
            service,
            log,
            notifier: None,
        }
    }

    pub fn with_notifier(mut self, notifier: Option<Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn log(&self) -> &L {
        &self.log
    }

    pub fn notifications_enabled(&self) -> bool {
        self.notifier.is_some()
    }

    // --- listings ---

    pub fn edit_listing(&self, editor: &mut ListingEditor, edit: ListingEdit) -> Result<CmdResult> {
        commands::listing::apply(editor, edit)
    }

    pub fn show_listing(&self, editor: &ListingEditor) -> Result<CmdResult> {
        commands::listing::show(editor)
    }

    pub fn export_listing(&self, editor: &ListingEditor) -> Result<CmdResult> {
        commands::listing::export(editor)
    }

    pub fn save_listing(&self, editor: &mut ListingEditor) -> Result<CmdResult> {
        commands::listing::save(editor)
    }

    // --- news ---

    pub fn list_news(&self, query: &str, mode: RefreshMode) -> Result<CmdResult> {
        commands::news::list(&self.service, query, mode)
    }

    pub fn news_detail(&self, id: &str) -> Result<CmdResult> {
        commands::news::detail(&self.service, id)
    }

    pub fn create_news(&self, item: NewsItem) -> Result<CmdResult> {
        commands::news::create(&self.service, item)
    }

    pub fn update_news(&self, original_id: &str, item: NewsItem) -> Result<CmdResult> {
        commands::news::update(&self.service, original_id, item)
    }

    pub fn delete_news(&self, id: &str) -> Result<CmdResult> {
        commands::news::delete(&self.service, id)
    }

    // --- leads ---

    pub fn list_tours(&self, query: &str, mode: RefreshMode) -> Result<CmdResult> {
        commands::tours::list(&self.service, query, mode)
    }

    pub fn book_tour(&self, request: TourRequest) -> Result<CmdResult> {
        commands::tours::book(&self.service, &self.log, self.notifier.as_ref(), request)
    }

    pub fn set_tour_status(&self, id: &str, status: &str) -> Result<CmdResult> {
        commands::tours::set_status(&self.service, id, status)
    }

    pub fn list_enquiries(&self, query: &str, mode: RefreshMode) -> Result<CmdResult> {
        commands::enquiries::list(&self.service, query, mode)
    }

    pub fn submit_enquiry(&self, request: EnquiryRequest) -> Result<CmdResult> {
        commands::enquiries::submit(&self.service, &self.log, self.notifier.as_ref(), request)
    }

    pub fn list_applications(&self, query: &str, mode: RefreshMode) -> Result<CmdResult> {
        commands::applications::list(&self.log, query, mode)
    }

    pub fn submit_application(&self, request: ApplicationRequest) -> Result<CmdResult> {
        commands::applications::submit(&self.log, request)
    }

    // --- faqs and users ---

    pub fn add_faq(&self, faqs: &mut Vec<Faq>, question: &str, answer: &str) -> Result<CmdResult> {
        commands::faqs::add(faqs, question, answer)
    }

    pub fn remove_faq(&self, faqs: &mut Vec<Faq>, index: usize) -> Result<CmdResult> {
        commands::faqs::remove(faqs, index)
    }

    pub fn move_faq(&self, faqs: &mut [Faq], index: usize, direction: Direction) -> Result<CmdResult> {
        commands::faqs::move_item(faqs, index, direction)
    }

    pub fn export_faqs(&self, faqs: &[Faq]) -> Result<CmdResult> {
        commands::faqs::export(faqs)
    }

    pub fn export_user(&self, name: &str, email: &str, role: UserRole) -> Result<CmdResult> {
        commands::users::export(name, email, role)
    }
}
