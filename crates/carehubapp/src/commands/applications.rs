use super::{list_or_empty, CmdMessage, CmdResult, RefreshMode};
use crate::error::Result;
use crate::filter::filter_records;
use crate::leads::{ApplicationRequest, JobApplication};
use crate::store::{AppendLog, LogKey};

/// Applications only ever live in the local log.
pub fn list<L: AppendLog>(log: &L, query: &str, mode: RefreshMode) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let applications: Vec<JobApplication> = list_or_empty(
        log.list_records(LogKey::CareerApplications),
        "applications",
        mode,
        &mut result,
    );
    Ok(result.with_applications(filter_records(&applications, query)))
}

/// Logs the application and hands back a prefilled `mailto:` link so the
/// applicant can send a CV.
pub fn submit<L: AppendLog>(log: &L, request: ApplicationRequest) -> Result<CmdResult> {
    let application = request.into_application()?;
    log.append_record(LogKey::CareerApplications, &application)?;
    tracing::info!(id = %application.id, position = %application.position, "application logged");

    let link = application.mailto_link();
    Ok(CmdResult::default()
        .with_applications(vec![application])
        .with_open_link(link)
        .with_message(CmdMessage::success(
            "Application saved. Your email client will open so you can attach your CV",
        )))
}
