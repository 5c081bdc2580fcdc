use super::{list_or_empty, report_notification, store_lead, CmdMessage, CmdResult, RefreshMode};
use crate::error::Result;
use crate::filter::filter_records;
use crate::leads::EnquiryRequest;
use crate::notify::Notifier;
use crate::service::ContentService;
use crate::store::{AppendLog, LogKey};

pub fn list<S: ContentService>(service: &S, query: &str, mode: RefreshMode) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let enquiries = list_or_empty(service.list_enquiries(), "enquiries", mode, &mut result);
    Ok(result.with_enquiries(filter_records(&enquiries, query)))
}

/// Records a care enquiry the same way a tour booking is recorded.
pub fn submit<S: ContentService, L: AppendLog>(
    service: &S,
    log: &L,
    notifier: Option<&Notifier>,
    request: EnquiryRequest,
) -> Result<CmdResult> {
    let enquiry = request.into_enquiry()?;
    let mut result = CmdResult::default();

    store_lead(
        service.create_enquiry(&enquiry),
        log,
        LogKey::CareEnquiries,
        &enquiry,
        &mut result,
    )?;
    report_notification(notifier.map(|n| n.notify_enquiry(&enquiry)), &mut result);

    tracing::info!(id = %enquiry.id, "care enquiry received");
    result.add_message(CmdMessage::success(
        "Thank you, our team will be in touch shortly",
    ));
    Ok(result.with_enquiries(vec![enquiry]))
}
