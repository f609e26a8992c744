//! # Report Notification
//!
//! The notification payload announcing that a record's reports are
//! ready. Delivery transport is an external collaborator; this module
//! only assembles subject, body, and the deduplicated recipient set.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use cca_state::AssessmentRecord;

/// A notification email payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailNotification {
    pub subject: String,
    pub body: String,
    /// Deduplicated recipient addresses, sorted.
    pub recipients: Vec<String>,
}

/// Build the "reports ready" notification for a record.
///
/// Recipients are the drafter and all three approvers, deduplicated;
/// a drafter who also holds an approval role receives one copy.
pub fn report_ready_notification(
    record: &AssessmentRecord,
    download_url: &str,
) -> EmailNotification {
    let recipients: BTreeSet<String> = [
        &record.drafted_by,
        &record.approvers.business_owner,
        &record.approvers.system_owner,
        &record.approvers.compliance_officer,
    ]
    .into_iter()
    .map(|person| person.email.clone())
    .collect();

    EmailNotification {
        subject: "Form Report Ready For Download Notification".to_string(),
        body: format!(
            "The reports for {} are ready for download: {download_url}",
            record.name
        ),
        recipients: recipients.into_iter().collect(),
    }
}
