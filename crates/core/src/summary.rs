//! Per-calendar approval progress.

use serde::{Deserialize, Serialize};

use crate::calendar::CalendarRow;

/// Counts of approval flags across a calendar's rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalSummary {
    pub total_rows: usize,
    pub internal_content: usize,
    pub internal_creatives: usize,
    pub client_content: usize,
    pub client_creatives: usize,
    /// Rows with all four flags set.
    pub fully_approved: usize,
    /// Rows still missing at least one internal approval.
    pub awaiting_internal: usize,
    /// Rows fully approved internally but missing a client approval.
    pub awaiting_client: usize,
}

pub fn summarize(rows: &[CalendarRow]) -> ApprovalSummary {
    rows.iter().fold(ApprovalSummary::default(), |mut acc, row| {
        let internal = row.internal_status;
        let client = row.client_status;

        acc.total_rows += 1;
        acc.internal_content += usize::from(internal.content_approval);
        acc.internal_creatives += usize::from(internal.creatives_approval);
        acc.client_content += usize::from(client.content_approval);
        acc.client_creatives += usize::from(client.creatives_approval);

        match (internal.is_fully_approved(), client.is_fully_approved()) {
            (true, true) => acc.fully_approved += 1,
            (true, false) => acc.awaiting_client += 1,
            (false, _) => acc.awaiting_internal += 1,
        }
        acc
    })
}
