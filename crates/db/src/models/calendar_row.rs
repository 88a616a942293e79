//! Calendar row entity model and DTOs.
//!
//! The table stores the four approval flags as flat columns; the API speaks
//! the nested [`cadence_core::calendar::CalendarRow`] shape, built via
//! [`CalendarRowRecord::into_row`].

use cadence_core::calendar::{ApprovalStatus, CalendarRow, ContentFields, RowId};
use cadence_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::Deserialize;
use sqlx::FromRow;

/// A row from the `calendar_rows` table.
#[derive(Debug, Clone, FromRow)]
pub struct CalendarRowRecord {
    pub id: DbId,
    pub calendar_id: DbId,
    pub scheduled_for: Option<NaiveDate>,
    pub tagline: String,
    pub caption: String,
    pub hashtags: String,
    pub engagement_hooks: String,
    pub creative_caption_text: String,
    pub creatives: Vec<String>,
    pub internal_content_approval: bool,
    pub internal_creatives_approval: bool,
    pub client_content_approval: bool,
    pub client_creatives_approval: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CalendarRowRecord {
    pub fn into_row(self) -> CalendarRow {
        CalendarRow {
            id: RowId::Persisted(self.id),
            calendar_id: self.calendar_id,
            scheduled_for: self.scheduled_for,
            content_fields: ContentFields {
                tagline: self.tagline,
                caption: self.caption,
                hashtags: self.hashtags,
                engagement_hooks: self.engagement_hooks,
                creative_caption_text: self.creative_caption_text,
            },
            creatives: self.creatives,
            internal_status: ApprovalStatus {
                content_approval: self.internal_content_approval,
                creatives_approval: self.internal_creatives_approval,
            },
            client_status: ApprovalStatus {
                content_approval: self.client_content_approval,
                creatives_approval: self.client_creatives_approval,
            },
        }
    }
}

/// DTO for editing a row's content. All fields are optional; approval flags
/// are not editable here.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCalendarRow {
    pub scheduled_for: Option<NaiveDate>,
    pub tagline: Option<String>,
    pub caption: Option<String>,
    pub hashtags: Option<String>,
    pub engagement_hooks: Option<String>,
    pub creative_caption_text: Option<String>,
    pub creatives: Option<Vec<String>>,
}
