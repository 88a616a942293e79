//! Calendar rows: one scheduled post with its content, creatives, and the
//! internal and client approval flags.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::approval::{ApprovalField, Scope};
use crate::types::{CalendarId, DbId};

/// Identifier of a calendar row.
///
/// Rows drafted on the client carry a temporary UUID until the server
/// assigns a database id. Serialized untagged: a number or a UUID string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowId {
    Persisted(DbId),
    Temporary(Uuid),
}

impl RowId {
    /// A fresh client-side identifier for an unsaved row.
    pub fn temporary() -> Self {
        Self::Temporary(Uuid::new_v4())
    }

    /// The database id, if the row has been persisted.
    pub fn persisted(&self) -> Option<DbId> {
        match self {
            Self::Persisted(id) => Some(*id),
            Self::Temporary(_) => None,
        }
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Persisted(id) => write!(f, "{id}"),
            Self::Temporary(uuid) => write!(f, "tmp-{uuid}"),
        }
    }
}

/// The written content of a post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentFields {
    pub tagline: String,
    pub caption: String,
    pub hashtags: String,
    pub engagement_hooks: String,
    pub creative_caption_text: String,
}

impl ContentFields {
    /// Names of the fields that are still empty, in display order.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            ("tagline", &self.tagline),
            ("caption", &self.caption),
            ("hashtags", &self.hashtags),
            ("engagementHooks", &self.engagement_hooks),
            ("creativeCaptionText", &self.creative_caption_text),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    /// True when every field holds a non-empty string.
    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }
}

/// A pair of independent approval flags for one scope.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalStatus {
    pub content_approval: bool,
    pub creatives_approval: bool,
}

impl ApprovalStatus {
    pub fn get(&self, field: ApprovalField) -> bool {
        match field {
            ApprovalField::ContentApproval => self.content_approval,
            ApprovalField::CreativesApproval => self.creatives_approval,
        }
    }

    /// Copy of this status with `field` set to `value`.
    pub fn with(mut self, field: ApprovalField, value: bool) -> Self {
        match field {
            ApprovalField::ContentApproval => self.content_approval = value,
            ApprovalField::CreativesApproval => self.creatives_approval = value,
        }
        self
    }

    pub fn is_fully_approved(&self) -> bool {
        self.content_approval && self.creatives_approval
    }
}

/// One scheduled content item on a calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarRow {
    pub id: RowId,
    pub calendar_id: CalendarId,
    pub scheduled_for: Option<NaiveDate>,
    pub content_fields: ContentFields,
    /// Media references, in display order. Empty means no creative yet.
    #[serde(default)]
    pub creatives: Vec<String>,
    pub internal_status: ApprovalStatus,
    pub client_status: ApprovalStatus,
}

impl CalendarRow {
    /// A new unsaved row with every approval flag cleared.
    pub fn draft(calendar_id: CalendarId, new_row: NewRow) -> Self {
        Self {
            id: RowId::temporary(),
            calendar_id,
            scheduled_for: new_row.scheduled_for,
            content_fields: new_row.content_fields,
            creatives: new_row.creatives,
            internal_status: ApprovalStatus::default(),
            client_status: ApprovalStatus::default(),
        }
    }

    pub fn status(&self, scope: Scope) -> ApprovalStatus {
        match scope {
            Scope::Internal => self.internal_status,
            Scope::Client => self.client_status,
        }
    }

    pub fn is_approved(&self, scope: Scope, field: ApprovalField) -> bool {
        self.status(scope).get(field)
    }

    /// Copy of this row with exactly one approval flag replaced.
    pub fn with_approval(&self, scope: Scope, field: ApprovalField, value: bool) -> Self {
        let mut row = self.clone();
        match scope {
            Scope::Internal => row.internal_status = row.internal_status.with(field, value),
            Scope::Client => row.client_status = row.client_status.with(field, value),
        }
        row
    }
}

/// Payload for creating a row. Approval flags always start cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRow {
    pub scheduled_for: Option<NaiveDate>,
    #[serde(default)]
    pub content_fields: ContentFields,
    #[serde(default)]
    pub creatives: Vec<String>,
}
