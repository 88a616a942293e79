//! Content approval state machine.
//!
//! Every calendar row carries four independent boolean flags: content and
//! creatives approval, each in the internal (agency) and client scope. A
//! flag may only be flipped by the role that owns its scope, and only when
//! the flag is ready:
//!
//! | scope    | field                | ready when                          |
//! |----------|----------------------|-------------------------------------|
//! | internal | `content_approval`   | all five content fields non-empty   |
//! | internal | `creatives_approval` | at least one creative attached      |
//! | client   | `content_approval`   | internal content approval granted   |
//! | client   | `creatives_approval` | internal creatives approval granted |
//!
//! Toggling a client flag never mutates the internal flags.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::calendar::{CalendarRow, RowId};
use crate::error::CoreError;
use crate::roles::{can_act, Role};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const SCOPE_INTERNAL: &str = "internal";
pub const SCOPE_CLIENT: &str = "client";

pub const FIELD_CONTENT_APPROVAL: &str = "content_approval";
pub const FIELD_CREATIVES_APPROVAL: &str = "creatives_approval";

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Which approval track a flag belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// Agency-side sign-off.
    Internal,
    /// Customer-facing sign-off.
    Client,
}

impl Scope {
    pub const ALL: [Scope; 2] = [Scope::Internal, Scope::Client];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Internal => SCOPE_INTERNAL,
            Self::Client => SCOPE_CLIENT,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scope {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            SCOPE_INTERNAL => Ok(Self::Internal),
            SCOPE_CLIENT => Ok(Self::Client),
            _ => Err(CoreError::Validation(format!(
                "Invalid scope '{s}'. Must be one of: {SCOPE_INTERNAL}, {SCOPE_CLIENT}"
            ))),
        }
    }
}

/// Which of the two flags within a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalField {
    ContentApproval,
    CreativesApproval,
}

impl ApprovalField {
    pub const ALL: [ApprovalField; 2] =
        [ApprovalField::ContentApproval, ApprovalField::CreativesApproval];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ContentApproval => FIELD_CONTENT_APPROVAL,
            Self::CreativesApproval => FIELD_CREATIVES_APPROVAL,
        }
    }
}

impl fmt::Display for ApprovalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApprovalField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            FIELD_CONTENT_APPROVAL => Ok(Self::ContentApproval),
            FIELD_CREATIVES_APPROVAL => Ok(Self::CreativesApproval),
            _ => Err(CoreError::Validation(format!(
                "Invalid approval field '{s}'. Must be one of: \
                 {FIELD_CONTENT_APPROVAL}, {FIELD_CREATIVES_APPROVAL}"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why an approval action was not applied. Each is terminal for the single
/// action and never affects other rows or fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApprovalError {
    /// The role does not own this scope.
    #[error("Role '{role}' may not change {scope} approvals")]
    Unauthorized { role: Role, scope: Scope },

    /// Preconditions for the flag are unmet.
    #[error("{scope} {field} is not ready: {reason}")]
    NotReady {
        scope: Scope,
        field: ApprovalField,
        reason: String,
    },

    /// The persistence gateway rejected or failed the commit.
    #[error("Failed to persist approval: {0}")]
    PersistenceFailed(String),

    /// The same flag on the same row already has a request in flight.
    #[error("An update to {scope} {field} on row {row_id} is already in flight")]
    Pending {
        row_id: RowId,
        scope: Scope,
        field: ApprovalField,
    },

    #[error("Row {0} not found")]
    RowNotFound(RowId),

    /// The row only exists locally and has no server id yet.
    #[error("Row {0} has not been saved yet")]
    Unsaved(RowId),
}

// ---------------------------------------------------------------------------
// Readiness
// ---------------------------------------------------------------------------

/// Check whether `field` in `scope` may be toggled on `row`, explaining why
/// not when it cannot.
pub fn check_ready(
    row: &CalendarRow,
    scope: Scope,
    field: ApprovalField,
) -> Result<(), ApprovalError> {
    let not_ready = |reason: String| ApprovalError::NotReady {
        scope,
        field,
        reason,
    };

    match (scope, field) {
        (Scope::Internal, ApprovalField::ContentApproval) => {
            let missing = row.content_fields.missing();
            if missing.is_empty() {
                Ok(())
            } else {
                Err(not_ready(format!("missing content: {}", missing.join(", "))))
            }
        }
        (Scope::Internal, ApprovalField::CreativesApproval) => {
            if row.creatives.is_empty() {
                Err(not_ready("no creatives attached".to_string()))
            } else {
                Ok(())
            }
        }
        (Scope::Client, field) => {
            if row.internal_status.get(field) {
                Ok(())
            } else {
                Err(not_ready(format!("internal {field} has not been granted")))
            }
        }
    }
}

/// Whether the approval control for `field` in `scope` should be enabled.
pub fn is_ready(row: &CalendarRow, scope: Scope, field: ApprovalField) -> bool {
    check_ready(row, scope, field).is_ok()
}

// ---------------------------------------------------------------------------
// Transitions
// ---------------------------------------------------------------------------

/// Flip one approval flag.
///
/// Authority is checked first, then readiness. On success returns a copy of
/// `row` with only `row[scope][field]` inverted; `row` itself is untouched,
/// so a rejected call never leaves a partial mutation behind.
pub fn toggle(
    row: &CalendarRow,
    scope: Scope,
    field: ApprovalField,
    role: Role,
) -> Result<CalendarRow, ApprovalError> {
    if !can_act(role, scope) {
        return Err(ApprovalError::Unauthorized { role, scope });
    }
    check_ready(row, scope, field)?;

    let new_value = !row.is_approved(scope, field);
    Ok(row.with_approval(scope, field, new_value))
}

/// Set one approval flag to an explicit value.
///
/// Idempotent: when the flag already holds `value` the row is returned as-is
/// (after the authority check). Otherwise this is exactly [`toggle`].
pub fn set_approval(
    row: &CalendarRow,
    scope: Scope,
    field: ApprovalField,
    value: bool,
    role: Role,
) -> Result<CalendarRow, ApprovalError> {
    if !can_act(role, scope) {
        return Err(ApprovalError::Unauthorized { role, scope });
    }
    if row.is_approved(scope, field) == value {
        return Ok(row.clone());
    }
    toggle(row, scope, field, role)
}

// ---------------------------------------------------------------------------
// Controls
// ---------------------------------------------------------------------------

/// UI-facing state of one approval button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalControl {
    pub scope: Scope,
    pub field: ApprovalField,
    /// Current value of the flag.
    pub approved: bool,
    pub ready: bool,
    /// Whether the role owns this scope.
    pub permitted: bool,
    /// `ready && permitted`: the button should be clickable.
    pub actionable: bool,
}

/// Describe all four approval controls of `row` as seen by `role`.
pub fn controls(row: &CalendarRow, role: Role) -> Vec<ApprovalControl> {
    Scope::ALL
        .into_iter()
        .flat_map(|scope| ApprovalField::ALL.into_iter().map(move |field| (scope, field)))
        .map(|(scope, field)| {
            let ready = is_ready(row, scope, field);
            let permitted = can_act(role, scope);
            ApprovalControl {
                scope,
                field,
                approved: row.is_approved(scope, field),
                ready,
                permitted,
                actionable: ready && permitted,
            }
        })
        .collect()
}
