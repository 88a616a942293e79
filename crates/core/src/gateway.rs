//! Seams between the approval workflow and the outside world.
//!
//! - [`PersistenceGateway`] -- commits rows and approvals to durable storage.
//! - [`IdentityProvider`] -- reports the role of the acting user.

use async_trait::async_trait;

use crate::approval::{ApprovalField, Scope};
use crate::calendar::{CalendarRow, NewRow};
use crate::roles::Role;
use crate::types::{CalendarId, DbId};

/// Errors reported by a [`PersistenceGateway`] implementation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// The request never produced a response (network, DNS, TLS, timeout).
    #[error("Request failed: {0}")]
    Request(String),

    /// The server answered with a non-success status.
    #[error("Server rejected request ({status} {code}): {message}")]
    Rejected {
        status: u16,
        code: String,
        message: String,
    },

    /// The response body could not be decoded.
    #[error("Failed to decode response: {0}")]
    Decode(String),
}

/// Durable storage for calendar rows.
///
/// `update_approval` has PUT semantics: sending the same final value twice
/// is safe.
#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    async fn update_approval(
        &self,
        calendar_id: CalendarId,
        row_id: DbId,
        scope: Scope,
        field: ApprovalField,
        new_value: bool,
    ) -> Result<CalendarRow, GatewayError>;

    async fn list_rows(&self, calendar_id: CalendarId) -> Result<Vec<CalendarRow>, GatewayError>;

    async fn create_row(
        &self,
        calendar_id: CalendarId,
        new_row: &NewRow,
    ) -> Result<CalendarRow, GatewayError>;

    async fn delete_row(&self, calendar_id: CalendarId, row_id: DbId) -> Result<(), GatewayError>;
}

/// Source of the acting user's role, backed by an authenticated session.
pub trait IdentityProvider: Send + Sync {
    fn current_role(&self) -> Role;
}

/// An identity whose role never changes, e.g. one decoded from a token at
/// startup.
#[derive(Debug, Clone, Copy)]
pub struct StaticIdentity(pub Role);

impl IdentityProvider for StaticIdentity {
    fn current_role(&self) -> Role {
        self.0
    }
}
