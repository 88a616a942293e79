//! HTTP client for the Cadence API.
//!
//! Supplies the network-backed pieces an [`ApprovalWorkflow`] needs:
//!
//! - [`HttpGateway`] -- a [`PersistenceGateway`](cadence_core::gateway::PersistenceGateway)
//!   over the REST endpoints.
//! - [`TokenIdentity`] -- the acting role, read from the session's access token.

pub mod config;
pub mod error;
pub mod gateway;
pub mod identity;

use cadence_core::workflow::ApprovalWorkflow;

pub use config::ClientConfig;
pub use error::ClientError;
pub use gateway::HttpGateway;
pub use identity::TokenIdentity;

/// Build an approval workflow talking to the configured server as the
/// token's user.
pub fn open_session(
    config: &ClientConfig,
) -> Result<ApprovalWorkflow<HttpGateway, TokenIdentity>, ClientError> {
    let identity = TokenIdentity::from_token(&config.token)?;
    let gateway = HttpGateway::new(config)?;
    tracing::info!(api_url = %config.api_url, role = %identity.role(), "Opened approval session");
    Ok(ApprovalWorkflow::new(gateway, identity))
}
