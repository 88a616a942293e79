use cadence_core::error::CoreError;

/// Errors raised while setting up a client session.
///
/// Failures of individual requests are reported as
/// [`GatewayError`](cadence_core::gateway::GatewayError) instead.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("{0} must be set")]
    MissingEnv(&'static str),

    #[error("{name} has an invalid value '{value}'")]
    InvalidEnv { name: &'static str, value: String },

    /// The access token could not be decoded.
    #[error("Invalid access token: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// The token decoded but carries an unusable claim.
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}
