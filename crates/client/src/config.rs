use std::time::Duration;

use crate::error::ClientError;

/// Default API base URL for local development.
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Default per-request timeout in seconds.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the API server, without a trailing slash.
    pub api_url: String,
    /// Bearer access token for the acting user.
    pub token: String,
    pub request_timeout: Duration,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                          | Required | Default                 |
    /// |----------------------------------|----------|-------------------------|
    /// | `CADENCE_API_URL`                | no       | `http://localhost:3000` |
    /// | `CADENCE_API_TOKEN`              | **yes**  | --                      |
    /// | `CADENCE_REQUEST_TIMEOUT_SECS`   | no       | `30`                    |
    pub fn from_env() -> Result<Self, ClientError> {
        let api_url = std::env::var("CADENCE_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into());

        let token = std::env::var("CADENCE_API_TOKEN")
            .ok()
            .filter(|t| !t.is_empty())
            .ok_or(ClientError::MissingEnv("CADENCE_API_TOKEN"))?;

        let request_timeout_secs = match std::env::var("CADENCE_REQUEST_TIMEOUT_SECS") {
            Ok(raw) => raw.parse().map_err(|_| ClientError::InvalidEnv {
                name: "CADENCE_REQUEST_TIMEOUT_SECS",
                value: raw,
            })?,
            Err(_) => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        Ok(Self::new(api_url, token).with_timeout(Duration::from_secs(request_timeout_secs)))
    }

    /// Configuration with the default timeout.
    pub fn new(api_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
