//! REST implementation of [`PersistenceGateway`].
//!
//! Every call is one request against the `/api/v1/calendars` endpoints.
//! Success bodies are unwrapped from the `{ "data": ... }` envelope;
//! error bodies (`{ "error": ..., "code": ... }`) become
//! [`GatewayError::Rejected`].

use async_trait::async_trait;
use cadence_core::approval::{ApprovalField, Scope};
use cadence_core::calendar::{CalendarRow, NewRow};
use cadence_core::gateway::{GatewayError, PersistenceGateway};
use cadence_core::types::{CalendarId, DbId};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::ClientConfig;

/// HTTP client for a single Cadence API server.
pub struct HttpGateway {
    client: reqwest::Client,
    api_url: String,
    token: String,
}

#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
    code: String,
}

impl HttpGateway {
    pub fn new(config: &ClientConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self::with_client(client, config))
    }

    /// Create a gateway reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: &ClientConfig) -> Self {
        Self {
            client,
            api_url: config.api_url.clone(),
            token: config.token.clone(),
        }
    }

    fn rows_url(&self, calendar_id: CalendarId) -> String {
        format!("{}/api/v1/calendars/{calendar_id}/rows", self.api_url)
    }

    // ---- private helpers ----

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, GatewayError> {
        let response = request
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| GatewayError::Request(e.to_string()))?;
        Self::ensure_success(response).await
    }

    /// Pass a success response through; turn anything else into
    /// [`GatewayError::Rejected`], keeping the server's code and message
    /// when the body has the standard error shape.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, GatewayError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        let (code, message) = match serde_json::from_str::<ErrorBody>(&body) {
            Ok(err) => (err.code, err.error),
            Err(_) => ("UNKNOWN".to_string(), body),
        };

        tracing::warn!(status = status.as_u16(), %code, %message, "API request rejected");
        Err(GatewayError::Rejected {
            status: status.as_u16(),
            code,
            message,
        })
    }

    /// Decode a `{ "data": T }` body.
    async fn parse_data<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, GatewayError> {
        let envelope = response
            .json::<Envelope<T>>()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))?;
        Ok(envelope.data)
    }
}

#[async_trait]
impl PersistenceGateway for HttpGateway {
    async fn update_approval(
        &self,
        calendar_id: CalendarId,
        row_id: DbId,
        scope: Scope,
        field: ApprovalField,
        new_value: bool,
    ) -> Result<CalendarRow, GatewayError> {
        let url = format!(
            "{}/{row_id}/approvals/{scope}/{field}",
            self.rows_url(calendar_id)
        );
        let body = serde_json::json!({ "value": new_value });
        let response = self.send(self.client.patch(url).json(&body)).await?;
        Self::parse_data(response).await
    }

    async fn list_rows(&self, calendar_id: CalendarId) -> Result<Vec<CalendarRow>, GatewayError> {
        let response = self.send(self.client.get(self.rows_url(calendar_id))).await?;
        Self::parse_data(response).await
    }

    async fn create_row(
        &self,
        calendar_id: CalendarId,
        new_row: &NewRow,
    ) -> Result<CalendarRow, GatewayError> {
        let response = self
            .send(self.client.post(self.rows_url(calendar_id)).json(new_row))
            .await?;
        Self::parse_data(response).await
    }

    async fn delete_row(&self, calendar_id: CalendarId, row_id: DbId) -> Result<(), GatewayError> {
        let url = format!("{}/{row_id}", self.rows_url(calendar_id));
        self.send(self.client.delete(url)).await?;
        Ok(())
    }
}
