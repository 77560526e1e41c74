//! Backend Client
//!
//! A thin client for the learning backend's three JSON routes plus its health
//! check. The trait is the seam the dispatcher depends on, so tests and
//! alternative transports can stand in for the HTTP implementation.

use async_trait::async_trait;
use reqwest::Url;
use serde_json::Value;
use tracing::debug;

use crate::{
    action::Action,
    error::AssistantError,
    models::{HealthStatus, RequestPayload},
};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// Shown when a failed response does not say what went wrong.
pub const FALLBACK_ERROR_MESSAGE: &str = "Failed to fetch data from AI.";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssistantClient: Send + Sync {
    /// Posts `payload` to the route of `action`, once.
    ///
    /// The body is parsed as JSON whatever the status. A non-2xx status turns
    /// into [`AssistantError::Remote`] carrying the body's `error` message.
    async fn send(&self, action: Action, payload: RequestPayload) -> Result<Value, AssistantError>;

    /// Queries the backend's health route.
    async fn health(&self) -> Result<HealthStatus, AssistantError>;
}

/// An implementation of `AssistantClient` over HTTP.
#[derive(Debug, Clone)]
pub struct HttpAssistantClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpAssistantClient {
    pub fn new(base_url: &str) -> Result<Self, AssistantError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| AssistantError::Transport(format!("Invalid base URL '{base_url}': {e}")))?;
        Ok(Self::with_client(reqwest::Client::new(), base_url))
    }

    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `{base_url}/{action}`.
    pub fn endpoint(&self, action: Action) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            action.route()
        )
    }

    /// The health route lives at the host root, outside the API prefix.
    pub fn health_url(&self) -> Result<Url, AssistantError> {
        self.base_url
            .join("/health")
            .map_err(|e| AssistantError::Transport(e.to_string()))
    }
}

#[async_trait]
impl AssistantClient for HttpAssistantClient {
    async fn send(&self, action: Action, payload: RequestPayload) -> Result<Value, AssistantError> {
        let url = self.endpoint(action);
        debug!(%url, "Posting request to backend");

        // `.json()` also sets `Content-Type: application/json`.
        let response = self.http.post(&url).json(&payload).send().await?;
        let status = response.status();
        let body: Value = response
            .json()
            .await
            .map_err(|e| AssistantError::Transport(format!("Invalid JSON in response: {e}")))?;

        if !status.is_success() {
            return Err(AssistantError::Remote {
                status: status.as_u16(),
                message: remote_error_message(&body),
            });
        }
        Ok(body)
    }

    async fn health(&self) -> Result<HealthStatus, AssistantError> {
        let response = self.http.get(self.health_url()?).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AssistantError::Remote {
                status: status.as_u16(),
                message: format!("Health check failed with status {status}"),
            });
        }
        response
            .json::<HealthStatus>()
            .await
            .map_err(|e| AssistantError::Transport(format!("Invalid health response: {e}")))
    }
}

/// The message to show for a failed response body.
pub fn remote_error_message(body: &Value) -> String {
    body.get("error")
        .and_then(Value::as_str)
        .filter(|message| !message.is_empty())
        .unwrap_or(FALLBACK_ERROR_MESSAGE)
        .to_string()
}
