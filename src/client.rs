//! HTTP client for the Oz engine API.
//!
//! Configuration is via environment variables:
//! - `OZ_URL` - Base URL (default: `http://localhost:17020/api/v1`)
//! - `OZ_API_KEY` - API key for authentication (optional for local)

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::api::{
    ActivityInput, AssessImpulseRequest, LoadResponse, MessageBody, ResolveImpulseRequest,
    SnapshotInput,
};
use crate::models::*;

/// Default URL for local development.
const DEFAULT_URL: &str = "http://localhost:17020/api/v1";

/// HTTP client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: API key required or invalid")]
    Unauthorized,

    #[error("Server error: {0}")]
    Server(String),
}

#[derive(Debug, Clone)]
pub struct OzClient {
    base_url: String,
    api_key: Option<String>,
    client: Client,
}

impl OzClient {
    /// Create client from environment variables.
    pub fn from_env() -> Self {
        let base_url = std::env::var("OZ_URL").unwrap_or_else(|_| DEFAULT_URL.to_string());
        let api_key = std::env::var("OZ_API_KEY").ok();
        Self::new(base_url, api_key)
    }

    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            client: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.client.request(method, &url);
        if let Some(ref key) = self.api_key {
            req = req.bearer_auth(key);
        }
        req
    }

    async fn error_for(response: reqwest::Response) -> ClientError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        match status {
            StatusCode::NOT_FOUND => ClientError::NotFound(body),
            StatusCode::BAD_REQUEST => ClientError::BadRequest(body),
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
            _ => ClientError::Server(format!("{}: {}", status, body)),
        }
    }

    async fn handle_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            Err(Self::error_for(response).await)
        }
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let response = self
            .request(reqwest::Method::POST, path)
            .json(body)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// Check that the server is up.
    pub async fn health(&self) -> Result<(), ClientError> {
        let response = self.request(reqwest::Method::GET, "/health").send().await?;
        let _: serde_json::Value = Self::handle_response(response).await?;
        Ok(())
    }

    pub async fn compute_load(&self, counts: &WorkItemCounts) -> Result<LoadResponse, ClientError> {
        self.post("/load", counts).await
    }

    pub async fn get_message(
        &self,
        request: MessageRequest,
        seed: Option<u64>,
    ) -> Result<WizardMessage, ClientError> {
        self.post("/messages", &MessageBody { request, seed }).await
    }

    pub async fn assess_impulse(
        &self,
        impulse: Impulse,
        status: Status,
    ) -> Result<GateAssessment, ClientError> {
        self.post("/impulses/assess", &AssessImpulseRequest { impulse, status })
            .await
    }

    pub async fn resolve_impulse(
        &self,
        impulse: Impulse,
        status: Status,
        choice: GateChoice,
    ) -> Result<GateOutcome, ClientError> {
        self.post(
            "/impulses/resolve",
            &ResolveImpulseRequest {
                impulse,
                status,
                choice,
            },
        )
        .await
    }

    /// Report user activity for a session, starting it if needed.
    pub async fn record_activity(
        &self,
        session_id: &str,
        quest_id: Option<Uuid>,
    ) -> Result<DriftState, ClientError> {
        self.post(
            &format!("/sessions/{}/activity", session_id),
            &ActivityInput { quest_id },
        )
        .await
    }

    pub async fn evaluate_session(
        &self,
        session_id: &str,
        input: &SnapshotInput,
    ) -> Result<CognitiveSnapshot, ClientError> {
        self.post(&format!("/sessions/{}/snapshot", session_id), input)
            .await
    }

    pub async fn end_session(&self, session_id: &str) -> Result<(), ClientError> {
        let response = self
            .request(reqwest::Method::DELETE, &format!("/sessions/{}", session_id))
            .send()
            .await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::error_for(response).await)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = OzClient::new("http://localhost:17020/api/v1/", None);
        assert_eq!(client.base_url(), "http://localhost:17020/api/v1");
    }

    #[test]
    fn unreachable_server_is_an_http_error() {
        // Port 9 (discard) is not listening in test environments.
        let client = OzClient::new("http://127.0.0.1:9/api/v1", None);
        let result = tokio_test::block_on(client.health());
        assert!(matches!(result, Err(ClientError::Http(_))));
    }
}
