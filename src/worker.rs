//! Completion worker client
//!
//! Implements the JSON contract of the chat worker endpoint:
//! - POST { message, model, systemInstruction } with an X-Project-ID header
//! - Response { success, message?, error? }
//!
//! One best-effort request per user action. No retry, no backoff.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Header carrying the project identifier.
pub const PROJECT_ID_HEADER: &str = "X-Project-ID";

/// Request body for the worker endpoint
#[derive(Debug, Serialize)]
pub struct CompletionRequest {
    pub message: String,
    pub model: String,
    #[serde(rename = "systemInstruction")]
    pub system_instruction: String,
}

/// Response from the worker endpoint
#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// The two failure kinds the controller distinguishes: the request could
/// not complete at all, or the worker answered with success: false.
#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("worker error: {0}")]
    Api(String),
}

/// Seam between the controller and the wire. The REPL plugs in the real
/// HTTP client; tests plug in a scripted backend.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Send one message and return the assistant's reply text.
    async fn complete(&self, message: &str, system: &str, model: &str)
        -> Result<String, WorkerError>;
}

/// HTTP client for the completion worker
pub struct WorkerClient {
    http: reqwest::Client,
    url: String,
    project_id: String,
}

impl WorkerClient {
    /// Create a new client for the given endpoint
    pub fn new(url: String, project_id: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            url,
            project_id,
        }
    }
}

#[async_trait]
impl CompletionBackend for WorkerClient {
    async fn complete(
        &self,
        message: &str,
        system: &str,
        model: &str,
    ) -> Result<String, WorkerError> {
        let request = CompletionRequest {
            message: message.into(),
            model: model.into(),
            system_instruction: system.into(),
        };

        let response = self
            .http
            .post(&self.url)
            .header(PROJECT_ID_HEADER, self.project_id.as_str())
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(WorkerError::Api(format!("HTTP {}: {}", status, body)));
        }

        let body: CompletionResponse = response.json().await?;

        if !body.success {
            return Err(WorkerError::Api(
                body.error.unwrap_or_else(|| "unknown error".into()),
            ));
        }

        body.message
            .ok_or_else(|| WorkerError::Api("success response without message".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization() {
        let request = CompletionRequest {
            message: "What time do you open?".into(),
            model: "gemma-3-4b-it".into(),
            system_instruction: "Be brief".into(),
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"systemInstruction\":\"Be brief\""));
        assert!(json.contains("gemma-3-4b-it"));
    }

    #[test]
    fn test_success_response_deserialization() {
        let json = r#"{"success":true,"message":"We open at noon."}"#;
        let response: CompletionResponse = serde_json::from_str(json).unwrap();
        assert!(response.success);
        assert_eq!(response.message.as_deref(), Some("We open at noon."));
        assert!(response.error.is_none());
    }

    #[test]
    fn test_error_response_deserialization() {
        let json = r#"{"success":false,"error":"model overloaded"}"#;
        let response: CompletionResponse = serde_json::from_str(json).unwrap();
        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("model overloaded"));
    }

    #[test]
    fn test_worker_error_display() {
        let err = WorkerError::Api("model overloaded".into());
        assert_eq!(err.to_string(), "worker error: model overloaded");
    }
}
