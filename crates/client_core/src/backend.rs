//! HTTP backend client for the report generation service.
//!
//! The service is an opaque endpoint: one POST per submission, JSON in
//! and JSON out. Everything that can go wrong on the wire is folded
//! into [`BackendError`] here so the controller only ever sees a typed
//! outcome.

use async_trait::async_trait;
use reqwest::Client;
use shared::protocol::{ErrorBody, GenerateReportRequest, GenerateReportResponse, PingResponse};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum BackendError {
    /// The request never reached the server or no response came back.
    #[error("{0}")]
    Transport(String),
    /// Non-2xx status. `message` is the server's `error` field when it
    /// sent one, otherwise synthesized from the status code.
    #[error("{message}")]
    Http { status: u16, message: String },
    /// 2xx status but the body was not valid JSON.
    #[error("malformed response")]
    Decode,
    /// Well-formed response with no usable report text.
    #[error("empty report")]
    EmptyReport,
}

#[async_trait]
pub trait ReportBackend: Send + Sync {
    async fn generate_report(
        &self,
        request: &GenerateReportRequest,
    ) -> Result<String, BackendError>;

    async fn ping(&self) -> Result<String, BackendError>;
}

pub struct HttpReportBackend {
    http: Client,
    base_url: String,
}

impl HttpReportBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn synthesize_status_message(status: reqwest::StatusCode) -> String {
        format!("HTTP error: status {}", status.as_u16())
    }
}

#[async_trait]
impl ReportBackend for HttpReportBackend {
    async fn generate_report(
        &self,
        request: &GenerateReportRequest,
    ) -> Result<String, BackendError> {
        let url = format!("{}/api/generate-report", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|err| BackendError::Transport(format!("request to {url} failed: {err}")))?;

        let status = response.status();
        let body = response.text().await.map_err(|err| {
            BackendError::Transport(format!("failed to read response body: {err}"))
        })?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|parsed| parsed.error)
                .filter(|message| !message.is_empty())
                .unwrap_or_else(|| Self::synthesize_status_message(status));
            warn!(status = status.as_u16(), "report backend returned error: {message}");
            return Err(BackendError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let decoded: GenerateReportResponse =
            serde_json::from_str(&body).map_err(|_| BackendError::Decode)?;

        match decoded.report {
            Some(report) if !report.is_empty() => Ok(report),
            _ => Err(BackendError::EmptyReport),
        }
    }

    async fn ping(&self) -> Result<String, BackendError> {
        let url = format!("{}/api/test", self.base_url);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|err| BackendError::Transport(format!("request to {url} failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Http {
                status: status.as_u16(),
                message: Self::synthesize_status_message(status),
            });
        }

        let decoded: PingResponse = response.json().await.map_err(|_| BackendError::Decode)?;
        Ok(decoded.message)
    }
}
