use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use thiserror::Error;
use url::Url;

use crate::models::response::BookingResponse;
use crate::service::form::FormSnapshot;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportFailure {
    #[error("invalid endpoint path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },
    #[error("request failed: {0}")]
    Network(String),
    #[error("request failed with status {0}")]
    Status(u16),
    #[error("failed to parse response JSON: {0}")]
    Parse(String),
}

#[async_trait]
pub trait BookingTransport: Send + Sync {
    async fn post_form(
        &self,
        path: &str,
        form: &FormSnapshot,
    ) -> Result<BookingResponse, TransportFailure>;
}

pub struct HttpBookingClient {
    base_url: Url,
    http: reqwest::Client,
}

impl HttpBookingClient {
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, TransportFailure> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportFailure::Network(e.to_string()))?;
        Ok(Self { base_url, http })
    }

    pub fn endpoint(&self, path: &str) -> Result<Url, TransportFailure> {
        self.base_url
            .join(path)
            .map_err(|e| TransportFailure::InvalidPath {
                path: path.to_string(),
                reason: e.to_string(),
            })
    }
}

#[async_trait]
impl BookingTransport for HttpBookingClient {
    async fn post_form(
        &self,
        path: &str,
        form: &FormSnapshot,
    ) -> Result<BookingResponse, TransportFailure> {
        let url = self.endpoint(path)?;
        tracing::debug!(url = %url, "posting booking form");

        let response = self
            .http
            .post(url)
            .header(ACCEPT, "application/json")
            .form(form)
            .send()
            .await
            .map_err(|e| TransportFailure::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| TransportFailure::Network(e.to_string()))?;

        if !status.is_success() {
            tracing::warn!(status = %status, body = %text, "booking endpoint returned an error status");
            return Err(TransportFailure::Status(status.as_u16()));
        }

        serde_json::from_str(&text).map_err(|e| {
            tracing::warn!(error = %e, body = %text, "booking response was not valid JSON");
            TransportFailure::Parse(e.to_string())
        })
    }
}
