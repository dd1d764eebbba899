//! Transmission of the submitted field definition.

mod worker;

use reqwest::blocking::Client;
use serde_json::Value;
use thiserror::Error;

use crate::domain::FieldDraft;

pub use worker::{SubmissionWorker, SubmitOutcome};

/// Endpoint used when none is configured.
pub const DEFAULT_ENDPOINT: &str = "https://run.mocky.io/v3/c7e23d3c-fb07-4046-ad40-17bfc00ef44a";

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("endpoint answered with status {status}")]
    Status { status: u16 },
    #[error("request failed: {0}")]
    Transport(String),
}

/// Sends a field definition somewhere and returns the decoded reply, if any.
pub trait Transport: Send + Sync {
    fn submit(&self, value: &FieldDraft) -> Result<Option<Value>, SubmitError>;
}

/// POSTs the JSON-encoded value to a fixed endpoint.
///
/// No request timeout is configured; a hung endpoint keeps the submission
/// pending.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, SubmitError> {
        let client = Client::builder()
            .timeout(None)
            .build()
            .map_err(|err| SubmitError::Transport(err.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Transport for HttpTransport {
    fn submit(&self, value: &FieldDraft) -> Result<Option<Value>, SubmitError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(value)
            .send()
            .map_err(|err| SubmitError::Transport(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(SubmitError::Status {
                status: status.as_u16(),
            });
        }
        let body = response
            .text()
            .map_err(|err| SubmitError::Transport(err.to_string()))?;
        Ok(serde_json::from_str(&body).ok())
    }
}
