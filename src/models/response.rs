use serde::Deserialize;
use std::collections::HashMap;

pub type FieldErrors = HashMap<String, Vec<String>>;

/// JSON body returned by the booking mutation endpoints.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct BookingResponse {
    pub status: String,
    #[serde(default)]
    pub redirect_url: Option<String>,
    #[serde(default)]
    pub errors: Option<FieldErrors>,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionResult {
    Success { redirect_url: Option<String> },
    ValidationErrors { errors: FieldErrors },
    Conflict { start: String, end: String },
    TransportError { reason: String },
}

impl From<BookingResponse> for SubmissionResult {
    fn from(response: BookingResponse) -> Self {
        match response.status.as_str() {
            "success" => SubmissionResult::Success {
                redirect_url: response.redirect_url.filter(|url| !url.is_empty()),
            },
            "error" => SubmissionResult::ValidationErrors {
                errors: response.errors.unwrap_or_default(),
            },
            "conflict" => SubmissionResult::Conflict {
                start: response.start.unwrap_or_default(),
                end: response.end.unwrap_or_default(),
            },
            other => SubmissionResult::TransportError {
                reason: format!("unexpected response status '{}'", other),
            },
        }
    }
}
