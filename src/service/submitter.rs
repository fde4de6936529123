use std::sync::Arc;

use thiserror::Error;

use crate::clients::booking_client::BookingTransport;
use crate::handlers::responder::PageResponder;
use crate::models::booking::{BookingTarget, MutationIntent};
use crate::models::response::SubmissionResult;
use crate::service::dialog::{BookingDialog, EditRejected};
use crate::service::form::display_form_errors;

pub const MISSING_CSRF_MESSAGE: &str = "CSRF token not found!";
pub const SUCCESS_MESSAGE: &str = "Booking updated successfully";
pub const TRANSPORT_MESSAGE: &str =
    "An error occurred while processing your request. Please try again.";

/// Failures caught before any request is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("{}", MISSING_CSRF_MESSAGE)]
    MissingCredential,
    #[error(transparent)]
    Validation(#[from] EditRejected),
}

/// Builds `{prefix}/{segment}/{event}/` or `{prefix}/{segment}/{event}/{section}/`.
pub fn endpoint_path(prefix: &str, intent: MutationIntent, target: &BookingTarget) -> String {
    let prefix = prefix.trim_end_matches('/');
    match &target.section_id {
        Some(section_id) => format!(
            "{}/{}/{}/{}/",
            prefix,
            intent.segment(),
            target.event_id,
            section_id
        ),
        None => format!("{}/{}/{}/", prefix, intent.segment(), target.event_id),
    }
}

pub fn conflict_message(start: &str, end: &str) -> String {
    format!("Conflict detected: Start - {}, End - {}", start, end)
}

pub struct MutationSubmitter {
    transport: Arc<dyn BookingTransport>,
    responder: Arc<dyn PageResponder>,
    url_prefix: String,
}

impl MutationSubmitter {
    pub fn new(
        transport: Arc<dyn BookingTransport>,
        responder: Arc<dyn PageResponder>,
        url_prefix: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            responder,
            url_prefix: url_prefix.into(),
        }
    }

    pub fn responder(&self) -> &dyn PageResponder {
        self.responder.as_ref()
    }

    /// Sends one booking mutation for the dialog and applies the outcome.
    ///
    /// Local failures (missing CSRF token, rejected dates) are reported to the
    /// responder and returned as `Err` without touching the network. Every
    /// remote outcome, including transport failures, comes back as `Ok`.
    /// There is no in-flight guard: two calls send two requests.
    pub async fn submit(&self, dialog: &mut BookingDialog) -> Result<SubmissionResult, SubmitError> {
        let intent = dialog.intent();

        if dialog.form().csrf_token().is_none() {
            tracing::warn!(intent = %intent, "refusing to submit without a CSRF token");
            self.responder.notify(MISSING_CSRF_MESSAGE).await;
            return Err(SubmitError::MissingCredential);
        }

        dialog.revalidate(self.responder.as_ref()).await?;

        let path = endpoint_path(&self.url_prefix, intent, dialog.target());
        let snapshot = dialog.form().snapshot();
        tracing::info!(intent = %intent, path = %path, "submitting booking change");

        let result = match self.transport.post_form(&path, &snapshot).await {
            Ok(response) => SubmissionResult::from(response),
            Err(err) => SubmissionResult::TransportError {
                reason: err.to_string(),
            },
        };

        self.reconcile(dialog, &result).await;
        Ok(result)
    }

    async fn reconcile(&self, dialog: &mut BookingDialog, result: &SubmissionResult) {
        match result {
            SubmissionResult::Success {
                redirect_url: Some(url),
            } => {
                tracing::info!(redirect = %url, "booking change accepted");
                self.responder.navigate(url).await;
            }
            SubmissionResult::Success { redirect_url: None } => {
                tracing::info!("booking change accepted");
                self.responder.notify(SUCCESS_MESSAGE).await;
            }
            SubmissionResult::ValidationErrors { errors } => {
                tracing::info!(fields = errors.len(), "server rejected booking form");
                display_form_errors(dialog.form_mut(), errors);
            }
            SubmissionResult::Conflict { start, end } => {
                tracing::info!(start = %start, end = %end, "booking change conflicts with another booking");
                self.responder.notify(&conflict_message(start, end)).await;
            }
            SubmissionResult::TransportError { reason } => {
                tracing::error!(reason = %reason, "booking request failed");
                self.responder.notify(TRANSPORT_MESSAGE).await;
            }
        }
    }
}
