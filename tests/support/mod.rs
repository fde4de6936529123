#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use roomBooker::clients::booking_client::{BookingTransport, TransportFailure};
use roomBooker::handlers::responder::PageResponder;
use roomBooker::models::booking::{MutationIntent, TriggerData};
use roomBooker::models::response::BookingResponse;
use roomBooker::service::dialog::BookingDialog;
use roomBooker::service::form::FormSnapshot;
use tokio::sync::Mutex;

#[derive(Default)]
pub struct RecordingResponder {
    pub notices: Mutex<Vec<String>>,
    pub navigations: Mutex<Vec<String>>,
}

impl RecordingResponder {
    pub async fn last_notice(&self) -> Option<String> {
        self.notices.lock().await.last().cloned()
    }
}

#[async_trait]
impl PageResponder for RecordingResponder {
    async fn notify(&self, content: &str) {
        self.notices.lock().await.push(content.to_string());
    }

    async fn navigate(&self, url: &str) {
        self.navigations.lock().await.push(url.to_string());
    }
}

pub struct FakeTransport {
    response: Result<BookingResponse, TransportFailure>,
    pub requests: Mutex<Vec<(String, FormSnapshot)>>,
}

impl FakeTransport {
    pub fn replying(body: &str) -> Arc<Self> {
        Arc::new(Self {
            response: Ok(serde_json::from_str(body).unwrap()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(failure: TransportFailure) -> Arc<Self> {
        Arc::new(Self {
            response: Err(failure),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub async fn request_count(&self) -> usize {
        self.requests.lock().await.len()
    }
}

#[async_trait]
impl BookingTransport for FakeTransport {
    async fn post_form(
        &self,
        path: &str,
        form: &FormSnapshot,
    ) -> Result<BookingResponse, TransportFailure> {
        self.requests
            .lock()
            .await
            .push((path.to_string(), form.clone()));
        self.response.clone()
    }
}

pub fn trigger(event_id: &str, section_id: Option<&str>) -> TriggerData {
    TriggerData {
        event_id: event_id.to_string(),
        section_id: section_id.map(str::to_string),
        original_start: Some("2024-01-10".to_string()),
        original_end: Some("2024-01-15".to_string()),
    }
}

pub fn open(intent: MutationIntent, csrf: Option<&str>) -> BookingDialog {
    BookingDialog::open(intent, &trigger("42", None), csrf, "my_guests").unwrap()
}
