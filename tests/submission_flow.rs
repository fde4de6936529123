mod support;

use std::sync::Arc;

use roomBooker::clients::booking_client::TransportFailure;
use roomBooker::models::booking::MutationIntent;
use roomBooker::models::response::SubmissionResult;
use roomBooker::service::dialog::{BookingDialog, EditRejected};
use roomBooker::service::form::{CSRF_FIELD, END_FIELD, EVENT_ID_FIELD, SOURCE_PAGE_FIELD, START_FIELD};
use roomBooker::service::submitter::{
    MISSING_CSRF_MESSAGE, MutationSubmitter, SUCCESS_MESSAGE, SubmitError, TRANSPORT_MESSAGE,
};
use roomBooker::service::validation::ValidationFailure;
use support::{FakeTransport, RecordingResponder, open, trigger};

fn submitter(
    transport: Arc<FakeTransport>,
    responder: Arc<RecordingResponder>,
) -> MutationSubmitter {
    MutationSubmitter::new(transport, responder, "/catalog")
}

#[tokio::test]
async fn success_with_redirect_navigates() {
    let transport = FakeTransport::replying(r#"{"status":"success","redirect_url":"/catalog/my_guests/"}"#);
    let responder = Arc::new(RecordingResponder::default());
    let submitter = submitter(transport.clone(), responder.clone());
    let mut dialog = open(MutationIntent::Extend, Some("tok"));
    dialog.set_end("2024-01-18", responder.as_ref()).await.unwrap();

    let result = submitter.submit(&mut dialog).await.unwrap();

    assert_eq!(
        result,
        SubmissionResult::Success {
            redirect_url: Some("/catalog/my_guests/".to_string())
        }
    );
    assert_eq!(*responder.navigations.lock().await, vec!["/catalog/my_guests/".to_string()]);

    let requests = transport.requests.lock().await;
    let (path, form) = &requests[0];
    assert_eq!(path, "/catalog/extend_booking/42/");
    assert_eq!(form.get(EVENT_ID_FIELD), Some("42"));
    assert_eq!(form.get(START_FIELD), Some("2024-01-10"));
    assert_eq!(form.get(END_FIELD), Some("2024-01-18"));
    assert_eq!(form.get(CSRF_FIELD), Some("tok"));
    assert_eq!(form.get(SOURCE_PAGE_FIELD), Some("my_guests"));
}

#[tokio::test]
async fn success_without_redirect_acknowledges() {
    let transport = FakeTransport::replying(r#"{"status":"success"}"#);
    let responder = Arc::new(RecordingResponder::default());
    let submitter = submitter(transport, responder.clone());
    let mut dialog = open(MutationIntent::Shorten, Some("tok"));

    submitter.submit(&mut dialog).await.unwrap();

    assert_eq!(responder.last_notice().await.as_deref(), Some(SUCCESS_MESSAGE));
    assert!(responder.navigations.lock().await.is_empty());
}

#[tokio::test]
async fn conflict_echoes_dates_without_field_errors() {
    let transport =
        FakeTransport::replying(r#"{"status":"conflict","start":"2024-02-01","end":"2024-02-03"}"#);
    let responder = Arc::new(RecordingResponder::default());
    let submitter = submitter(transport, responder.clone());
    let mut dialog = open(MutationIntent::Extend, Some("tok"));

    let result = submitter.submit(&mut dialog).await.unwrap();

    assert!(matches!(result, SubmissionResult::Conflict { .. }));
    let notice = responder.last_notice().await.unwrap();
    assert!(notice.contains("2024-02-01"));
    assert!(notice.contains("2024-02-03"));
    assert!(dialog.form().annotations().is_empty());
    assert_eq!(dialog.form().value(END_FIELD), Some("2024-01-15"));
}

#[tokio::test]
async fn server_errors_render_next_to_fields_without_duplicates() {
    let transport = FakeTransport::replying(
        r#"{"status":"error","errors":{"end_date":["Enter a valid date."],"unknown":["ignored"]}}"#,
    );
    let responder = Arc::new(RecordingResponder::default());
    let submitter = submitter(transport.clone(), responder.clone());
    let mut dialog = open(MutationIntent::Extend, Some("tok"));

    submitter.submit(&mut dialog).await.unwrap();
    submitter.submit(&mut dialog).await.unwrap();

    let notes = dialog.form().annotations();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].field, END_FIELD);
    assert!(notes[0].html.contains("Enter a valid date."));
    assert!(responder.notices.lock().await.is_empty());
    assert_eq!(transport.request_count().await, 2);
}

#[tokio::test]
async fn transport_failure_prompts_retry() {
    let transport = FakeTransport::failing(TransportFailure::Status(500));
    let responder = Arc::new(RecordingResponder::default());
    let submitter = submitter(transport, responder.clone());
    let mut dialog = open(MutationIntent::Delete, Some("tok"));

    let result = submitter.submit(&mut dialog).await.unwrap();

    assert!(matches!(result, SubmissionResult::TransportError { .. }));
    assert_eq!(responder.last_notice().await.as_deref(), Some(TRANSPORT_MESSAGE));
}

#[tokio::test]
async fn missing_csrf_token_aborts_delete_before_network() {
    let transport = FakeTransport::replying(r#"{"status":"success"}"#);
    let responder = Arc::new(RecordingResponder::default());
    let submitter = submitter(transport.clone(), responder.clone());
    let mut dialog = open(MutationIntent::Delete, None);

    let result = submitter.submit(&mut dialog).await;

    assert_eq!(result, Err(SubmitError::MissingCredential));
    assert_eq!(responder.last_notice().await.as_deref(), Some(MISSING_CSRF_MESSAGE));
    assert_eq!(transport.request_count().await, 0);
}

#[tokio::test]
async fn programmatic_edit_is_blocked_at_submit() {
    let transport = FakeTransport::replying(r#"{"status":"success"}"#);
    let responder = Arc::new(RecordingResponder::default());
    let submitter = submitter(transport.clone(), responder.clone());
    let mut dialog = open(MutationIntent::Shorten, Some("tok"));
    dialog.form_mut().set(START_FIELD, "2024-01-01");

    let result = submitter.submit(&mut dialog).await;

    assert_eq!(
        result,
        Err(SubmitError::Validation(EditRejected::Rule(ValidationFailure::GrowsWindow)))
    );
    assert_eq!(transport.request_count().await, 0);
    assert_eq!(dialog.form().value(START_FIELD), Some("2024-01-10"));
}

#[tokio::test]
async fn delete_is_never_date_gated() {
    let transport = FakeTransport::replying(r#"{"status":"success","redirect_url":"/catalog/my_guests/"}"#);
    let responder = Arc::new(RecordingResponder::default());
    let submitter = submitter(transport.clone(), responder.clone());
    let mut dialog =
        BookingDialog::open(MutationIntent::Delete, &trigger("9", Some("4")), Some("tok"), "rooms_master")
            .unwrap();

    submitter.submit(&mut dialog).await.unwrap();

    let requests = transport.requests.lock().await;
    assert_eq!(requests[0].0, "/catalog/delete_booking/9/4/");
    assert_eq!(requests[0].1.get(START_FIELD), None);
    assert_eq!(requests[0].1.get(SOURCE_PAGE_FIELD), Some("rooms_master"));
}

#[tokio::test]
async fn repeated_submit_sends_each_request() {
    let transport = FakeTransport::replying(r#"{"status":"success"}"#);
    let responder = Arc::new(RecordingResponder::default());
    let submitter = submitter(transport.clone(), responder.clone());
    let mut first = open(MutationIntent::Extend, Some("tok"));
    let mut second = open(MutationIntent::Extend, Some("tok"));

    let _ = tokio::join!(submitter.submit(&mut first), submitter.submit(&mut second));

    assert_eq!(transport.request_count().await, 2);
}
