use crate::handlers::responder::PageResponder;
use crate::models::booking::{
    BookingRange, BookingTarget, DATE_FORMAT, MutationIntent, OriginalRange, RangeParseError,
    TriggerData,
};
use crate::service::form::{
    BookingForm, CSRF_FIELD, END_FIELD, EVENT_ID_FIELD, SOURCE_PAGE_FIELD, START_FIELD,
};
use crate::service::validation::{ValidationFailure, validate};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EditRejected {
    #[error(transparent)]
    Rule(#[from] ValidationFailure),
    #[error("{0}")]
    Unreadable(#[from] RangeParseError),
    #[error("Delete requests have no dates to change.")]
    NoDateFields,
}

/// State for one open booking dialog.
///
/// Created fresh from the triggering control on every open and dropped when
/// the interaction ends; nothing carries over between dialogs.
#[derive(Debug, Clone)]
pub struct BookingDialog {
    intent: MutationIntent,
    target: BookingTarget,
    original: Option<OriginalRange>,
    form: BookingForm,
}

impl BookingDialog {
    pub fn open(
        intent: MutationIntent,
        trigger: &TriggerData,
        csrf_token: Option<&str>,
        source_page: &str,
    ) -> Result<Self, RangeParseError> {
        let target = trigger.target();
        let mut form = BookingForm::new(intent).with_input(EVENT_ID_FIELD, &target.event_id);

        let original = if intent.edits_range() {
            let range = trigger.original_range()?;
            form.set(START_FIELD, &range.start.format(DATE_FORMAT).to_string());
            form.set(END_FIELD, &range.end.format(DATE_FORMAT).to_string());
            Some(OriginalRange::capture(range))
        } else {
            None
        };

        if let Some(token) = csrf_token {
            form.set(CSRF_FIELD, token);
        }
        form.set(SOURCE_PAGE_FIELD, source_page);

        tracing::debug!(
            intent = %intent,
            event_id = %target.event_id,
            section_id = ?target.section_id,
            "opened booking dialog"
        );
        Ok(Self {
            intent,
            target,
            original,
            form,
        })
    }

    pub fn intent(&self) -> MutationIntent {
        self.intent
    }

    pub fn target(&self) -> &BookingTarget {
        &self.target
    }

    pub fn original(&self) -> Option<&OriginalRange> {
        self.original.as_ref()
    }

    pub fn form(&self) -> &BookingForm {
        &self.form
    }

    /// Direct access to the form, bypassing live validation.
    pub fn form_mut(&mut self) -> &mut BookingForm {
        &mut self.form
    }

    pub fn candidate(&self) -> Result<BookingRange, RangeParseError> {
        let start = self
            .form
            .value(START_FIELD)
            .ok_or(RangeParseError::MissingDate("start"))?;
        let end = self
            .form
            .value(END_FIELD)
            .ok_or(RangeParseError::MissingDate("end"))?;
        BookingRange::parse(start, end)
    }

    pub async fn set_start(
        &mut self,
        value: &str,
        responder: &dyn PageResponder,
    ) -> Result<BookingRange, EditRejected> {
        self.set_date(START_FIELD, value, responder).await
    }

    pub async fn set_end(
        &mut self,
        value: &str,
        responder: &dyn PageResponder,
    ) -> Result<BookingRange, EditRejected> {
        self.set_date(END_FIELD, value, responder).await
    }

    async fn set_date(
        &mut self,
        field: &str,
        value: &str,
        responder: &dyn PageResponder,
    ) -> Result<BookingRange, EditRejected> {
        if !self.intent.edits_range() {
            return Err(EditRejected::NoDateFields);
        }
        self.form.set(field, value);
        self.revalidate(responder).await?;
        Ok(self.candidate()?)
    }

    /// Validates the current form dates against the original range, using
    /// the rule named by the form's type tag.
    ///
    /// On rejection the responder is told why and both dates are put back
    /// to the original values. Delete dialogs always pass.
    pub async fn revalidate(&mut self, responder: &dyn PageResponder) -> Result<(), EditRejected> {
        let rule = self.form.intent()?;
        if !rule.edits_range() {
            return Ok(());
        }
        let Some(original) = self.original else {
            return Err(EditRejected::Unreadable(RangeParseError::MissingDate("original")));
        };

        let checked = match self.candidate() {
            Ok(candidate) => validate(rule, &original, &candidate).map_err(EditRejected::from),
            Err(err) => Err(EditRejected::from(err)),
        };

        if let Err(rejection) = &checked {
            tracing::info!(
                intent = %rule,
                event_id = %self.target.event_id,
                reason = %rejection,
                "booking dates rejected, reverting"
            );
            responder.notify(&rejection.to_string()).await;
            self.revert(&original);
        }
        checked
    }

    fn revert(&mut self, original: &OriginalRange) {
        self.form
            .set(START_FIELD, &original.start().format(DATE_FORMAT).to_string());
        self.form
            .set(END_FIELD, &original.end().format(DATE_FORMAT).to_string());
    }
}
