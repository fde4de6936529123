use crate::models::booking::{BookingRange, MutationIntent, OriginalRange};
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationFailure {
    #[error("New dates cannot shrink the original reservation window. Please use the 'Shorten' button for that.")]
    ShrinksWindow,
    #[error("New dates cannot extend the original reservation window. Please use the 'Extend' button for that.")]
    GrowsWindow,
    #[error("The start date cannot occur on or after the end date. If you wish to delete this event, please use the 'Delete' button.")]
    InvertedWindow,
}

/// Checks a candidate range against the range the dialog was opened with.
///
/// Extend requires the candidate to contain the original, Shorten requires the
/// original to contain the candidate and the result to stay non-empty. Delete
/// never looks at dates.
pub fn validate(
    intent: MutationIntent,
    original: &OriginalRange,
    candidate: &BookingRange,
) -> Result<(), ValidationFailure> {
    match intent {
        MutationIntent::Extend => validate_extend(original, candidate),
        MutationIntent::Shorten => validate_shorten(original, candidate),
        MutationIntent::Delete => Ok(()),
    }
}

fn validate_extend(original: &OriginalRange, candidate: &BookingRange) -> Result<(), ValidationFailure> {
    if candidate.start > original.start() || candidate.end < original.end() {
        return Err(ValidationFailure::ShrinksWindow);
    }
    Ok(())
}

fn validate_shorten(original: &OriginalRange, candidate: &BookingRange) -> Result<(), ValidationFailure> {
    if candidate.start < original.start() || candidate.end > original.end() {
        return Err(ValidationFailure::GrowsWindow);
    }
    if candidate.start >= original.end() || candidate.end <= original.start() {
        return Err(ValidationFailure::InvertedWindow);
    }
    Ok(())
}
