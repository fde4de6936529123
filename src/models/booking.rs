use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RangeParseError {
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("missing {0} date")]
    MissingDate(&'static str),
    #[error("unknown booking form type '{0}'")]
    UnknownIntent(String),
}

pub fn parse_date(value: &str) -> Result<NaiveDate, RangeParseError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| RangeParseError::InvalidDate(value.to_string()))
}

/// A booking window expressed as two calendar dates.
///
/// `start < end` is expected but not enforced here; the server owns that rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookingRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl BookingRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn parse(start: &str, end: &str) -> Result<Self, RangeParseError> {
        Ok(Self {
            start: parse_date(start)?,
            end: parse_date(end)?,
        })
    }
}

impl fmt::Display for BookingRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {}]",
            self.start.format(DATE_FORMAT),
            self.end.format(DATE_FORMAT)
        )
    }
}

/// The range a dialog was opened with. Read-only for the dialog's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OriginalRange(BookingRange);

impl OriginalRange {
    pub fn capture(range: BookingRange) -> Self {
        Self(range)
    }

    pub fn start(&self) -> NaiveDate {
        self.0.start
    }

    pub fn end(&self) -> NaiveDate {
        self.0.end
    }

    pub fn range(&self) -> BookingRange {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationIntent {
    Extend,
    Shorten,
    Delete,
}

impl MutationIntent {
    pub fn segment(&self) -> &'static str {
        match self {
            MutationIntent::Extend => "extend_booking",
            MutationIntent::Shorten => "shorten_booking",
            MutationIntent::Delete => "delete_booking",
        }
    }

    pub fn form_type(&self) -> &'static str {
        match self {
            MutationIntent::Extend => "extend",
            MutationIntent::Shorten => "shorten",
            MutationIntent::Delete => "delete",
        }
    }

    pub fn edits_range(&self) -> bool {
        !matches!(self, MutationIntent::Delete)
    }
}

impl FromStr for MutationIntent {
    type Err = RangeParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "extend" => Ok(MutationIntent::Extend),
            "shorten" => Ok(MutationIntent::Shorten),
            "delete" => Ok(MutationIntent::Delete),
            other => Err(RangeParseError::UnknownIntent(other.to_string())),
        }
    }
}

impl fmt::Display for MutationIntent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.form_type())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingTarget {
    pub event_id: String,
    pub section_id: Option<String>,
}

impl BookingTarget {
    pub fn new(event_id: impl Into<String>, section_id: Option<String>) -> Self {
        // An empty section id means "no section", same as an absent one.
        let section_id = section_id.filter(|id| !id.trim().is_empty());
        Self {
            event_id: event_id.into(),
            section_id,
        }
    }
}

/// Data carried by the control that opens a booking dialog.
///
/// Delete controls may omit the original dates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriggerData {
    pub event_id: String,
    pub section_id: Option<String>,
    pub original_start: Option<String>,
    pub original_end: Option<String>,
}

impl TriggerData {
    pub fn original_range(&self) -> Result<BookingRange, RangeParseError> {
        let start = self
            .original_start
            .as_deref()
            .ok_or(RangeParseError::MissingDate("original start"))?;
        let end = self
            .original_end
            .as_deref()
            .ok_or(RangeParseError::MissingDate("original end"))?;
        BookingRange::parse(start, end)
    }

    pub fn target(&self) -> BookingTarget {
        BookingTarget::new(self.event_id.clone(), self.section_id.clone())
    }
}
