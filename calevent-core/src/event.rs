//! Event option types.
//!
//! `EventOptions` is the loosely-structured input to the serializer. Every
//! field is optional and an empty string counts as absent, so an options
//! file written by hand can leave out anything it doesn't care about.
//! A value of the wrong shape is dropped as if it were missing.

use chrono::{DateTime, FixedOffset};
use serde::de::{Deserializer, IgnoredAny};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Input for a single serialization call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventOptions {
    /// SUMMARY; "New Event" when absent
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub event_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub location: Option<String>,

    /// Creation timestamp; defaults to now
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub dtstamp: Option<DateInput>,
    /// Start time; defaults to now
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub dtstart: Option<DateInput>,
    /// End time; defaults to one wall-clock hour after the start
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub dtend: Option<DateInput>,

    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub organizer: Option<Organizer>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub attendees: Option<Vec<Attendee>>,

    /// Key into the timezone table (e.g. "UTC")
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub timezone: Option<String>,

    /// Output file name used when persisting without an explicit path.
    /// `.ics` is appended unless already present.
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub filename: Option<String>,
}

impl EventOptions {
    pub fn new(event_name: impl Into<String>) -> Self {
        EventOptions {
            event_name: Some(event_name.into()),
            ..Default::default()
        }
    }
}

/// Event organizer. Rendered only when both fields are non-empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Organizer {
    #[serde(deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub email: Option<String>,
}

impl Organizer {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Organizer {
            name: Some(name.into()),
            email: Some(email.into()),
        }
    }
}

/// An event attendee
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Attendee {
    #[serde(deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub email: Option<String>,
    /// Whether a response is requested; false when absent
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub rsvp: Option<bool>,
}

impl Attendee {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Attendee {
            name: Some(name.into()),
            email: Some(email.into()),
            rsvp: None,
        }
    }

    pub fn with_rsvp(mut self, rsvp: bool) -> Self {
        self.rsvp = Some(rsvp);
        self
    }
}

/// A free-form date input.
///
/// Deserialized untagged: a JSON number is read as epoch milliseconds, an
/// RFC 3339 string as an instant, and any other string is kept as text and
/// parsed on a best-effort basis during normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DateInput {
    Millis(i64),
    Instant(DateTime<FixedOffset>),
    Text(String),
}

impl From<&str> for DateInput {
    fn from(value: &str) -> Self {
        DateInput::Text(value.to_string())
    }
}

impl From<String> for DateInput {
    fn from(value: String) -> Self {
        DateInput::Text(value)
    }
}

impl<Tz: chrono::TimeZone> From<DateTime<Tz>> for DateInput {
    fn from(value: DateTime<Tz>) -> Self {
        DateInput::Instant(value.fixed_offset())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient<T> {
    Valid(T),
    Invalid(IgnoredAny),
}

/// Deserialize an optional field, reading a value of the wrong shape as `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(match Option::<Lenient<T>>::deserialize(deserializer)? {
        Some(Lenient::Valid(value)) => Some(value),
        Some(Lenient::Invalid(_)) => {
            debug!("Ignoring malformed option value");
            None
        }
        None => None,
    })
}

/// Returns the string if it is present and non-empty.
pub(crate) fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.is_empty())
}
