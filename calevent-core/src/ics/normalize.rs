//! Field normalization.
//!
//! Turns loosely-typed [`EventOptions`] into the canonical field set the
//! renderer works from. Nothing here fails: bad optional input is dropped
//! and unparseable dates fall back to "now".

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use tracing::debug;

use crate::clock::WallClock;
use crate::event::{Attendee, DateInput, EventOptions, Organizer, non_empty};
use crate::timezone::{TimezoneRecord, TimezoneTable};

const DEFAULT_SUMMARY: &str = "New Event";

/// Date-times without an offset, read on the wall clock.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// JavaScript `Date.prototype.toString()` output without the leading weekday
/// and the trailing zone name: `Nov 02 2014 13:15:00 GMT-0700`
const JS_DATE_FORMAT: &str = "%b %d %Y %H:%M:%S GMT%z";

const WEEKDAYS: &[&str] = &["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Canonical, fully-resolved fields for one event.
#[derive(Debug, Clone, PartialEq)]
pub struct EventFields {
    pub dtstamp: String,
    pub dtstart: String,
    pub dtend: String,
    pub summary: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub organizer: Option<OrganizerField>,
    pub attendees: Vec<AttendeeField>,
    pub timezone: Option<TimezoneRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizerField {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendeeField {
    pub name: String,
    pub email: String,
    pub rsvp: bool,
}

/// Resolve every field of `options`. `now` stands in for any missing date.
pub fn normalize(
    options: &EventOptions,
    now: DateTime<Utc>,
    timezones: &TimezoneTable,
    wall_clock: &WallClock,
) -> EventFields {
    let dtstamp =
        resolve_date(options.dtstamp.as_ref(), "dtstamp", now, wall_clock).unwrap_or(now);
    let dtstart =
        resolve_date(options.dtstart.as_ref(), "dtstart", now, wall_clock).unwrap_or(now);
    let dtend = resolve_date(options.dtend.as_ref(), "dtend", now, wall_clock)
        .or_else(|| wall_clock.add_hour(dtstart).filter(in_stamp_range))
        .or_else(|| wall_clock.add_hour(now))
        .unwrap_or(now);

    EventFields {
        dtstamp: format_stamp(dtstamp),
        dtstart: format_stamp(dtstart),
        dtend: format_stamp(dtend),
        summary: non_empty(options.event_name.as_ref())
            .unwrap_or(DEFAULT_SUMMARY)
            .to_string(),
        description: non_empty(options.description.as_ref()).map(str::to_string),
        location: non_empty(options.location.as_ref()).map(str::to_string),
        organizer: organizer(options.organizer.as_ref()),
        attendees: attendees(options.attendees.as_deref()),
        timezone: timezone(options.timezone.as_ref(), timezones),
    }
}

/// Format an instant as `YYYYMMDDTHHMM00Z`.
///
/// Seconds are dropped, not rounded. Years outside 0000-9999 do not fit the
/// layout; [`resolve_date`] never returns them.
pub fn format_stamp(instant: DateTime<Utc>) -> String {
    instant.format("%Y%m%dT%H%M00Z").to_string()
}

/// Best-effort conversion of a date input. `None` means "treat as absent".
///
/// Relative text such as "tomorrow" is read against `now` on the wall clock.
pub fn resolve_date(
    input: Option<&DateInput>,
    field: &str,
    now: DateTime<Utc>,
    wall_clock: &WallClock,
) -> Option<DateTime<Utc>> {
    let resolved = match input? {
        DateInput::Millis(ms) => DateTime::from_timestamp_millis(*ms),
        DateInput::Instant(dt) => Some(dt.with_timezone(&Utc)),
        DateInput::Text(text) => {
            let text = text.trim();
            if text.is_empty() {
                return None;
            }
            parse_date_text(text, now, wall_clock)
        }
    }
    .filter(in_stamp_range);

    if resolved.is_none() {
        debug!(field, input = ?input, "Unparseable date input, using current time");
    }
    resolved
}

/// Try each supported date representation in turn.
pub fn parse_date_text(
    text: &str,
    now: DateTime<Utc>,
    wall_clock: &WallClock,
) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(dt.with_timezone(&Utc));
    }

    // The weekday is not checked against the date, same as a browser would
    let without_zone_name = text.split(" (").next().unwrap_or(text);
    let without_weekday = match without_zone_name.split_once(' ') {
        Some((first, rest)) if WEEKDAYS.contains(&first) => rest,
        _ => without_zone_name,
    };
    if let Ok(dt) = DateTime::parse_from_str(without_weekday, JS_DATE_FORMAT) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Some(naive) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
    {
        return wall_clock.resolve(naive);
    }

    // Date-only ISO strings are UTC midnight, not local midnight
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }

    fuzzydate::parse_relative_to(text, wall_clock.reading(now))
        .ok()
        .and_then(|naive| wall_clock.resolve(naive))
}

/// Years that fit the four-digit stamp layout.
fn in_stamp_range(instant: &DateTime<Utc>) -> bool {
    (0..=9999).contains(&instant.year())
}

fn organizer(organizer: Option<&Organizer>) -> Option<OrganizerField> {
    let org = organizer?;
    match (non_empty(org.name.as_ref()), non_empty(org.email.as_ref())) {
        (Some(name), Some(email)) => Some(OrganizerField {
            name: name.to_string(),
            email: email.to_string(),
        }),
        _ => {
            debug!("Organizer needs both name and email, omitting it");
            None
        }
    }
}

/// Only the first attendee is checked for a name and email. The rest are
/// rendered as given, with missing fields left empty.
fn attendees(attendees: Option<&[Attendee]>) -> Vec<AttendeeField> {
    let list = attendees.unwrap_or_default();
    let Some(first) = list.first() else {
        return Vec::new();
    };

    if non_empty(first.name.as_ref()).is_none() || non_empty(first.email.as_ref()).is_none() {
        debug!("First attendee needs both name and email, omitting attendees");
        return Vec::new();
    }

    list.iter()
        .map(|a| AttendeeField {
            name: a.name.clone().unwrap_or_default(),
            email: a.email.clone().unwrap_or_default(),
            rsvp: a.rsvp.unwrap_or(false),
        })
        .collect()
}

fn timezone(key: Option<&String>, timezones: &TimezoneTable) -> Option<TimezoneRecord> {
    let key = non_empty(key)?;
    let record = timezones.get(key).cloned();
    if record.is_none() {
        debug!(timezone = key, "Unknown timezone key, omitting VTIMEZONE");
    }
    record
}
