//! Line rendering.
//!
//! Lines are emitted in a fixed order and joined with CRLF. Values are
//! written as-is: no RFC 5545 line folding and no escaping of commas,
//! semicolons or backslashes in text.

use std::fmt;

use super::normalize::EventFields;
use crate::timezone::TimezoneRecord;

/// A complete calendar document, one property per line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializedEvent {
    lines: Vec<String>,
}

impl SerializedEvent {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Join the lines with CRLF. There is no CRLF after the last line.
    pub fn to_ics_string(&self) -> String {
        self.lines.join("\r\n")
    }
}

impl fmt::Display for SerializedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_ics_string())
    }
}

pub fn render(fields: &EventFields) -> SerializedEvent {
    let mut lines = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        "BEGIN:VEVENT".to_string(),
        format!("DTSTAMP:{}", fields.dtstamp),
    ];

    if let Some(ref org) = fields.organizer {
        lines.push(format!("ORGANIZER;CN={}:MAILTO:{}", org.name, org.email));
    }

    for attendee in &fields.attendees {
        let rsvp = if attendee.rsvp { "TRUE" } else { "FALSE" };
        lines.push(format!(
            "ATTENDEE;CN=\"{}\";RSVP={}:mailto:{}",
            attendee.name, rsvp, attendee.email
        ));
    }

    if let Some(ref tz) = fields.timezone {
        push_timezone(&mut lines, tz);
    }

    lines.push(format!("DTSTART:{}", fields.dtstart));
    lines.push(format!("DTEND:{}", fields.dtend));

    if let Some(ref loc) = fields.location {
        lines.push(format!("LOCATION:{loc}"));
    }

    if let Some(ref desc) = fields.description {
        lines.push(format!("DESCRIPTION:{desc}"));
    }

    lines.push(format!("SUMMARY:{}", fields.summary));
    lines.push("END:VEVENT".to_string());
    lines.push("END:VCALENDAR".to_string());

    SerializedEvent { lines }
}

fn push_timezone(lines: &mut Vec<String>, tz: &TimezoneRecord) {
    lines.push("BEGIN:VTIMEZONE".to_string());
    lines.push(format!("TZID:{}", tz.tzid));
    lines.push(format!("X-LIC-LOCATION:{}", tz.lic_location));
    lines.push("BEGIN:STANDARD".to_string());
    lines.push(format!("TZOFFSETFROM:{}", tz.offset_from));
    lines.push(format!("TZOFFSETTO:{}", tz.offset_to));
    lines.push(format!("TZNAME:{}", tz.name));
    lines.push(format!("DTSTART:{}", tz.dtstart));
    lines.push("END:STANDARD".to_string());
    lines.push("END:VTIMEZONE".to_string());
}
