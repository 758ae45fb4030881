//! Loading event options from files.

use std::path::Path;

use calevent_core::{CalEventError, CalEventResult, EventOptions};

/// Read `EventOptions` from a `.json` or `.toml` file, chosen by extension.
pub fn load_options(path: &Path) -> CalEventResult<EventOptions> {
    let content = std::fs::read_to_string(path)?;

    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => {
            serde_json::from_str(&content).map_err(|e| CalEventError::Options(e.to_string()))
        }
        Some("toml") => toml::from_str(&content).map_err(|e| CalEventError::Options(e.to_string())),
        _ => Err(CalEventError::Options(format!(
            "Unsupported options file '{}', expected .json or .toml",
            path.display()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calevent_core::{Attendee, DateInput};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn loads_json_options() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("event.json");
        fs::write(
            &path,
            r#"{
                "eventName": "Welcome Event to ICS",
                "dtstart": "Sat Nov 02 2014 13:15:00 GMT-0700 (PDT)",
                "attendees": [{ "name": "Support Team", "email": "support@example.com", "rsvp": true }],
                "filename": "welcome"
            }"#,
        )
        .unwrap();

        let options = load_options(&path).unwrap();
        assert_eq!(options.event_name.as_deref(), Some("Welcome Event to ICS"));
        assert_eq!(
            options.attendees,
            Some(vec![
                Attendee::new("Support Team", "support@example.com").with_rsvp(true)
            ])
        );
    }

    #[test]
    fn loads_toml_options() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("event.toml");
        fs::write(
            &path,
            r#"
eventName = "Planning"
location = "Room 4"
dtstart = "2025-03-20T15:00:00Z"
timezone = "UTC"

[organizer]
name = "A"
email = "b@c.com"
"#,
        )
        .unwrap();

        let options = load_options(&path).unwrap();
        assert_eq!(options.location.as_deref(), Some("Room 4"));
        assert!(matches!(options.dtstart, Some(DateInput::Instant(_))));
        assert_eq!(options.organizer.unwrap().email.as_deref(), Some("b@c.com"));
    }

    #[test]
    fn malformed_optional_values_are_dropped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("event.json");
        fs::write(
            &path,
            r#"{"eventName":"X","dtstart":1.5e12,"attendees":[{"name":"a","email":"b","rsvp":"yes"}]}"#,
        )
        .unwrap();

        let options = load_options(&path).unwrap();
        assert_eq!(options.event_name.as_deref(), Some("X"));
        assert_eq!(options.dtstart, None);
        assert_eq!(options.attendees, Some(vec![Attendee::new("a", "b")]));
    }

    #[test]
    fn malformed_toml_values_are_dropped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("event.toml");
        fs::write(
            &path,
            r#"
eventName = "Planning"
dtstart = true
dtend = 1.5

[[attendees]]
name = "a"
email = "b"
rsvp = "yes"
"#,
        )
        .unwrap();

        let options = load_options(&path).unwrap();
        assert_eq!(options.event_name.as_deref(), Some("Planning"));
        assert_eq!(options.dtstart, None);
        assert_eq!(options.dtend, None);
        assert_eq!(options.attendees, Some(vec![Attendee::new("a", "b")]));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("event.yaml");
        fs::write(&path, "eventName: x").unwrap();

        assert!(matches!(
            load_options(&path),
            Err(CalEventError::Options(_))
        ));
    }

    #[test]
    fn malformed_json_is_an_options_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("event.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            load_options(&path),
            Err(CalEventError::Options(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            load_options(Path::new("/nonexistent/event.json")),
            Err(CalEventError::Io(_))
        ));
    }
}
