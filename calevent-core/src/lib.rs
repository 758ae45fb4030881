//! Core types for calevent.
//!
//! This crate turns a loosely-structured option set into iCalendar text:
//! - `event` holds the input types (`EventOptions`, `Organizer`, `Attendee`)
//! - `ics` normalizes the options and renders the document
//! - `timezone` is the static VTIMEZONE lookup table
//! - `clock` supplies "now" and the wall-clock zone
//!
//! It performs no file I/O apart from optionally loading a timezone table.

pub mod clock;
pub mod error;
pub mod event;
pub mod ics;
pub mod timezone;

pub use clock::{Clock, FixedClock, SystemClock, WallClock};
pub use error::{CalEventError, CalEventResult};
pub use event::*;
pub use ics::{EventSerializer, SerializedEvent, get_event};
pub use timezone::{TimezoneRecord, TimezoneTable};
