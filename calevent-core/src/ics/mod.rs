//! ICS event generation.
//!
//! Serialization runs in two steps: [`normalize`] resolves the options into
//! canonical fields, then [`render`] lays them out as iCalendar lines.

pub mod normalize;
pub mod render;

pub use normalize::{AttendeeField, EventFields, OrganizerField, format_stamp};
pub use render::SerializedEvent;

use crate::clock::{Clock, SystemClock, WallClock};
use crate::error::CalEventResult;
use crate::event::EventOptions;
use crate::timezone::TimezoneTable;

/// Turns [`EventOptions`] into a calendar document.
///
/// Holds the read-only timezone table and the time sources. Serialization is
/// a pure function of the options apart from one clock read per call.
#[derive(Debug, Clone)]
pub struct EventSerializer<C = SystemClock> {
    clock: C,
    wall_clock: WallClock,
    timezones: TimezoneTable,
}

impl EventSerializer<SystemClock> {
    /// System clock, local wall clock and the built-in timezone table.
    pub fn new() -> CalEventResult<Self> {
        Ok(Self::with_parts(
            SystemClock,
            WallClock::Local,
            TimezoneTable::builtin()?,
        ))
    }
}

impl<C: Clock> EventSerializer<C> {
    pub fn with_parts(clock: C, wall_clock: WallClock, timezones: TimezoneTable) -> Self {
        EventSerializer {
            clock,
            wall_clock,
            timezones,
        }
    }

    pub fn with_clock<D: Clock>(self, clock: D) -> EventSerializer<D> {
        EventSerializer {
            clock,
            wall_clock: self.wall_clock,
            timezones: self.timezones,
        }
    }

    pub fn with_wall_clock(mut self, wall_clock: WallClock) -> Self {
        self.wall_clock = wall_clock;
        self
    }

    pub fn timezones(&self) -> &TimezoneTable {
        &self.timezones
    }

    pub fn wall_clock(&self) -> WallClock {
        self.wall_clock
    }

    pub fn fields(&self, options: &EventOptions) -> EventFields {
        normalize::normalize(options, self.clock.now(), &self.timezones, &self.wall_clock)
    }

    pub fn serialize(&self, options: &EventOptions) -> SerializedEvent {
        render::render(&self.fields(options))
    }

    /// The CRLF-joined document.
    pub fn serialize_to_string(&self, options: &EventOptions) -> String {
        self.serialize(options).to_ics_string()
    }
}

/// Serialize with the system clock and built-in timezones.
///
/// Only fails if the shipped timezone table cannot be parsed.
pub fn get_event(options: &EventOptions) -> CalEventResult<String> {
    Ok(EventSerializer::new()?.serialize_to_string(options))
}
