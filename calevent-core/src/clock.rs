//! Time sources.
//!
//! The serializer reads "now" exactly once per call through a [`Clock`], so
//! tests can pin the instant instead of racing the system clock.
//! [`WallClock`] names the local zone used for wall-clock arithmetic and for
//! date inputs that carry no offset.

use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{CalEventError, CalEventResult};

pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Reads the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

/// The zone whose wall clock is used for local date arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WallClock {
    /// The system's local timezone
    #[default]
    Local,
    Zone(Tz),
}

impl WallClock {
    pub fn utc() -> Self {
        WallClock::Zone(chrono_tz::UTC)
    }

    /// Look up an IANA zone name such as "America/New_York".
    pub fn named(name: &str) -> CalEventResult<Self> {
        name.parse::<Tz>()
            .map(WallClock::Zone)
            .map_err(|e| CalEventError::Config(format!("Unknown timezone '{name}': {e}")))
    }

    /// Add one to the local hour field and convert back to UTC.
    ///
    /// Day/month/year roll over naturally. Across a DST transition this is
    /// not the same as adding 3600 seconds: the result is one hour later on
    /// the wall clock, not one hour later in elapsed time. `None` when the
    /// result falls outside chrono's representable range.
    pub fn add_hour(&self, instant: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            WallClock::Local => add_wall_clock_hour(instant, &chrono::Local),
            WallClock::Zone(tz) => add_wall_clock_hour(instant, tz),
        }
    }

    /// Interpret a wall-clock reading in this zone.
    pub fn resolve(&self, naive: NaiveDateTime) -> Option<DateTime<Utc>> {
        match self {
            WallClock::Local => resolve_local(&chrono::Local, naive),
            WallClock::Zone(tz) => resolve_local(tz, naive),
        }
    }

    /// What this wall clock reads at `instant`.
    pub fn reading(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        match self {
            WallClock::Local => instant.with_timezone(&chrono::Local).naive_local(),
            WallClock::Zone(tz) => instant.with_timezone(tz).naive_local(),
        }
    }
}

fn add_wall_clock_hour<Z: TimeZone>(instant: DateTime<Utc>, zone: &Z) -> Option<DateTime<Utc>> {
    let local = instant.with_timezone(zone).naive_local();
    resolve_local(zone, local.checked_add_signed(Duration::hours(1))?)
}

/// Map a local reading to an instant. Ambiguous readings (clocks going back)
/// take the earlier instant. Readings inside a gap (clocks going forward)
/// use the offset in force before the gap, which lands past it.
fn resolve_local<Z: TimeZone>(zone: &Z, naive: NaiveDateTime) -> Option<DateTime<Utc>> {
    match zone.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Some(earliest.with_timezone(&Utc)),
        LocalResult::None => {
            let day_before = naive.checked_sub_signed(Duration::days(1))?;
            let before_gap = zone.offset_from_utc_datetime(&day_before).fix();
            let utc = naive.checked_sub_signed(Duration::seconds(i64::from(
                before_gap.local_minus_utc(),
            )))?;
            Some(Utc.from_utc_datetime(&utc))
        }
    }
}
