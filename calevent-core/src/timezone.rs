//! Static timezone lookup table.
//!
//! The built-in table ships as `data/timezones.toml` and is embedded at
//! compile time. Callers load it once and hand it to the serializer; it is
//! never mutated after that.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CalEventError, CalEventResult};

static BUILTIN_TIMEZONES: &str = include_str!("../data/timezones.toml");

/// One VTIMEZONE block's worth of data, rendered verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimezoneRecord {
    #[serde(rename = "TZID")]
    pub tzid: String,
    #[serde(rename = "X-LIC-LOCATION")]
    pub lic_location: String,
    #[serde(rename = "TZOFFSETFROM")]
    pub offset_from: String,
    #[serde(rename = "TZOFFSETTO")]
    pub offset_to: String,
    #[serde(rename = "TZNAME")]
    pub name: String,
    #[serde(rename = "DTSTART")]
    pub dtstart: String,
}

/// Read-only map from zone key (e.g. "UTC") to its record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimezoneTable {
    zones: HashMap<String, TimezoneRecord>,
}

impl TimezoneTable {
    /// The table shipped with calevent.
    pub fn builtin() -> CalEventResult<Self> {
        Self::from_toml_str(BUILTIN_TIMEZONES)
    }

    pub fn from_toml_str(content: &str) -> CalEventResult<Self> {
        toml::from_str(content).map_err(|e| CalEventError::Timezones(e.to_string()))
    }

    /// Load a table from a TOML file with one `[zone]` table per key.
    pub fn load(path: &Path) -> CalEventResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CalEventError::Timezones(format!("Could not read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn get(&self, key: &str) -> Option<&TimezoneRecord> {
        self.zones.get(key)
    }

    /// Add every entry of `other`, replacing records with the same key.
    pub fn extend(&mut self, other: TimezoneTable) {
        self.zones.extend(other.zones);
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.zones.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}
