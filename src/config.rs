//! calevent configuration.

use std::path::{Path, PathBuf};

use calevent_core::{CalEventError, CalEventResult, TimezoneTable, WallClock};
use config::{Config, File};
use serde::{Deserialize, Serialize};

static DEFAULT_FILENAME: &str = "calendar-event.ics";

fn default_filename() -> String {
    DEFAULT_FILENAME.to_string()
}

fn is_default_filename(name: &String) -> bool {
    name == DEFAULT_FILENAME
}

/// Configuration at ~/.config/calevent/config.toml
///
/// Every key is optional; a missing file gives the defaults, which write
/// events to the system temp directory.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CalEventConfig {
    /// Directory for events persisted without an explicit path
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,

    /// File name used when the options carry none
    #[serde(default = "default_filename", skip_serializing_if = "is_default_filename")]
    pub default_filename: String,

    /// IANA zone for wall-clock arithmetic; the system zone if unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wall_clock_timezone: Option<String>,

    /// Extra VTIMEZONE records merged over the built-in table
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezones_file: Option<PathBuf>,
}

impl Default for CalEventConfig {
    fn default() -> Self {
        CalEventConfig {
            output_dir: None,
            default_filename: default_filename(),
            wall_clock_timezone: None,
            timezones_file: None,
        }
    }
}

impl CalEventConfig {
    pub fn config_path() -> CalEventResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CalEventError::Config("Could not determine config directory".into()))?
            .join("calevent");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location.
    pub fn load() -> CalEventResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load from `path`; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> CalEventResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .build()
            .map_err(|e| CalEventError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CalEventError::Config(e.to_string()))
    }

    /// Where events without an explicit path go.
    pub fn output_dir(&self) -> PathBuf {
        match &self.output_dir {
            Some(dir) => expand_tilde(dir),
            None => std::env::temp_dir(),
        }
    }

    pub fn wall_clock(&self) -> CalEventResult<WallClock> {
        match &self.wall_clock_timezone {
            Some(name) => WallClock::named(name),
            None => Ok(WallClock::Local),
        }
    }

    /// The built-in table plus anything in `timezones_file`.
    pub fn timezones(&self) -> CalEventResult<TimezoneTable> {
        let mut table = TimezoneTable::builtin()?;
        if let Some(ref path) = self.timezones_file {
            table.extend(TimezoneTable::load(&expand_tilde(path))?);
        }
        Ok(table)
    }
}

fn expand_tilde(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = CalEventConfig::load_from(&dir.path().join("config.toml")).unwrap();

        assert_eq!(config, CalEventConfig::default());
        assert_eq!(config.default_filename, "calendar-event.ics");
        assert_eq!(config.output_dir(), std::env::temp_dir());
        assert_eq!(config.wall_clock().unwrap(), WallClock::Local);
    }

    #[test]
    fn loads_every_key() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
output_dir = "/var/calendars"
default_filename = "invite.ics"
wall_clock_timezone = "Europe/Paris"
"#,
        )
        .unwrap();

        let config = CalEventConfig::load_from(&path).unwrap();
        assert_eq!(config.output_dir(), PathBuf::from("/var/calendars"));
        assert_eq!(config.default_filename, "invite.ics");
        assert_eq!(
            config.wall_clock().unwrap(),
            WallClock::named("Europe/Paris").unwrap()
        );
    }

    #[test]
    fn tilde_in_output_dir_is_expanded() {
        let config = CalEventConfig {
            output_dir: Some(PathBuf::from("~/calendars")),
            ..Default::default()
        };
        assert!(!config.output_dir().to_string_lossy().starts_with('~'));
    }

    #[test]
    fn unknown_wall_clock_zone_is_an_error() {
        let config = CalEventConfig {
            wall_clock_timezone: Some("Not/AZone".to_string()),
            ..Default::default()
        };
        assert!(matches!(config.wall_clock(), Err(CalEventError::Config(_))));
    }

    #[test]
    fn timezones_file_is_merged() {
        let dir = TempDir::new().unwrap();
        let tz_path = dir.path().join("zones.toml");
        fs::write(
            &tz_path,
            r#"
["Pacific/Auckland"]
TZID = "Pacific/Auckland"
X-LIC-LOCATION = "Pacific/Auckland"
TZOFFSETFROM = "+1300"
TZOFFSETTO = "+1200"
TZNAME = "NZST"
DTSTART = "19700405T030000"
"#,
        )
        .unwrap();

        let config = CalEventConfig {
            timezones_file: Some(tz_path),
            ..Default::default()
        };
        let table = config.timezones().unwrap();
        assert!(table.get("Pacific/Auckland").is_some());
        assert!(table.get("UTC").is_some());
    }

    #[test]
    fn malformed_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "output_dir = [1, 2").unwrap();

        assert!(matches!(
            CalEventConfig::load_from(&path),
            Err(CalEventError::Config(_))
        ));
    }
}
