//! Persisting serialized events to disk.

use std::path::{Path, PathBuf};

use calevent_core::{
    CalEventError, CalEventResult, Clock, EventOptions, EventSerializer, SystemClock,
};
use tracing::{debug, info};

use crate::config::CalEventConfig;

/// Writes events as `.ics` files.
///
/// Destination, in order of preference:
/// 1. an explicit path, used verbatim
/// 2. `options.filename` under the output directory, with `.ics` appended
///    unless it already ends in `.ics`
/// 3. the default file name under the output directory
#[derive(Debug, Clone)]
pub struct EventWriter<C = SystemClock> {
    serializer: EventSerializer<C>,
    output_dir: PathBuf,
    default_filename: String,
}

impl EventWriter<SystemClock> {
    /// Writes to the system temp directory as `calendar-event.ics`.
    pub fn new() -> CalEventResult<Self> {
        Self::from_config(&CalEventConfig::default())
    }

    pub fn from_config(config: &CalEventConfig) -> CalEventResult<Self> {
        let serializer =
            EventSerializer::with_parts(SystemClock, config.wall_clock()?, config.timezones()?);

        Ok(EventWriter {
            serializer,
            output_dir: config.output_dir(),
            default_filename: config.default_filename.clone(),
        })
    }
}

impl<C: Clock> EventWriter<C> {
    pub fn with_serializer(serializer: EventSerializer<C>, output_dir: impl Into<PathBuf>) -> Self {
        EventWriter {
            serializer,
            output_dir: output_dir.into(),
            default_filename: CalEventConfig::default().default_filename,
        }
    }

    pub fn serializer(&self) -> &EventSerializer<C> {
        &self.serializer
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn resolve_destination(&self, options: &EventOptions, path: Option<&Path>) -> PathBuf {
        if let Some(path) = path.filter(|p| !p.as_os_str().is_empty()) {
            return path.to_path_buf();
        }

        match options.filename.as_deref().filter(|f| !f.is_empty()) {
            Some(filename) => self.output_dir.join(with_ics_extension(filename)),
            None => self.output_dir.join(&self.default_filename),
        }
    }

    /// Serialize `options` and write the document. Returns the path written.
    pub async fn create_event(
        &self,
        options: &EventOptions,
        path: Option<&Path>,
    ) -> CalEventResult<PathBuf> {
        let dest = self.resolve_destination(options, path);
        debug!(path = %dest.display(), "Resolved event destination");

        let content = self.serializer.serialize_to_string(options);

        tokio::fs::write(&dest, content.as_bytes())
            .await
            .map_err(|source| CalEventError::Write {
                path: dest.clone(),
                source,
            })?;

        info!(path = %dest.display(), bytes = content.len(), "Wrote event");
        Ok(dest)
    }
}

/// Serialize and write with the default writer (system temp directory).
pub async fn create_event(options: &EventOptions, path: Option<&Path>) -> CalEventResult<PathBuf> {
    EventWriter::new()?.create_event(options, path).await
}

fn with_ics_extension(filename: &str) -> String {
    if filename.ends_with(".ics") {
        filename.to_string()
    } else {
        format!("{filename}.ics")
    }
}
