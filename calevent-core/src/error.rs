//! Error types for calevent.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading configuration or persisting events.
///
/// Serialization itself never fails: malformed optional input is dropped
/// from the output instead.
#[derive(Error, Debug)]
pub enum CalEventError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Timezone table error: {0}")]
    Timezones(String),

    #[error("Invalid event options: {0}")]
    Options(String),

    #[error("Could not write event to {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for calevent operations.
pub type CalEventResult<T> = Result<T, CalEventError>;
