//! calevent: generate iCalendar events and write them to `.ics` files.
//!
//! Serialization lives in `calevent-core` and is re-exported here. This
//! crate adds the file-facing pieces:
//! - `writer` resolves a destination and persists the document
//! - `config` loads `~/.config/calevent/config.toml`
//! - `options` reads `EventOptions` from JSON or TOML files

pub mod config;
pub mod options;
pub mod writer;

pub use calevent_core::*;
pub use config::CalEventConfig;
pub use options::load_options;
pub use writer::{EventWriter, create_event};
