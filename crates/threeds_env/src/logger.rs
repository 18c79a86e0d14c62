//!
//! Logger of the system.
//!

pub use tracing::{debug, error, event as log, info, instrument, warn};
pub use tracing_subscriber::util::TryInitError;

pub mod config;
mod setup;
pub mod types;

pub use self::{
    config::{Config, Log, LogFormat},
    setup::{setup, TelemetryGuard},
    types::{Flow, Tag},
};
