#![warn(missing_docs)]

//!
//! Environment of the 3-D Secure action handler: logger, basic config, its environment awareness.
//!

#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR" ), "/", "README.md"))]

pub mod env;
pub mod logger;

#[doc(inline)]
pub use logger::*;
pub use once_cell;
pub use tracing;
pub use tracing_appender;

#[doc(inline)]
pub use self::env::*;
