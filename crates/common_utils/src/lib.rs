#![warn(missing_docs, clippy::unwrap_in_result)]
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR" ), "/", "README.md"))]

pub mod consts;
pub mod errors;
pub mod ext_traits;
pub mod validation;
