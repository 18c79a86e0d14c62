#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(missing_docs)]

//!
//! Secret wrappers for values exchanged during 3-D Secure authentication.
//!
//! Authorisation tokens, payment data and delegated authentication SDK payloads are carried
//! around in [`Secret`] so that they never show up in `Debug` output or logs by accident.
//!

#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR" ), "/", "README.md"))]

mod strategy;

pub use strategy::{Strategy, TokenLength, WithType};
mod abs;
pub use abs::PeekInterface;

mod secret;
pub use secret::Secret;

#[cfg(feature = "serde")]
mod serde;
#[cfg(feature = "serde")]
pub use crate::serde::SerializableSecret;

