#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR" ), "/", "README.md"))]

pub mod configs;
pub mod consts;
pub mod core;
pub mod env;
pub mod services;
pub mod types;

pub use env::logger;

pub use crate::{
    core::{
        component::{Collaborators, ThreeDS2Component},
        errors::{ThreeDS2ComponentError, ThreeDS2Result},
    },
    types::{Action, ActionComponentData, AdditionalDetails, ThreeDS2Details, ThreeDSResult},
};
