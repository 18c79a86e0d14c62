use error_stack::Report;

use crate::{
    core::errors::ThreeDS2ComponentError,
    types::{ActionComponentData, AdditionalDetails},
};

/// Component which produced an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum ComponentSource {
    ThreeDS2,
    Redirect,
}

impl ComponentSource {
    pub(crate) fn of_data(data: &ActionComponentData) -> Self {
        match data.details {
            AdditionalDetails::ThreeDS2(_) => Self::ThreeDS2,
            AdditionalDetails::Redirect(_) => Self::Redirect,
        }
    }

    pub(crate) fn of_error(error: &Report<ThreeDS2ComponentError>) -> Self {
        match error.current_context() {
            ThreeDS2ComponentError::RedirectFailed(_) => Self::Redirect,
            _ => Self::ThreeDS2,
        }
    }
}

/// Receives the single terminal outcome of every handled action.
pub trait ActionComponentDelegate: Send + Sync {
    fn did_provide(&self, data: ActionComponentData, from: ComponentSource);

    fn did_fail(&self, error: Report<ThreeDS2ComponentError>, from: ComponentSource);
}
