use common_utils::{
    errors::CustomResult,
    validation::{validate_app_url, validate_non_empty},
};
use error_stack::ResultExt;

use super::settings::{DelegatedAuthentication, ThreeDS2Settings};
use crate::core::errors::ApplicationError;

impl ThreeDS2Settings {
    pub fn validate(&self) -> CustomResult<(), ApplicationError> {
        if let Some(requestor_app_url) = &self.requestor_app_url {
            validate_app_url(requestor_app_url).change_context(
                ApplicationError::InvalidConfigurationValueError(
                    "three_ds2.requestor_app_url".into(),
                ),
            )?;
        }

        if self.compact_flow_min_version.major() < 2 {
            return Err(ApplicationError::InvalidConfigurationValueError(
                "three_ds2.compact_flow_min_version must be at least 2.0.0".into(),
            )
            .into());
        }

        self.delegated_authentication
            .as_ref()
            .map(DelegatedAuthentication::validate)
            .transpose()?;

        Ok(())
    }
}

impl DelegatedAuthentication {
    pub fn validate(&self) -> CustomResult<(), ApplicationError> {
        [
            (
                "three_ds2.delegated_authentication.localized_registration_reason",
                &self.localized_registration_reason,
            ),
            (
                "three_ds2.delegated_authentication.localized_authentication_reason",
                &self.localized_authentication_reason,
            ),
            (
                "three_ds2.delegated_authentication.relying_party_identifier",
                &self.relying_party_identifier,
            ),
        ]
        .into_iter()
        .try_for_each(|(field_name, value)| {
            validate_non_empty(field_name, value).change_context(
                ApplicationError::InvalidConfigurationValueError(field_name.into()),
            )
        })
    }
}
