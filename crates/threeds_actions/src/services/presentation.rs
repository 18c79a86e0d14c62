use common_utils::errors::CustomResult;

use crate::core::errors::PresentationError;

/// Texts shown on the delegated authentication screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresentationContext {
    pub localized_reason: String,
    pub relying_party_identifier: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationInput {
    Register,
    NotNow,
    NoInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalInput {
    UseBiometrics,
    ApproveDifferently,
    RemoveCredentials,
    NoInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorScreen {
    RegistrationFailed,
    ApprovalFailed,
    CredentialsRemoved,
}

/// Presents the delegated authentication screens and reports what the shopper chose.
#[async_trait::async_trait]
pub trait PresentationDelegate: Send + Sync {
    async fn present_registration(
        &self,
        context: &PresentationContext,
    ) -> CustomResult<RegistrationInput, PresentationError>;

    async fn present_approval(
        &self,
        context: &PresentationContext,
    ) -> CustomResult<ApprovalInput, PresentationError>;

    async fn present_error(&self, _screen: ErrorScreen) -> CustomResult<(), PresentationError> {
        Ok(())
    }
}
