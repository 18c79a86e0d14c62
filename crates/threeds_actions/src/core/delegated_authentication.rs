//!
//! Delegated authentication: biometric approval in place of the issuer challenge, and device
//! registration after a challenge.
//!
//! Neither state machine can fail the payment. Every branch ends in [`ApprovalOutcome`] or
//! [`RegistrationOutcome`], both of which carry an SDK output or a [`FallbackReason`].
//!

use std::sync::Arc;

use error_stack::{Report, ResultExt};
use threeds_env::{instrument, tracing, Flow, Tag};

use super::errors::{AuthenticationSdkError, DelegatedAuthenticationError, PresentationError};
use crate::{
    configs::settings::{DelegatedAuthentication, RegistrationPolicy},
    logger,
    services::{
        ApprovalInput, AuthenticationSdk, ErrorScreen, PresentationContext, PresentationDelegate,
        RegistrationInput,
    },
};

/// Why delegated authentication did not produce an output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum FallbackReason {
    Unsupported,
    NotRegistered,
    /// "Not now" on registration, "approve differently" on approval.
    Declined,
    NoInput,
    CredentialsRemoved,
    SdkFailure,
    PresentationUnavailable,
    /// The approval or registration screen was dismissed.
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApprovalOutcome {
    Approved(String),
    Fallback(FallbackReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    Registered(String),
    Fallback(FallbackReason),
}

impl ApprovalOutcome {
    pub fn into_sdk_output(self) -> Option<String> {
        match self {
            Self::Approved(output) => Some(output),
            Self::Fallback(_) => None,
        }
    }
}

impl RegistrationOutcome {
    pub fn into_sdk_output(self) -> Option<String> {
        match self {
            Self::Registered(output) => Some(output),
            Self::Fallback(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UserInput {
    #[default]
    NoInput,
    Approve,
    Fallback,
    RemoveCredentials,
}

/// Delegated authentication state of one payment, carried from fingerprint to challenge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DelegatedAuthenticationState {
    pub is_device_registration_flow: bool,
    pub user_input: UserInput,
}

impl DelegatedAuthenticationState {
    pub fn from_approval(outcome: &ApprovalOutcome) -> Self {
        match outcome {
            ApprovalOutcome::Approved(_) => Self {
                is_device_registration_flow: false,
                user_input: UserInput::Approve,
            },
            ApprovalOutcome::Fallback(reason) => Self {
                is_device_registration_flow: *reason == FallbackReason::NotRegistered,
                user_input: match reason {
                    FallbackReason::Declined => UserInput::Fallback,
                    FallbackReason::CredentialsRemoved => UserInput::RemoveCredentials,
                    _ => UserInput::NoInput,
                },
            },
        }
    }

    /// Registration is only offered to a device without credentials whose shopper has not
    /// already chosen something else during this payment.
    pub fn can_offer_registration(&self) -> bool {
        self.is_device_registration_flow && self.user_input == UserInput::NoInput
    }
}

#[derive(Debug)]
enum ApprovalState {
    CheckingSupport,
    CheckingRegistration,
    PresentingApproval,
    Authenticating,
    RemovingCredentials,
    Done(ApprovalOutcome),
}

#[derive(Debug)]
enum RegistrationState {
    CheckingSupport,
    PresentingRegistration,
    Registering,
    Done(RegistrationOutcome),
}

pub struct DelegatedAuthenticationController {
    sdk: Arc<dyn AuthenticationSdk>,
    presenter: Option<Arc<dyn PresentationDelegate>>,
    configuration: DelegatedAuthentication,
}

impl std::fmt::Debug for DelegatedAuthenticationController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DelegatedAuthenticationController")
            .field("has_presenter", &self.presenter.is_some())
            .field("configuration", &self.configuration)
            .finish_non_exhaustive()
    }
}

impl DelegatedAuthenticationController {
    pub fn new(
        sdk: Arc<dyn AuthenticationSdk>,
        presenter: Option<Arc<dyn PresentationDelegate>>,
        configuration: DelegatedAuthentication,
    ) -> Self {
        Self {
            sdk,
            presenter,
            configuration,
        }
    }

    pub fn registration_policy(&self) -> RegistrationPolicy {
        self.configuration.registration_policy
    }

    /// Try to approve the payment with the device credential.
    ///
    /// Without a presenter the credential is used silently.
    #[instrument(skip_all, fields(flow = %Flow::DelegatedAuthenticationApproval))]
    pub async fn approve(&self, sdk_input: &str) -> ApprovalOutcome {
        let mut state = ApprovalState::CheckingSupport;
        loop {
            logger::debug!(?state, "delegated authentication approval");
            state = match state {
                ApprovalState::CheckingSupport => {
                    if self.sdk.is_device_supported().await {
                        ApprovalState::CheckingRegistration
                    } else {
                        ApprovalState::Done(ApprovalOutcome::Fallback(FallbackReason::Unsupported))
                    }
                }
                ApprovalState::CheckingRegistration => {
                    match self.sdk.is_device_registered(sdk_input).await {
                        Ok(true) => ApprovalState::PresentingApproval,
                        Ok(false) => ApprovalState::Done(ApprovalOutcome::Fallback(
                            FallbackReason::NotRegistered,
                        )),
                        Err(error) => ApprovalState::Done(ApprovalOutcome::Fallback(
                            sdk_fallback_reason(
                                error,
                                DelegatedAuthenticationError::RegistrationCheckFailed,
                            ),
                        )),
                    }
                }
                ApprovalState::PresentingApproval => match &self.presenter {
                    None => ApprovalState::Authenticating,
                    Some(presenter) => {
                        let context = self.context(&self.configuration.localized_authentication_reason);
                        logger::debug!(tag = ?Tag::Presentation, "presenting approval screen");
                        match presenter.present_approval(&context).await {
                            Ok(ApprovalInput::UseBiometrics) => ApprovalState::Authenticating,
                            Ok(ApprovalInput::ApproveDifferently) => ApprovalState::Done(
                                ApprovalOutcome::Fallback(FallbackReason::Declined),
                            ),
                            Ok(ApprovalInput::RemoveCredentials) => {
                                ApprovalState::RemovingCredentials
                            }
                            Ok(ApprovalInput::NoInput) => ApprovalState::Done(
                                ApprovalOutcome::Fallback(FallbackReason::NoInput),
                            ),
                            Err(error) => match error.current_context() {
                                PresentationError::Cancelled => ApprovalState::Done(
                                    ApprovalOutcome::Fallback(FallbackReason::Cancelled),
                                ),
                                PresentationError::NotAvailable => {
                                    logger::warn!(?error, "approval screen could not be presented");
                                    ApprovalState::Done(ApprovalOutcome::Fallback(
                                        FallbackReason::PresentationUnavailable,
                                    ))
                                }
                            },
                        }
                    }
                },
                ApprovalState::Authenticating => match self.sdk.authenticate(sdk_input).await {
                    Ok(output) => ApprovalState::Done(ApprovalOutcome::Approved(output)),
                    Err(error) => {
                        let reason = sdk_fallback_reason(
                            error,
                            DelegatedAuthenticationError::AuthenticationFailed,
                        );
                        if reason == FallbackReason::SdkFailure {
                            self.present_error(ErrorScreen::ApprovalFailed).await;
                        }
                        ApprovalState::Done(ApprovalOutcome::Fallback(reason))
                    }
                },
                ApprovalState::RemovingCredentials => {
                    if let Err(error) = self.sdk.reset().await {
                        logger::warn!(
                            error = ?error.change_context(DelegatedAuthenticationError::ResetFailed),
                            "failed to remove device credentials"
                        );
                    }
                    self.present_error(ErrorScreen::CredentialsRemoved).await;
                    ApprovalState::Done(ApprovalOutcome::Fallback(
                        FallbackReason::CredentialsRemoved,
                    ))
                }
                ApprovalState::Done(outcome) => {
                    logger::info!(tag = ?Tag::AuthenticationSdkCall, ?outcome, "approval finished");
                    return outcome;
                }
            };
        }
    }

    /// Offer to register the device for future payments.
    #[instrument(skip_all, fields(flow = %Flow::DelegatedAuthenticationRegistration))]
    pub async fn register(&self, sdk_input: &str) -> RegistrationOutcome {
        let mut state = RegistrationState::CheckingSupport;
        loop {
            logger::debug!(?state, "delegated authentication registration");
            state = match state {
                RegistrationState::CheckingSupport => {
                    if self.sdk.is_device_supported().await {
                        RegistrationState::PresentingRegistration
                    } else {
                        RegistrationState::Done(RegistrationOutcome::Fallback(
                            FallbackReason::Unsupported,
                        ))
                    }
                }
                RegistrationState::PresentingRegistration => {
                    let Some(presenter) = &self.presenter else {
                        return RegistrationOutcome::Fallback(
                            FallbackReason::PresentationUnavailable,
                        );
                    };
                    let context = self.context(&self.configuration.localized_registration_reason);
                    logger::debug!(tag = ?Tag::Presentation, "presenting registration screen");
                    match presenter.present_registration(&context).await {
                        Ok(RegistrationInput::Register) => RegistrationState::Registering,
                        Ok(RegistrationInput::NotNow) => RegistrationState::Done(
                            RegistrationOutcome::Fallback(FallbackReason::Declined),
                        ),
                        Ok(RegistrationInput::NoInput) => RegistrationState::Done(
                            RegistrationOutcome::Fallback(FallbackReason::NoInput),
                        ),
                        Err(error) => {
                            let reason = match error.current_context() {
                                PresentationError::Cancelled => FallbackReason::Cancelled,
                                PresentationError::NotAvailable => {
                                    FallbackReason::PresentationUnavailable
                                }
                            };
                            RegistrationState::Done(RegistrationOutcome::Fallback(reason))
                        }
                    }
                }
                RegistrationState::Registering => match self.sdk.register(sdk_input).await {
                    Ok(output) => RegistrationState::Done(RegistrationOutcome::Registered(output)),
                    Err(error) => {
                        let reason = sdk_fallback_reason(
                            error,
                            DelegatedAuthenticationError::RegistrationFailed,
                        );
                        if reason == FallbackReason::SdkFailure {
                            self.present_error(ErrorScreen::RegistrationFailed).await;
                        }
                        RegistrationState::Done(RegistrationOutcome::Fallback(reason))
                    }
                },
                RegistrationState::Done(outcome) => {
                    logger::info!(tag = ?Tag::AuthenticationSdkCall, ?outcome, "registration finished");
                    return outcome;
                }
            };
        }
    }

    fn context(&self, localized_reason: &str) -> PresentationContext {
        PresentationContext {
            localized_reason: localized_reason.to_string(),
            relying_party_identifier: self.configuration.relying_party_identifier.clone(),
        }
    }

    async fn present_error(&self, screen: ErrorScreen) {
        if let Some(presenter) = &self.presenter {
            if let Err(error) = presenter.present_error(screen).await {
                logger::warn!(?error, %screen, "failed to present error screen");
            }
        }
    }
}

fn sdk_fallback_reason(
    error: Report<AuthenticationSdkError>,
    context: DelegatedAuthenticationError,
) -> FallbackReason {
    let reason = match error.current_context() {
        AuthenticationSdkError::NotSupported => FallbackReason::Unsupported,
        AuthenticationSdkError::NoStoredCredentials => FallbackReason::NotRegistered,
        AuthenticationSdkError::UserCancelled => FallbackReason::Declined,
        AuthenticationSdkError::Failure(_) => FallbackReason::SdkFailure,
    };
    logger::warn!(error = ?error.change_context(context), %reason, "delegated authentication fell back");
    reason
}
