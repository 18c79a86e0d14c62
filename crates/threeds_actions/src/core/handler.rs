//!
//! Fingerprint and challenge handling shared by the compact and classic flows.
//!
//! The handler owns a single transaction slot. A fingerprint fills it, a challenge takes the
//! transaction out, so a transaction is never challenged twice and every terminal outcome drops
//! it.
//!

use std::sync::Arc;

use error_stack::{report, ResultExt};
use futures::lock::Mutex;
use threeds_env::{instrument, tracing, Flow, Tag};
use url::Url;

use super::{
    codec,
    delegated_authentication::{DelegatedAuthenticationController, DelegatedAuthenticationState},
    errors::{ThreeDS2ComponentError, ThreeDS2Result},
};
use crate::{
    configs::settings::{Flavor, RegistrationPolicy},
    consts, logger,
    services::{ChallengeParameters, ServiceParameters, ThreeDS2Service, Transaction},
    types::{
        ChallengeAction, ChallengeToken, Fingerprint, FingerprintToken, ThreeDSResult,
        ThreeDSResultPayload,
    },
};

/// Analytics names of the events logged by one flow.
#[derive(Debug, Clone, Copy)]
pub struct FlowEvents {
    pub fingerprint: &'static str,
    pub challenge: &'static str,
}

struct ActiveTransaction {
    transaction: Box<dyn Transaction>,
    delegated_authentication: DelegatedAuthenticationState,
}

pub struct CoreActionHandler {
    service: Arc<dyn ThreeDS2Service>,
    delegated_authentication: Option<DelegatedAuthenticationController>,
    requestor_app_url: Option<Url>,
    events: FlowEvents,
    flavor: Flavor,
    active: Mutex<Option<ActiveTransaction>>,
}

impl std::fmt::Debug for CoreActionHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoreActionHandler")
            .field("delegated_authentication", &self.delegated_authentication)
            .field("requestor_app_url", &self.requestor_app_url)
            .field("events", &self.events)
            .field("flavor", &self.flavor)
            .finish_non_exhaustive()
    }
}

impl CoreActionHandler {
    pub fn new(
        service: Arc<dyn ThreeDS2Service>,
        delegated_authentication: Option<DelegatedAuthenticationController>,
        requestor_app_url: Option<Url>,
        events: FlowEvents,
        flavor: Flavor,
    ) -> Self {
        Self {
            service,
            delegated_authentication,
            requestor_app_url,
            events,
            flavor,
            active: Mutex::new(None),
        }
    }

    /// Create a transaction for the decoded fingerprint token and return the encoded fingerprint.
    ///
    /// The transaction is kept for the challenge only when the whole fingerprint succeeded.
    #[instrument(skip_all, fields(flow = %Flow::ThreeDS2Fingerprint))]
    pub async fn handle_fingerprint(&self, token: &FingerprintToken) -> ThreeDS2Result<String> {
        self.log_event(self.events.fingerprint);
        self.release_transaction().await;

        let transaction = self
            .service
            .create_transaction(ServiceParameters::from(token))
            .await
            .change_context(ThreeDS2ComponentError::TransactionCreationFailed)?;
        logger::debug!(tag = ?Tag::ThreeDS2SdkCall, "transaction created");

        let (delegated_authentication, sdk_output) = match (
            &self.delegated_authentication,
            token.delegated_authentication_sdk_input.as_deref(),
        ) {
            (Some(controller), Some(sdk_input)) => {
                let outcome = controller.approve(sdk_input).await;
                (
                    DelegatedAuthenticationState::from_approval(&outcome),
                    outcome.into_sdk_output(),
                )
            }
            _ => (DelegatedAuthenticationState::default(), None),
        };

        let fingerprint = match transaction.authentication_request_parameters() {
            Ok(parameters) => Fingerprint::new(&parameters, sdk_output)
                .change_context(ThreeDS2ComponentError::InvalidAuthenticationParameters)?,
            Err(error) => {
                logger::warn!(?error, "authentication request parameters unavailable");
                Fingerprint {
                    delegated_authentication_sdk_output: sdk_output,
                    ..Fingerprint::sdk_error(error.current_context().to_string())
                }
            }
        };

        let encoded = codec::encode_base64(&fingerprint)
            .change_context(ThreeDS2ComponentError::EncodingFailed)?;

        *self.active.lock().await = Some(ActiveTransaction {
            transaction,
            delegated_authentication,
        });

        Ok(encoded)
    }

    /// Run the issuer challenge on the transaction left by the fingerprint.
    ///
    /// SDK failures during the challenge are a valid outcome and end up in the result payload.
    #[instrument(skip_all, fields(flow = %Flow::ThreeDS2Challenge))]
    pub async fn handle_challenge(&self, action: &ChallengeAction) -> ThreeDS2Result<ThreeDSResult> {
        self.log_event(self.events.challenge);

        let active = self
            .active
            .lock()
            .await
            .take()
            .ok_or_else(|| report!(ThreeDS2ComponentError::MissingTransaction))?;

        let token: ChallengeToken =
            codec::decode_base64(&action.challenge_token, consts::CHALLENGE_TOKEN_TYPE)
                .change_context(ThreeDS2ComponentError::DataCorrupted)?;

        let registration = self
            .delegated_authentication
            .as_ref()
            .filter(|_| active.delegated_authentication.can_offer_registration())
            .zip(token.delegated_authentication_sdk_input.as_deref());

        let mut sdk_output = None;
        if let Some((controller, sdk_input)) = registration {
            if controller.registration_policy() == RegistrationPolicy::BeforeChallenge {
                sdk_output = controller.register(sdk_input).await.into_sdk_output();
            }
        }

        let parameters = ChallengeParameters::new(&token, self.requestor_app_url.as_ref());
        logger::debug!(tag = ?Tag::ThreeDS2SdkCall, "performing challenge");

        let payload = match active.transaction.perform_challenge(parameters).await {
            Ok(result) => {
                if let Some((controller, sdk_input)) = registration {
                    if controller.registration_policy() == RegistrationPolicy::AfterChallenge {
                        sdk_output = controller.register(sdk_input).await.into_sdk_output();
                    }
                }
                ThreeDSResultPayload::completed(
                    result.transaction_status,
                    action.authorisation_token.clone(),
                    sdk_output,
                )
            }
            Err(error) => {
                logger::warn!(?error, "challenge finished with an SDK error");
                ThreeDSResultPayload::sdk_error(
                    error.current_context().to_string(),
                    action.authorisation_token.clone(),
                    sdk_output,
                )
            }
        };

        ThreeDSResult::new(&payload).change_context(ThreeDS2ComponentError::EncodingFailed)
    }

    pub async fn has_transaction(&self) -> bool {
        self.active.lock().await.is_some()
    }

    pub async fn release_transaction(&self) {
        if self.active.lock().await.take().is_some() {
            logger::debug!("released 3DS2 transaction");
        }
    }

    fn log_event(&self, component: &'static str) {
        logger::info!(tag = ?Tag::Event, component, flavor = %self.flavor, "analytics event");
    }
}
