//!
//! Entry point for actions issued by the payment server.
//!
//! [`ThreeDS2Component`] picks the compact or classic flow for each action, forwards redirects,
//! and reports exactly one outcome per handled action to its [`ActionComponentDelegate`].
//!

use std::sync::Arc;

use error_stack::{report, ResultExt};
use threeds_env::{instrument, tracing, Flow, Tag};

use super::{
    codec,
    delegated_authentication::DelegatedAuthenticationController,
    errors::{ThreeDS2ComponentError, ThreeDS2Result},
    flows::{ClassicActionHandler, CompactActionHandler, FlowHandler},
    handler::{CoreActionHandler, FlowEvents},
};
use crate::{
    configs::settings::ThreeDS2Settings,
    consts, logger,
    services::{
        ActionComponentDelegate, AuthenticationSdk, ComponentSource, FingerprintSubmitter,
        PresentationDelegate, RedirectComponent, ThreeDS2Service,
    },
    types::{
        Action, ActionComponentData, AdditionalDetails, FingerprintToken, MessageVersion,
        PaymentData, RedirectAction, ThreeDS2Details, ThreeDSActionHandlerResult,
    },
};

/// External services the component drives.
///
/// The compact flow is only available with an authentication SDK, a fingerprint submitter and a
/// delegated authentication configuration.
pub struct Collaborators {
    pub three_ds2_service: Arc<dyn ThreeDS2Service>,
    pub authentication_sdk: Option<Arc<dyn AuthenticationSdk>>,
    pub presenter: Option<Arc<dyn PresentationDelegate>>,
    pub redirect: Arc<dyn RedirectComponent>,
    pub fingerprint_submitter: Option<Arc<dyn FingerprintSubmitter>>,
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators")
            .field("authentication_sdk", &self.authentication_sdk.is_some())
            .field("presenter", &self.presenter.is_some())
            .field("fingerprint_submitter", &self.fingerprint_submitter.is_some())
            .finish_non_exhaustive()
    }
}

pub struct ThreeDS2Component {
    classic: ClassicActionHandler,
    compact: Option<CompactActionHandler>,
    compact_flow_min_version: MessageVersion,
    redirect: Arc<dyn RedirectComponent>,
    delegate: Arc<dyn ActionComponentDelegate>,
}

impl std::fmt::Debug for ThreeDS2Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThreeDS2Component")
            .field("classic", &self.classic)
            .field("compact", &self.compact)
            .field("compact_flow_min_version", &self.compact_flow_min_version)
            .finish_non_exhaustive()
    }
}

impl ThreeDS2Component {
    pub fn new(
        settings: &ThreeDS2Settings,
        collaborators: Collaborators,
        delegate: Arc<dyn ActionComponentDelegate>,
    ) -> Self {
        let Collaborators {
            three_ds2_service,
            authentication_sdk,
            presenter,
            redirect,
            fingerprint_submitter,
        } = collaborators;

        let classic = ClassicActionHandler::new(CoreActionHandler::new(
            three_ds2_service.clone(),
            None,
            settings.requestor_app_url.clone(),
            FlowEvents {
                fingerprint: consts::CLASSIC_FINGERPRINT_EVENT,
                challenge: consts::CLASSIC_CHALLENGE_EVENT,
            },
            settings.flavor,
        ));

        let compact = match (
            &settings.delegated_authentication,
            authentication_sdk,
            fingerprint_submitter,
        ) {
            (Some(configuration), Some(sdk), Some(submitter)) => {
                let controller =
                    DelegatedAuthenticationController::new(sdk, presenter, configuration.clone());
                let core = CoreActionHandler::new(
                    three_ds2_service,
                    Some(controller),
                    settings.requestor_app_url.clone(),
                    FlowEvents {
                        fingerprint: consts::COMPACT_FINGERPRINT_EVENT,
                        challenge: consts::COMPACT_CHALLENGE_EVENT,
                    },
                    settings.flavor,
                );
                Some(CompactActionHandler::new(core, submitter))
            }
            _ => {
                logger::debug!("compact flow disabled");
                None
            }
        };

        Self {
            classic,
            compact,
            compact_flow_min_version: settings.compact_flow_min_version,
            redirect,
            delegate,
        }
    }

    /// Handle `action` and report its outcome to the delegate, exactly once.
    pub async fn handle(&self, action: Action) {
        match self.process(action).await {
            Ok(data) => {
                let source = ComponentSource::of_data(&data);
                logger::info!(tag = ?Tag::ActionCompleted, %source, "action completed");
                self.delegate.did_provide(data, source);
            }
            Err(error) => {
                let source = ComponentSource::of_error(&error);
                logger::error!(?error, %source, "action failed");
                self.delegate.did_fail(error, source);
            }
        }
    }

    /// Handle `action` and return its outcome instead of reporting it.
    #[instrument(skip_all, fields(action = action.name()))]
    pub async fn process(&self, action: Action) -> ThreeDS2Result<ActionComponentData> {
        logger::info!(tag = ?Tag::ActionReceived, "action received");
        match action {
            Action::Redirect(redirect) => self.redirect(redirect).await,
            Action::Fingerprint(fingerprint) => {
                let token: FingerprintToken = codec::decode_base64(
                    &fingerprint.fingerprint_token,
                    consts::FINGERPRINT_TOKEN_TYPE,
                )
                .change_context(ThreeDS2ComponentError::DataCorrupted)?;

                self.release_transactions().await;

                match self
                    .fingerprint_flow(&token)
                    .handle_fingerprint(&token, &fingerprint)
                    .await?
                {
                    ThreeDSActionHandlerResult::Details(details) => {
                        Ok(component_data(details, fingerprint.payment_data))
                    }
                    ThreeDSActionHandlerResult::Action(further) => {
                        self.process_further_action(further).await
                    }
                }
            }
            challenge @ (Action::Challenge(_) | Action::ThreeDS2Challenge(_)) => {
                self.challenge(&challenge).await
            }
        }
    }

    fn fingerprint_flow(&self, token: &FingerprintToken) -> FlowHandler<'_> {
        match &self.compact {
            Some(compact) if token.three_ds_message_version >= self.compact_flow_min_version => {
                FlowHandler::Compact(compact)
            }
            _ => FlowHandler::Classic(&self.classic),
        }
    }

    /// The flow holding a live transaction, classic when none does.
    async fn challenge_flow(&self) -> FlowHandler<'_> {
        if let Some(compact) = &self.compact {
            let flow = FlowHandler::Compact(compact);
            if flow.has_transaction().await {
                return flow;
            }
        }
        FlowHandler::Classic(&self.classic)
    }

    async fn challenge(&self, action: &Action) -> ThreeDS2Result<ActionComponentData> {
        let details = self.challenge_flow().await.handle_challenge(action).await?;
        Ok(component_data(details, action.payment_data().cloned()))
    }

    async fn process_further_action(&self, action: Action) -> ThreeDS2Result<ActionComponentData> {
        logger::info!(action = action.name(), "handling further action");
        match action {
            Action::Challenge(_) => self.challenge(&action).await,
            Action::Redirect(redirect) => self.redirect(redirect).await,
            other => {
                self.release_transactions().await;
                Err(report!(ThreeDS2ComponentError::UnexpectedAction {
                    action: other.name(),
                }))
            }
        }
    }

    #[instrument(skip_all, fields(flow = %Flow::Redirect))]
    async fn redirect(&self, action: RedirectAction) -> ThreeDS2Result<ActionComponentData> {
        logger::info!(
            tag = ?Tag::Redirect,
            host = action.url.host_str(),
            method = ?action.method,
            "delegating redirect"
        );
        self.redirect.handle(action).await.map_err(|error| {
            let context = ThreeDS2ComponentError::RedirectFailed(error.current_context().clone());
            error.change_context(context)
        })
    }

    async fn release_transactions(&self) {
        if let Some(compact) = &self.compact {
            FlowHandler::Compact(compact).release_transaction().await;
        }
        FlowHandler::Classic(&self.classic)
            .release_transaction()
            .await;
    }
}

fn component_data(details: ThreeDS2Details, payment_data: Option<PaymentData>) -> ActionComponentData {
    ActionComponentData {
        details: AdditionalDetails::ThreeDS2(details),
        payment_data,
    }
}
