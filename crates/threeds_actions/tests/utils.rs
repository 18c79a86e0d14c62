#![allow(
    dead_code,
    clippy::expect_used,
    clippy::missing_panics_doc,
    clippy::panic,
    clippy::unwrap_used
)]

use std::sync::Arc;

use masking::Secret;
use threeds_actions::{
    configs::settings::{DelegatedAuthentication, RegistrationPolicy, ThreeDS2Settings},
    services::{
        dummy_sdk::{
            self, CallLog, DelegateOutcome, DummyAuthenticationSdk, DummyPresenter,
            DummyRedirect, DummySubmitter, DummyThreeDS2Service, RecordingDelegate,
        },
        AuthenticationSdk, FingerprintSubmitter,
    },
    types::{
        ChallengeAction, FingerprintAction, HttpMethod, MessageVersion, RedirectAction,
        ThreeDSActionHandlerResult, ThreeDSResultPayload,
    },
    Action, ActionComponentData, AdditionalDetails, Collaborators, ThreeDS2Component,
    ThreeDS2Details, ThreeDSResult,
};
use threeds_env::{config::Log, once_cell::sync::OnceCell, TelemetryGuard};
use url::Url;

pub const AUTHORISATION_TOKEN: &str = "authToken";
pub const PAYMENT_DATA: &str = "payment-data";
pub const SDK_INPUT: &str = "c2RrLWlucHV0";

pub fn setup() {
    static LOGGER: OnceCell<TelemetryGuard> = OnceCell::new();

    LOGGER.get_or_init(|| {
        threeds_actions::logger::setup(&Log::default()).expect("Failed to set up logging")
    });
}

pub fn compact_settings(registration_policy: RegistrationPolicy) -> ThreeDS2Settings {
    ThreeDS2Settings {
        delegated_authentication: Some(DelegatedAuthentication {
            registration_policy,
            ..Default::default()
        }),
        ..Default::default()
    }
}

pub fn version(version: &str) -> MessageVersion {
    version.parse().unwrap()
}

pub fn fingerprint_action(message_version: &str, sdk_input: Option<&str>) -> Action {
    Action::Fingerprint(FingerprintAction {
        fingerprint_token: dummy_sdk::fingerprint_token(version(message_version), sdk_input)
            .unwrap(),
        authorisation_token: Some(Secret::new(AUTHORISATION_TOKEN.to_string())),
        payment_data: Some(Secret::new(PAYMENT_DATA.to_string())),
    })
}

pub fn challenge(sdk_input: Option<&str>, requestor_app_url: Option<&Url>) -> ChallengeAction {
    ChallengeAction {
        challenge_token: dummy_sdk::challenge_token(sdk_input, requestor_app_url).unwrap(),
        authorisation_token: Some(Secret::new(AUTHORISATION_TOKEN.to_string())),
        payment_data: Some(Secret::new(PAYMENT_DATA.to_string())),
    }
}

pub fn challenge_action(sdk_input: Option<&str>) -> Action {
    Action::Challenge(challenge(sdk_input, None))
}

pub fn legacy_challenge_action() -> Action {
    let mut challenge = challenge(None, None);
    challenge.authorisation_token = None;
    Action::ThreeDS2Challenge(challenge)
}

pub fn redirect_action() -> Action {
    Action::Redirect(RedirectAction {
        url: Url::parse("https://issuer.example/3ds1").unwrap(),
        method: HttpMethod::Post,
        payment_data: Some(Secret::new(PAYMENT_DATA.to_string())),
    })
}

/// Submission response of an issuer approving without a challenge.
pub fn frictionless(trans_status: &str) -> ThreeDSActionHandlerResult {
    let result =
        ThreeDSResult::new(&ThreeDSResultPayload::completed(trans_status.to_string(), None, None))
            .unwrap();
    ThreeDSActionHandlerResult::Details(ThreeDS2Details::Completed(result))
}

pub fn challenge_required(sdk_input: Option<&str>) -> ThreeDSActionHandlerResult {
    ThreeDSActionHandlerResult::Action(challenge_action(sdk_input))
}

/// Decoded `threeDSResult` or `threeds2.challengeResult` of the component data.
pub fn result_payload(data: &ActionComponentData) -> ThreeDSResultPayload {
    match &data.details {
        AdditionalDetails::ThreeDS2(
            ThreeDS2Details::Completed(result) | ThreeDS2Details::ChallengeResult(result),
        ) => result.decode().unwrap(),
        other => panic!("expected a 3DS2 result, got {other:?}"),
    }
}

pub struct Harness {
    pub service: Arc<DummyThreeDS2Service>,
    pub authentication_sdk: Arc<DummyAuthenticationSdk>,
    pub presenter: Arc<DummyPresenter>,
    pub redirect: Arc<DummyRedirect>,
    pub submitter: Arc<DummySubmitter>,
    pub delegate: Arc<RecordingDelegate>,
    pub call_log: CallLog,
    pub component: ThreeDS2Component,
}

impl Harness {
    pub fn builder() -> HarnessBuilder {
        HarnessBuilder::default()
    }

    /// The single outcome reported to the delegate so far.
    pub fn outcome(&self) -> DelegateOutcome {
        let mut outcomes = self.delegate.outcomes();
        assert_eq!(outcomes.len(), 1, "expected exactly one delegate callback");
        outcomes.remove(0)
    }
}

pub struct HarnessBuilder {
    settings: ThreeDS2Settings,
    service: DummyThreeDS2Service,
    authentication_sdk: DummyAuthenticationSdk,
    presenter: DummyPresenter,
    redirect: DummyRedirect,
    submitter: DummySubmitter,
    delegated_authentication: bool,
}

impl Default for HarnessBuilder {
    fn default() -> Self {
        Self {
            settings: compact_settings(RegistrationPolicy::AfterChallenge),
            service: DummyThreeDS2Service::completing("Y"),
            authentication_sdk: DummyAuthenticationSdk::unregistered(),
            presenter: DummyPresenter::default(),
            redirect: DummyRedirect::new("redirect-result"),
            submitter: DummySubmitter::new(challenge_required(Some(SDK_INPUT))),
            delegated_authentication: true,
        }
    }
}

impl HarnessBuilder {
    pub fn settings(mut self, settings: ThreeDS2Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn service(mut self, service: DummyThreeDS2Service) -> Self {
        self.service = service;
        self
    }

    pub fn authentication_sdk(mut self, authentication_sdk: DummyAuthenticationSdk) -> Self {
        self.authentication_sdk = authentication_sdk;
        self
    }

    pub fn presenter(mut self, presenter: DummyPresenter) -> Self {
        self.presenter = presenter;
        self
    }

    pub fn redirect(mut self, redirect: DummyRedirect) -> Self {
        self.redirect = redirect;
        self
    }

    pub fn submitter(mut self, submitter: DummySubmitter) -> Self {
        self.submitter = submitter;
        self
    }

    /// Leave out the authentication SDK and the fingerprint submitter.
    pub fn without_delegated_authentication(mut self) -> Self {
        self.delegated_authentication = false;
        self
    }

    pub fn build(self) -> Harness {
        setup();

        let call_log = CallLog::default();
        let service = Arc::new(self.service.with_call_log(call_log.clone()));
        let authentication_sdk =
            Arc::new(self.authentication_sdk.with_call_log(call_log.clone()));
        let presenter = Arc::new(self.presenter.with_call_log(call_log.clone()));
        let redirect = Arc::new(self.redirect);
        let submitter = Arc::new(self.submitter.with_call_log(call_log.clone()));
        let delegate = Arc::new(RecordingDelegate::default());

        let collaborators = Collaborators {
            three_ds2_service: service.clone(),
            authentication_sdk: self
                .delegated_authentication
                .then(|| -> Arc<dyn AuthenticationSdk> { authentication_sdk.clone() }),
            presenter: Some(presenter.clone()),
            redirect: redirect.clone(),
            fingerprint_submitter: self
                .delegated_authentication
                .then(|| -> Arc<dyn FingerprintSubmitter> { submitter.clone() }),
        };
        let component = ThreeDS2Component::new(&self.settings, collaborators, delegate.clone());

        Harness {
            service,
            authentication_sdk,
            presenter,
            redirect,
            submitter,
            delegate,
            call_log,
            component,
        }
    }
}
