//!
//! Scripted stand-ins for the SDKs and collaborators, used by the simulator and the tests.
//!
//! Every dummy counts its calls and can share a [`CallLog`] with the others to record the order
//! in which the flows reached them.
//!

use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Arc, Mutex, MutexGuard, PoisonError,
};

use common_utils::errors::CustomResult;
use error_stack::report;
use url::Url;

use super::{
    ActionComponentDelegate, ApprovalInput, AuthenticationSdk, ChallengeParameters,
    ChallengeResult, ComponentSource, ErrorScreen, FingerprintSubmitter, PresentationContext,
    PresentationDelegate, RedirectComponent, RegistrationInput, ServiceParameters,
    ThreeDS2Service, Transaction,
};
use crate::{
    configs::settings::SimulatorSettings,
    core::{
        codec,
        errors::{
            AuthenticationSdkError, EncodingError, PresentationError, RedirectError,
            SubmissionError, ThreeDS2ComponentError, ThreeDS2SdkError,
        },
    },
    logger,
    types::{
        ActionComponentData, AdditionalDetails, AuthenticationRequestParameters, ChallengeToken,
        FingerprintToken, MessageVersion, PaymentData, RedirectAction, RedirectDetails,
        ThreeDSActionHandlerResult,
    },
};

pub const AUTHENTICATE_OUTPUT: &str = "authenticate-output";
pub const REGISTER_OUTPUT: &str = "register-output";

const EPHEMERAL_PUBLIC_KEY: &str = r#"{"kty":"EC","crv":"P-256","x":"WlDyd3FM4C2lY_8nQqYb2JvRKhl8uHjXg7PfnNBlM7c","y":"Fzm2PEgDWj1Bp8qR5vAR0DHn0zWOhHoiNxc4BuIHRZk"}"#;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Ordered record of collaborator calls, shareable between dummies.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<&'static str>>>);

impl CallLog {
    fn record(&self, call: &'static str) {
        lock(&self.0).push(call);
    }

    pub fn entries(&self) -> Vec<&'static str> {
        lock(&self.0).clone()
    }

    pub fn position(&self, call: &'static str) -> Option<usize> {
        lock(&self.0).iter().position(|entry| *entry == call)
    }
}

/// Base64 fingerprint token as the server would send it.
pub fn fingerprint_token(
    message_version: MessageVersion,
    sdk_input: Option<&str>,
) -> CustomResult<String, EncodingError> {
    codec::encode_base64(&FingerprintToken {
        directory_server_id: "F013371337".to_string(),
        directory_server_public_key: "dummy-directory-server-public-key".to_string(),
        directory_server_root_certificates: "dummy-directory-server-root-certificates".to_string(),
        three_ds_message_version: message_version,
        three_ds_server_transaction_id: "dummy-server-transaction-id".to_string(),
        delegated_authentication_sdk_input: sdk_input.map(str::to_string),
    })
}

/// Base64 challenge token as the server would send it.
pub fn challenge_token(
    sdk_input: Option<&str>,
    requestor_app_url: Option<&Url>,
) -> CustomResult<String, EncodingError> {
    codec::encode_base64(&ChallengeToken {
        acs_transaction_id: "dummy-acs-transaction-id".to_string(),
        acs_reference_number: "dummy-acs-reference-number".to_string(),
        acs_signed_content: "dummy-acs-signed-content".to_string(),
        acs_url: "https://acs.example/challenge".to_string(),
        message_version: MessageVersion::new(2, 2, 0),
        three_ds_server_transaction_id: "dummy-server-transaction-id".to_string(),
        delegated_authentication_sdk_input: sdk_input.map(str::to_string),
        three_ds_requestor_app_url: requestor_app_url.cloned(),
    })
}

#[derive(Debug, Clone)]
enum ChallengeScript {
    Completed(String),
    Failed(ThreeDS2SdkError),
}

#[derive(Debug, Default)]
struct ServiceCalls {
    transactions_created: AtomicUsize,
    parameter_requests: AtomicUsize,
    challenges_performed: AtomicUsize,
    challenge_parameters: Mutex<Vec<ChallengeParameters>>,
}

#[derive(Debug)]
pub struct DummyThreeDS2Service {
    challenge: ChallengeScript,
    fail_creation: bool,
    fail_parameters: bool,
    calls: Arc<ServiceCalls>,
    call_log: CallLog,
}

impl DummyThreeDS2Service {
    /// Challenges finish with the given `transStatus`.
    pub fn completing(trans_status: &str) -> Self {
        Self::with_script(ChallengeScript::Completed(trans_status.to_string()))
    }

    pub fn failing_challenge(error: ThreeDS2SdkError) -> Self {
        Self::with_script(ChallengeScript::Failed(error))
    }

    pub fn from_settings(settings: &SimulatorSettings) -> Self {
        match &settings.challenge_error {
            Some(code) => Self::failing_challenge(ThreeDS2SdkError::Runtime {
                code: code.clone(),
                description: "Simulated challenge failure".to_string(),
            }),
            None => Self::completing(&settings.trans_status),
        }
    }

    fn with_script(challenge: ChallengeScript) -> Self {
        Self {
            challenge,
            fail_creation: false,
            fail_parameters: false,
            calls: Default::default(),
            call_log: CallLog::default(),
        }
    }

    pub fn failing_creation(mut self) -> Self {
        self.fail_creation = true;
        self
    }

    pub fn failing_parameters(mut self) -> Self {
        self.fail_parameters = true;
        self
    }

    pub fn with_call_log(mut self, call_log: CallLog) -> Self {
        self.call_log = call_log;
        self
    }

    pub fn transactions_created(&self) -> usize {
        self.calls.transactions_created.load(Ordering::SeqCst)
    }

    pub fn challenges_performed(&self) -> usize {
        self.calls.challenges_performed.load(Ordering::SeqCst)
    }

    /// Every call made to the service or to one of its transactions.
    pub fn sdk_calls(&self) -> usize {
        self.transactions_created()
            + self.calls.parameter_requests.load(Ordering::SeqCst)
            + self.challenges_performed()
    }

    pub fn challenge_parameters(&self) -> Vec<ChallengeParameters> {
        lock(&self.calls.challenge_parameters).clone()
    }
}

#[async_trait::async_trait]
impl ThreeDS2Service for DummyThreeDS2Service {
    async fn create_transaction(
        &self,
        parameters: ServiceParameters,
    ) -> CustomResult<Box<dyn Transaction>, ThreeDS2SdkError> {
        self.call_log.record("create_transaction");
        self.calls.transactions_created.fetch_add(1, Ordering::SeqCst);

        if self.fail_creation {
            return Err(report!(ThreeDS2SdkError::InvalidInput(
                "directoryServerPublicKey".to_string()
            )));
        }

        Ok(Box::new(DummyTransaction {
            message_version: parameters.message_version,
            challenge: self.challenge.clone(),
            fail_parameters: self.fail_parameters,
            calls: self.calls.clone(),
            call_log: self.call_log.clone(),
        }))
    }
}

struct DummyTransaction {
    message_version: MessageVersion,
    challenge: ChallengeScript,
    fail_parameters: bool,
    calls: Arc<ServiceCalls>,
    call_log: CallLog,
}

#[async_trait::async_trait]
impl Transaction for DummyTransaction {
    fn authentication_request_parameters(
        &self,
    ) -> CustomResult<AuthenticationRequestParameters, ThreeDS2SdkError> {
        self.call_log.record("authentication_request_parameters");
        self.calls.parameter_requests.fetch_add(1, Ordering::SeqCst);

        if self.fail_parameters {
            return Err(report!(ThreeDS2SdkError::Runtime {
                code: "1001".to_string(),
                description: "Device data unavailable".to_string(),
            }));
        }

        Ok(AuthenticationRequestParameters {
            device_information: "dummy-device-information".to_string(),
            sdk_application_identifier: "dummy-sdk-application-id".to_string(),
            sdk_transaction_identifier: "dummy-sdk-transaction-id".to_string(),
            sdk_reference_number: "dummy-sdk-reference-number".to_string(),
            sdk_ephemeral_public_key: EPHEMERAL_PUBLIC_KEY.to_string(),
            message_version: self.message_version.to_string(),
        })
    }

    async fn perform_challenge(
        &self,
        parameters: ChallengeParameters,
    ) -> CustomResult<ChallengeResult, ThreeDS2SdkError> {
        self.call_log.record("perform_challenge");
        self.calls.challenges_performed.fetch_add(1, Ordering::SeqCst);
        lock(&self.calls.challenge_parameters).push(parameters);

        match &self.challenge {
            ChallengeScript::Completed(trans_status) => Ok(ChallengeResult {
                transaction_status: trans_status.clone(),
            }),
            ChallengeScript::Failed(error) => Err(report!(error.clone())),
        }
    }
}

#[derive(Debug, Default)]
pub struct DummyAuthenticationSdk {
    supported: bool,
    registered: AtomicBool,
    fail_authentication: bool,
    fail_registration: bool,
    fail_reset: bool,
    authenticate_calls: AtomicUsize,
    register_calls: AtomicUsize,
    reset_calls: AtomicUsize,
    call_log: CallLog,
}

impl DummyAuthenticationSdk {
    pub fn unsupported() -> Self {
        Self::default()
    }

    pub fn unregistered() -> Self {
        Self {
            supported: true,
            ..Default::default()
        }
    }

    pub fn registered() -> Self {
        Self {
            supported: true,
            registered: AtomicBool::new(true),
            ..Default::default()
        }
    }

    pub fn from_settings(settings: &SimulatorSettings) -> Self {
        Self {
            supported: settings.device_supported,
            registered: AtomicBool::new(settings.device_registered),
            ..Default::default()
        }
    }

    pub fn failing_authentication(mut self) -> Self {
        self.fail_authentication = true;
        self
    }

    pub fn failing_registration(mut self) -> Self {
        self.fail_registration = true;
        self
    }

    /// Credential removal fails and leaves the device registered.
    pub fn failing_reset(mut self) -> Self {
        self.fail_reset = true;
        self
    }

    pub fn with_call_log(mut self, call_log: CallLog) -> Self {
        self.call_log = call_log;
        self
    }

    pub fn authenticate_calls(&self) -> usize {
        self.authenticate_calls.load(Ordering::SeqCst)
    }

    pub fn register_calls(&self) -> usize {
        self.register_calls.load(Ordering::SeqCst)
    }

    pub fn reset_calls(&self) -> usize {
        self.reset_calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl AuthenticationSdk for DummyAuthenticationSdk {
    async fn is_device_supported(&self) -> bool {
        self.call_log.record("is_device_supported");
        self.supported
    }

    async fn is_device_registered(&self, _input: &str) -> CustomResult<bool, AuthenticationSdkError> {
        self.call_log.record("is_device_registered");
        Ok(self.registered.load(Ordering::SeqCst))
    }

    async fn register(&self, _input: &str) -> CustomResult<String, AuthenticationSdkError> {
        self.call_log.record("register");
        self.register_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_registration {
            return Err(report!(AuthenticationSdkError::Failure(
                "Simulated registration failure".to_string()
            )));
        }
        self.registered.store(true, Ordering::SeqCst);
        Ok(REGISTER_OUTPUT.to_string())
    }

    async fn authenticate(&self, _input: &str) -> CustomResult<String, AuthenticationSdkError> {
        self.call_log.record("authenticate");
        self.authenticate_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_authentication {
            return Err(report!(AuthenticationSdkError::Failure(
                "Simulated authentication failure".to_string()
            )));
        }
        Ok(AUTHENTICATE_OUTPUT.to_string())
    }

    async fn reset(&self) -> CustomResult<(), AuthenticationSdkError> {
        self.call_log.record("reset");
        self.reset_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_reset {
            return Err(report!(AuthenticationSdkError::Failure(
                "Simulated credential removal failure".to_string()
            )));
        }
        self.registered.store(false, Ordering::SeqCst);
        Ok(())
    }
}

#[derive(Debug)]
pub struct DummyPresenter {
    approval: ApprovalInput,
    registration: RegistrationInput,
    cancelling: bool,
    presentations: AtomicUsize,
    error_screens: Mutex<Vec<ErrorScreen>>,
    call_log: CallLog,
}

impl Default for DummyPresenter {
    fn default() -> Self {
        Self {
            approval: ApprovalInput::UseBiometrics,
            registration: RegistrationInput::Register,
            cancelling: false,
            presentations: AtomicUsize::new(0),
            error_screens: Mutex::new(Vec::new()),
            call_log: CallLog::default(),
        }
    }
}

impl DummyPresenter {
    pub fn from_settings(settings: &SimulatorSettings) -> Self {
        Self::default()
            .with_approval(settings.approval_input)
            .with_registration(settings.registration_input)
    }

    pub fn with_approval(mut self, input: ApprovalInput) -> Self {
        self.approval = input;
        self
    }

    pub fn with_registration(mut self, input: RegistrationInput) -> Self {
        self.registration = input;
        self
    }

    /// Every screen is dismissed by the shopper.
    pub fn cancelling(mut self) -> Self {
        self.cancelling = true;
        self
    }

    pub fn with_call_log(mut self, call_log: CallLog) -> Self {
        self.call_log = call_log;
        self
    }

    /// Registration and approval screens shown so far.
    pub fn presentations(&self) -> usize {
        self.presentations.load(Ordering::SeqCst)
    }

    pub fn error_screens(&self) -> Vec<ErrorScreen> {
        lock(&self.error_screens).clone()
    }

    fn present<T>(&self, call: &'static str, input: T) -> CustomResult<T, PresentationError> {
        self.call_log.record(call);
        self.presentations.fetch_add(1, Ordering::SeqCst);
        if self.cancelling {
            return Err(report!(PresentationError::Cancelled));
        }
        Ok(input)
    }
}

#[async_trait::async_trait]
impl PresentationDelegate for DummyPresenter {
    async fn present_registration(
        &self,
        _context: &PresentationContext,
    ) -> CustomResult<RegistrationInput, PresentationError> {
        self.present("present_registration", self.registration)
    }

    async fn present_approval(
        &self,
        _context: &PresentationContext,
    ) -> CustomResult<ApprovalInput, PresentationError> {
        self.present("present_approval", self.approval)
    }

    async fn present_error(&self, screen: ErrorScreen) -> CustomResult<(), PresentationError> {
        self.call_log.record("present_error");
        lock(&self.error_screens).push(screen);
        Ok(())
    }
}

#[derive(Debug)]
pub struct DummyRedirect {
    redirect_result: String,
    fail: bool,
    redirects: Mutex<Vec<RedirectAction>>,
}

impl DummyRedirect {
    pub fn new(redirect_result: &str) -> Self {
        Self {
            redirect_result: redirect_result.to_string(),
            fail: false,
            redirects: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn redirects(&self) -> Vec<RedirectAction> {
        lock(&self.redirects).clone()
    }
}

#[async_trait::async_trait]
impl RedirectComponent for DummyRedirect {
    async fn handle(&self, action: RedirectAction) -> CustomResult<ActionComponentData, RedirectError> {
        lock(&self.redirects).push(action.clone());
        if self.fail {
            return Err(report!(RedirectError::Failed(format!(
                "Could not open {}",
                action.url
            ))));
        }
        Ok(ActionComponentData {
            details: AdditionalDetails::Redirect(RedirectDetails {
                redirect_result: Some(self.redirect_result.clone()),
                payload: None,
            }),
            payment_data: action.payment_data,
        })
    }
}

/// Fingerprint submitter answering every submission with the same scripted response.
#[derive(Debug)]
pub struct DummySubmitter {
    response: Option<ThreeDSActionHandlerResult>,
    submissions: Mutex<Vec<(String, Option<PaymentData>)>>,
    call_log: CallLog,
}

impl DummySubmitter {
    pub fn new(response: ThreeDSActionHandlerResult) -> Self {
        Self {
            response: Some(response),
            submissions: Mutex::new(Vec::new()),
            call_log: CallLog::default(),
        }
    }

    pub fn failing() -> Self {
        Self {
            response: None,
            submissions: Mutex::new(Vec::new()),
            call_log: CallLog::default(),
        }
    }

    pub fn with_call_log(mut self, call_log: CallLog) -> Self {
        self.call_log = call_log;
        self
    }

    /// Submitted fingerprints with their payment data, in order.
    pub fn submissions(&self) -> Vec<(String, Option<PaymentData>)> {
        lock(&self.submissions).clone()
    }
}

#[async_trait::async_trait]
impl FingerprintSubmitter for DummySubmitter {
    async fn submit(
        &self,
        fingerprint: String,
        payment_data: Option<PaymentData>,
    ) -> CustomResult<ThreeDSActionHandlerResult, SubmissionError> {
        self.call_log.record("submit");
        lock(&self.submissions).push((fingerprint, payment_data));
        self.response
            .clone()
            .ok_or_else(|| report!(SubmissionError::RequestFailed))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DelegateOutcome {
    Provided(ActionComponentData, ComponentSource),
    Failed(ThreeDS2ComponentError, ComponentSource),
}

/// Delegate keeping every outcome it receives.
#[derive(Debug, Default)]
pub struct RecordingDelegate {
    outcomes: Mutex<Vec<DelegateOutcome>>,
}

impl RecordingDelegate {
    pub fn outcomes(&self) -> Vec<DelegateOutcome> {
        lock(&self.outcomes).clone()
    }
}

impl ActionComponentDelegate for RecordingDelegate {
    fn did_provide(&self, data: ActionComponentData, from: ComponentSource) {
        logger::info!(?data, %from, "delegate received details");
        lock(&self.outcomes).push(DelegateOutcome::Provided(data, from));
    }

    fn did_fail(&self, error: error_stack::Report<ThreeDS2ComponentError>, from: ComponentSource) {
        logger::info!(?error, %from, "delegate received failure");
        lock(&self.outcomes).push(DelegateOutcome::Failed(error.current_context().clone(), from));
    }
}
