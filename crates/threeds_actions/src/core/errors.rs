use common_utils::errors::CustomResult;

pub type ThreeDS2Result<T> = CustomResult<T, ThreeDS2ComponentError>;

/// Failures reported to the caller of [`crate::ThreeDS2Component`].
///
/// Only structural and ordering problems end up here. Errors raised by the 3DS2 SDK during a
/// challenge travel inside the result payload, and delegated authentication never fails the
/// outer flow.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ThreeDS2ComponentError {
    #[error("No 3DS2 transaction is available to perform the challenge")]
    MissingTransaction,
    #[error("Received an action the current flow cannot handle: {action}")]
    UnexpectedAction { action: &'static str },
    #[error("A token or payload could not be decoded")]
    DataCorrupted,
    #[error("Failed to encode the authentication payload")]
    EncodingFailed,
    #[error("The 3DS2 SDK failed to create a transaction")]
    TransactionCreationFailed,
    #[error("The 3DS2 SDK returned invalid authentication request parameters")]
    InvalidAuthenticationParameters,
    #[error("Failed to submit the device fingerprint")]
    FingerprintSubmissionFailed,
    #[error("The redirect component failed: {0}")]
    RedirectFailed(RedirectError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodingError {
    #[error("Data is corrupted or does not match the expected schema")]
    DataCorrupted,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodingError {
    #[error("Failed to serialize the payload")]
    EncodingFailed,
    #[error("A result payload needs exactly one of transStatus and threeDS2SDKError")]
    InconsistentPayload,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid 3DS message version: {0:?}")]
pub struct InvalidMessageVersion(pub String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionParseError {
    #[error("Missing field {0} for action type {1}")]
    MissingField(&'static str, &'static str),
    #[error("Action type threeDS2 requires a subtype")]
    MissingSubtype,
}

/// Errors reported by the 3DS2 SDK.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ThreeDS2SdkError {
    #[error("{code}: {description}")]
    Runtime { code: String, description: String },
    #[error("Invalid input parameter: {0}")]
    InvalidInput(String),
    #[error("The challenge timed out")]
    Timeout,
    #[error("The challenge was cancelled")]
    Cancelled,
}

/// Errors reported by the device authentication SDK.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthenticationSdkError {
    #[error("Delegated authentication is not supported on this device")]
    NotSupported,
    #[error("No stored credentials for this device")]
    NoStoredCredentials,
    #[error("The shopper dismissed the system prompt")]
    UserCancelled,
    #[error("Authentication SDK failure: {0}")]
    Failure(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PresentationError {
    #[error("The screen was dismissed by the shopper")]
    Cancelled,
    #[error("No screen could be presented")]
    NotAvailable,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RedirectError {
    #[error("The redirect was cancelled")]
    Cancelled,
    #[error("The redirect failed: {0}")]
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmissionError {
    #[error("The fingerprint submission request failed")]
    RequestFailed,
    #[error("The fingerprint submission response could not be understood")]
    InvalidResponse,
}

/// Failures inside delegated authentication. These are logged and turned into a fallback.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DelegatedAuthenticationError {
    #[error("Registering the device failed")]
    RegistrationFailed,
    #[error("Authenticating with the device credential failed")]
    AuthenticationFailed,
    #[error("Removing the device credential failed")]
    ResetFailed,
    #[error("Checking the device registration failed")]
    RegistrationCheckFailed,
}

pub type ApplicationResult<T> = CustomResult<T, ApplicationError>;

#[derive(Debug, thiserror::Error)]
pub enum ApplicationError {
    #[error("Application configuration error")]
    ConfigurationError,
    #[error("Invalid configuration value provided: {0}")]
    InvalidConfigurationValueError(String),
    #[error("Failed to set up logging")]
    LoggerError,
    #[error("Failed to read action file")]
    ActionFileError,
}
