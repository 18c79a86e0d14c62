pub mod action;
pub mod details;
pub mod fingerprint;
pub mod result;
pub mod token;
pub mod version;

use masking::{Secret, TokenLength};

pub use self::{
    action::{Action, ChallengeAction, FingerprintAction, HttpMethod, RedirectAction},
    details::{
        ActionComponentData, AdditionalDetails, RedirectDetails, ThreeDS2Details,
        ThreeDSActionHandlerResult,
    },
    fingerprint::{AuthenticationRequestParameters, EphemeralPublicKey, Fingerprint},
    result::{ThreeDSResult, ThreeDSResultPayload},
    token::{ChallengeToken, FingerprintToken},
    version::MessageVersion,
};

/// Token echoed back to the server with the authentication result.
pub type AuthorisationToken = Secret<String, TokenLength>;

/// Opaque payment state which must accompany the details of an action.
pub type PaymentData = Secret<String>;
