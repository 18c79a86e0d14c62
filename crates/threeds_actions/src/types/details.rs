use serde::{Deserialize, Serialize};

use super::{Action, PaymentData, ThreeDSResult};

/// Details produced by the 3DS2 flows, keyed the way the server expects them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThreeDS2Details {
    /// Encoded fingerprint of the classic flow.
    #[serde(rename = "threeds2.fingerprint")]
    Fingerprint(String),
    /// Challenge result of the classic flow.
    #[serde(rename = "threeds2.challengeResult")]
    ChallengeResult(ThreeDSResult),
    /// Final result of the compact flow.
    #[serde(rename = "threeDSResult")]
    Completed(ThreeDSResult),
}

/// Result of a redirect, as returned by the redirect component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedirectDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AdditionalDetails {
    ThreeDS2(ThreeDS2Details),
    Redirect(RedirectDetails),
}

/// Data handed to the delegate: the details to submit plus the action's payment data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionComponentData {
    pub details: AdditionalDetails,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_data: Option<PaymentData>,
}

/// Outcome of a single flow handler step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThreeDSActionHandlerResult {
    /// The server needs another action handled before the payment can complete.
    Action(Action),
    Details(ThreeDS2Details),
}
