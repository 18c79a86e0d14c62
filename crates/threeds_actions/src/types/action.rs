//!
//! Actions issued by the payment server.
//!

use serde::{Deserialize, Serialize};
use url::Url;

use super::{AuthorisationToken, PaymentData};
use crate::core::errors::ActionParseError;

/// Action the payment server asks the client to perform.
///
/// Deserializes from the server's action JSON:
/// `{"type": "threeDS2", "subtype": "fingerprint" | "challenge", "token": ..., "authorisationToken": ...}`,
/// the standalone `threeDS2Challenge` / `threeDS2Fingerprint` shapes and `{"type": "redirect", "url": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawAction")]
pub enum Action {
    Fingerprint(FingerprintAction),
    Challenge(ChallengeAction),
    Redirect(RedirectAction),
    /// Standalone `threeDS2Challenge` shape. Only the classic flow accepts it.
    ThreeDS2Challenge(ChallengeAction),
}

impl Action {
    pub fn payment_data(&self) -> Option<&PaymentData> {
        match self {
            Self::Fingerprint(action) => action.payment_data.as_ref(),
            Self::Challenge(action) | Self::ThreeDS2Challenge(action) => {
                action.payment_data.as_ref()
            }
            Self::Redirect(action) => action.payment_data.as_ref(),
        }
    }

    /// Name used in logs and `UnexpectedAction` errors.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fingerprint(_) => "threeDS2.fingerprint",
            Self::Challenge(_) => "threeDS2.challenge",
            Self::Redirect(_) => "redirect",
            Self::ThreeDS2Challenge(_) => "threeDS2Challenge",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FingerprintAction {
    /// Base64 encoded [`super::FingerprintToken`].
    pub fingerprint_token: String,
    /// Required for `threeDS2` actions, absent on the standalone fingerprint shape.
    pub authorisation_token: Option<AuthorisationToken>,
    pub payment_data: Option<PaymentData>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeAction {
    /// Base64 encoded [`super::ChallengeToken`].
    pub challenge_token: String,
    /// Required for `threeDS2` actions, absent on the standalone challenge shape.
    pub authorisation_token: Option<AuthorisationToken>,
    pub payment_data: Option<PaymentData>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectAction {
    pub url: Url,
    pub method: HttpMethod,
    pub payment_data: Option<PaymentData>,
}

#[derive(Debug, Deserialize)]
enum RawActionType {
    #[serde(rename = "threeDS2")]
    ThreeDS2,
    #[serde(rename = "threeDS2Fingerprint")]
    ThreeDS2Fingerprint,
    #[serde(rename = "threeDS2Challenge")]
    ThreeDS2Challenge,
    #[serde(rename = "redirect")]
    Redirect,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum RawSubtype {
    Fingerprint,
    Challenge,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAction {
    #[serde(rename = "type")]
    action_type: RawActionType,
    subtype: Option<RawSubtype>,
    token: Option<String>,
    authorisation_token: Option<AuthorisationToken>,
    payment_data: Option<PaymentData>,
    url: Option<Url>,
    method: Option<HttpMethod>,
}

impl TryFrom<RawAction> for Action {
    type Error = ActionParseError;

    fn try_from(raw: RawAction) -> Result<Self, Self::Error> {
        match raw.action_type {
            RawActionType::ThreeDS2 => {
                let subtype = raw.subtype.ok_or(ActionParseError::MissingSubtype)?;
                let token = raw
                    .token
                    .ok_or(ActionParseError::MissingField("token", "threeDS2"))?;
                let authorisation_token = raw
                    .authorisation_token
                    .ok_or(ActionParseError::MissingField("authorisationToken", "threeDS2"))?;
                Ok(match subtype {
                    RawSubtype::Fingerprint => Self::Fingerprint(FingerprintAction {
                        fingerprint_token: token,
                        authorisation_token: Some(authorisation_token),
                        payment_data: raw.payment_data,
                    }),
                    RawSubtype::Challenge => Self::Challenge(ChallengeAction {
                        challenge_token: token,
                        authorisation_token: Some(authorisation_token),
                        payment_data: raw.payment_data,
                    }),
                })
            }
            RawActionType::ThreeDS2Fingerprint => Ok(Self::Fingerprint(FingerprintAction {
                fingerprint_token: raw
                    .token
                    .ok_or(ActionParseError::MissingField("token", "threeDS2Fingerprint"))?,
                authorisation_token: raw.authorisation_token,
                payment_data: raw.payment_data,
            })),
            RawActionType::ThreeDS2Challenge => Ok(Self::ThreeDS2Challenge(ChallengeAction {
                challenge_token: raw
                    .token
                    .ok_or(ActionParseError::MissingField("token", "threeDS2Challenge"))?,
                authorisation_token: raw.authorisation_token,
                payment_data: raw.payment_data,
            })),
            RawActionType::Redirect => Ok(Self::Redirect(RedirectAction {
                url: raw
                    .url
                    .ok_or(ActionParseError::MissingField("url", "redirect"))?,
                method: raw.method.unwrap_or_default(),
                payment_data: raw.payment_data,
            })),
        }
    }
}
