//!
//! Interface of the 3DS2 SDK.
//!

use common_utils::errors::CustomResult;
use url::Url;

use crate::{
    core::errors::ThreeDS2SdkError,
    types::{AuthenticationRequestParameters, ChallengeToken, FingerprintToken, MessageVersion},
};

/// Directory server parameters used to create a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceParameters {
    pub directory_server_id: String,
    pub directory_server_public_key: String,
    pub directory_server_root_certificates: String,
    pub message_version: MessageVersion,
}

impl From<&FingerprintToken> for ServiceParameters {
    fn from(token: &FingerprintToken) -> Self {
        Self {
            directory_server_id: token.directory_server_id.clone(),
            directory_server_public_key: token.directory_server_public_key.clone(),
            directory_server_root_certificates: token.directory_server_root_certificates.clone(),
            message_version: token.three_ds_message_version,
        }
    }
}

/// Parameters of an issuer challenge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeParameters {
    pub three_ds_server_transaction_id: String,
    pub acs_transaction_id: String,
    pub acs_reference_number: String,
    pub acs_signed_content: String,
    pub message_version: MessageVersion,
    /// URL the ACS app uses to bring the shopper back after an out-of-band challenge.
    pub three_ds_requestor_app_url: Option<Url>,
}

impl ChallengeParameters {
    /// The configured requestor app URL wins over the one carried by the token.
    pub fn new(token: &ChallengeToken, requestor_app_url: Option<&Url>) -> Self {
        Self {
            three_ds_server_transaction_id: token.three_ds_server_transaction_id.clone(),
            acs_transaction_id: token.acs_transaction_id.clone(),
            acs_reference_number: token.acs_reference_number.clone(),
            acs_signed_content: token.acs_signed_content.clone(),
            message_version: token.message_version,
            three_ds_requestor_app_url: requestor_app_url
                .cloned()
                .or_else(|| token.three_ds_requestor_app_url.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeResult {
    /// `transStatus` reported by the ACS, e.g. `Y` or `N`.
    pub transaction_status: String,
}

#[async_trait::async_trait]
pub trait ThreeDS2Service: Send + Sync {
    async fn create_transaction(
        &self,
        parameters: ServiceParameters,
    ) -> CustomResult<Box<dyn Transaction>, ThreeDS2SdkError>;
}

/// A live 3DS2 transaction. One exists per payment, between fingerprint and challenge.
#[async_trait::async_trait]
pub trait Transaction: Send + Sync {
    fn authentication_request_parameters(
        &self,
    ) -> CustomResult<AuthenticationRequestParameters, ThreeDS2SdkError>;

    async fn perform_challenge(
        &self,
        parameters: ChallengeParameters,
    ) -> CustomResult<ChallengeResult, ThreeDS2SdkError>;
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn token(app_url: Option<&str>) -> ChallengeToken {
        ChallengeToken {
            acs_transaction_id: "acs_trans_id".to_string(),
            acs_reference_number: "acs_ref".to_string(),
            acs_signed_content: "signed".to_string(),
            acs_url: "https://acs.example".to_string(),
            message_version: MessageVersion::new(2, 2, 0),
            three_ds_server_transaction_id: "server_trans_id".to_string(),
            delegated_authentication_sdk_input: None,
            three_ds_requestor_app_url: app_url.map(|url| Url::parse(url).unwrap()),
        }
    }

    #[test]
    fn test_configured_app_url_overrides_token() {
        let configured = Url::parse("https://merchant.example/configured").unwrap();
        let parameters =
            ChallengeParameters::new(&token(Some("https://merchant.example/token")), Some(&configured));
        assert_eq!(parameters.three_ds_requestor_app_url, Some(configured));
    }

    #[test]
    fn test_token_app_url_is_used_as_fallback() {
        let parameters = ChallengeParameters::new(&token(Some("https://merchant.example/token")), None);
        assert_eq!(
            parameters.three_ds_requestor_app_url.unwrap().as_str(),
            "https://merchant.example/token"
        );
        assert!(ChallengeParameters::new(&token(None), None)
            .three_ds_requestor_app_url
            .is_none());
    }
}
