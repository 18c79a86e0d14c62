use common_utils::{
    errors::{CustomResult, ParsingError},
    ext_traits::StringExt,
};
use serde::{Deserialize, Serialize};

use crate::consts;

/// Parameters reported by the 3DS2 SDK once a transaction exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationRequestParameters {
    /// Encrypted device information.
    pub device_information: String,
    pub sdk_application_identifier: String,
    pub sdk_transaction_identifier: String,
    pub sdk_reference_number: String,
    /// JSON Web Key of the SDK's ephemeral key pair, as a JSON string.
    pub sdk_ephemeral_public_key: String,
    pub message_version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EphemeralPublicKey {
    pub kty: String,
    pub crv: String,
    pub x: String,
    pub y: String,
}

/// Fingerprint payload sent to the server, base64 encoded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fingerprint {
    #[serde(rename = "sdkEncData", default, skip_serializing_if = "Option::is_none")]
    pub device_information: Option<String>,
    #[serde(rename = "sdkEphemPubKey", default, skip_serializing_if = "Option::is_none")]
    pub sdk_ephemeral_public_key: Option<EphemeralPublicKey>,
    #[serde(rename = "sdkReferenceNumber", default, skip_serializing_if = "Option::is_none")]
    pub sdk_reference_number: Option<String>,
    #[serde(rename = "sdkAppID", default, skip_serializing_if = "Option::is_none")]
    pub sdk_application_identifier: Option<String>,
    #[serde(rename = "sdkTransID", default, skip_serializing_if = "Option::is_none")]
    pub sdk_transaction_identifier: Option<String>,
    #[serde(
        rename = "delegatedAuthenticationSDKOutput",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub delegated_authentication_sdk_output: Option<String>,
    #[serde(rename = "threeDS2SDKError", default, skip_serializing_if = "Option::is_none")]
    pub three_ds2_sdk_error: Option<String>,
}

impl Fingerprint {
    pub fn new(
        parameters: &AuthenticationRequestParameters,
        delegated_authentication_sdk_output: Option<String>,
    ) -> CustomResult<Self, ParsingError> {
        let sdk_ephemeral_public_key: EphemeralPublicKey = parameters
            .sdk_ephemeral_public_key
            .parse_struct(consts::EPHEMERAL_PUBLIC_KEY_TYPE)?;

        Ok(Self {
            device_information: Some(parameters.device_information.clone()),
            sdk_ephemeral_public_key: Some(sdk_ephemeral_public_key),
            sdk_reference_number: Some(parameters.sdk_reference_number.clone()),
            sdk_application_identifier: Some(parameters.sdk_application_identifier.clone()),
            sdk_transaction_identifier: Some(parameters.sdk_transaction_identifier.clone()),
            delegated_authentication_sdk_output,
            three_ds2_sdk_error: None,
        })
    }

    /// Fingerprint carrying only the SDK error, for the server to decide how to continue.
    pub fn sdk_error(error: String) -> Self {
        Self {
            three_ds2_sdk_error: Some(error),
            ..Default::default()
        }
    }
}
