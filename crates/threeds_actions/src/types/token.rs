use serde::{Deserialize, Serialize};
use url::Url;

use super::MessageVersion;

/// Decoded `token` of a fingerprint action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FingerprintToken {
    #[serde(rename = "directoryServerId")]
    pub directory_server_id: String,
    #[serde(rename = "directoryServerPublicKey")]
    pub directory_server_public_key: String,
    #[serde(rename = "directoryServerRootCertificates")]
    pub directory_server_root_certificates: String,
    #[serde(rename = "threeDSMessageVersion")]
    pub three_ds_message_version: MessageVersion,
    #[serde(rename = "threeDSServerTransactionId")]
    pub three_ds_server_transaction_id: String,
    #[serde(
        rename = "delegatedAuthenticationSDKInput",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub delegated_authentication_sdk_input: Option<String>,
}

/// Decoded `token` of a challenge action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeToken {
    #[serde(rename = "acsTransactionId")]
    pub acs_transaction_id: String,
    #[serde(rename = "acsReferenceNumber")]
    pub acs_reference_number: String,
    #[serde(rename = "acsSignedContent")]
    pub acs_signed_content: String,
    #[serde(rename = "acsURL")]
    pub acs_url: String,
    #[serde(rename = "messageVersion")]
    pub message_version: MessageVersion,
    #[serde(rename = "threeDSServerTransactionId")]
    pub three_ds_server_transaction_id: String,
    #[serde(
        rename = "delegatedAuthenticationSDKInput",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub delegated_authentication_sdk_input: Option<String>,
    #[serde(
        rename = "threeDSRequestorAppURL",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub three_ds_requestor_app_url: Option<Url>,
}
