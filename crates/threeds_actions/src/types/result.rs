use common_utils::errors::CustomResult;
use error_stack::report;
use serde::{Deserialize, Serialize};

use super::AuthorisationToken;
use crate::{
    consts,
    core::{
        codec,
        errors::{DecodingError, EncodingError},
    },
};

/// Terminal authentication result: the base64 encoded [`ThreeDSResultPayload`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThreeDSResult {
    payload: String,
}

impl ThreeDSResult {
    pub fn new(payload: &ThreeDSResultPayload) -> CustomResult<Self, EncodingError> {
        if !payload.is_consistent() {
            return Err(report!(EncodingError::InconsistentPayload));
        }
        codec::encode_base64(payload).map(|payload| Self { payload })
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn decode(&self) -> CustomResult<ThreeDSResultPayload, DecodingError> {
        let payload: ThreeDSResultPayload =
            codec::decode_base64(&self.payload, consts::THREE_DS_RESULT_TYPE)?;
        if !payload.is_consistent() {
            return Err(report!(DecodingError::DataCorrupted)
                .attach_printable("Expected exactly one of transStatus and threeDS2SDKError"));
        }
        Ok(payload)
    }
}

/// Fields are declared in the order they are emitted on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreeDSResultPayload {
    #[serde(rename = "authorisationToken", default, skip_serializing_if = "Option::is_none")]
    pub authorisation_token: Option<AuthorisationToken>,
    #[serde(
        rename = "delegatedAuthenticationSDKOutput",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub delegated_authentication_sdk_output: Option<String>,
    #[serde(rename = "threeDS2SDKError", default, skip_serializing_if = "Option::is_none")]
    pub three_ds2_sdk_error: Option<String>,
    #[serde(rename = "transStatus", default, skip_serializing_if = "Option::is_none")]
    pub trans_status: Option<String>,
}

impl ThreeDSResultPayload {
    pub fn completed(
        trans_status: String,
        authorisation_token: Option<AuthorisationToken>,
        delegated_authentication_sdk_output: Option<String>,
    ) -> Self {
        Self {
            authorisation_token,
            delegated_authentication_sdk_output,
            three_ds2_sdk_error: None,
            trans_status: Some(trans_status),
        }
    }

    pub fn sdk_error(
        error: String,
        authorisation_token: Option<AuthorisationToken>,
        delegated_authentication_sdk_output: Option<String>,
    ) -> Self {
        Self {
            authorisation_token,
            delegated_authentication_sdk_output,
            three_ds2_sdk_error: Some(error),
            trans_status: None,
        }
    }

    pub fn is_consistent(&self) -> bool {
        self.trans_status.is_some() != self.three_ds2_sdk_error.is_some()
    }
}
