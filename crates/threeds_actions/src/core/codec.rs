//!
//! Base64 JSON codec for action tokens and result payloads.
//!

use base64::Engine;
use common_utils::{
    consts,
    errors::CustomResult,
    ext_traits::{ByteSliceExt, Encode},
};
use error_stack::ResultExt;
use serde::{de::DeserializeOwned, Serialize};

use super::errors::{DecodingError, EncodingError};

/// Decode a base64 encoded JSON document into `T`.
///
/// Padding is optional. Tokens using `-` or `_` are read with the URL-safe alphabet, all other
/// tokens with the standard one, so a token mixing both alphabets is rejected.
pub fn decode_base64<T>(token: &str, type_name: &str) -> CustomResult<T, DecodingError>
where
    T: DeserializeOwned,
{
    let engine = if token.contains(['-', '_']) {
        &consts::BASE64_ENGINE_URL_SAFE_LENIENT
    } else {
        &consts::BASE64_ENGINE_LENIENT
    };

    let bytes = engine
        .decode(token)
        .change_context(DecodingError::DataCorrupted)
        .attach_printable_lazy(|| format!("{type_name} is not valid base64"))?;

    bytes
        .parse_struct(type_name)
        .change_context(DecodingError::DataCorrupted)
}

/// Encode `value` as JSON, then as padded base64 with the standard alphabet.
pub fn encode_base64<T>(value: &T) -> CustomResult<String, EncodingError>
where
    T: Serialize + std::fmt::Debug,
{
    let json = value
        .encode_to_vec()
        .change_context(EncodingError::EncodingFailed)?;
    Ok(consts::BASE64_ENGINE.encode(json))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use serde::Deserialize;
    use test_case::test_case;

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Token {
        value: String,
    }

    #[test_case("eyJ2YWx1ZSI6Ij8_In0=" ; "url safe padded")]
    #[test_case("eyJ2YWx1ZSI6Ij8_In0" ; "url safe unpadded")]
    #[test_case("eyJ2YWx1ZSI6Ij8/In0=" ; "standard padded")]
    #[test_case("eyJ2YWx1ZSI6Ij8/In0" ; "standard unpadded")]
    fn test_decode_accepts_padding_and_alphabets(token: &str) {
        let decoded: Token = decode_base64(token, "Token").unwrap();
        assert_eq!(decoded.value, "??");
    }

    #[test_case("" ; "empty")]
    #[test_case("not base64!" ; "invalid characters")]
    #[test_case("eyJ2YWx1ZSI6Ij8/In0_" ; "mixed alphabets")]
    #[test_case("eyJvdGhlciI6MX0=" ; "schema mismatch")]
    #[test_case("WzFd" ; "json array")]
    fn test_decode_rejects_malformed_tokens(token: &str) {
        let error = decode_base64::<Token>(token, "Token").unwrap_err();
        assert_eq!(error.current_context(), &DecodingError::DataCorrupted);
    }

    #[test]
    fn test_encode_is_padded_standard_base64() {
        let encoded = encode_base64(&Token {
            value: "??".to_string(),
        })
        .unwrap();
        assert_eq!(encoded, "eyJ2YWx1ZSI6Ij8/In0=");
    }
}
