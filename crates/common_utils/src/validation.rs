//! Custom validations for some shared types.

use error_stack::report;

use crate::errors::{CustomResult, ValidationError};

/// Fails with [`ValidationError::MissingRequiredField`] when the value is empty or whitespace.
pub fn validate_non_empty(field_name: &str, value: &str) -> CustomResult<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(report!(ValidationError::MissingRequiredField {
            field_name: field_name.to_string(),
        }));
    }
    Ok(())
}

/// Validates a URL the authentication app can be brought back with once an out-of-band
/// challenge finishes.
///
/// Plain `http` is rejected; `https` and custom app schemes (`myapp://`) are accepted.
pub fn validate_app_url(app_url: &url::Url) -> CustomResult<(), ValidationError> {
    match app_url.scheme() {
        "http" => Err(report!(ValidationError::InvalidValue {
            message: format!("Insecure app URL scheme in {app_url}"),
        })),
        "https" if app_url.host_str().is_none() => Err(report!(ValidationError::InvalidValue {
            message: format!("App URL {app_url} has no host"),
        })),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use proptest::prelude::*;
    use test_case::test_case;

    use super::*;

    #[test_case("https://merchant.example/3ds" ; "https url")]
    #[test_case("merchantapp://3ds/return" ; "custom scheme")]
    fn test_valid_app_url(input: &str) {
        let url = url::Url::parse(input).unwrap();
        assert!(validate_app_url(&url).is_ok());
    }

    #[test_case("http://merchant.example/3ds" ; "plain http")]
    fn test_invalid_app_url(input: &str) {
        let url = url::Url::parse(input).unwrap();
        let result = validate_app_url(&url);
        assert!(matches!(
            result.unwrap_err().current_context(),
            ValidationError::InvalidValue { .. }
        ));
    }

    #[test_case("" ; "empty")]
    #[test_case("   " ; "whitespace")]
    fn test_empty_value_rejected(value: &str) {
        assert!(validate_non_empty("relying_party_identifier", value).is_err());
    }

    proptest! {
        #[test]
        fn proptest_non_blank_values_accepted(value in "[a-zA-Z0-9.]{1,32}") {
            prop_assert!(validate_non_empty("field", &value).is_ok());
        }
    }
}
