#![allow(dead_code, clippy::unwrap_used, clippy::panic_in_result_fn)]

use masking as pii;

#[test]
fn basic() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    use pii::{PeekInterface, Secret};
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
    #[serde(rename_all = "camelCase")]
    pub struct Composite {
        authorisation_token: Secret<String>,
        trans_status: String,
    }

    // construct

    let composite = Composite {
        authorisation_token: Secret::new("authToken".to_string()),
        trans_status: "Y".to_string(),
    };

    // clone

    let composite2 = composite.clone();
    assert_eq!(composite, composite2);

    // format

    let got = format!("{:?}", composite);
    let exp = "Composite { authorisation_token: *** alloc::string::String ***, trans_status: \"Y\" }";
    assert_eq!(got, exp);

    // serialize

    let got = serde_json::to_string(&composite).unwrap();
    let exp = "{\"authorisationToken\":\"authToken\",\"transStatus\":\"Y\"}";
    assert_eq!(got, exp);

    // deserialize

    let parsed: Composite = serde_json::from_str(&got).unwrap();
    assert_eq!(parsed.authorisation_token.peek(), "authToken");

    // end

    Ok(())
}

#[test]
fn token_length_strategy() {
    use pii::{PeekInterface, Secret, TokenLength};

    let token: Secret<String, TokenLength> = Secret::new("eyJ9".to_string());
    assert_eq!(format!("{:?}", token), "*** token(4 bytes) ***");
    assert_eq!(token.peek(), "eyJ9");
}
