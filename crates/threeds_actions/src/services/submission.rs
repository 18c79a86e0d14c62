use common_utils::errors::CustomResult;

use crate::{
    core::errors::SubmissionError,
    types::{PaymentData, ThreeDSActionHandlerResult},
};

/// Submits the encoded fingerprint of the compact flow.
///
/// The server answers with a further action (challenge or redirect) or, when the issuer
/// approved frictionlessly, with the final result details.
#[async_trait::async_trait]
pub trait FingerprintSubmitter: Send + Sync {
    async fn submit(
        &self,
        fingerprint: String,
        payment_data: Option<PaymentData>,
    ) -> CustomResult<ThreeDSActionHandlerResult, SubmissionError>;
}
