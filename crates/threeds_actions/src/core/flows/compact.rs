//!
//! Compact flow: the fingerprint is submitted directly and the challenge produces the final
//! `threeDSResult`. Delegated authentication only runs in this flow.
//!

use std::sync::Arc;

use error_stack::{report, ResultExt};
use threeds_env::Tag;

use crate::{
    core::{
        errors::{ThreeDS2ComponentError, ThreeDS2Result},
        handler::CoreActionHandler,
    },
    logger,
    services::FingerprintSubmitter,
    types::{
        Action, FingerprintAction, FingerprintToken, ThreeDS2Details, ThreeDSActionHandlerResult,
    },
};

pub struct CompactActionHandler {
    core: CoreActionHandler,
    submitter: Arc<dyn FingerprintSubmitter>,
}

impl std::fmt::Debug for CompactActionHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompactActionHandler")
            .field("core", &self.core)
            .finish_non_exhaustive()
    }
}

impl CompactActionHandler {
    pub fn new(core: CoreActionHandler, submitter: Arc<dyn FingerprintSubmitter>) -> Self {
        Self { core, submitter }
    }

    pub fn core(&self) -> &CoreActionHandler {
        &self.core
    }

    /// Fingerprint the device and submit the result.
    ///
    /// The transaction is only kept when the server answers with a challenge.
    pub async fn handle_fingerprint(
        &self,
        token: &FingerprintToken,
        action: &FingerprintAction,
    ) -> ThreeDS2Result<ThreeDSActionHandlerResult> {
        let fingerprint = self.core.handle_fingerprint(token).await?;

        logger::debug!(tag = ?Tag::Submission, "submitting fingerprint");
        let result = self
            .submitter
            .submit(fingerprint, action.payment_data.clone())
            .await
            .change_context(ThreeDS2ComponentError::FingerprintSubmissionFailed);

        if !matches!(
            result,
            Ok(ThreeDSActionHandlerResult::Action(Action::Challenge(_)))
        ) {
            self.core.release_transaction().await;
        }
        result
    }

    /// Only the `threeDS2` challenge belongs to this flow. Anything else ends the payment.
    pub async fn handle_challenge(&self, action: &Action) -> ThreeDS2Result<ThreeDS2Details> {
        match action {
            Action::Challenge(challenge) => self
                .core
                .handle_challenge(challenge)
                .await
                .map(ThreeDS2Details::Completed),
            other => {
                self.core.release_transaction().await;
                Err(report!(ThreeDS2ComponentError::UnexpectedAction {
                    action: other.name(),
                }))
            }
        }
    }
}
