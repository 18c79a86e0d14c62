//!
//! Classic flow: the fingerprint and the challenge result are handed back as details and the
//! server drives the next step.
//!

use error_stack::report;

use crate::{
    core::{
        errors::{ThreeDS2ComponentError, ThreeDS2Result},
        handler::CoreActionHandler,
    },
    types::{Action, FingerprintToken, ThreeDS2Details, ThreeDSActionHandlerResult},
};

#[derive(Debug)]
pub struct ClassicActionHandler {
    core: CoreActionHandler,
}

impl ClassicActionHandler {
    pub fn new(core: CoreActionHandler) -> Self {
        Self { core }
    }

    pub fn core(&self) -> &CoreActionHandler {
        &self.core
    }

    pub async fn handle_fingerprint(
        &self,
        token: &FingerprintToken,
    ) -> ThreeDS2Result<ThreeDSActionHandlerResult> {
        let fingerprint = self.core.handle_fingerprint(token).await?;
        Ok(ThreeDSActionHandlerResult::Details(
            ThreeDS2Details::Fingerprint(fingerprint),
        ))
    }

    /// Accepts both the `threeDS2` challenge and the standalone `threeDS2Challenge` shape.
    pub async fn handle_challenge(&self, action: &Action) -> ThreeDS2Result<ThreeDS2Details> {
        match action {
            Action::Challenge(challenge) | Action::ThreeDS2Challenge(challenge) => self
                .core
                .handle_challenge(challenge)
                .await
                .map(ThreeDS2Details::ChallengeResult),
            other => Err(report!(ThreeDS2ComponentError::UnexpectedAction {
                action: other.name(),
            })),
        }
    }
}
