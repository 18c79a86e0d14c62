//!
//! The two 3DS2 flows and the enum the component dispatches through.
//!

pub mod classic;
pub mod compact;

pub use self::{classic::ClassicActionHandler, compact::CompactActionHandler};
use super::errors::ThreeDS2Result;
use crate::types::{
    Action, FingerprintAction, FingerprintToken, ThreeDS2Details, ThreeDSActionHandlerResult,
};

/// Flow chosen for an action, borrowed from the component.
#[derive(Debug, Clone, Copy)]
pub enum FlowHandler<'a> {
    Compact(&'a CompactActionHandler),
    Classic(&'a ClassicActionHandler),
}

impl FlowHandler<'_> {
    pub async fn handle_fingerprint(
        self,
        token: &FingerprintToken,
        action: &FingerprintAction,
    ) -> ThreeDS2Result<ThreeDSActionHandlerResult> {
        match self {
            Self::Compact(handler) => handler.handle_fingerprint(token, action).await,
            Self::Classic(handler) => handler.handle_fingerprint(token).await,
        }
    }

    pub async fn handle_challenge(self, action: &Action) -> ThreeDS2Result<ThreeDS2Details> {
        match self {
            Self::Compact(handler) => handler.handle_challenge(action).await,
            Self::Classic(handler) => handler.handle_challenge(action).await,
        }
    }

    pub async fn has_transaction(self) -> bool {
        match self {
            Self::Compact(handler) => handler.core().has_transaction().await,
            Self::Classic(handler) => handler.core().has_transaction().await,
        }
    }

    pub async fn release_transaction(self) {
        match self {
            Self::Compact(handler) => handler.core().release_transaction().await,
            Self::Classic(handler) => handler.core().release_transaction().await,
        }
    }
}
