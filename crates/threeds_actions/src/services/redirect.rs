use common_utils::errors::CustomResult;

use crate::{
    core::errors::RedirectError,
    types::{ActionComponentData, RedirectAction},
};

/// Performs web redirects, e.g. the 3DS1 fallback, and returns what the server needs next.
#[async_trait::async_trait]
pub trait RedirectComponent: Send + Sync {
    async fn handle(&self, action: RedirectAction) -> CustomResult<ActionComponentData, RedirectError>;
}
