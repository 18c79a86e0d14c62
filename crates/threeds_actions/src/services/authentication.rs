use common_utils::errors::CustomResult;

use crate::core::errors::AuthenticationSdkError;

/// Device authentication SDK backing delegated authentication.
///
/// Inputs and outputs are opaque base64 blobs exchanged with the server.
#[async_trait::async_trait]
pub trait AuthenticationSdk: Send + Sync {
    async fn is_device_supported(&self) -> bool;

    /// Whether a credential for the given input is stored on this device.
    async fn is_device_registered(&self, input: &str) -> CustomResult<bool, AuthenticationSdkError>;

    async fn register(&self, input: &str) -> CustomResult<String, AuthenticationSdkError>;

    async fn authenticate(&self, input: &str) -> CustomResult<String, AuthenticationSdkError>;

    /// Removes every credential stored on this device.
    async fn reset(&self) -> CustomResult<(), AuthenticationSdkError>;
}
