//! Types.

use serde::Deserialize;
use strum::{Display, EnumString};

/// Category and tag of log event.
///
/// Don't hesitate to add your variant if it is missing here.
#[derive(Debug, Default, Deserialize, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum Tag {
    /// General.
    #[default]
    General,

    /// Action received from the server.
    ActionReceived,
    /// Terminal result handed to the delegate.
    ActionCompleted,

    /// Call to the 3DS2 SDK.
    ThreeDS2SdkCall,
    /// Call to the device authentication SDK.
    AuthenticationSdkCall,
    /// Screen presented to the shopper.
    Presentation,

    /// Call to the fingerprint submission endpoint.
    Submission,
    /// Hand-off to the redirect component.
    Redirect,

    /// Event: analytics.
    Event,
}

/// Action handling flow
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, EnumString)]
pub enum Flow {
    /// Device fingerprint collection.
    ThreeDS2Fingerprint,
    /// Issuer challenge.
    ThreeDS2Challenge,
    /// Biometric approval in place of the challenge.
    DelegatedAuthenticationApproval,
    /// Biometric registration after a challenge.
    DelegatedAuthenticationRegistration,
    /// Redirect fallback.
    Redirect,
}
