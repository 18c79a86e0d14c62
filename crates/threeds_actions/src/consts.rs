//! Constants of the 3-D Secure action flows.

use crate::types::MessageVersion;

/// Lowest 3DS message version eligible for the compact flow with delegated authentication.
pub const DEFAULT_COMPACT_FLOW_MIN_VERSION: MessageVersion = MessageVersion::new(2, 2, 0);

/// Analytics component names of the classic flow.
pub const CLASSIC_FINGERPRINT_EVENT: &str = "3ds2fingerprint";
pub const CLASSIC_CHALLENGE_EVENT: &str = "3ds2challenge";

/// Analytics component names of the compact flow.
pub const COMPACT_FINGERPRINT_EVENT: &str = "3ds2.fingerprint";
pub const COMPACT_CHALLENGE_EVENT: &str = "3ds2.challenge";

pub const FINGERPRINT_TOKEN_TYPE: &str = "FingerprintToken";
pub const CHALLENGE_TOKEN_TYPE: &str = "ChallengeToken";
pub const THREE_DS_RESULT_TYPE: &str = "ThreeDSResult";
pub const EPHEMERAL_PUBLIC_KEY_TYPE: &str = "EphemeralPublicKey";
