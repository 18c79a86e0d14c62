impl Default for super::settings::ThreeDS2Settings {
    fn default() -> Self {
        Self {
            requestor_app_url: None,
            compact_flow_min_version: crate::consts::DEFAULT_COMPACT_FLOW_MIN_VERSION,
            flavor: super::settings::Flavor::default(),
            delegated_authentication: None,
        }
    }
}

impl Default for super::settings::DelegatedAuthentication {
    fn default() -> Self {
        Self {
            localized_registration_reason: "Register this device for faster payments".into(),
            localized_authentication_reason: "Approve this payment".into(),
            relying_party_identifier: "localhost".into(),
            registration_policy: super::settings::RegistrationPolicy::default(),
        }
    }
}

#[cfg(feature = "dummy_sdk")]
impl Default for super::settings::SimulatorSettings {
    fn default() -> Self {
        use crate::services::{ApprovalInput, RegistrationInput};

        Self {
            device_supported: true,
            device_registered: false,
            approval_input: ApprovalInput::UseBiometrics,
            registration_input: RegistrationInput::Register,
            challenge_required: true,
            trans_status: "Y".into(),
            challenge_error: None,
            redirect_result: "redirect-result".into(),
        }
    }
}
