use std::path::PathBuf;

use common_utils::errors::CustomResult;
use error_stack::ResultExt;
use serde::Deserialize;
use threeds_env::{config::Log, env};
use url::Url;

use crate::{
    core::errors::{ApplicationError, ApplicationResult},
    types::MessageVersion,
};
#[cfg(feature = "dummy_sdk")]
use crate::services::{ApprovalInput, RegistrationInput};

#[derive(clap::Parser, Default, Debug)]
pub struct CmdLineConf {
    /// Config file.
    /// Application will look for "config/<RUN_ENV>.toml" if this option isn't specified.
    #[arg(short = 'f', long, value_name = "FILE")]
    pub config_path: Option<PathBuf>,

    /// JSON files holding the actions to handle, in order.
    #[arg(value_name = "ACTION_FILE", required = true)]
    pub actions: Vec<PathBuf>,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Settings {
    pub log: Log,
    pub three_ds2: ThreeDS2Settings,
    #[cfg(feature = "dummy_sdk")]
    pub simulator: SimulatorSettings,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ThreeDS2Settings {
    /// Overrides the `threeDSRequestorAppURL` of challenge tokens.
    pub requestor_app_url: Option<Url>,
    pub compact_flow_min_version: MessageVersion,
    pub flavor: Flavor,
    /// Enables the compact flow with delegated authentication.
    pub delegated_authentication: Option<DelegatedAuthentication>,
}

/// Integration reported in analytics events.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Flavor {
    #[default]
    Components,
    DropIn,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct DelegatedAuthentication {
    pub localized_registration_reason: String,
    pub localized_authentication_reason: String,
    pub relying_party_identifier: String,
    pub registration_policy: RegistrationPolicy,
}

/// When the device registration screen is offered relative to the issuer challenge.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationPolicy {
    #[default]
    AfterChallenge,
    BeforeChallenge,
}

/// Behaviour of the scripted SDK collaborators used by the simulator.
#[cfg(feature = "dummy_sdk")]
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SimulatorSettings {
    pub device_supported: bool,
    pub device_registered: bool,
    pub approval_input: ApprovalInput,
    pub registration_input: RegistrationInput,
    /// Challenge fingerprints instead of approving them frictionlessly.
    pub challenge_required: bool,
    pub trans_status: String,
    /// Makes the challenge fail with this SDK error code.
    pub challenge_error: Option<String>,
    pub redirect_result: String,
}

impl Settings {
    pub fn new() -> ApplicationResult<Self> {
        Self::with_config_path(None)
    }

    pub fn with_config_path(config_path: Option<PathBuf>) -> ApplicationResult<Self> {
        let environment = env::which();
        let config_path =
            threeds_env::Config::config_path(&environment.to_string(), config_path);

        let config = config::Config::builder()
            .add_source(config::File::from(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("THREEDS")
                    .try_parsing(true)
                    .separator("__"),
            )
            .build()
            .change_context(ApplicationError::ConfigurationError)?;

        config
            .try_deserialize()
            .change_context(ApplicationError::ConfigurationError)
            .attach_printable("Unable to deserialize application configuration")
    }

    pub fn validate(&self) -> CustomResult<(), ApplicationError> {
        self.three_ds2.validate()
    }
}
