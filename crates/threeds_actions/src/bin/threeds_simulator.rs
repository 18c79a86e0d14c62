use std::sync::Arc;

use common_utils::ext_traits::ByteSliceExt;
use error_stack::ResultExt;
use masking::Secret;
use threeds_actions::{
    configs::settings::{CmdLineConf, Settings},
    core::errors::{ApplicationError, ApplicationResult},
    logger,
    services::dummy_sdk::{
        self, DummyAuthenticationSdk, DummyPresenter, DummyRedirect, DummySubmitter,
        DummyThreeDS2Service, RecordingDelegate,
    },
    types::{
        ChallengeAction, ThreeDS2Details, ThreeDSActionHandlerResult, ThreeDSResultPayload,
    },
    Action, Collaborators, ThreeDS2Component, ThreeDSResult,
};

#[tokio::main]
async fn main() -> ApplicationResult<()> {
    // get commandline config before initializing config
    let cmd_line = <CmdLineConf as clap::Parser>::parse();

    #[allow(clippy::expect_used)]
    let conf = Settings::with_config_path(cmd_line.config_path)
        .expect("Unable to construct application configuration");
    #[allow(clippy::expect_used)]
    conf.validate()
        .expect("Failed to validate simulator configuration");

    let _guard = logger::setup(&conf.log).change_context(ApplicationError::LoggerError)?;

    logger::info!("Simulator started [{:?}] [{:?}]", conf.three_ds2, conf.simulator);

    let delegate = Arc::new(RecordingDelegate::default());
    let component = ThreeDS2Component::new(&conf.three_ds2, collaborators(&conf)?, delegate.clone());

    for path in cmd_line.actions {
        let contents = tokio::fs::read(&path)
            .await
            .change_context(ApplicationError::ActionFileError)
            .attach_printable_lazy(|| format!("Unable to read {}", path.display()))?;
        let action: Action = contents
            .parse_struct("Action")
            .change_context(ApplicationError::ActionFileError)
            .attach_printable_lazy(|| format!("Unable to parse {}", path.display()))?;

        component.handle(action).await;
    }

    logger::info!(outcomes = delegate.outcomes().len(), "Simulator finished");
    Ok(())
}

fn collaborators(conf: &Settings) -> ApplicationResult<Collaborators> {
    let simulator = &conf.simulator;

    let submission = if simulator.challenge_required {
        let challenge_token = dummy_sdk::challenge_token(Some("simulated-sdk-input"), None)
            .change_context(ApplicationError::ConfigurationError)?;
        ThreeDSActionHandlerResult::Action(Action::Challenge(ChallengeAction {
            challenge_token,
            authorisation_token: Some(Secret::new("simulated-authorisation-token".to_string())),
            payment_data: None,
        }))
    } else {
        let result = ThreeDSResult::new(&ThreeDSResultPayload::completed(
            simulator.trans_status.clone(),
            None,
            None,
        ))
        .change_context(ApplicationError::ConfigurationError)?;
        ThreeDSActionHandlerResult::Details(ThreeDS2Details::Completed(result))
    };

    Ok(Collaborators {
        three_ds2_service: Arc::new(DummyThreeDS2Service::from_settings(simulator)),
        authentication_sdk: Some(Arc::new(DummyAuthenticationSdk::from_settings(simulator))),
        presenter: Some(Arc::new(DummyPresenter::from_settings(simulator))),
        redirect: Arc::new(DummyRedirect::new(&simulator.redirect_result)),
        fingerprint_submitter: Some(Arc::new(DummySubmitter::new(submission))),
    })
}
