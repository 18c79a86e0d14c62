#![allow(clippy::unwrap_used, clippy::panic)]

mod utils;

use masking::PeekInterface;
use threeds_actions::{
    configs::settings::RegistrationPolicy,
    core::codec,
    services::{
        dummy_sdk::{
            DelegateOutcome, DummyAuthenticationSdk, DummyPresenter, DummySubmitter,
            DummyThreeDS2Service,
        },
        ApprovalInput, ComponentSource, RegistrationInput,
    },
    types::{Fingerprint, ThreeDSActionHandlerResult},
    Action, AdditionalDetails, ThreeDS2ComponentError, ThreeDS2Details,
};
use utils::Harness;

#[tokio::test]
async fn frictionless_submission_completes_without_delegated_output() {
    // Arrange
    let harness = Harness::builder()
        .submitter(DummySubmitter::new(utils::frictionless("Y")))
        .build();

    // Act
    harness
        .component
        .handle(utils::fingerprint_action("2.2.0", None))
        .await;

    // Assert
    let DelegateOutcome::Provided(data, ComponentSource::ThreeDS2) = harness.outcome() else {
        panic!("expected 3DS2 details");
    };
    assert!(matches!(
        data.details,
        AdditionalDetails::ThreeDS2(ThreeDS2Details::Completed(_))
    ));
    let payload = utils::result_payload(&data);
    assert_eq!(payload.trans_status.as_deref(), Some("Y"));
    assert!(payload.delegated_authentication_sdk_output.is_none());
    assert_eq!(data.payment_data.unwrap().peek(), utils::PAYMENT_DATA);
    assert_eq!(harness.service.challenges_performed(), 0);
}

#[tokio::test]
async fn frictionless_submission_releases_transaction() {
    let harness = Harness::builder()
        .submitter(DummySubmitter::new(utils::frictionless("Y")))
        .build();

    harness
        .component
        .process(utils::fingerprint_action("2.2.0", None))
        .await
        .unwrap();
    let error = harness
        .component
        .process(utils::challenge_action(None))
        .await
        .unwrap_err();

    assert_eq!(
        error.current_context(),
        &ThreeDS2ComponentError::MissingTransaction
    );
    assert_eq!(harness.service.challenges_performed(), 0);
}

#[tokio::test]
async fn challenge_then_registration_embeds_sdk_output() {
    // Arrange
    let harness = Harness::builder()
        .authentication_sdk(DummyAuthenticationSdk::unregistered())
        .presenter(DummyPresenter::default().with_registration(RegistrationInput::Register))
        .build();

    // Act
    let data = harness
        .component
        .process(utils::fingerprint_action("2.2.0", Some(utils::SDK_INPUT)))
        .await
        .unwrap();

    // Assert
    let payload = utils::result_payload(&data);
    assert_eq!(payload.trans_status.as_deref(), Some("Y"));
    assert_eq!(
        payload.delegated_authentication_sdk_output.as_deref(),
        Some("register-output")
    );
    assert_eq!(
        payload.authorisation_token.unwrap().peek(),
        utils::AUTHORISATION_TOKEN
    );
    assert_eq!(harness.authentication_sdk.register_calls(), 1);
    assert_eq!(harness.authentication_sdk.authenticate_calls(), 0);
}

#[tokio::test]
async fn registration_runs_after_challenge_by_default() {
    let harness = Harness::builder().build();

    harness
        .component
        .process(utils::fingerprint_action("2.2.0", Some(utils::SDK_INPUT)))
        .await
        .unwrap();

    let challenge = harness.call_log.position("perform_challenge").unwrap();
    let presentation = harness.call_log.position("present_registration").unwrap();
    let register = harness.call_log.position("register").unwrap();
    assert!(challenge < presentation);
    assert!(presentation < register);
}

#[tokio::test]
async fn registration_before_challenge_still_challenges() {
    let harness = Harness::builder()
        .settings(utils::compact_settings(RegistrationPolicy::BeforeChallenge))
        .build();

    let data = harness
        .component
        .process(utils::fingerprint_action("2.2.0", Some(utils::SDK_INPUT)))
        .await
        .unwrap();

    let register = harness.call_log.position("register").unwrap();
    let challenge = harness.call_log.position("perform_challenge").unwrap();
    assert!(register < challenge);
    assert_eq!(harness.service.challenges_performed(), 1);
    assert_eq!(
        utils::result_payload(&data)
            .delegated_authentication_sdk_output
            .as_deref(),
        Some("register-output")
    );
}

#[tokio::test]
async fn registration_is_not_offered_after_a_challenge_error() {
    let harness = Harness::builder()
        .service(DummyThreeDS2Service::failing_challenge(
            threeds_actions::core::errors::ThreeDS2SdkError::Cancelled,
        ))
        .build();

    let data = harness
        .component
        .process(utils::fingerprint_action("2.2.0", Some(utils::SDK_INPUT)))
        .await
        .unwrap();

    let payload = utils::result_payload(&data);
    assert!(payload.trans_status.is_none());
    assert!(payload.three_ds2_sdk_error.is_some());
    assert!(payload.delegated_authentication_sdk_output.is_none());
    assert_eq!(harness.presenter.presentations(), 0);
}

#[tokio::test]
async fn declined_registration_keeps_challenge_result() {
    let harness = Harness::builder()
        .presenter(DummyPresenter::default().with_registration(RegistrationInput::NotNow))
        .build();

    let data = harness
        .component
        .process(utils::fingerprint_action("2.2.0", Some(utils::SDK_INPUT)))
        .await
        .unwrap();

    let payload = utils::result_payload(&data);
    assert_eq!(payload.trans_status.as_deref(), Some("Y"));
    assert!(payload.delegated_authentication_sdk_output.is_none());
    assert_eq!(harness.authentication_sdk.register_calls(), 0);
}

#[tokio::test]
async fn approved_device_sends_authentication_output_with_fingerprint() {
    // Arrange
    let harness = Harness::builder()
        .authentication_sdk(DummyAuthenticationSdk::registered())
        .presenter(DummyPresenter::default().with_approval(ApprovalInput::UseBiometrics))
        .build();

    // Act
    let data = harness
        .component
        .process(utils::fingerprint_action("2.2.0", Some(utils::SDK_INPUT)))
        .await
        .unwrap();

    // Assert
    let (fingerprint, _) = harness.submitter.submissions().remove(0);
    let fingerprint: Fingerprint = codec::decode_base64(&fingerprint, "Fingerprint").unwrap();
    assert_eq!(
        fingerprint.delegated_authentication_sdk_output.as_deref(),
        Some("authenticate-output")
    );
    assert!(fingerprint.three_ds2_sdk_error.is_none());

    let approval = harness.call_log.position("present_approval").unwrap();
    let authenticate = harness.call_log.position("authenticate").unwrap();
    assert!(approval < authenticate);

    // an approved device is never offered registration
    assert!(utils::result_payload(&data)
        .delegated_authentication_sdk_output
        .is_none());
    assert_eq!(harness.authentication_sdk.register_calls(), 0);
}

#[tokio::test]
async fn approve_differently_skips_registration_offer() {
    let harness = Harness::builder()
        .authentication_sdk(DummyAuthenticationSdk::registered())
        .presenter(DummyPresenter::default().with_approval(ApprovalInput::ApproveDifferently))
        .build();

    let data = harness
        .component
        .process(utils::fingerprint_action("2.2.0", Some(utils::SDK_INPUT)))
        .await
        .unwrap();

    assert_eq!(
        utils::result_payload(&data).trans_status.as_deref(),
        Some("Y")
    );
    assert_eq!(harness.authentication_sdk.authenticate_calls(), 0);
    assert_eq!(harness.presenter.presentations(), 1);
}

#[tokio::test]
async fn failing_authentication_sdk_matches_plain_flow() {
    let failing = Harness::builder()
        .authentication_sdk(
            DummyAuthenticationSdk::unregistered()
                .failing_authentication()
                .failing_registration(),
        )
        .build();
    let unsupported = Harness::builder()
        .authentication_sdk(DummyAuthenticationSdk::unsupported())
        .build();

    let with_failures = failing
        .component
        .process(utils::fingerprint_action("2.2.0", Some(utils::SDK_INPUT)))
        .await
        .unwrap();
    let without_delegation = unsupported
        .component
        .process(utils::fingerprint_action("2.2.0", Some(utils::SDK_INPUT)))
        .await
        .unwrap();

    assert_eq!(with_failures, without_delegation);
    assert_eq!(failing.authentication_sdk.register_calls(), 1);
}

#[tokio::test]
async fn cancelled_approval_continues_with_plain_fingerprint() {
    // Arrange
    let cancelled = Harness::builder()
        .authentication_sdk(DummyAuthenticationSdk::registered())
        .presenter(DummyPresenter::default().cancelling())
        .submitter(DummySubmitter::new(utils::frictionless("Y")))
        .build();
    let unsupported = Harness::builder()
        .authentication_sdk(DummyAuthenticationSdk::unsupported())
        .submitter(DummySubmitter::new(utils::frictionless("Y")))
        .build();

    // Act
    cancelled
        .component
        .handle(utils::fingerprint_action("2.2.0", Some(utils::SDK_INPUT)))
        .await;
    unsupported
        .component
        .handle(utils::fingerprint_action("2.2.0", Some(utils::SDK_INPUT)))
        .await;

    // Assert
    let outcome = cancelled.outcome();
    assert!(matches!(
        outcome,
        DelegateOutcome::Provided(_, ComponentSource::ThreeDS2)
    ));
    assert_eq!(outcome, unsupported.outcome());

    let (fingerprint, _) = cancelled.submitter.submissions().remove(0);
    let fingerprint: Fingerprint = codec::decode_base64(&fingerprint, "Fingerprint").unwrap();
    assert!(fingerprint.delegated_authentication_sdk_output.is_none());
    assert_eq!(cancelled.authentication_sdk.authenticate_calls(), 0);
}

#[tokio::test]
async fn submission_failure_is_reported() {
    let harness = Harness::builder()
        .submitter(DummySubmitter::failing())
        .build();

    let error = harness
        .component
        .process(utils::fingerprint_action("2.2.0", None))
        .await
        .unwrap_err();

    assert_eq!(
        error.current_context(),
        &ThreeDS2ComponentError::FingerprintSubmissionFailed
    );
}

#[tokio::test]
async fn submitted_payment_data_is_the_fingerprint_actions() {
    let harness = Harness::builder().build();

    harness
        .component
        .process(utils::fingerprint_action("2.2.0", None))
        .await
        .unwrap();

    let (_, payment_data) = harness.submitter.submissions().remove(0);
    assert_eq!(payment_data.unwrap().peek(), utils::PAYMENT_DATA);
}

#[tokio::test]
async fn legacy_challenge_as_further_action_is_unexpected() {
    // Arrange
    let harness = Harness::builder()
        .submitter(DummySubmitter::new(ThreeDSActionHandlerResult::Action(
            utils::legacy_challenge_action(),
        )))
        .build();

    // Act
    harness
        .component
        .handle(utils::fingerprint_action("2.2.0", None))
        .await;

    // Assert
    assert_eq!(
        harness.outcome(),
        DelegateOutcome::Failed(
            ThreeDS2ComponentError::UnexpectedAction {
                action: "threeDS2Challenge"
            },
            ComponentSource::ThreeDS2
        )
    );
    assert_eq!(harness.service.challenges_performed(), 0);

    let error = harness
        .component
        .process(utils::challenge_action(None))
        .await
        .unwrap_err();
    assert_eq!(
        error.current_context(),
        &ThreeDS2ComponentError::MissingTransaction
    );
}

#[tokio::test]
async fn fingerprint_as_further_action_is_unexpected() {
    let harness = Harness::builder()
        .submitter(DummySubmitter::new(ThreeDSActionHandlerResult::Action(
            utils::fingerprint_action("2.2.0", None),
        )))
        .build();

    let error = harness
        .component
        .process(utils::fingerprint_action("2.2.0", None))
        .await
        .unwrap_err();

    assert_eq!(
        error.current_context(),
        &ThreeDS2ComponentError::UnexpectedAction {
            action: "threeDS2.fingerprint"
        }
    );
    assert_eq!(harness.service.transactions_created(), 1);
}

#[tokio::test]
async fn redirect_as_further_action_is_forwarded() {
    let harness = Harness::builder()
        .submitter(DummySubmitter::new(ThreeDSActionHandlerResult::Action(
            utils::redirect_action(),
        )))
        .build();

    harness
        .component
        .handle(utils::fingerprint_action("2.2.0", None))
        .await;

    let DelegateOutcome::Provided(data, ComponentSource::Redirect) = harness.outcome() else {
        panic!("expected redirect details");
    };
    let redirects = harness.redirect.redirects();
    assert_eq!(redirects.len(), 1);
    assert_eq!(Action::Redirect(redirects[0].clone()), utils::redirect_action());
    assert!(matches!(data.details, AdditionalDetails::Redirect(_)));
    assert_eq!(harness.service.challenges_performed(), 0);
}
