pub mod authentication;
pub mod delegate;
#[cfg(feature = "dummy_sdk")]
pub mod dummy_sdk;
pub mod presentation;
pub mod redirect;
pub mod submission;
pub mod three_ds2;

pub use self::{
    authentication::AuthenticationSdk,
    delegate::{ActionComponentDelegate, ComponentSource},
    presentation::{ApprovalInput, ErrorScreen, PresentationContext, PresentationDelegate, RegistrationInput},
    redirect::RedirectComponent,
    submission::FingerprintSubmitter,
    three_ds2::{ChallengeParameters, ChallengeResult, ServiceParameters, ThreeDS2Service, Transaction},
};
