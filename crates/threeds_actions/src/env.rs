#[doc(inline)]
pub use threeds_env::*;

pub mod logger {
    #[doc(inline)]
    pub use threeds_env::{log, logger::*};

    ///
    /// Setup logging sub-system.
    ///
    pub fn setup(conf: &threeds_env::config::Log) -> Result<TelemetryGuard, TryInitError> {
        threeds_env::setup(
            conf,
            "threeds_actions",
            vec![
                "threeds_actions",
                "threeds_simulator",
                "common_utils",
                "masking",
                "threeds_env",
            ],
        )
    }
}
