//!
//! Setup logging subsystem.
//!

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    filter::{self, LevelFilter},
    fmt,
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
    EnvFilter, Layer, Registry,
};

use crate::config;

/// Keeps the non-blocking writers alive; dropping it flushes buffered log lines.
#[derive(Debug)]
pub struct TelemetryGuard {
    _log_guards: Vec<WorkerGuard>,
}

///
/// Setup logging sub-system specifying.
/// Expects config and list of names of crates to watch.
///
pub fn setup<Str: AsRef<str>>(
    conf: &config::Log,
    service_name: &str,
    crates_to_watch: impl IntoIterator<Item = Str>,
) -> Result<TelemetryGuard, TryInitError> {
    let mut guards = Vec::new();
    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    if conf.file.enabled {
        let mut path = crate::env::workspace_path();
        path.push(&conf.file.path);
        let file_appender = tracing_appender::rolling::hourly(&path, &conf.file.file_name);
        let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
        guards.push(guard);

        let file_filter = filter::Targets::new().with_default(conf.file.level.into_level());
        layers.push(
            fmt::layer()
                .json()
                .with_current_span(true)
                .with_writer(file_writer)
                .with_filter(file_filter)
                .boxed(),
        );
    }

    if conf.console.enabled {
        let (console_writer, guard) = tracing_appender::non_blocking(std::io::stdout());
        guards.push(guard);

        let console_filter = console_filter(&conf.console, crates_to_watch);

        match conf.console.log_format {
            config::LogFormat::Default => layers.push(
                fmt::layer()
                    .with_timer(fmt::time::time())
                    .with_span_events(fmt::format::FmtSpan::ACTIVE)
                    .pretty()
                    .with_writer(console_writer)
                    .with_filter(console_filter)
                    .boxed(),
            ),
            config::LogFormat::Json => layers.push(
                fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_writer(console_writer)
                    .with_filter(console_filter)
                    .boxed(),
            ),
        }
    }

    tracing_subscriber::registry().with(layers).try_init()?;

    tracing::debug!(service = service_name, "logger initialized");

    Ok(TelemetryGuard {
        _log_guards: guards,
    })
}

// `RUST_LOG` overrides the configured directives.
fn console_filter<Str: AsRef<str>>(
    console: &config::LogConsole,
    crates_to_watch: impl IntoIterator<Item = Str>,
) -> EnvFilter {
    let level = console.level.into_level();
    let mut directives = crates_to_watch
        .into_iter()
        .map(|acrate| format!("{}={level}", acrate.as_ref()))
        .collect::<Vec<_>>();
    directives.extend(console.filtering_directive.clone());

    let directives =
        std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_else(|_| directives.join(","));

    EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy(directives)
}
