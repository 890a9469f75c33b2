#![forbid(unsafe_code)]

//! Subscriber setup for the harness binary.

use clap::ValueEnum;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::error::{HarnessError, Result};

/// Environment variable holding the filter directives.
pub const LOG_ENV: &str = "RANGEKNOB_LOG";
const DEFAULT_DIRECTIVES: &str = "warn";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Filter from `RANGEKNOB_LOG`, falling back to `warn`.
pub fn env_filter() -> Result<EnvFilter> {
    match std::env::var(LOG_ENV) {
        Ok(directives) => EnvFilter::try_new(&directives).map_err(|err| HarnessError::Logging {
            message: format!("{LOG_ENV}={directives}: {err}"),
        }),
        Err(_) => Ok(EnvFilter::new(DEFAULT_DIRECTIVES)),
    }
}

/// Install the global subscriber. Logs go to stderr so reports on stdout
/// stay machine-readable.
pub fn init(format: LogFormat) -> Result<()> {
    let registry = tracing_subscriber::registry().with(env_filter()?);
    let installed = match format {
        LogFormat::Pretty => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .pretty(),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .json()
                    .flatten_event(true)
                    .with_span_list(true),
            )
            .try_init(),
    };
    installed.map_err(|err| HarnessError::Logging {
        message: err.to_string(),
    })
}
