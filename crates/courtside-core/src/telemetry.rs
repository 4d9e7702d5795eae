//! Tracing setup for the `courtside` binary.
//!
//! The CLI maps `--verbose` to `debug` and `--log-json` to the JSON layer.
//! Every pipeline event is emitted inside the `courtside.analysis` span, so
//! each line carries `analysis_id` and `file_name` in either format.
//!
//! Logs go to stderr. Stdout is reserved for the analysis report, which
//! `analyze --json` prints as a single JSON document.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber. Repeat calls are no-ops.
///
/// `RUST_LOG` overrides `level`. Without it, the HTTP client stack used by
/// the Gemini classifier is held at `warn`.
pub fn init_tracing(json: bool, level: Level) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("{},reqwest=warn,hyper=warn", level.as_str()))
    });

    if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .json(),
            )
            .try_init()
            .ok();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init()
            .ok();
    }
}
