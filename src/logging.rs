use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Environment variable that overrides every other log setting.
pub const LOG_ENV: &str = "STUDYCOACH_LOG";

/// Initialize tracing once per process.
///
/// Precedence: `STUDYCOACH_LOG`, then `--verbose` (debug), then the
/// `fallback` directive from preferences. Logs go to stderr so `--json`
/// output on stdout stays parseable.
pub fn init_logging(verbose: bool, fallback: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        let directive = if verbose { "debug" } else { fallback };
        EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("warn"))
    });

    let subscriber = tracing_subscriber::registry().with(filter).with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact(),
    );

    // A second initialization (e.g. from tests) keeps the first subscriber.
    let _ = tracing::subscriber::set_global_default(subscriber);
}
