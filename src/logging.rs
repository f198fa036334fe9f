use std::io;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Default directives when neither `RUST_LOG` nor `--log` is set.
pub const DEFAULT_FILTER: &str = "info,db_query=warn";

/// Install the global subscriber. Logs go to stderr so stdout stays free for
/// the JSON output. `RUST_LOG` wins over `directives`.
pub fn configure_logging(directives: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directives.unwrap_or(DEFAULT_FILTER)));

    let stderr_log = fmt::layer()
        .with_writer(io::stderr)
        .with_target(true)
        .with_filter(filter);

    // A second init (tests, embedding) is not an error worth failing on.
    let _ = tracing_subscriber::Registry::default()
        .with(stderr_log)
        .try_init();
}
