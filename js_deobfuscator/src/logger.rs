use tracing_subscriber::{fmt, EnvFilter, prelude::*};

/// JSON logs on stderr, filtered by `RUST_LOG` (default `info`). Stdout is
/// left to the CLI's output.
pub fn init_logging() {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(true)
        .with_writer(std::io::stderr)
        .json();

    let filter_layer = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // a second call (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init();
}
