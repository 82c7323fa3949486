use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialise the global `tracing` subscriber.
///
/// `log_level` is used as an [`EnvFilter`] directive (`info`, `debug`,
/// `enclave_bench_plot=trace`, ...). `RUST_LOG` takes precedence when set.
/// Falls back to `info` if the directive does not parse.
pub fn setup_logging(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level.to_lowercase()))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .init();
}
