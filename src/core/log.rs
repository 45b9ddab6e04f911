use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, filter::Targets, fmt, prelude::__tracing_subscriber_SubscriberExt,
    util::SubscriberInitExt,
};

/// Maps the number of `-v` flags to a level for this crate's spans and
/// events. Dependencies stay quiet unless `RUST_LOG` asks for them.
pub fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::OFF,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Installs the global subscriber, writing to stderr so that exported text
/// on stdout is never interleaved with log lines.
pub fn init_logging(verbosity: u8) {
    let level = level_for(verbosity);
    let crate_filter = Targets::new().with_target(env!("CARGO_CRATE_NAME"), level);

    let registry = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(verbosity > 2)
            .without_time(),
    );

    // An explicit RUST_LOG replaces the -v mapping entirely.
    match EnvFilter::try_from_default_env() {
        Ok(env_filter) => registry.with(env_filter).init(),
        Err(_) => registry.with(crate_filter).init(),
    }
}
