use tracing_subscriber::{
    EnvFilter, fmt, prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt,
};

/// Only events from this crate are shown by `--verbose`; HTTP internals stay quiet.
const VERBOSE_DIRECTIVE: &str = "kurse=debug";

/// Installs the global subscriber writing to stderr, so diagnostics never mix
/// with the report on stdout. `RUST_LOG` takes precedence over `verbose`.
pub fn init_logging(verbose: bool) {
    let default = if verbose { VERBOSE_DIRECTIVE } else { "off" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .pretty()
                .without_time()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
