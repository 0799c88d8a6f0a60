use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable consulted for log directives (`RUST_LOG` syntax).
pub const LOG_ENV: &str = "POSTSMITH_LOG";

/// Install a global tracing subscriber writing compact lines to stderr.
///
/// `default_level` applies when `POSTSMITH_LOG` is unset or unparsable.
/// Calling this more than once is harmless; later calls are ignored.
pub fn init(default_level: tracing::Level) {
    let env_filter = EnvFilter::builder()
        .with_default_directive(tracing::level_filters::LevelFilter::from_level(default_level).into())
        .with_env_var(LOG_ENV)
        .from_env_lossy();

    let fmt_layer = fmt::layer()
        .compact()
        .with_target(true)
        .with_writer(std::io::stderr);

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init();
}
