use tracing_subscriber::{fmt, fmt::format::FmtSpan, EnvFilter};

pub const DEFAULT_LOG_LEVEL: &str = "INFO";

/// Builds the filter for the pregel crates at `log_level`; `RUST_LOG` wins when it is set.
pub fn get_log_env(log_level: String) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "pregel={},pregel_api={}",
            log_level, log_level
        ))
    })
}

/// Installs a global fmt subscriber writing to stderr. A second call is a no-op.
pub fn init_logging(log_level: &str) {
    let _ = fmt()
        .with_env_filter(get_log_env(log_level.to_string()))
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr)
        .try_init();
}
