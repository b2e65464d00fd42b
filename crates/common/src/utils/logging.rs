use std::io;
use tracing_subscriber::{fmt, EnvFilter};

/// Default directives for the catalog service when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info,sea_orm=warn,sqlx=warn,tower_http=info";

/// Output shape of the subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

impl LogFormat {
    /// `json` (any case) selects JSON; everything else is compact.
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Compact
        }
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install the global subscriber writing to stdout. A second call is a no-op.
pub fn init_logging(format: LogFormat) {
    let builder = fmt().with_env_filter(env_filter()).with_target(false).with_writer(io::stdout);
    let _ = match format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}

/// Compact human-readable logs.
pub fn init_logging_default() {
    init_logging(LogFormat::Compact);
}

/// Structured JSON logs for log shippers.
pub fn init_logging_json() {
    init_logging(LogFormat::Json);
}

/// Pick the format from `LOG_FORMAT`.
pub fn init_logging_from_env() {
    let format = std::env::var("LOG_FORMAT").map(|v| LogFormat::parse(&v)).unwrap_or(LogFormat::Compact);
    init_logging(format);
}
