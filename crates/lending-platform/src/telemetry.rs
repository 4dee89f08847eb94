use crate::config::TelemetryConfig;
use std::fmt;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
pub enum TelemetryError {
    EnvFilter { value: String, source: ParseError },
    Subscriber(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::EnvFilter { value, .. } => {
                write!(f, "invalid log filter '{value}' for the lending service")
            }
            TelemetryError::Subscriber(err) => write!(f, "failed to install the lending log subscriber: {err}"),
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::EnvFilter { source, .. } => Some(source),
            TelemetryError::Subscriber(err) => Some(&**err),
        }
    }
}

const LENDING_TARGETS: [&str; 2] = ["lending_platform", "lending_platform_api"];
const DEPENDENCY_LEVEL: &str = "warn";

/// Expands a bare level such as `debug` so it applies to the lending crates
/// only, leaving dependencies at `warn`. Full directive lists are
/// used verbatim.
pub(crate) fn lending_directives(log_level: &str) -> String {
    let log_level = log_level.trim();
    if log_level.contains('=') || log_level.contains(',') {
        return log_level.to_string();
    }

    let mut directives = DEPENDENCY_LEVEL.to_string();
    for target in LENDING_TARGETS {
        directives.push_str(&format!(",{target}={log_level}"));
    }
    directives
}

/// Resolves the filter from `RUST_LOG`, falling back to the configured level.
pub(crate) fn build_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    EnvFilter::try_new(lending_directives(&config.log_level)).map_err(|source| {
        TelemetryError::EnvFilter {
            value: config.log_level.clone(),
            source,
        }
    })
}

/// Installs the global subscriber. Logs go to stderr so the interactive
/// console and JSON output on stdout stay machine-readable.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = build_filter(config)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::Subscriber)
}
