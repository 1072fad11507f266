use crate::config::TelemetryConfig;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

/// Crates whose events follow the configured level; everything else stays at `warn`.
const SERVICE_TARGETS: [&str; 2] = ["weaver_core", "daily_weaver"];

#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    #[error("invalid log filter '{directives}'")]
    EnvFilter {
        directives: String,
        source: ParseError,
    },
    #[error("failed to install the log subscriber: {0}")]
    Subscriber(Box<dyn std::error::Error + Send + Sync>),
}

/// Expands a bare level such as `debug` into per-crate directives. Values that already
/// name targets (`a=b`) or list several directives pass through unchanged.
pub fn filter_directives(log_level: &str) -> String {
    let level = log_level.trim();
    if level.contains('=') || level.contains(',') {
        return level.to_string();
    }

    let mut directives = String::from("warn");
    for target in SERVICE_TARGETS {
        directives.push_str(&format!(",{target}={level}"));
    }
    directives
}

/// Installs the global fmt subscriber. `RUST_LOG` wins over the configured level.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => {
            let directives = filter_directives(&config.log_level);
            EnvFilter::try_new(&directives)
                .map_err(|source| TelemetryError::EnvFilter { directives, source })?
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::Subscriber)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_level_scopes_service_crates() {
        assert_eq!(
            filter_directives(" debug "),
            "warn,weaver_core=debug,daily_weaver=debug"
        );
    }

    #[test]
    fn explicit_directives_pass_through() {
        assert_eq!(filter_directives("info,tower=debug"), "info,tower=debug");
        assert_eq!(filter_directives("weaver_core=trace"), "weaver_core=trace");
    }

    #[test]
    fn expanded_directives_parse() {
        assert!(EnvFilter::try_new(filter_directives("info")).is_ok());
    }
}
