use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::sampling::HistoryPolicy;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub storage: StorageConfig,
    pub models: ModelSources,
    pub history: HistoryPolicy,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let data_dir = env::var("WEAVER_DATA_DIR").unwrap_or_else(|_| "data".to_string());

        let defaults = HistoryPolicy::default();
        let no_repeat_days = parse_days("WEAVER_NO_REPEAT_DAYS", defaults.no_repeat_days)?;
        let retention_days =
            parse_days("WEAVER_HISTORY_RETENTION_DAYS", defaults.retention_days)?;
        if retention_days < no_repeat_days {
            return Err(ConfigError::RetentionShorterThanWindow {
                retention_days,
                no_repeat_days,
            });
        }

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            storage: StorageConfig {
                data_dir: PathBuf::from(data_dir),
            },
            models: ModelSources {
                quiz: optional_path("WEAVER_QUIZ_MODEL"),
                mood: optional_path("WEAVER_MOOD_MODEL"),
            },
            history: HistoryPolicy {
                no_repeat_days,
                retention_days,
            },
        })
    }
}

fn parse_days(variable: &'static str, default: u32) -> Result<u32, ConfigError> {
    match env::var(variable) {
        Ok(raw) => raw
            .trim()
            .parse::<u32>()
            .map_err(|_| ConfigError::InvalidDays { variable }),
        Err(_) => Ok(default),
    }
}

fn optional_path(variable: &str) -> Option<PathBuf> {
    env::var(variable)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Locations of the file-backed journal, profile, and pick history.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn profile_path(&self) -> PathBuf {
        self.data_dir.join("profile.json")
    }

    pub fn entries_path(&self) -> PathBuf {
        self.data_dir.join("entries.jsonl")
    }

    pub fn history_path(&self) -> PathBuf {
        self.data_dir.join("history.json")
    }
}

/// Optional overrides for the embedded scoring models.
#[derive(Debug, Clone, Default)]
pub struct ModelSources {
    pub quiz: Option<PathBuf>,
    pub mood: Option<PathBuf>,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidDays { variable: &'static str },
    RetentionShorterThanWindow { retention_days: u32, no_repeat_days: u32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidDays { variable } => {
                write!(f, "{variable} must be a non-negative number of days")
            }
            ConfigError::RetentionShorterThanWindow {
                retention_days,
                no_repeat_days,
            } => write!(
                f,
                "WEAVER_HISTORY_RETENTION_DAYS ({retention_days}) must cover WEAVER_NO_REPEAT_DAYS ({no_repeat_days})"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort
            | ConfigError::InvalidDays { .. }
            | ConfigError::RetentionShorterThanWindow { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}
