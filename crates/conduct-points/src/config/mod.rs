use std::env;
use std::fmt;
use std::path::PathBuf;

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
    pub telemetry: TelemetryConfig,
    pub dataset: DatasetConfig,
    pub output: OutputFormat,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let path = match env::var("DRL_DATASET_PATH") {
            Ok(raw) if raw.trim().is_empty() => return Err(ConfigError::EmptyDatasetPath),
            Ok(raw) => Some(PathBuf::from(raw.trim())),
            Err(_) => None,
        };

        let output = match env::var("DRL_OUTPUT") {
            Ok(raw) => OutputFormat::parse(&raw).ok_or(ConfigError::InvalidOutput(raw))?,
            Err(_) => OutputFormat::Pretty,
        };

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            dataset: DatasetConfig { path },
            output,
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Where the dataset snapshot is read from when no path is passed explicitly.
#[derive(Debug, Clone, Default)]
pub struct DatasetConfig {
    pub path: Option<PathBuf>,
}

/// JSON rendering for command output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Pretty,
    Compact,
}

impl OutputFormat {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pretty" => Some(Self::Pretty),
            "compact" => Some(Self::Compact),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    EmptyDatasetPath,
    InvalidOutput(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyDatasetPath => {
                write!(f, "DRL_DATASET_PATH is set but empty")
            }
            ConfigError::InvalidOutput(value) => {
                write!(f, "DRL_OUTPUT must be 'pretty' or 'compact' (got '{value}')")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
