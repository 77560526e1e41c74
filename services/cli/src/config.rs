use reqwest::Url;
use tracing::Level;
use tutor_core::DEFAULT_BASE_URL;

pub const DEFAULT_LANGUAGE: &str = "English";
pub const DEFAULT_GRADE: &str = "Grade 5";

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub base_url: String,
    pub default_language: String,
    pub default_grade: String,
    pub log_level: Level,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        let base_url =
            std::env::var("TUTOR_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Url::parse(&base_url)
            .map_err(|e| ConfigError::InvalidValue("TUTOR_BASE_URL".to_string(), e.to_string()))?;

        let default_language =
            std::env::var("TUTOR_LANGUAGE").unwrap_or_else(|_| DEFAULT_LANGUAGE.to_string());
        let default_grade =
            std::env::var("TUTOR_GRADE").unwrap_or_else(|_| DEFAULT_GRADE.to_string());

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        Ok(Self {
            base_url,
            default_language,
            default_grade,
            log_level,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            default_language: DEFAULT_LANGUAGE.to_string(),
            default_grade: DEFAULT_GRADE.to_string(),
            log_level: Level::INFO,
        }
    }
}
