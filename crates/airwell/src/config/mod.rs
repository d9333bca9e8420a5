use std::env;
use std::fmt;

use crate::assessment::ReassessmentPolicy;

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
    pub model: ModelConfig,
    pub reassessment: ReassessmentPolicy,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let enabled = match env::var("APP_MODEL_ENABLED") {
            Ok(raw) => parse_flag(&raw).ok_or(ConfigError::InvalidFlag {
                name: "APP_MODEL_ENABLED",
                value: raw,
            })?,
            Err(_) => true,
        };
        let name = env::var("APP_MODEL_NAME").unwrap_or_else(|_| "gemini-1.5-flash".to_string());

        let defaults = ReassessmentPolicy::default();
        let max_age_hours = match env::var("APP_REASSESS_MAX_AGE_HOURS") {
            Ok(raw) => raw
                .trim()
                .parse::<u32>()
                .map_err(|_| ConfigError::InvalidReassessAge)?,
            Err(_) => defaults.max_age_hours,
        };
        let aqi_delta = match env::var("APP_REASSESS_AQI_DELTA") {
            Ok(raw) => raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|delta| delta.is_finite() && *delta >= 0.0)
                .ok_or(ConfigError::InvalidAqiDelta)?,
            Err(_) => defaults.aqi_delta,
        };

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            model: ModelConfig { enabled, name },
            reassessment: ReassessmentPolicy {
                max_age_hours,
                aqi_delta,
            },
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Generative model settings handed to whichever client the caller wires in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelConfig {
    pub enabled: bool,
    pub name: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidFlag { name: &'static str, value: String },
    InvalidReassessAge,
    InvalidAqiDelta,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidFlag { name, value } => {
                write!(f, "{name} must be a boolean flag (got '{value}')")
            }
            ConfigError::InvalidReassessAge => {
                write!(f, "APP_REASSESS_MAX_AGE_HOURS must be a whole number of hours")
            }
            ConfigError::InvalidAqiDelta => {
                write!(f, "APP_REASSESS_AQI_DELTA must be a non-negative number")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("APP_ENV");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("APP_MODEL_ENABLED");
        env::remove_var("APP_MODEL_NAME");
        env::remove_var("APP_REASSESS_MAX_AGE_HOURS");
        env::remove_var("APP_REASSESS_AQI_DELTA");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.telemetry.log_level, "info");
        assert!(config.model.enabled);
        assert_eq!(config.reassessment, ReassessmentPolicy::default());
    }

    #[test]
    fn reads_model_and_reassessment_overrides() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_ENV", "prod");
        env::set_var("APP_MODEL_ENABLED", "off");
        env::set_var("APP_REASSESS_MAX_AGE_HOURS", "6");
        env::set_var("APP_REASSESS_AQI_DELTA", "25.5");
        let config = AppConfig::load().expect("config loads");
        reset_env();

        assert_eq!(config.environment, AppEnvironment::Production);
        assert!(!config.model.enabled);
        assert_eq!(config.reassessment.max_age_hours, 6);
        assert_eq!(config.reassessment.aqi_delta, 25.5);
    }

    #[test]
    fn rejects_invalid_values() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_MODEL_ENABLED", "maybe");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidFlag { .. })
        ));

        reset_env();
        env::set_var("APP_REASSESS_AQI_DELTA", "-4");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidAqiDelta)
        ));
        reset_env();
    }
}
