use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::valuation::EstimationRates;

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
    pub advisor: AdvisorConfig,
    pub valuation: ValuationConfig,
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

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            advisor: AdvisorConfig::from_env()?,
            valuation: ValuationConfig::from_env()?,
        })
    }
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

/// Connection settings for the chat-completions endpoint used by the advisor.
#[derive(Clone)]
pub struct AdvisorConfig {
    pub api_key: Option<String>,
    pub deployment_name: String,
    /// Azure-style resource URL; the public OpenAI endpoint is used when unset.
    pub api_base: Option<String>,
    pub api_version: String,
    pub request_timeout_secs: u64,
}

impl AdvisorConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let api_key = non_empty_var("OPENAI_API_KEY");
        let deployment_name =
            non_empty_var("OPENAI_DEPLOYMENT_NAME").unwrap_or_else(|| "gpt-4o-mini".to_string());
        let api_base = non_empty_var("OPENAI_API_BASE");
        let api_version =
            non_empty_var("OPENAI_API_VERSION").unwrap_or_else(|| "2024-02-01".to_string());
        let request_timeout_secs = match non_empty_var("OPENAI_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| ConfigError::InvalidNumber {
                key: "OPENAI_TIMEOUT_SECS",
            })?,
            None => 60,
        };

        Ok(Self {
            api_key,
            deployment_name,
            api_base,
            api_version,
            request_timeout_secs,
        })
    }
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            deployment_name: "gpt-4o-mini".to_string(),
            api_base: None,
            api_version: "2024-02-01".to_string(),
            request_timeout_secs: 60,
        }
    }
}

impl fmt::Debug for AdvisorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdvisorConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("deployment_name", &self.deployment_name)
            .field("api_base", &self.api_base)
            .field("api_version", &self.api_version)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

/// Estimation rates applied when property data leaves an expense unset.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValuationConfig {
    pub rates: EstimationRates,
}

impl ValuationConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = EstimationRates::default();
        let rates = EstimationRates {
            property_tax_rate: rate_var("VALUATION_PROPERTY_TAX_RATE", defaults.property_tax_rate)?,
            insurance_rate: rate_var("VALUATION_INSURANCE_RATE", defaults.insurance_rate)?,
            management_rate: rate_var("VALUATION_MANAGEMENT_RATE", defaults.management_rate)?,
            maintenance_rate: rate_var("VALUATION_MAINTENANCE_RATE", defaults.maintenance_rate)?,
        };
        Ok(Self { rates })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn rate_var(key: &'static str, default: f64) -> Result<f64, ConfigError> {
    match non_empty_var(key) {
        Some(raw) => raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|rate| rate.is_finite())
            .ok_or(ConfigError::InvalidNumber { key }),
        None => Ok(default),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidNumber { key: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNumber { key } => write!(f, "{key} must be a valid number"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidNumber { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
        }
    }
}

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
        for key in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "OPENAI_API_KEY",
            "OPENAI_DEPLOYMENT_NAME",
            "OPENAI_API_BASE",
            "OPENAI_API_VERSION",
            "OPENAI_TIMEOUT_SECS",
            "VALUATION_PROPERTY_TAX_RATE",
            "VALUATION_INSURANCE_RATE",
            "VALUATION_MANAGEMENT_RATE",
            "VALUATION_MAINTENANCE_RATE",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert!(config.advisor.api_key.is_none());
        assert_eq!(config.advisor.request_timeout_secs, 60);
        assert_eq!(config.valuation.rates, EstimationRates::default());
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn valuation_rates_can_be_overridden() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("VALUATION_MANAGEMENT_RATE", "0.06");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.valuation.rates.management_rate, 0.06);
        assert_eq!(config.valuation.rates.property_tax_rate, 0.015);
        reset_env();
    }

    #[test]
    fn rejects_non_numeric_rate() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("VALUATION_INSURANCE_RATE", "three percent");
        let err = AppConfig::load().expect_err("invalid rate rejected");
        assert!(matches!(
            err,
            ConfigError::InvalidNumber {
                key: "VALUATION_INSURANCE_RATE"
            }
        ));
        reset_env();
    }

    #[test]
    fn advisor_debug_output_redacts_key() {
        let config = AdvisorConfig {
            api_key: Some("sk-secret".to_string()),
            ..AdvisorConfig::default()
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
