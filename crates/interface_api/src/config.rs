//! API configuration

use rust_decimal::Decimal;
use serde::Deserialize;

use core_kernel::Currency;
use domain_settlement::DEFAULT_EPSILON;

/// Environment variable prefix, e.g. `GASTITO_PORT=9000`
pub const ENV_PREFIX: &str = "GASTITO";

/// API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// JWT secret for authentication
    pub jwt_secret: String,
    /// JWT expiration in seconds
    pub jwt_expiration_secs: u64,
    /// Log level
    pub log_level: String,
    /// Balances within this amount of zero are treated as settled
    pub settlement_epsilon: Decimal,
    /// Currency used when a request does not name one
    pub default_currency: Currency,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            jwt_secret: "change-me-in-production".to_string(),
            jwt_expiration_secs: 3600,
            log_level: "info".to_string(),
            settlement_epsilon: DEFAULT_EPSILON,
            default_currency: Currency::PHP,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `GASTITO_*` environment variables
    ///
    /// Unset variables keep their default values.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let defaults = Self::default();

        config::Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("jwt_secret", defaults.jwt_secret)?
            .set_default("jwt_expiration_secs", defaults.jwt_expiration_secs)?
            .set_default("log_level", defaults.log_level)?
            .set_default("settlement_epsilon", defaults.settlement_epsilon.to_string())?
            .set_default("default_currency", defaults.default_currency.code())?
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
