use std::env;
use std::path::PathBuf;

use chrono::Duration;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

/// Application configuration for chirpy-service.
///
/// Loaded from configuration files with environment variable overrides.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub platform: Platform,
    pub jwt: JwtConfig,
    pub polka: PolkaConfig,
}

/// PostgreSQL database configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

/// HTTP server configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
    /// Directory served under `/app/`
    pub file_root: PathBuf,
}

/// Deployment platform. Destructive admin operations are only allowed on `dev`.
///
/// Any value other than `dev`, including an empty one, is treated as production.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(from = "String")]
pub enum Platform {
    Dev,
    Production,
}

impl From<String> for Platform {
    fn from(value: String) -> Self {
        match value.as_str() {
            "dev" => Platform::Dev,
            _ => Platform::Production,
        }
    }
}

/// JWT authentication configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_lifetime_minutes: i64,
    pub refresh_token_lifetime_days: i64,
}

impl JwtConfig {
    pub fn access_token_lifetime(&self) -> Duration {
        Duration::minutes(self.access_token_lifetime_minutes)
    }

    pub fn refresh_token_lifetime(&self) -> Duration {
        Duration::days(self.refresh_token_lifetime_days)
    }
}

/// Polka payment provider webhook configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct PolkaConfig {
    pub key: String,
}

impl Config {
    /// Load configuration from files with environment variable overrides.
    ///
    /// # Configuration Priority (highest to lowest)
    /// 1. Flat variables `DB_URL`, `SECRET`, `POLKA_KEY` (also read from `.env`)
    /// 2. Environment variables (DATABASE__URL, JWT__SECRET, PLATFORM, etc.)
    /// 3. Environment-specific config file (config/{environment}.toml)
    /// 4. Default config file (config/default.toml)
    ///
    /// # Returns
    /// Loaded configuration
    ///
    /// # Errors
    /// Returns error if required configuration values are missing or invalid.
    /// `jwt.secret` and `polka.key` have no defaults and must be non-empty.
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: DATABASE__URL=postgres://... overrides database.url
            .add_source(Environment::default().separator("__"))
            .set_override_option("database.url", env::var("DB_URL").ok())?
            .set_override_option("jwt.secret", env::var("SECRET").ok())?
            .set_override_option("polka.key", env::var("POLKA_KEY").ok())?
            .build()?;

        configuration.try_deserialize::<Config>()?.validate()
    }

    fn validate(self) -> Result<Self, ConfigError> {
        if self.jwt.secret.trim().is_empty() {
            return Err(ConfigError::Message("jwt.secret must not be empty".to_string()));
        }
        if self.polka.key.trim().is_empty() {
            return Err(ConfigError::Message("polka.key must not be empty".to_string()));
        }
        Ok(self)
    }
}
