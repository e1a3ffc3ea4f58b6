//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Identity provider configuration.
    pub auth: AuthConfig,
    /// Derived-metrics configuration.
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// Identity provider configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Secret shared with the identity provider for HS256 tokens.
    pub jwt_secret: String,
    /// Expected token audience.
    #[serde(default = "default_audience")]
    pub audience: String,
    /// Lifetime of locally generated development tokens, in seconds.
    #[serde(default = "default_dev_token_expiry")]
    pub dev_token_expiry_secs: u64,
}

fn default_audience() -> String {
    "authenticated".to_string()
}

fn default_dev_token_expiry() -> u64 {
    3600 // 1 hour
}

/// Formula used to derive net income from a month's figures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetIncomeFormula {
    /// Net income = revenue - total costs.
    #[default]
    RevenueLessTotalCosts,
    /// Net income = margin - owner compensation.
    MarginLessOwnerCompensation,
}

/// Derived-metrics configuration.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct MetricsConfig {
    /// Canonical net income formula, applied on every write path.
    #[serde(default)]
    pub net_income_formula: NetIncomeFormula,
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("BIZPULSE").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
