//! Environment configuration.

use crate::server::error::config::ConfigError;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
pub const DEFAULT_SHOPPING_LIST_RETENTION_DAYS: i64 = 28;
pub const DEFAULT_FREEZER_EXPIRY_WINDOW_DAYS: i64 = 15;
/// Upper bound for day-count variables
pub const MAX_DAYS: i64 = 36_500;

/// Server configuration read from environment variables at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub valkey_url: String,
    pub bind_address: String,
    /// Persisted shopping lists older than this are deleted on the next generation
    pub shopping_list_retention_days: i64,
    /// Items expiring within this many days are reported as expiring
    pub freezer_expiry_window_days: i64,
    /// Bootstrap account created when the user table is empty
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
}

impl Config {
    /// Read configuration from the process environment.
    ///
    /// # Returns
    /// - `Ok(Config)` - All required variables present and parsable
    /// - `Err(ConfigError::MissingEnvVar)` - `DATABASE_URL` or `VALKEY_URL` not set
    /// - `Err(ConfigError::InvalidEnvValue)` - A day count failed to parse or is outside
    ///   `0..=MAX_DAYS`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |var: &str| {
            lookup(var)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
        };

        let days = |var: &str, default: i64| -> Result<i64, ConfigError> {
            match lookup(var) {
                None => Ok(default),
                Some(raw) => match raw.trim().parse::<i64>() {
                    Ok(days) if days < 0 => Err(ConfigError::InvalidEnvValue {
                        var: var.to_string(),
                        reason: "must not be negative".to_string(),
                    }),
                    Ok(days) if days > MAX_DAYS => Err(ConfigError::InvalidEnvValue {
                        var: var.to_string(),
                        reason: format!("must not exceed {} days", MAX_DAYS),
                    }),
                    Ok(days) => Ok(days),
                    Err(e) => Err(ConfigError::InvalidEnvValue {
                        var: var.to_string(),
                        reason: e.to_string(),
                    }),
                },
            }
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            valkey_url: required("VALKEY_URL")?,
            bind_address: lookup("BIND_ADDRESS")
                .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string()),
            shopping_list_retention_days: days(
                "SHOPPING_LIST_RETENTION_DAYS",
                DEFAULT_SHOPPING_LIST_RETENTION_DAYS,
            )?,
            freezer_expiry_window_days: days(
                "FREEZER_EXPIRY_WINDOW_DAYS",
                DEFAULT_FREEZER_EXPIRY_WINDOW_DAYS,
            )?,
            admin_username: lookup("ADMIN_USERNAME"),
            admin_password: lookup("ADMIN_PASSWORD"),
        })
    }
}
