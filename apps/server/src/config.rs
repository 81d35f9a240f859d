//! Server configuration module.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults, so a bare `cargo run` starts a working dev server.
//!
//! ## Variables
//! ```text
//! PORT             HTTP bind port                    (default: 3000)
//! DATABASE_PATH    SQLite file path                  (default: ./data/dhaba.db)
//! TAX_RATE_BPS     Tax rate in basis points          (default: 0; 500 = 5%)
//! ADMIN_USERNAME   Admin panel login                 (default: admin)
//! ADMIN_PASSWORD   Admin panel password              (default: admin123)
//! ```

use std::env;

use dhaba_core::{validation, TaxRate};

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP bind port.
    pub port: u16,

    /// Path to the SQLite database file.
    pub database_path: String,

    /// Tax rate in basis points (500 = 5%). Zero disables tax.
    pub tax_rate_bps: u32,

    /// Admin panel username.
    ///
    /// The login endpoint is a UI gate for the admin screen, not a
    /// security boundary. There are no sessions or tokens.
    pub admin_username: String,

    /// Admin panel password.
    pub admin_password: String,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let config = ServerConfig {
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("PORT".to_string()))?,

            database_path: env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "./data/dhaba.db".to_string()),

            tax_rate_bps: env::var("TAX_RATE_BPS")
                .unwrap_or_else(|_| "0".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("TAX_RATE_BPS".to_string()))?,

            admin_username: env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string()),

            admin_password: env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_string()),
        };

        // 10000 bps = 100%; anything above is a typo, not a tax
        if validation::validate_tax_rate_bps(config.tax_rate_bps).is_err() {
            return Err(ConfigError::InvalidValue("TAX_RATE_BPS".to_string()));
        }

        Ok(config)
    }

    /// The configured tax rate as a domain type.
    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_bps(self.tax_rate_bps)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env vars are process-global, so everything lives in one test to
    // avoid races between parallel test threads.
    #[test]
    fn test_load_defaults_and_tax_validation() {
        std::env::remove_var("PORT");
        std::env::remove_var("TAX_RATE_BPS");

        let config = ServerConfig::load().unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.tax_rate_bps, 0);
        assert!(config.tax_rate().is_zero());

        // 10000 bps = 100%; anything above is rejected
        std::env::set_var("TAX_RATE_BPS", "20000");
        let result = ServerConfig::load();
        std::env::remove_var("TAX_RATE_BPS");
        assert!(matches!(result, Err(ConfigError::InvalidValue(_))));
    }
}
