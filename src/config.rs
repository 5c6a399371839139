//! Configuration management for the SuperVault monitor.
//!
//! Configuration is read from environment variables (optionally via a `.env`
//! file). Every variable has a default, so the monitor starts with no
//! configuration at all and points at the development pricing API.

use crate::error::{ConfigError, ConfigResult};
use std::env;

/// Base URL for the development pricing API (`ENV=development`, the default).
pub const DEV_API_BASE_URL: &str = "https://pricing-dev.superform.xyz";

/// Base URL for the production pricing API (`ENV=production`).
pub const PROD_API_BASE_URL: &str = "https://pricing.superform.xyz";

/// Configuration for the SuperVault monitor.
#[derive(Debug, Clone)]
pub struct Config {
    /// Pricing API base URL
    pub api_base_url: String,

    /// Seconds before a cached API response is considered expired (default: 60)
    pub cache_ttl_secs: u64,

    /// Seconds between automatic refresh cycles (default: 60)
    pub refresh_interval_secs: u64,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout_secs: u64,

    /// Chain to monitor (default: "1", Ethereum mainnet)
    pub chain_id: String,

    /// Log level (default: "info")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Recognized variables, all optional:
    /// - `ENV`: "development" (default) or "production"; selects the API base URL
    /// - `API_BASE_URL`: explicit base URL, overriding the `ENV` selection
    /// - `CACHE_TTL`: cache expiry threshold in seconds (default: 60)
    /// - `REFRESH_INTERVAL`: polling cadence in seconds (default: 60)
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    /// - `CHAIN_ID`: chain to monitor (default: "1")
    /// - `LOG_LEVEL`: tracing filter (default: "info")
    pub fn from_env() -> ConfigResult<Self> {
        // Load .env if present, without failing when it is absent
        let _ = dotenvy::dotenv();

        let environment = env::var("ENV").unwrap_or_else(|_| "development".to_string());

        let api_base_url = match env::var("API_BASE_URL") {
            Ok(url) => url,
            Err(_) if environment == "production" => PROD_API_BASE_URL.to_string(),
            Err(_) => DEV_API_BASE_URL.to_string(),
        };

        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: "API_BASE_URL".to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        let cache_ttl_secs = Self::parse_env_u64("CACHE_TTL", 60)?;
        let refresh_interval_secs = Self::parse_env_u64("REFRESH_INTERVAL", 60)?;
        let request_timeout_secs = Self::parse_env_u64("REQUEST_TIMEOUT", 10)?;

        if refresh_interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                var: "REFRESH_INTERVAL".to_string(),
                reason: "Must be at least 1 second".to_string(),
            });
        }

        let chain_id = env::var("CHAIN_ID").unwrap_or_else(|_| "1".to_string());
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Config {
            api_base_url,
            cache_ttl_secs,
            refresh_interval_secs,
            request_timeout_secs,
            chain_id,
            log_level,
        })
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a non-negative number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: DEV_API_BASE_URL.to_string(),
            cache_ttl_secs: 60,
            refresh_interval_secs: 60,
            request_timeout_secs: 10,
            chain_id: "1".to_string(),
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    // Helper to set and unset env vars for testing
    struct EnvGuard {
        vars: Vec<String>,
    }

    impl EnvGuard {
        fn new() -> Self {
            EnvGuard { vars: Vec::new() }
        }

        fn set(&mut self, key: &str, value: &str) {
            env::set_var(key, value);
            self.vars.push(key.to_string());
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for var in &self.vars {
                env::remove_var(var);
            }
        }
    }

    fn clear_monitor_vars() {
        for var in [
            "ENV",
            "API_BASE_URL",
            "CACHE_TTL",
            "REFRESH_INTERVAL",
            "REQUEST_TIMEOUT",
            "CHAIN_ID",
            "LOG_LEVEL",
        ] {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.cache_ttl_secs, 60);
        assert_eq!(config.refresh_interval_secs, 60);
        assert_eq!(config.request_timeout_secs, 10);
        assert_eq!(config.chain_id, "1");
        assert_eq!(config.api_base_url, DEV_API_BASE_URL);
    }

    #[test]
    #[serial]
    fn test_config_from_env_defaults() {
        clear_monitor_vars();

        let config = Config::from_env().unwrap();
        assert_eq!(config.api_base_url, DEV_API_BASE_URL);
        assert_eq!(config.cache_ttl_secs, 60);
        assert_eq!(config.refresh_interval_secs, 60);
    }

    #[test]
    #[serial]
    fn test_config_production_base_url() {
        clear_monitor_vars();
        let mut guard = EnvGuard::new();
        guard.set("ENV", "production");

        let config = Config::from_env().unwrap();
        assert_eq!(config.api_base_url, PROD_API_BASE_URL);
    }

    #[test]
    #[serial]
    fn test_config_explicit_base_url_overrides_env() {
        clear_monitor_vars();
        let mut guard = EnvGuard::new();
        guard.set("ENV", "production");
        guard.set("API_BASE_URL", "http://localhost:8000");

        let config = Config::from_env().unwrap();
        assert_eq!(config.api_base_url, "http://localhost:8000");
    }

    #[test]
    #[serial]
    fn test_config_invalid_base_url() {
        clear_monitor_vars();
        let mut guard = EnvGuard::new();
        guard.set("API_BASE_URL", "not-a-url");

        let result = Config::from_env();
        assert!(result.is_err());
        if let Err(ConfigError::InvalidValue { var, .. }) = result {
            assert_eq!(var, "API_BASE_URL");
        }
    }

    #[test]
    #[serial]
    fn test_config_invalid_cache_ttl() {
        clear_monitor_vars();
        let mut guard = EnvGuard::new();
        guard.set("CACHE_TTL", "sixty");

        let result = Config::from_env();
        assert!(result.is_err());
        if let Err(ConfigError::InvalidValue { var, .. }) = result {
            assert_eq!(var, "CACHE_TTL");
        }
    }

    #[test]
    #[serial]
    fn test_config_zero_refresh_interval_rejected() {
        clear_monitor_vars();
        let mut guard = EnvGuard::new();
        guard.set("REFRESH_INTERVAL", "0");

        let result = Config::from_env();
        assert!(result.is_err());
    }

    #[test]
    #[serial]
    fn test_config_custom_values() {
        clear_monitor_vars();
        let mut guard = EnvGuard::new();
        guard.set("CACHE_TTL", "30");
        guard.set("REFRESH_INTERVAL", "120");
        guard.set("CHAIN_ID", "8453");

        let config = Config::from_env().unwrap();
        assert_eq!(config.cache_ttl_secs, 30);
        assert_eq!(config.refresh_interval_secs, 120);
        assert_eq!(config.chain_id, "8453");
    }

    #[test]
    #[serial]
    fn test_parse_env_u64() {
        let mut guard = EnvGuard::new();
        guard.set("TEST_U64", "42");

        let result = Config::parse_env_u64("TEST_U64", 10);
        assert_eq!(result.unwrap(), 42);

        let result = Config::parse_env_u64("NONEXISTENT", 10);
        assert_eq!(result.unwrap(), 10);
    }
}
