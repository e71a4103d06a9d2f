//! Configuration management for the reverse lookup providers.
//!
//! This module handles loading and validating configuration from environment variables.
//! A `.env` file is honored if present. Nothing here is mutated after load; providers
//! copy what they need at construction time.

use crate::error::{ConfigError, ConfigResult};
use std::env;

/// User agent sent with every fetch unless the caller overrides it.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:26.0) Gecko/20100101 Firefox/26.0";

/// Default white-pages endpoint; `{number}` is replaced by the looked-up number.
pub const DEFAULT_WHITE_PAGES_URL_TEMPLATE: &str = "https://www.whitepages.com/phone/{number}";

/// Default table holding the area-code rows.
pub const DEFAULT_AREA_CODE_TABLE: &str = "area_codes";

/// Configuration for the lookup providers.
#[derive(Debug, Clone)]
pub struct Config {
    /// User agent for outbound fetches
    pub user_agent: String,

    /// HTTP request timeout in seconds (default: 10)
    pub request_timeout: u64,

    /// Endpoint template for the white-pages scrape provider
    pub white_pages_url_template: String,

    /// Path to the SQLite area-code database, if one is installed
    pub area_code_db_path: Option<String>,

    /// Table queried by the area-code provider
    pub area_code_table: String,

    /// Log level (default: "warn")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// All variables are optional:
    /// - `LOOKUP_USER_AGENT`: user agent for fetches
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 10)
    /// - `WHITE_PAGES_URL_TEMPLATE`: endpoint template containing `{number}`
    /// - `AREA_CODE_DB_PATH`: SQLite database with area-code rows
    /// - `AREA_CODE_TABLE`: table name (default: "area_codes")
    /// - `LOG_LEVEL`: Logging level (default: "warn")
    pub fn from_env() -> ConfigResult<Self> {
        let _ = dotenvy::dotenv();

        let user_agent =
            env::var("LOOKUP_USER_AGENT").unwrap_or_else(|_| DEFAULT_USER_AGENT.to_string());
        if user_agent.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "LOOKUP_USER_AGENT".to_string(),
                reason: "Cannot be empty".to_string(),
            });
        }

        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 10)?;
        if request_timeout == 0 {
            return Err(ConfigError::InvalidValue {
                var: "REQUEST_TIMEOUT".to_string(),
                reason: "Must be greater than zero".to_string(),
            });
        }

        let white_pages_url_template = env::var("WHITE_PAGES_URL_TEMPLATE")
            .unwrap_or_else(|_| DEFAULT_WHITE_PAGES_URL_TEMPLATE.to_string());
        Self::validate_template("WHITE_PAGES_URL_TEMPLATE", &white_pages_url_template)?;

        let area_code_db_path = env::var("AREA_CODE_DB_PATH")
            .ok()
            .filter(|p| !p.trim().is_empty());

        let area_code_table =
            env::var("AREA_CODE_TABLE").unwrap_or_else(|_| DEFAULT_AREA_CODE_TABLE.to_string());
        if !is_sql_identifier(&area_code_table) {
            return Err(ConfigError::InvalidValue {
                var: "AREA_CODE_TABLE".to_string(),
                reason: format!("Not a plain table name: {}", area_code_table),
            });
        }

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "warn".to_string());

        Ok(Config {
            user_agent,
            request_timeout,
            white_pages_url_template,
            area_code_db_path,
            area_code_table,
            log_level,
        })
    }

    /// Validate an endpoint template.
    fn validate_template(var_name: &str, template: &str) -> ConfigResult<()> {
        if !template.starts_with("http://") && !template.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }
        if !template.contains("{number}") {
            return Err(ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: "Must contain a {number} placeholder".to_string(),
            });
        }
        Ok(())
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            request_timeout: 10,
            white_pages_url_template: DEFAULT_WHITE_PAGES_URL_TEMPLATE.to_string(),
            area_code_db_path: None,
            area_code_table: DEFAULT_AREA_CODE_TABLE.to_string(),
            log_level: "warn".to_string(),
        }
    }
}

/// True if `name` is safe to splice into SQL as a table name.
pub(crate) fn is_sql_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
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

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(config.request_timeout, 10);
        assert_eq!(config.area_code_table, "area_codes");
        assert!(config.area_code_db_path.is_none());
    }

    #[test]
    #[serial]
    fn test_config_from_env_valid() {
        let mut guard = EnvGuard::new();
        guard.set("LOOKUP_USER_AGENT", "probe/1.0");
        guard.set("REQUEST_TIMEOUT", "3");
        guard.set("AREA_CODE_DB_PATH", "/tmp/areas.db");
        guard.set("AREA_CODE_TABLE", "cn_area_codes");
        guard.set(
            "WHITE_PAGES_URL_TEMPLATE",
            "http://localhost:8080/lookup?q={number}",
        );

        let config = Config::from_env().unwrap();
        assert_eq!(config.user_agent, "probe/1.0");
        assert_eq!(config.request_timeout, 3);
        assert_eq!(config.area_code_db_path.as_deref(), Some("/tmp/areas.db"));
        assert_eq!(config.area_code_table, "cn_area_codes");
        assert_eq!(
            config.white_pages_url_template,
            "http://localhost:8080/lookup?q={number}"
        );
    }

    #[test]
    #[serial]
    fn test_config_rejects_zero_timeout() {
        let mut guard = EnvGuard::new();
        guard.set("REQUEST_TIMEOUT", "0");

        match Config::from_env() {
            Err(ConfigError::InvalidValue { var, .. }) => assert_eq!(var, "REQUEST_TIMEOUT"),
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_config_rejects_template_without_placeholder() {
        let mut guard = EnvGuard::new();
        guard.set("WHITE_PAGES_URL_TEMPLATE", "https://example.com/search");

        match Config::from_env() {
            Err(ConfigError::InvalidValue { var, reason }) => {
                assert_eq!(var, "WHITE_PAGES_URL_TEMPLATE");
                assert!(reason.contains("{number}"));
            }
            other => panic!("Expected InvalidValue error, got: {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_config_rejects_bad_table_name() {
        let mut guard = EnvGuard::new();
        guard.set("AREA_CODE_TABLE", "codes; DROP TABLE x");

        let result = Config::from_env();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { ref var, .. }) if var == "AREA_CODE_TABLE"
        ));
    }

    #[test]
    #[serial]
    fn test_parse_env_u64_invalid() {
        let mut guard = EnvGuard::new();
        guard.set("TEST_U64_INVALID", "not-a-number");

        let result = Config::parse_env_u64("TEST_U64_INVALID", 10);
        assert!(result.is_err());

        let result = Config::parse_env_u64("NONEXISTENT_LOOKUP_VAR", 10);
        assert_eq!(result.unwrap(), 10);
    }

    #[test]
    fn test_is_sql_identifier() {
        assert!(is_sql_identifier("area_codes"));
        assert!(is_sql_identifier("_t1"));
        assert!(!is_sql_identifier(""));
        assert!(!is_sql_identifier("1table"));
        assert!(!is_sql_identifier("a-b"));
    }
}
