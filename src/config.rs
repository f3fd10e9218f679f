//! Client configuration
//!
//! Values are captured once when a service is constructed and never change
//! afterwards.

use crate::error::{PawaPayError, PawaPayResult};
use reqwest::Url;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_BASE_URL: &str = "https://api.sandbox.pawapay.cloud";

/// Execution environment of the calling application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    Development,
    Staging,
    #[default]
    Production,
    /// Annotation URLs are left empty so recorded fixtures stay stable
    Testing,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
            Environment::Testing => "testing",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = PawaPayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" => Ok(Environment::Development),
            "staging" => Ok(Environment::Staging),
            "production" => Ok(Environment::Production),
            "testing" => Ok(Environment::Testing),
            other => Err(PawaPayError::config(format!(
                "Environment must be one of: development, staging, production, testing, got {}",
                other
            ))),
        }
    }
}

/// pawaPay client configuration
#[derive(Clone)]
pub struct PawaPayConfig {
    /// API base URL, without the resource path
    pub base_url: String,
    /// Bearer token sent on every request
    pub api_key: String,
    /// Log outbound URL and payload
    pub log_request: bool,
    /// Log response body and status code
    pub log_response: bool,
    pub environment: Environment,
}

impl Default for PawaPayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            log_request: false,
            log_response: false,
            environment: Environment::default(),
        }
    }
}

impl fmt::Debug for PawaPayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PawaPayConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"***")
            .field("log_request", &self.log_request)
            .field("log_response", &self.log_response)
            .field("environment", &self.environment)
            .finish()
    }
}

// Shape of the PAWAPAY_* environment variables as seen by the `config` crate
#[derive(Debug, Deserialize)]
struct EnvSource {
    api_url: Option<String>,
    api_key: Option<String>,
    #[serde(default)]
    log_request: bool,
    #[serde(default)]
    log_response: bool,
    environment: Option<String>,
}

impl PawaPayConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Create config from `PAWAPAY_API_URL`, `PAWAPAY_API_KEY`,
    /// `PAWAPAY_LOG_REQUEST`, `PAWAPAY_LOG_RESPONSE` and `PAWAPAY_ENVIRONMENT`
    pub fn from_env() -> PawaPayResult<Self> {
        let source = ::config::Config::builder()
            .add_source(::config::Environment::with_prefix("PAWAPAY").prefix_separator("_"))
            .build()?;

        let env: EnvSource = source.try_deserialize()?;
        Self::from_source(env)
    }

    fn from_source(env: EnvSource) -> PawaPayResult<Self> {
        let api_key = env
            .api_key
            .ok_or_else(|| PawaPayError::config("PAWAPAY_API_KEY environment variable is required"))?;

        let environment = match env.environment {
            Some(value) => value.parse()?,
            None => Environment::default(),
        };

        let config = Self {
            base_url: env.api_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            api_key,
            log_request: env.log_request,
            log_response: env.log_response,
            environment,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> PawaPayResult<()> {
        if self.api_key.trim().is_empty() {
            return Err(PawaPayError::config("PAWAPAY_API_KEY cannot be empty"));
        }

        let base_url = self.base_url.trim();
        if base_url.is_empty() {
            return Err(PawaPayError::config("PAWAPAY_API_URL cannot be empty"));
        }

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(PawaPayError::config(format!(
                "PAWAPAY_API_URL must be an http(s) URL, got {}",
                base_url
            )));
        }

        Url::parse(base_url).map_err(|e| {
            PawaPayError::config(format!("PAWAPAY_API_URL is not a valid URL: {}", e))
        })?;

        Ok(())
    }

    /// Log request payloads. Only useful when debugging, since every response
    /// already carries the annotation of its exchange.
    pub fn allow_request_logging(mut self) -> Self {
        self.log_request = true;
        self
    }

    /// Log response payloads. See [`PawaPayConfig::allow_request_logging`].
    pub fn allow_response_logging(mut self) -> Self {
        self.log_response = true;
        self
    }

    pub fn allow_logging(self) -> Self {
        self.allow_request_logging().allow_response_logging()
    }

    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    pub fn is_testing(&self) -> bool {
        self.environment == Environment::Testing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> EnvSource {
        EnvSource {
            api_url: Some("https://api.pawapay.cloud".to_string()),
            api_key: Some("secret".to_string()),
            log_request: false,
            log_response: true,
            environment: Some("Testing".to_string()),
        }
    }

    #[test]
    fn test_config_default() {
        let config = PawaPayConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(!config.log_request);
        assert!(!config.log_response);
        assert_eq!(config.environment, Environment::Production);
    }

    #[test]
    fn test_from_source() {
        let config = PawaPayConfig::from_source(source()).unwrap();
        assert_eq!(config.base_url, "https://api.pawapay.cloud");
        assert_eq!(config.api_key, "secret");
        assert!(config.log_response);
        assert!(config.is_testing());
    }

    #[test]
    fn test_from_source_missing_key() {
        let mut env = source();
        env.api_key = None;
        let result = PawaPayConfig::from_source(env);
        assert!(matches!(result, Err(PawaPayError::Config { .. })));
    }

    #[test]
    fn test_from_source_unknown_environment() {
        let mut env = source();
        env.environment = Some("qa".to_string());
        assert!(PawaPayConfig::from_source(env).is_err());
    }

    #[test]
    fn test_validate_rejects_non_http_url() {
        let config = PawaPayConfig::new("ftp://example.com", "key");
        assert!(config.validate().is_err());

        let config = PawaPayConfig::new("http://127.0.0.1:8080", "key");
        assert!(config.validate().is_ok());

        let config = PawaPayConfig::new("http://", "key");
        assert!(matches!(config.validate(), Err(PawaPayError::Config { .. })));
    }

    const ENV_KEYS: [&str; 5] = [
        "PAWAPAY_API_URL",
        "PAWAPAY_API_KEY",
        "PAWAPAY_LOG_REQUEST",
        "PAWAPAY_LOG_RESPONSE",
        "PAWAPAY_ENVIRONMENT",
    ];

    fn clear_env() {
        for key in ENV_KEYS {
            std::env::remove_var(key);
        }
    }

    // The only test that sets PAWAPAY_* variables; keep it that way.
    #[test]
    fn test_from_env_reads_prefixed_variables() {
        clear_env();
        std::env::set_var("PAWAPAY_API_URL", "https://api.pawapay.cloud");
        std::env::set_var("PAWAPAY_API_KEY", "env-secret");
        std::env::set_var("PAWAPAY_LOG_REQUEST", "true");
        std::env::set_var("PAWAPAY_ENVIRONMENT", "testing");

        let config = PawaPayConfig::from_env();

        std::env::remove_var("PAWAPAY_API_URL");
        std::env::remove_var("PAWAPAY_LOG_REQUEST");
        std::env::remove_var("PAWAPAY_ENVIRONMENT");
        let defaults = PawaPayConfig::from_env();

        std::env::remove_var("PAWAPAY_API_KEY");
        let missing_key = PawaPayConfig::from_env();
        clear_env();

        let config = config.unwrap();
        assert_eq!(config.base_url, "https://api.pawapay.cloud");
        assert_eq!(config.api_key, "env-secret");
        assert!(config.log_request);
        assert!(!config.log_response);
        assert_eq!(config.environment, Environment::Testing);

        let defaults = defaults.unwrap();
        assert_eq!(defaults.base_url, DEFAULT_BASE_URL);
        assert!(!defaults.log_request);
        assert_eq!(defaults.environment, Environment::Production);

        assert!(matches!(missing_key, Err(PawaPayError::Config { .. })));
    }

    #[test]
    fn test_logging_toggles_are_independent() {
        let config = PawaPayConfig::new(DEFAULT_BASE_URL, "key").allow_request_logging();
        assert!(config.log_request);
        assert!(!config.log_response);

        let config = PawaPayConfig::new(DEFAULT_BASE_URL, "key").allow_logging();
        assert!(config.log_request && config.log_response);
    }

    #[test]
    fn test_debug_hides_api_key() {
        let config = PawaPayConfig::new(DEFAULT_BASE_URL, "super-secret");
        assert!(!format!("{:?}", config).contains("super-secret"));
    }
}
