//! Configuration for the API client
//!
//! Supports environment-based configuration with sensible defaults.

use crate::error::{ApiError, ApiResult};
use profinder_core::retry::RetryConfig;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Local Supabase started by `supabase start`
const LOCAL_SUPABASE_URL: &str = "http://localhost:54321";

/// Public Nominatim instance
pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";

/// Environment types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development (typically localhost Supabase)
    Development,
    /// Staging environment
    Staging,
    /// Production environment
    #[default]
    Production,
}

impl Environment {
    /// Parse from `PROFINDER_ENV`
    pub fn from_env() -> Self {
        Self::parse(&env::var("PROFINDER_ENV").unwrap_or_default())
    }

    fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "development" | "dev" | "local" => Self::Development,
            "staging" | "stage" => Self::Staging,
            _ => Self::Production,
        }
    }
}

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Supabase project URL, without the `/rest/v1` suffix
    pub supabase_url: String,
    /// Geocoding service URL
    pub geocoder_url: String,
    /// Supabase anonymous key
    pub anon_key: Option<String>,
    /// User access token; the anon key is used as bearer when unset
    pub access_token: Option<String>,
    /// Request timeout
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
    /// Retry configuration
    pub retry: RetryConfig,
    /// Current environment
    pub environment: Environment,
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs().serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::development()
    }
}

impl ClientConfig {
    /// Create configuration from environment variables
    ///
    /// Reads the following environment variables:
    /// - `SUPABASE_URL`: Supabase project URL (required outside development)
    /// - `SUPABASE_ANON_KEY`: Anonymous key
    /// - `PROFINDER_GEOCODER_URL`: Geocoding service URL
    /// - `PROFINDER_ENV`: Environment (development/staging/production)
    /// - `PROFINDER_TIMEOUT_SECS`: Request timeout in seconds
    /// - `PROFINDER_RETRIES`: Attempts per request (default 1, no retry)
    pub fn from_env() -> ApiResult<Self> {
        Self::from_env_or(None)
    }

    /// Like [`from_env`](Self::from_env), with a Supabase URL to use when
    /// `SUPABASE_URL` is unset (typically from the configuration file)
    pub fn from_env_or(fallback_url: Option<&str>) -> ApiResult<Self> {
        let environment = Environment::from_env();

        let supabase_url = match (env::var("SUPABASE_URL"), fallback_url) {
            (Ok(url), _) => url,
            (Err(_), Some(url)) => url.to_string(),
            (Err(_), None) if environment == Environment::Development => LOCAL_SUPABASE_URL.to_string(),
            (Err(_), None) => return Err(ApiError::missing_env("SUPABASE_URL")),
        };

        let geocoder_url =
            env::var("PROFINDER_GEOCODER_URL").unwrap_or_else(|_| DEFAULT_GEOCODER_URL.to_string());

        let timeout = env::var("PROFINDER_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map_or(Duration::from_secs(30), Duration::from_secs);

        let retry = env::var("PROFINDER_RETRIES")
            .ok()
            .and_then(|s| s.parse().ok())
            .map_or_else(RetryConfig::no_retry, RetryConfig::attempts);

        Ok(Self {
            supabase_url,
            geocoder_url,
            anon_key: env::var("SUPABASE_ANON_KEY").ok(),
            access_token: None,
            timeout,
            retry,
            environment,
        })
    }

    /// Create development configuration (local Supabase)
    #[must_use]
    pub fn development() -> Self {
        Self {
            supabase_url: LOCAL_SUPABASE_URL.to_string(),
            geocoder_url: DEFAULT_GEOCODER_URL.to_string(),
            anon_key: None,
            access_token: None,
            timeout: Duration::from_secs(10),
            retry: RetryConfig::no_retry(),
            environment: Environment::Development,
        }
    }

    /// Builder-style method to set the Supabase URL
    #[must_use]
    pub fn with_supabase_url(mut self, url: impl Into<String>) -> Self {
        self.supabase_url = url.into();
        self
    }

    /// Builder-style method to set the geocoder URL
    #[must_use]
    pub fn with_geocoder_url(mut self, url: impl Into<String>) -> Self {
        self.geocoder_url = url.into();
        self
    }

    /// Builder-style method to set anon key
    #[must_use]
    pub fn with_anon_key(mut self, key: impl Into<String>) -> Self {
        self.anon_key = Some(key.into());
        self
    }

    /// Builder-style method to set a user access token
    #[must_use]
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Builder-style method to set timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder-style method to set retry config
    #[must_use]
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Token sent as `Authorization: Bearer`
    #[must_use]
    pub fn bearer(&self) -> Option<&str> {
        self.access_token.as_deref().or(self.anon_key.as_deref())
    }

    /// Validate the configuration
    pub fn validate(&self) -> ApiResult<()> {
        for (name, url) in [("supabase_url", &self.supabase_url), ("geocoder_url", &self.geocoder_url)] {
            if url.is_empty() {
                return Err(ApiError::config(format!("{name} cannot be empty")));
            }
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ApiError::config(format!("{name} must start with http:// or https://")));
            }
        }

        if self.timeout.is_zero() {
            return Err(ApiError::config("timeout cannot be zero"));
        }

        if self.retry.max_attempts == 0 {
            return Err(ApiError::config("retry.max_attempts must be at least 1"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert!(config.supabase_url.contains("localhost"));
        assert_eq!(config.geocoder_url, DEFAULT_GEOCODER_URL);
        assert_eq!(config.retry.max_attempts, 1);
        assert_eq!(config.environment, Environment::Development);
    }

    #[test]
    fn test_environment_parse() {
        assert_eq!(Environment::parse("DEV"), Environment::Development);
        assert_eq!(Environment::parse("stage"), Environment::Staging);
        assert_eq!(Environment::parse(""), Environment::Production);
    }

    #[test]
    fn test_builder_pattern() {
        let config = ClientConfig::default()
            .with_supabase_url("https://abc.supabase.co")
            .with_anon_key("anon")
            .with_timeout(Duration::from_secs(60));

        assert_eq!(config.supabase_url, "https://abc.supabase.co");
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.bearer(), Some("anon"));

        let config = config.with_access_token("user-jwt");
        assert_eq!(config.bearer(), Some("user-jwt"));
    }

    #[test]
    fn test_validation() {
        assert!(ClientConfig::default().validate().is_ok());
        assert!(ClientConfig::default().with_supabase_url("").validate().is_err());
        assert!(ClientConfig::default().with_geocoder_url("ftp://x").validate().is_err());
        assert!(ClientConfig::default()
            .with_timeout(Duration::ZERO)
            .validate()
            .is_err());
    }
}
