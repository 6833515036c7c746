//! Weather integration configuration.

use std::time::Duration;
use url::Url;

/// Configuration for the OpenWeatherMap-backed integration.
#[derive(Debug, Clone)]
pub struct WeatherConfig {
    /// Root URL of the weather API.
    pub base_url: Url,

    /// Fallback API key, used when a request does not carry its own.
    pub api_key: Option<String>,

    /// Timeout for each upstream request.
    pub timeout: Duration,

    /// User agent string.
    pub user_agent: String,
}

impl WeatherConfig {
    /// Default API root.
    pub const DEFAULT_BASE_URL: &'static str = "https://api.openweathermap.org";

    /// Default timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

    /// Environment variable holding the fallback API key.
    pub const API_KEY_ENV: &'static str = "OPENWEATHERMAP_API_KEY";

    /// Creates a new configuration for the given API root.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, url::ParseError> {
        let parsed = Url::parse(base_url.as_ref())?;
        Ok(Self {
            base_url: parsed,
            api_key: None,
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
            user_agent: format!("sync2cal/{}", env!("CARGO_PKG_VERSION")),
        })
    }

    /// Sets the fallback API key. Blank keys are treated as absent.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        let api_key = api_key.into();
        let trimmed = api_key.trim();
        self.api_key = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }

    /// Fills the fallback API key from `OPENWEATHERMAP_API_KEY` if none is set.
    pub fn with_api_key_from_env(self) -> Self {
        if self.api_key.is_some() {
            return self;
        }
        match std::env::var(Self::API_KEY_ENV) {
            Ok(key) => self.with_api_key(key),
            Err(_) => self,
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the user agent string.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Returns the full URL of an endpoint below the API root.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = WeatherConfig::new(WeatherConfig::DEFAULT_BASE_URL).unwrap();
        assert!(config.api_key.is_none());
        assert_eq!(config.timeout, Duration::from_secs(15));
        assert!(config.user_agent.starts_with("sync2cal/"));
    }

    #[test]
    fn config_builder() {
        let config = WeatherConfig::new("http://127.0.0.1:9000")
            .unwrap()
            .with_api_key("  secret  ")
            .with_timeout(Duration::from_secs(5))
            .with_user_agent("test/1.0");

        assert_eq!(config.api_key.as_deref(), Some("secret"));
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, "test/1.0");
    }

    #[test]
    fn blank_api_key_is_absent() {
        let config = WeatherConfig::new("http://localhost").unwrap().with_api_key("   ");
        assert!(config.api_key.is_none());
    }

    #[test]
    fn explicit_key_wins_over_env() {
        let config = WeatherConfig::new("http://localhost")
            .unwrap()
            .with_api_key("explicit")
            .with_api_key_from_env();
        assert_eq!(config.api_key.as_deref(), Some("explicit"));
    }

    #[test]
    fn endpoint_joins_paths() {
        let config = WeatherConfig::new("https://api.openweathermap.org").unwrap();
        assert_eq!(
            config.endpoint("/geo/1.0/direct"),
            "https://api.openweathermap.org/geo/1.0/direct"
        );

        let config = WeatherConfig::new("http://127.0.0.1:4000/proxy/").unwrap();
        assert_eq!(
            config.endpoint("data/2.5/forecast"),
            "http://127.0.0.1:4000/proxy/data/2.5/forecast"
        );
    }

    #[test]
    fn invalid_url() {
        assert!(WeatherConfig::new("not a url").is_err());
    }
}
