//! Server configuration.
//!
//! All settings live in a single `config.toml`, by default at
//! `~/.config/sync2cal/config.toml`. A missing file means defaults.
//!
//! The weather `api_key` supports secret references:
//! - `pass::path/in/store` resolved via `pass show`
//! - `env::VAR_NAME` resolved from the environment
//! - plain text used as-is

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use sync2cal_providers::weather::WeatherConfig;

use crate::error::{ServerError, ServerResult};

/// Environment variable overriding the CORS origin list (comma-separated).
pub const CORS_ORIGINS_ENV: &str = "CORS_ORIGINS";

/// Configuration for the sync2cal server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Listener settings.
    pub server: ServerSettings,

    /// Cross-origin settings.
    pub cors: CorsSettings,

    /// Weather integration settings.
    pub weather: WeatherSettings,
}

/// Listener settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Address to bind.
    pub bind: String,

    /// Port to listen on.
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

/// Cross-origin settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsSettings {
    /// Exact origins allowed to call the API with credentials.
    pub origins: Vec<String>,
}

impl Default for CorsSettings {
    fn default() -> Self {
        Self {
            origins: vec![
                "https://sync2cal.com".to_string(),
                "https://www.sync2cal.com".to_string(),
            ],
        }
    }
}

/// Weather integration settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherSettings {
    /// Fallback OpenWeatherMap key (supports `pass::` and `env::` prefixes).
    pub api_key: Option<String>,

    /// API root, overridable for proxies and tests.
    pub base_url: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for WeatherSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: WeatherConfig::DEFAULT_BASE_URL.to_string(),
            timeout_secs: WeatherConfig::DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl WeatherSettings {
    /// Converts to provider configuration.
    ///
    /// Resolves the key reference; without a key in the file, the
    /// `OPENWEATHERMAP_API_KEY` environment variable is used.
    pub fn to_provider_config(&self) -> ServerResult<WeatherConfig> {
        let mut config = WeatherConfig::new(&self.base_url)
            .map_err(|e| ServerError::config(format!("invalid weather base_url: {}", e)))?
            .with_timeout(Duration::from_secs(self.timeout_secs));

        if let Some(ref raw) = self.api_key {
            config = config.with_api_key(crate::secret::resolve(raw)?);
        }

        Ok(config.with_api_key_from_env())
    }
}

impl AppConfig {
    /// Loads configuration from the default path, falling back to defaults
    /// when the file does not exist.
    pub fn load() -> ServerResult<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> ServerResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ServerError::config(format!("failed to read {}: {}", path.display(), e))
        })?;
        toml::from_str(&content).map_err(|e| {
            ServerError::config(format!("failed to parse {}: {}", path.display(), e))
        })
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sync2cal")
            .join("config.toml")
    }

    /// Replaces the CORS origins with a comma-separated list, if one is given.
    pub fn with_cors_origins_override(mut self, raw: Option<&str>) -> Self {
        if let Some(raw) = raw.filter(|r| !r.trim().is_empty()) {
            self.cors.origins = raw
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect();
        }
        self
    }

    /// Applies overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        let origins = std::env::var(CORS_ORIGINS_ENV).ok();
        self.with_cors_origins_override(origins.as_deref())
    }

    /// The `host:port` the server listens on.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.bind, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let config = AppConfig::default();
        assert_eq!(config.listen_addr(), "127.0.0.1:8000");
        assert_eq!(
            config.cors.origins,
            vec!["https://sync2cal.com", "https://www.sync2cal.com"]
        );
        assert_eq!(config.weather.timeout_secs, 15);
        assert!(config.weather.api_key.is_none());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
[server]
port = 9090

[weather]
api_key = "plain-key"
"#,
        )
        .unwrap();

        assert_eq!(config.listen_addr(), "127.0.0.1:9090");
        assert_eq!(config.weather.api_key.as_deref(), Some("plain-key"));
        assert_eq!(config.weather.base_url, "https://api.openweathermap.org");
        assert_eq!(config.cors, CorsSettings::default());
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[cors]\norigins = [\"http://localhost:3000\"]\n\n[weather]\ntimeout_secs = 3"
        )
        .unwrap();

        let config = AppConfig::load_from(file.path()).unwrap();
        assert_eq!(config.cors.origins, vec!["http://localhost:3000"]);
        assert_eq!(config.weather.timeout_secs, 3);
    }

    #[test]
    fn load_from_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server]\nport = \"eighty\"").unwrap();

        let err = AppConfig::load_from(file.path()).unwrap_err();
        assert!(err.to_string().contains("failed to parse"));
    }

    #[test]
    fn load_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(AppConfig::load_from(&dir.path().join("nope.toml")).is_err());
    }

    #[test]
    fn cors_override() {
        let config = AppConfig::default()
            .with_cors_origins_override(Some(" http://a.test , ,http://b.test "));
        assert_eq!(config.cors.origins, vec!["http://a.test", "http://b.test"]);

        let config = AppConfig::default().with_cors_origins_override(Some(""));
        assert_eq!(config.cors, CorsSettings::default());

        let config = AppConfig::default().with_cors_origins_override(None);
        assert_eq!(config.cors, CorsSettings::default());
    }

    #[test]
    fn weather_provider_config() {
        let settings = WeatherSettings {
            api_key: Some("file-key".to_string()),
            base_url: "http://127.0.0.1:4010".to_string(),
            timeout_secs: 2,
        };
        let config = settings.to_provider_config().unwrap();
        assert_eq!(config.api_key.as_deref(), Some("file-key"));
        assert_eq!(config.timeout, Duration::from_secs(2));
        assert_eq!(config.base_url.as_str(), "http://127.0.0.1:4010/");
    }

    #[test]
    fn weather_env_reference() {
        unsafe {
            std::env::set_var("_SYNC2CAL_TEST_OWM_KEY", "from-env");
        }
        let settings = WeatherSettings {
            api_key: Some("env::_SYNC2CAL_TEST_OWM_KEY".to_string()),
            ..Default::default()
        };
        let config = settings.to_provider_config().unwrap();
        assert_eq!(config.api_key.as_deref(), Some("from-env"));
        unsafe {
            std::env::remove_var("_SYNC2CAL_TEST_OWM_KEY");
        }
    }

    #[test]
    fn weather_invalid_base_url() {
        let settings = WeatherSettings {
            base_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(settings.to_provider_config().is_err());
    }
}
