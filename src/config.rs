//! Centralized configuration management for resepku

use std::path::PathBuf;
use std::time::Duration;
use anyhow::{Result, Context};
use reqwest::Url;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the REST API, including the `/api` prefix
    pub api_base_url: String,
    /// Base URL that image file names are appended to
    pub image_base_url: String,
    /// Public guest site origin, used for share links
    pub site_url: String,
    /// Path to the persistent credential file
    pub credential_path: PathBuf,
    /// HTTP client configuration
    pub http: HttpConfig,
}

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Request timeout in seconds. `None` lets requests run to completion.
    pub timeout_seconds: Option<u64>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: None,
            user_agent: "resepku/0.1.0".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8000/api".to_string(),
            image_base_url: "http://127.0.0.1:8000/gambar/".to_string(),
            site_url: "http://localhost:5173".to_string(),
            credential_path: "./resepku-credentials.json".into(),
            http: HttpConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables and defaults
    pub fn from_env() -> Result<Self> {
        let defaults = Config::default();

        let api_base_url = std::env::var("RESEPKU_API_URL").unwrap_or(defaults.api_base_url);
        let image_base_url = std::env::var("RESEPKU_IMAGE_URL").unwrap_or(defaults.image_base_url);
        let site_url = std::env::var("RESEPKU_SITE_URL").unwrap_or(defaults.site_url);

        let credential_path = std::env::var("RESEPKU_CREDENTIALS")
            .map(PathBuf::from)
            .unwrap_or(defaults.credential_path);

        let http = HttpConfig {
            timeout_seconds: parse_env_var("RESEPKU_HTTP_TIMEOUT_SECONDS")?,
            user_agent: std::env::var("RESEPKU_USER_AGENT")
                .unwrap_or(defaults.http.user_agent),
        };

        Ok(Config {
            api_base_url,
            image_base_url,
            site_url,
            credential_path,
            http,
        })
    }

    /// Get HTTP timeout as Duration, if one is configured
    pub fn http_timeout(&self) -> Option<Duration> {
        self.http.timeout_seconds.map(Duration::from_secs)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("API base URL", &self.api_base_url),
            ("image base URL", &self.image_base_url),
            ("site URL", &self.site_url),
        ] {
            Url::parse(value).with_context(|| format!("Invalid {}: {}", name, value))?;
        }

        // Check if parent directory of the credential file exists
        if let Some(parent) = self.credential_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                return Err(anyhow::anyhow!(
                    "Credential file directory does not exist: {}",
                    parent.display()
                ));
            }
        }

        Ok(())
    }
}

/// Helper function to parse environment variable as a specific type
fn parse_env_var<T>(var_name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display + Send + Sync + std::error::Error + 'static,
{
    match std::env::var(var_name) {
        Ok(val) => val.parse().map(Some).with_context(|| {
            format!("Failed to parse environment variable {} = '{}'", var_name, val)
        }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.api_base_url, "http://127.0.0.1:8000/api");
        assert_eq!(config.image_base_url, "http://127.0.0.1:8000/gambar/");
        assert_eq!(config.credential_path, PathBuf::from("./resepku-credentials.json"));
        assert!(config.http_timeout().is_none());
    }

    #[test]
    fn test_config_validation() {
        let config = Config::default();
        // Should not fail for default values
        config.validate().unwrap();
    }

    #[test]
    fn test_config_rejects_relative_api_url() {
        let config = Config {
            api_base_url: "/api".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_rejects_missing_credential_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = Config {
            credential_path: dir.path().join("missing").join("creds.json"),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_env_var_unset() {
        let value: Option<u64> = parse_env_var("RESEPKU_TEST_VARIABLE_NEVER_SET").unwrap();
        assert!(value.is_none());
    }
}
