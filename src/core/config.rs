//! Configuration management

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::warn;

use crate::core::errors::ConfigError;
use crate::core::languages::{self, DEFAULT_URL_SUFFIX};

/// Path of the batchexecute endpoint below the service host
const ENDPOINT_PATH: &str = "/_/TranslateWebserverUi/data/batchexecute";

/// Configuration for translator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    /// Country suffix of the service host, e.g. `com` or `co.uk`
    pub url_suffix: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Proxy URL by scheme: `http`, `https` or `all`
    pub proxies: BTreeMap<String, String>,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            url_suffix: DEFAULT_URL_SUFFIX.to_string(),
            timeout_secs: 5,
            proxies: BTreeMap::new(),
        }
    }
}

impl TranslatorConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(suffix) = std::env::var("GOOGLE_TRANSLATE_URL_SUFFIX") {
            config.url_suffix = suffix;
        }

        if let Ok(timeout) = std::env::var("GOOGLE_TRANSLATE_TIMEOUT_SECS") {
            config.timeout_secs = timeout
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidValue {
                    key: "GOOGLE_TRANSLATE_TIMEOUT_SECS",
                    value: timeout,
                })?;
        }

        for (scheme, var) in [
            ("http", "GOOGLE_TRANSLATE_HTTP_PROXY"),
            ("https", "GOOGLE_TRANSLATE_HTTPS_PROXY"),
        ] {
            if let Ok(url) = std::env::var(var) {
                config.proxies.insert(scheme.to_string(), url);
            }
        }

        Ok(config.normalized())
    }

    /// Load from JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config.normalized())
    }

    /// Save configuration to file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Replace an unknown URL suffix with the canonical one
    pub fn normalized(mut self) -> Self {
        if !languages::is_valid_suffix(&self.url_suffix) {
            warn!(
                "Unknown URL suffix '{}', falling back to '{}'",
                self.url_suffix, DEFAULT_URL_SUFFIX
            );
            self.url_suffix = DEFAULT_URL_SUFFIX.to_string();
        }
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        self.build_proxies()?;
        Ok(())
    }

    /// Service host URL, without trailing slash
    pub fn base_url(&self) -> String {
        format!("https://translate.google.{}", self.url_suffix)
    }

    /// Full batchexecute endpoint URL
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url(), ENDPOINT_PATH)
    }

    /// Turn the scheme → URL map into reqwest proxies
    pub fn build_proxies(&self) -> Result<Vec<reqwest::Proxy>, ConfigError> {
        self.proxies
            .iter()
            .map(|(scheme, url)| {
                let proxy = match scheme.as_str() {
                    "http" => reqwest::Proxy::http(url),
                    "https" => reqwest::Proxy::https(url),
                    "all" => reqwest::Proxy::all(url),
                    other => return Err(ConfigError::ProxyScheme(other.to_string())),
                };
                proxy.map_err(|e| ConfigError::ProxyUrl {
                    url: url.clone(),
                    message: e.to_string(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoint() {
        let config = TranslatorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.base_url(), "https://translate.google.com");
        assert_eq!(
            config.endpoint(),
            "https://translate.google.com/_/TranslateWebserverUi/data/batchexecute"
        );
    }

    #[test]
    fn test_unknown_suffix_falls_back() {
        let config = TranslatorConfig {
            url_suffix: "invalid".to_string(),
            ..Default::default()
        }
        .normalized();
        assert_eq!(config.url_suffix, "com");

        let config = TranslatorConfig {
            url_suffix: "co.jp".to_string(),
            ..Default::default()
        }
        .normalized();
        assert_eq!(config.base_url(), "https://translate.google.co.jp");
    }

    #[test]
    fn test_config_validation_zero_timeout() {
        let config = TranslatorConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroTimeout)));
    }

    #[test]
    fn test_proxy_schemes() {
        let mut config = TranslatorConfig::default();
        config
            .proxies
            .insert("http".to_string(), "http://171.112.169.47:19934".to_string());
        config
            .proxies
            .insert("https".to_string(), "http://171.112.169.47:19934".to_string());
        assert_eq!(config.build_proxies().unwrap().len(), 2);

        config
            .proxies
            .insert("ftp".to_string(), "http://127.0.0.1:21".to_string());
        assert!(matches!(config.validate(), Err(ConfigError::ProxyScheme(_))));
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("translator.json");

        let mut config = TranslatorConfig {
            url_suffix: "de".to_string(),
            timeout_secs: 12,
            ..Default::default()
        };
        config
            .proxies
            .insert("all".to_string(), "socks5://127.0.0.1:1080".to_string());
        config.to_file(&path).unwrap();

        assert_eq!(TranslatorConfig::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.json");
        std::fs::write(&path, r#"{"url_suffix": "nowhere"}"#).unwrap();

        let config = TranslatorConfig::from_file(&path).unwrap();
        assert_eq!(config.url_suffix, "com");
        assert_eq!(config.timeout_secs, 5);
        assert!(config.proxies.is_empty());
    }
}
