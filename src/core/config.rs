use crate::core::resolver::ResolverOptions;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::{fs, path::PathBuf};
use tracing::debug;

/// Environment variable that overrides `provider.api_url`.
pub const API_URL_ENV: &str = "API_URL";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ProviderConfig {
    pub api_url: String,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_retries")]
    pub retries: usize,
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

fn default_seed() -> u64 {
    33331
}

fn default_retries() -> usize {
    2
}

fn default_retry_delay_ms() -> u64 {
    500
}

fn default_base_currency() -> String {
    "CAD".to_string()
}

fn default_amount() -> f64 {
    100.0
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AppConfig {
    #[serde(default = "default_base_currency")]
    pub base_currency: String,
    #[serde(default = "default_amount")]
    pub amount: f64,
    pub provider: Option<ProviderConfig>,
    #[serde(default)]
    pub resolver: ResolverOptions,
    #[serde(default)]
    pub countries: HashMap<String, String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            base_currency: default_base_currency(),
            amount: default_amount(),
            provider: None,
            resolver: ResolverOptions::default(),
            countries: HashMap::new(),
        }
    }
}

impl AppConfig {
    /// Loads the default config file, falling back to defaults when it does
    /// not exist yet.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(path = %config_path.display(), "No config file, using defaults");
            return Ok(Self::default().with_env_overrides(std::env::var(API_URL_ENV).ok()));
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "fxroute", "fxroute")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config.with_env_overrides(std::env::var(API_URL_ENV).ok()))
    }

    /// Applies an `API_URL` override on top of the file settings.
    pub fn with_env_overrides(mut self, api_url: Option<String>) -> Self {
        let Some(api_url) = api_url.filter(|url| !url.is_empty()) else {
            return self;
        };
        debug!(%api_url, "Overriding feed URL from environment");
        match self.provider.as_mut() {
            Some(provider) => provider.api_url = api_url,
            None => {
                self.provider = Some(ProviderConfig {
                    api_url,
                    seed: default_seed(),
                    retries: default_retries(),
                    retry_delay_ms: default_retry_delay_ms(),
                })
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
base_currency: "USD"
amount: 250
provider:
  api_url: "https://rates.example.com/api/exchange-rates"
  seed: 42
resolver:
  cycle_guard: true
countries:
  XAU: "Gold"
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.base_currency, "USD");
        assert_eq!(config.amount, 250.0);
        let provider = config.provider.expect("provider should be set");
        assert_eq!(
            provider.api_url,
            "https://rates.example.com/api/exchange-rates"
        );
        assert_eq!(provider.seed, 42);
        assert_eq!(provider.retries, 2);
        assert_eq!(provider.retry_delay_ms, 500);
        assert!(config.resolver.cycle_guard);
        assert!(!config.resolver.memoize);
        assert_eq!(config.countries.get("XAU").map(String::as_str), Some("Gold"));
    }

    #[test]
    fn test_config_defaults() {
        let config: AppConfig = serde_yaml::from_str("{}").expect("Failed to deserialize");
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.base_currency, "CAD");
        assert_eq!(config.amount, 100.0);
        assert!(config.provider.is_none());
    }

    #[test]
    fn test_env_override_replaces_api_url() {
        let yaml_str = r#"
provider:
  api_url: "https://rates.example.com"
  seed: 7
"#;
        let config: AppConfig = serde_yaml::from_str(yaml_str).unwrap();
        let config = config.with_env_overrides(Some("http://localhost:9000".to_string()));
        let provider = config.provider.unwrap();
        assert_eq!(provider.api_url, "http://localhost:9000");
        assert_eq!(provider.seed, 7);
    }

    #[test]
    fn test_env_override_creates_provider() {
        let config = AppConfig::default().with_env_overrides(Some("http://localhost:9000".into()));
        assert_eq!(config.provider.unwrap().seed, 33331);

        let config = AppConfig::default().with_env_overrides(Some(String::new()));
        assert!(config.provider.is_none());
    }
}
