use crate::core::fallback::{self, FallbackRateConfig};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PrimaryProviderConfig {
    pub base_url: String,
    #[serde(default = "default_primary_timeout")]
    pub timeout_secs: u64,
}

impl Default for PrimaryProviderConfig {
    fn default() -> Self {
        PrimaryProviderConfig {
            base_url: "https://economia.awesomeapi.com.br".to_string(),
            timeout_secs: default_primary_timeout(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SecondaryProviderConfig {
    pub base_url: String,
    #[serde(default = "default_secondary_timeout")]
    pub timeout_secs: u64,
    /// Currencies the official source is asked for.
    #[serde(default = "default_secondary_currencies")]
    pub currencies: Vec<String>,
}

impl Default for SecondaryProviderConfig {
    fn default() -> Self {
        SecondaryProviderConfig {
            base_url: "https://olinda.bcb.gov.br/olinda/servico/PTAX/versao/v1/odata"
                .to_string(),
            timeout_secs: default_secondary_timeout(),
            currencies: default_secondary_currencies(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub primary: PrimaryProviderConfig,
    #[serde(default)]
    pub secondary: SecondaryProviderConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_base_currency")]
    pub base_currency: String,
    #[serde(default = "default_currencies")]
    pub currencies: Vec<String>,
    #[serde(default = "default_sentinel")]
    pub sentinel_currency: String,
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_seconds: u64,
    #[serde(default)]
    pub providers: ProvidersConfig,
    /// Currency the `fallback_rates` are quoted against.
    #[serde(default = "default_fallback_base_currency")]
    pub fallback_base_currency: String,
    #[serde(default = "fallback::default_entries")]
    pub fallback_rates: Vec<FallbackRateConfig>,
}

fn default_base_currency() -> String {
    "BRL".to_string()
}

fn default_fallback_base_currency() -> String {
    fallback::STATIC_BASE_CURRENCY.to_string()
}

fn default_currencies() -> Vec<String> {
    vec!["USD".to_string(), "EUR".to_string()]
}

fn default_sentinel() -> String {
    "USD".to_string()
}

fn default_cache_ttl() -> u64 {
    3600
}

fn default_primary_timeout() -> u64 {
    8
}

fn default_secondary_timeout() -> u64 {
    10
}

fn default_secondary_currencies() -> Vec<String> {
    vec!["USD".to_string(), "EUR".to_string()]
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            base_currency: default_base_currency(),
            currencies: default_currencies(),
            sentinel_currency: default_sentinel(),
            cache_ttl_seconds: default_cache_ttl(),
            providers: ProvidersConfig::default(),
            fallback_base_currency: default_fallback_base_currency(),
            fallback_rates: fallback::default_entries(),
        }
    }
}

impl AppConfig {
    /// Loads the config from the default location, or built-in defaults if there is none.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using built-in defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("org", "octowage", "octowage")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    /// Configured currencies plus the sentinel, upper-cased and deduplicated.
    pub fn requested_currencies(&self) -> Vec<String> {
        let mut currencies: Vec<String> = Vec::with_capacity(self.currencies.len() + 1);
        for code in std::iter::once(&self.sentinel_currency).chain(self.currencies.iter()) {
            let code = code.trim().to_uppercase();
            if !code.is_empty() && !currencies.contains(&code) {
                currencies.push(code);
            }
        }
        currencies
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_config_defaults_from_empty_yaml() {
        let config: AppConfig = serde_yaml::from_str("{}").expect("Failed to deserialize");
        assert_eq!(config.base_currency, "BRL");
        assert_eq!(config.currencies, vec!["USD", "EUR"]);
        assert_eq!(config.sentinel_currency, "USD");
        assert_eq!(config.cache_ttl_seconds, 3600);
        assert_eq!(
            config.providers.primary.base_url,
            "https://economia.awesomeapi.com.br"
        );
        assert_eq!(config.providers.primary.timeout_secs, 8);
        assert_eq!(config.providers.secondary.timeout_secs, 10);
        assert_eq!(config.fallback_rates.len(), 3);
        assert_eq!(config.fallback_base_currency, "BRL");
    }

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
base_currency: "usd"
currencies: ["eur", "GBP"]
cache_ttl_seconds: 60
fallback_base_currency: "eur"
providers:
  primary:
    base_url: "http://example.com/primary"
    timeout_secs: 2
  secondary:
    base_url: "http://example.com/secondary"
    currencies: ["USD"]
fallback_rates:
  - currency: "USD"
    buy: 5.0
    sell: 5.2
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.cache_ttl_seconds, 60);
        assert_eq!(config.base_currency, "usd");
        assert_eq!(config.fallback_base_currency, "eur");
        assert_eq!(config.providers.primary.base_url, "http://example.com/primary");
        assert_eq!(config.providers.primary.timeout_secs, 2);
        assert_eq!(
            config.providers.secondary.base_url,
            "http://example.com/secondary"
        );
        assert_eq!(config.providers.secondary.timeout_secs, 10);
        assert_eq!(config.providers.secondary.currencies, vec!["USD"]);
        assert_eq!(config.fallback_rates.len(), 1);
        assert_eq!(config.fallback_rates[0].buy, dec!(5.0));
        assert_eq!(config.fallback_rates[0].updated_at, "2025-12-01T00:00:00");
        assert_eq!(config.requested_currencies(), vec!["USD", "EUR", "GBP"]);
    }

    #[test]
    fn test_load_from_missing_path_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = AppConfig::load_from_path(dir.path().join("missing.yaml"));
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to read config file")
        );
    }
}
