//! Cart store configuration.

use serde::{Deserialize, Serialize};

use crate::error::CartError;
use crate::money::Currency;

/// Default persistence slot key.
pub const DEFAULT_STORAGE_KEY: &str = "cart";

/// What to do when writing the cart to its slot fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteFailurePolicy {
    /// Log the failure and report success; the in-memory cart stays authoritative.
    #[default]
    Swallow,
    /// Return the storage error to the caller.
    Surface,
}

/// Cart store configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Key of the persistence slot holding the cart.
    pub storage_key: String,

    /// Currency that checkout summaries are totalled in.
    pub currency: Currency,

    /// Policy for persistence write failures.
    pub on_write_failure: WriteFailurePolicy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            currency: Currency::default(),
            on_write_failure: WriteFailurePolicy::default(),
        }
    }
}

impl StoreConfig {
    /// Parse TOML config text.
    pub fn from_toml_str(content: &str) -> Result<Self, CartError> {
        let config: Self =
            toml::from_str(content).map_err(|e| CartError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse JSON config text.
    pub fn from_json_str(content: &str) -> Result<Self, CartError> {
        let config: Self = serde_json::from_str(content)
            .map_err(|e| CartError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from a file. Files ending in `.json` are read as JSON,
    /// everything else as TOML.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, CartError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            CartError::InvalidConfig(format!("failed to read {}: {}", path.display(), e))
        })?;

        if path.extension().is_some_and(|ext| ext == "json") {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    /// Serialize to TOML.
    pub fn to_toml_string(&self) -> Result<String, CartError> {
        toml::to_string_pretty(self).map_err(|e| CartError::InvalidConfig(e.to_string()))
    }

    /// Check the config is usable.
    pub fn validate(&self) -> Result<(), CartError> {
        if self.storage_key.trim().is_empty() {
            return Err(CartError::InvalidConfig(
                "storage_key must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.storage_key, "cart");
        assert_eq!(config.currency, Currency::USD);
        assert_eq!(config.on_write_failure, WriteFailurePolicy::Swallow);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = StoreConfig::from_toml_str(r#"on_write_failure = "surface""#).unwrap();
        assert_eq!(config.storage_key, "cart");
        assert_eq!(config.on_write_failure, WriteFailurePolicy::Surface);
    }

    #[test]
    fn test_full_toml() {
        let config = StoreConfig::from_toml_str(
            r#"
storage_key = "atelier:cart"
currency = "EUR"
on_write_failure = "swallow"
"#,
        )
        .unwrap();
        assert_eq!(config.storage_key, "atelier:cart");
        assert_eq!(config.currency, Currency::EUR);
    }

    #[test]
    fn test_json() {
        let config = StoreConfig::from_json_str(r#"{"currency": "GBP"}"#).unwrap();
        assert_eq!(config.currency, Currency::GBP);
    }

    #[test]
    fn test_empty_key_rejected() {
        let err = StoreConfig::from_toml_str(r#"storage_key = " ""#).unwrap_err();
        assert!(matches!(err, CartError::InvalidConfig(_)));
    }

    #[test]
    fn test_unknown_policy_rejected() {
        assert!(StoreConfig::from_toml_str(r#"on_write_failure = "retry""#).is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = StoreConfig {
            currency: Currency::INR,
            ..StoreConfig::default()
        };
        let text = config.to_toml_string().unwrap();
        assert_eq!(StoreConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_load_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let toml_path = dir.path().join("atelier.toml");
        std::fs::write(&toml_path, "currency = \"JPY\"\n").unwrap();
        assert_eq!(StoreConfig::load(&toml_path).unwrap().currency, Currency::JPY);

        let json_path = dir.path().join("atelier.json");
        std::fs::write(&json_path, r#"{"storage_key": "bag"}"#).unwrap();
        assert_eq!(StoreConfig::load(&json_path).unwrap().storage_key, "bag");

        assert!(StoreConfig::load(dir.path().join("missing.toml")).is_err());
    }
}
