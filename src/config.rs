use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{Result, ScraperError};

/// Runtime configuration for one normalization run.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    pub brand: BrandConfig,
    pub dedup: DedupConfig,
}

/// Brand substitution table used when cleaning service names.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BrandConfig {
    /// Display name substituted for placeholder tokens in service names.
    pub display_name: String,
    /// Literal placeholder tokens some sources leave in service names,
    /// e.g. "[c_groceryBrand] Pharmacy".
    pub placeholders: Vec<String>,
}

impl Default for BrandConfig {
    fn default() -> Self {
        Self {
            display_name: String::new(),
            placeholders: vec!["[c_groceryBrand]".to_string(), "[name]".to_string()],
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct DedupConfig {
    pub key_policy: DedupKeyPolicy,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            key_policy: DedupKeyPolicy::StoreNumber,
        }
    }
}

/// How the duplicate-suppression key is composed. Some chains reuse store
/// numbers across regions; `address_url` sidesteps that by keying on the
/// formatted address plus the source page URL instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DedupKeyPolicy {
    /// Use the source-assigned store number, falling back to address+url
    /// when a record carries none.
    StoreNumber,
    /// Always key on the formatted address plus source URL.
    AddressUrl,
}

impl ScraperConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ScraperError::Config(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: ScraperConfig = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config: ScraperConfig = toml::from_str(
            r#"
            [brand]
            display_name = "Acme"
            placeholders = ["[c_groceryBrand]"]

            [dedup]
            key_policy = "address_url"
            "#,
        )
        .unwrap();

        assert_eq!(config.brand.display_name, "Acme");
        assert_eq!(config.brand.placeholders, vec!["[c_groceryBrand]"]);
        assert_eq!(config.dedup.key_policy, DedupKeyPolicy::AddressUrl);
    }

    #[test]
    fn test_missing_sections_fall_back_to_defaults() {
        let config: ScraperConfig = toml::from_str("").unwrap();

        assert_eq!(config.dedup.key_policy, DedupKeyPolicy::StoreNumber);
        assert!(config
            .brand
            .placeholders
            .contains(&"[c_groceryBrand]".to_string()));
    }
}
