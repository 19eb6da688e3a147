//! Loader configuration.

use schematic_core::DEFAULT_DOMAIN;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::AssetError;

/// Settings shared by every loader in this crate.
///
/// Every field has a default, so an empty TOML or JSON document is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadSettings {
    /// Domain given to codes written without `domain:` when the document has none of its own.
    pub default_domain: String,
    /// Initialize descriptors and resolve recipes on the rayon pool.
    pub parallel: bool,
    /// Read `quantity` as litres for liquid ingredients that give no `litres`.
    pub legacy_liquid_quantity: bool,
}

impl Default for LoadSettings {
    fn default() -> Self {
        Self {
            default_domain: DEFAULT_DOMAIN.to_string(),
            parallel: true,
            legacy_liquid_quantity: true,
        }
    }
}

impl LoadSettings {
    pub fn from_toml_str(content: &str) -> Result<Self, AssetError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self, AssetError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load from a `.toml` or `.json` file, picked by extension.
    pub fn load(path: &Path) -> Result<Self, AssetError> {
        let content = std::fs::read_to_string(path).map_err(|e| AssetError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&content),
            _ => Self::from_toml_str(&content),
        }
    }
}
