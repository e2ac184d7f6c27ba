//! Boss configuration loader.

use std::path::Path;

use anyhow::Context;
use lantern_core::BossConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`BossConfig`] from TOML files.
///
/// Missing keys fall back to their defaults, so a file only needs to name the
/// values it changes. The result is validated before it is returned.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate config data from a TOML file.
    pub fn load(path: &Path) -> LoadResult<BossConfig> {
        let content = read_file(path)?;
        Self::from_toml_str(&content).with_context(|| format!("in {}", path.display()))
    }

    /// Parse and validate config data from TOML text.
    pub fn from_toml_str(content: &str) -> LoadResult<BossConfig> {
        let config: BossConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        config.validate().context("Invalid boss config")?;

        Ok(config)
    }
}
