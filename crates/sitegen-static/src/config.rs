//! Site configuration resolution.

use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::Value;
use sitegen_doc::{parse_mapping, Metadata};

use crate::builder::BuildError;

/// Location of the project config, relative to the source directory.
pub const CONFIG_PATH: &str = ".markdown-sitegen/config.yml";

const DEFAULT_CONFIG: &str = include_str!("../web/config.yml");

/// Where the site configuration was loaded from.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    /// The project's own config file
    Project(PathBuf),
    /// The default shipped with the tool
    Bundled,
}

/// Site-wide configuration values, exposed to templates as `config`.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteConfig {
    pub values: Metadata,
    pub source: ConfigSource,
}

impl SiteConfig {
    /// Load the project config if present, otherwise the bundled default.
    ///
    /// The two are never merged.
    pub fn resolve(source_dir: &Path) -> Result<Self, BuildError> {
        let path = source_dir.join(CONFIG_PATH);
        if !path.exists() {
            tracing::info!("No {} found, using default config", CONFIG_PATH);
            return Self::bundled();
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| BuildError::ReadError(format!("{}: {}", path.display(), e)))?;
        let values = parse_mapping(&content)
            .map_err(|e| BuildError::ConfigError(format!("{}: {}", path.display(), e)))?;

        tracing::info!("Loaded config from {}", path.display());

        Ok(Self {
            values,
            source: ConfigSource::Project(path),
        })
    }

    /// The default configuration shipped with the tool.
    pub fn bundled() -> Result<Self, BuildError> {
        let values = parse_mapping(DEFAULT_CONFIG)
            .map_err(|e| BuildError::ConfigError(format!("bundled config: {}", e)))?;

        Ok(Self {
            values,
            source: ConfigSource::Bundled,
        })
    }

    /// Look up a string value.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(Value::as_str)
    }
}
