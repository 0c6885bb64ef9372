// Tools Configuration
// Optional per-workspace overrides for the compiled-in defaults

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use super::app_config::{depth_limit, AppConfig};
use crate::operations::SearchOptions;

/// Default config file name, looked up in the current directory
pub const TOOLS_CONFIG_NAME: &str = "mooshak-tools.yaml";

/// Runtime configuration loaded from YAML
/// Every field is optional; anything left out falls back to the built-in defaults
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ToolsConfig {
    #[serde(default)]
    pub search: SearchSettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SearchSettings {
    /// Deepest level searched below the root; negative means unlimited
    pub max_depth: Option<i64>,

    /// Sort search results by path
    pub sorted: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LoggingSettings {
    /// Tracing filter, e.g. "warn" or "mooshak_tools=debug"
    pub level: Option<String>,
}

/// Settings after overrides are applied to the defaults
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveSettings {
    pub search: SearchOptions,
    pub log_level: String,
}

impl ToolsConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read tools config: {}", path.display()))?;

        let config: ToolsConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse tools config YAML: {}", path.display()))?;

        Ok(config)
    }

    /// Load configuration if the file exists, otherwise use defaults
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply these overrides on top of the compiled defaults
    pub fn resolve(&self, defaults: &AppConfig) -> EffectiveSettings {
        let max_depth = match self.search.max_depth {
            Some(depth) => depth_limit(depth),
            None => defaults.search.max_depth,
        };

        EffectiveSettings {
            search: SearchOptions {
                max_depth,
                sorted: self.search.sorted.unwrap_or(defaults.search.sorted),
            },
            log_level: self
                .logging
                .level
                .clone()
                .unwrap_or_else(|| defaults.log_level.clone()),
        }
    }
}
