//! Configuration for the `tally` binary
//!
//! Loaded from a TOML file:
//!
//! ```toml
//! max_suggestions = 5
//! suggestions = "suggestions.json"
//!
//! [registry]
//! Revenue = 100
//! Expense = 50
//! ```
//!
//! A relative `suggestions` path is resolved against the config file's
//! directory.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tally::{SessionOptions, StaticRegistry};

/// Root of the TOML config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Names resolvable by tag tokens
    #[serde(default = "default_registry")]
    pub registry: StaticRegistry,

    /// JSON file holding the suggestion list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<PathBuf>,

    /// Cap on suggestions shown at once
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_suggestions: Option<usize>,
}

fn default_registry() -> StaticRegistry {
    [("Revenue", 100.0), ("Expense", 50.0), ("Profit", 20.0)]
        .into_iter()
        .collect()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            registry: default_registry(),
            suggestions: None,
            max_suggestions: None,
        }
    }
}

impl CliConfig {
    /// Load from `path`, or the defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => Ok(Self::default()),
        }
    }

    /// Load from a specific file
    ///
    /// A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        let mut config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file '{}'", path.display()))?;

        if let (Some(file), Some(dir)) = (config.suggestions.as_mut(), path.parent()) {
            if file.is_relative() {
                *file = dir.join(&*file);
            }
        }

        config.validate()?;
        tracing::debug!(path = %path.display(), names = config.registry.len(), "config loaded");
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        for (name, value) in self.registry.iter() {
            if !value.is_finite() {
                bail!("registry value for '{}' must be a finite number", name);
            }
        }
        if self.max_suggestions == Some(0) {
            bail!("max_suggestions must be at least 1");
        }
        Ok(())
    }

    /// Session options derived from this config
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            max_suggestions: self.max_suggestions,
        }
    }
}
