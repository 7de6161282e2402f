//! Loader configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::loading::DEFAULT_HUB_URL;

/// Default limit on nested prompt configs (outer prompt counts as 1)
pub const DEFAULT_MAX_DEPTH: usize = 4;

/// Prompt loader configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Base URL that hub paths are appended to
    #[serde(rename = "hub-url")]
    pub hub_url: String,

    /// Maximum nesting of prompt configs (few-shot example prompts)
    #[serde(rename = "max-depth")]
    pub max_depth: usize,

    /// Hub request timeout in milliseconds; no timeout when unset
    #[serde(rename = "timeout-ms", skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,

    /// Parent directory for hub download scratch dirs; system temp dir when unset
    #[serde(rename = "temp-dir", skip_serializing_if = "Option::is_none")]
    pub temp_dir: Option<PathBuf>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            hub_url: DEFAULT_HUB_URL.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
            timeout_ms: None,
            temp_dir: None,
        }
    }
}

impl LoaderConfig {
    /// Validate configuration before use
    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(eyre::eyre!("max-depth must be at least 1"));
        }
        if !self.hub_url.starts_with("http://") && !self.hub_url.starts_with("https://") {
            return Err(eyre::eyre!(
                "hub-url must start with http:// or https://, got {}",
                self.hub_url
            ));
        }
        Ok(())
    }

    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .promptloader.yml
        let local_config = PathBuf::from(".promptloader.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/promptloader/promptloader.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("promptloader").join("promptloader.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // No config file found, use defaults
        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}
