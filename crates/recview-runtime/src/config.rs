use crate::font::FontSettings;
use crate::{Error, Result};
use recview_engine::RenderSettings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Resolve the config file path based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. RECVIEW_CONFIG environment variable (with tilde expansion)
/// 3. XDG config directory
/// 4. ~/.recview/config.toml (fallback for systems without XDG)
pub fn resolve_config_path(explicit_path: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    if let Ok(env_path) = std::env::var("RECVIEW_CONFIG") {
        return Ok(expand_tilde(&env_path));
    }

    if let Some(config_dir) = dirs::config_dir() {
        return Ok(config_dir.join("recview").join("config.toml"));
    }

    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home).join(".recview").join("config.toml"));
    }

    Err(Error::Config(
        "Could not determine config path: no HOME directory or XDG config directory found"
            .to_string(),
    ))
}

/// Expand tilde (~) in paths to the user's home directory
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichmentConfig {
    /// Worker threads for source lookups.
    pub worker_threads: usize,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self { worker_threads: 2 }
    }
}

/// Viewer settings. Read-only: font changes made while viewing are not
/// written back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ViewerConfig {
    #[serde(default)]
    pub font: FontSettings,
    #[serde(default)]
    pub render: RenderSettings,
    #[serde(default)]
    pub enrichment: EnrichmentConfig,
}

impl ViewerConfig {
    pub fn load(explicit_path: Option<&str>) -> Result<Self> {
        let config_path = resolve_config_path(explicit_path)?;
        Self::load_from(&config_path)
    }

    /// Missing file means defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: ViewerConfig = toml::from_str(&content)?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.font.size.is_finite() || self.font.size <= 0.0 {
            return Err(Error::Config(format!(
                "font.size must be a positive number, got {}",
                self.font.size
            )));
        }
        if self.font.name.trim().is_empty() {
            return Err(Error::Config("font.name must not be empty".to_string()));
        }
        if self.enrichment.worker_threads == 0 {
            return Err(Error::Config(
                "enrichment.worker_threads must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
