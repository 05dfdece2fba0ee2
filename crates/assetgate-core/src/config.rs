use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::builtin::TransformEntry;
use crate::pipeline::PipelineSettings;
use crate::registry::PriorityRegistry;

/// Global configuration loaded from `~/.config/assetgate/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateConfig {
    /// Directory that holds the asset namespace folder (e.g. `<root>/www`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_root: Option<PathBuf>,
    /// Namespace, sentinel path, injected script and text encoding.
    #[serde(flatten)]
    pub pipeline: PipelineSettings,
    /// Stock transforms to register at start-up.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub transforms: Vec<TransformEntry>,
}

impl GateConfig {
    /// Register every declared transform. Stops at the first priority
    /// collision; transforms registered before it stay registered.
    pub fn install_transforms(&self, registry: &PriorityRegistry) -> Result<()> {
        for entry in &self.transforms {
            if !registry.register(entry.spec.build(), entry.priority) {
                anyhow::bail!(
                    "transform priority {} is already taken ({})",
                    entry.priority,
                    entry.spec.describe()
                );
            }
        }
        Ok(())
    }

    /// Declared transforms sorted by priority.
    pub fn sorted_transforms(&self) -> Vec<&TransformEntry> {
        let mut entries: Vec<&TransformEntry> = self.transforms.iter().collect();
        entries.sort_by_key(|entry| entry.priority);
        entries
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("assetgate")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<GateConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = GateConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from(&path)
}

/// Load configuration from an explicit file.
pub fn load_from(path: &Path) -> Result<GateConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: GateConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}
