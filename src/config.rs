use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Root configuration structure, deserialized from `.license-guard/config.toml`.
#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

/// Where the trained safety model lives.
#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct ModelConfig {
    /// Path to the JSON model artifact. Relative paths resolve against the
    /// directory holding the config file. Without one, every identifier is
    /// classified by the keyword rules.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct ReportConfig {
    /// Exit with code 1 when any license is classified as risky. Defaults to `true`.
    #[serde(default = "default_fail_on_risky")]
    pub fail_on_risky: bool,
}

fn default_fail_on_risky() -> bool {
    true
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            fail_on_risky: default_fail_on_risky(),
        }
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<project_path>/.license-guard/config.toml`
/// 3. `~/.config/license-guard/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(project_path: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let project_config = project_path.join(".license-guard").join("config.toml");
    if project_config.exists() {
        return read_config(&project_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home.join(".config").join("license-guard").join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let mut config: Config = toml::from_str(&content)
        .with_context(|| format!("Invalid config {}", path.display()))?;

    if let (Some(model), Some(dir)) = (config.model.path.as_mut(), path.parent()) {
        if model.is_relative() {
            *model = dir.join(&*model);
        }
    }

    Ok(config)
}
