use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::{Path, PathBuf}};

use crate::{api::DEFAULT_BASE_URL, orchestrator::StalePolicy};

/// City offered before anything has been configured.
pub const DEFAULT_CITY: &str = "Zagreb";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// base_url = "http://127.0.0.1:8000"
/// default_city = "Zagreb"
/// timeout_secs = 30
/// stale_policy = "apply"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Origin of the assistant backend.
    pub base_url: String,

    /// City used when none is given on the command line.
    pub default_city: Option<String>,

    /// Per-request timeout. Requests may hang forever when unset.
    pub timeout_secs: Option<u64>,

    pub stale_policy: StalePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            default_city: Some(DEFAULT_CITY.to_string()),
            timeout_secs: None,
            stale_policy: StalePolicy::default(),
        }
    }
}

impl Config {
    /// City to use when the caller gave none.
    pub fn city_or_default(&self, city: Option<String>) -> Result<String> {
        city.or_else(|| self.default_city.clone()).ok_or_else(|| {
            anyhow!(
                "No city given and no default city configured.\n\
                 Hint: pass `--city <name>` or run `assistant configure`."
            )
        })
    }

    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-assistant", "assistant")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
