//! Settings discovery, creation and persistence.
//!
//! Settings live in a per-user directory:
//! - `--config-dir` when given on the command line,
//! - else `$OSSIFY_CONFIG_DIR`,
//! - else `$HOME/.config/ossify` (`USERPROFILE` on Windows).
//!
//! `settings.json` is the canonical file; `settings.toml` and
//! `settings.yaml|yml` are read when no JSON file exists. A missing settings
//! file is created with defaults on first load:
//! - `licensePath`: `<dir>/licenses`
//! - `conventionPath`: `<dir>/conventions`

use crate::error::{OssifyError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CONFIG_DIR_ENV: &str = "OSSIFY_CONFIG_DIR";
const SETTINGS_JSON: &str = "settings.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// User settings.
pub struct Config {
    /// Directory holding custom license texts, one file per license id.
    #[serde(default)]
    pub license_path: String,
    /// Directory holding user conventions, one JSON document per file.
    #[serde(default)]
    pub convention_path: String,
}

#[derive(Debug, Clone)]
/// Reads and writes the settings file under one directory.
pub struct ConfigStore {
    root: PathBuf,
}

impl ConfigStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Pick the settings directory. Precedence: CLI > environment > home.
    pub fn discover(cli_dir: Option<&str>) -> Result<Self> {
        if let Some(dir) = cli_dir {
            return Ok(Self::new(dir));
        }
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|d| !d.is_empty()) {
            return Ok(Self::new(dir));
        }
        home_dir()
            .map(|h| Self::new(h.join(".config").join("ossify")))
            .ok_or_else(|| OssifyError::config("cannot locate a home directory for settings"))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn settings_path(&self) -> PathBuf {
        self.root.join(SETTINGS_JSON)
    }

    pub fn defaults(&self) -> Config {
        Config {
            license_path: self.root.join("licenses").to_string_lossy().to_string(),
            convention_path: self.root.join("conventions").to_string_lossy().to_string(),
        }
    }

    /// Load settings, writing defaults first when no settings file exists.
    pub fn load(&self) -> Result<Config> {
        if let Some(cfg) = self.read()? {
            return Ok(cfg);
        }
        let cfg = self.defaults();
        self.save(&cfg)?;
        debug!(path = %self.settings_path().display(), "created default settings");
        Ok(cfg)
    }

    fn read(&self) -> Result<Option<Config>> {
        let json_path = self.settings_path();
        if json_path.is_file() {
            let s = read(&json_path)?;
            return Ok(Some(serde_json::from_str(&s)?));
        }
        let toml_path = self.root.join("settings.toml");
        if toml_path.is_file() {
            let s = read(&toml_path)?;
            return Ok(Some(toml::from_str(&s)?));
        }
        for yml in ["settings.yaml", "settings.yml"] {
            let p = self.root.join(yml);
            if p.is_file() {
                let s = read(&p)?;
                return Ok(Some(serde_yaml::from_str(&s)?));
            }
        }
        Ok(None)
    }

    pub fn save(&self, cfg: &Config) -> Result<()> {
        fs::create_dir_all(&self.root).map_err(|e| {
            OssifyError::io(
                format!("failed to create {}", self.root.display()),
                e,
            )
        })?;
        let body = serde_json::to_string_pretty(cfg)?;
        let path = self.settings_path();
        fs::write(&path, body)
            .map_err(|e| OssifyError::io(format!("failed to write {}", path.display()), e))
    }
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| OssifyError::io(format!("failed to read {}", path.display()), e))
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
}
