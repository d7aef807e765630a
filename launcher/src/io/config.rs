//! Launcher configuration stored beside the executable as `pgup.toml`.

use std::fs;
use std::path::{Component, Path};
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::paths::DESCRIPTOR_FILE;

/// Launcher configuration (TOML).
///
/// The file is optional. Missing fields default to plain
/// `docker compose -f docker-compose.yml up -d --build` with no timeout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LauncherConfig {
    /// Orchestration tool and any leading subcommand words.
    pub command: Vec<String>,

    /// Descriptor file name, resolved inside the launcher directory.
    pub descriptor: String,

    /// Kill the tool after this many seconds. Unset waits indefinitely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            command: vec!["docker".to_string(), "compose".to_string()],
            descriptor: DESCRIPTOR_FILE.to_string(),
            timeout_secs: None,
        }
    }
}

impl LauncherConfig {
    pub fn validate(&self) -> Result<()> {
        if self.command.is_empty() || self.command[0].trim().is_empty() {
            return Err(anyhow!("command must be a non-empty array"));
        }
        if self.descriptor.trim().is_empty() {
            return Err(anyhow!("descriptor must not be blank"));
        }
        let mut components = Path::new(&self.descriptor).components();
        let bare_name = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        );
        if !bare_name {
            return Err(anyhow!(
                "descriptor must be a file name beside the launcher, got {:?}",
                self.descriptor
            ));
        }
        if self.timeout_secs == Some(0) {
            return Err(anyhow!("timeout_secs must be > 0"));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `LauncherConfig::default()`.
pub fn load_config(path: &Path) -> Result<LauncherConfig> {
    if !path.exists() {
        return Ok(LauncherConfig::default());
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: LauncherConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("validate {}", path.display()))?;
    Ok(cfg)
}

/// Like [`load_config`], but a broken file falls back to defaults with a warning.
pub fn load_config_or_default(path: &Path) -> LauncherConfig {
    match load_config(path) {
        Ok(cfg) => {
            debug!(path = %path.display(), ?cfg, "config loaded");
            cfg
        }
        Err(err) => {
            warn!(path = %path.display(), err = %format!("{err:#}"), "ignoring invalid config");
            LauncherConfig::default()
        }
    }
}
