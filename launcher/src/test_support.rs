//! Test-only helpers: a scripted orchestrator and scratch launcher directories.

use std::cell::RefCell;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use tempfile::TempDir;

use crate::core::outcome::LaunchOutcome;
use crate::io::config::LauncherConfig;
use crate::io::orchestrator::{Orchestrator, UpRequest};
use crate::io::paths::{DESCRIPTOR_FILE, LauncherPaths};

/// Minimal descriptor used by fixtures. Never handed to a real tool.
pub const FIXTURE_DESCRIPTOR: &str = "services:\n  mydb:\n    image: postgres:16\n";

/// Orchestrator that records every request and answers with a fixed result.
pub struct ScriptedOrchestrator {
    response: Result<LaunchOutcome, String>,
    requests: RefCell<Vec<UpRequest>>,
}

impl ScriptedOrchestrator {
    pub fn returning(outcome: LaunchOutcome) -> Self {
        Self {
            response: Ok(outcome),
            requests: RefCell::new(Vec::new()),
        }
    }

    /// Behave like a tool that cannot be spawned.
    pub fn failing(message: &str) -> Self {
        Self {
            response: Err(message.to_string()),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<UpRequest> {
        self.requests.borrow().clone()
    }
}

impl Orchestrator for ScriptedOrchestrator {
    fn up(&self, request: &UpRequest) -> Result<LaunchOutcome> {
        self.requests.borrow_mut().push(request.clone());
        match &self.response {
            Ok(outcome) => Ok(outcome.clone()),
            Err(message) => Err(anyhow!("{message}")).context("spawn command"),
        }
    }
}

/// A temporary directory standing in for the launcher's install location.
pub struct TempLauncherDir {
    dir: TempDir,
}

impl TempLauncherDir {
    pub fn without_descriptor() -> Result<Self> {
        let dir = tempfile::tempdir().context("create tempdir")?;
        Ok(Self { dir })
    }

    pub fn with_descriptor() -> Result<Self> {
        let launcher = Self::without_descriptor()?;
        launcher.write_descriptor(DESCRIPTOR_FILE)?;
        Ok(launcher)
    }

    /// Create the directory under `base` instead of the system temp dir.
    pub fn new_in(base: &Path, with_descriptor: bool) -> Result<Self> {
        fs::create_dir_all(base).with_context(|| format!("create {}", base.display()))?;
        let dir = tempfile::tempdir_in(base)
            .with_context(|| format!("create tempdir in {}", base.display()))?;
        let launcher = Self { dir };
        if with_descriptor {
            launcher.write_descriptor(DESCRIPTOR_FILE)?;
        }
        Ok(launcher)
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn paths(&self) -> LauncherPaths {
        LauncherPaths::new(self.dir.path())
    }

    pub fn write_descriptor(&self, file_name: &str) -> Result<()> {
        let path = self.dir.path().join(file_name);
        fs::write(&path, FIXTURE_DESCRIPTOR).with_context(|| format!("write {}", path.display()))
    }

    /// Write `pgup.toml` beside the launcher.
    pub fn write_config(&self, config: &LauncherConfig) -> Result<()> {
        let paths = self.paths();
        let mut buf = toml::to_string_pretty(config).context("serialize config toml")?;
        buf.push('\n');
        fs::write(&paths.config_path, buf)
            .with_context(|| format!("write {}", paths.config_path.display()))
    }
}
