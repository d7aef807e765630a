//! Location of the launcher and the files that sit beside it.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};

/// Orchestration descriptor expected next to the launcher.
pub const DESCRIPTOR_FILE: &str = "docker-compose.yml";
/// Optional launcher settings, also next to the launcher.
pub const CONFIG_FILE: &str = "pgup.toml";

/// All canonical paths derived from the launcher directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LauncherPaths {
    pub launcher_dir: PathBuf,
    pub config_path: PathBuf,
}

impl LauncherPaths {
    pub fn new(launcher_dir: impl Into<PathBuf>) -> Self {
        let launcher_dir = launcher_dir.into();
        Self {
            config_path: launcher_dir.join(CONFIG_FILE),
            launcher_dir,
        }
    }

    /// Path of the descriptor named `file_name` inside the launcher directory.
    pub fn descriptor_path(&self, file_name: &str) -> PathBuf {
        self.launcher_dir.join(file_name)
    }

    /// Resolve paths from the running executable's location.
    pub fn from_current_exe() -> Result<Self> {
        launcher_dir().map(Self::new)
    }
}

/// Absolute directory of the running executable, independent of the cwd.
///
/// Symlinks are resolved, so a symlinked launcher still finds the
/// descriptor next to the real binary.
pub fn launcher_dir() -> Result<PathBuf> {
    let exe = env::current_exe().context("resolve current executable")?;
    let exe = fs::canonicalize(&exe).with_context(|| format!("canonicalize {}", exe.display()))?;
    parent_dir(&exe)
}

fn parent_dir(exe: &Path) -> Result<PathBuf> {
    exe.parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .ok_or_else(|| anyhow!("executable {} has no parent directory", exe.display()))
}
