//! The launch sequence: delegate `compose up`, then print the completion line.
//!
//! The completion line is printed whatever the delegated tool did. Failures
//! are reported through `tracing` and in the returned [`LaunchReport`], never
//! through the exit code.

use std::io::Write;

use anyhow::{Context, Result};
use tracing::{debug, error, info, warn};

use crate::core::invocation::{ComposeInvocation, build_invocation};
use crate::core::outcome::LaunchOutcome;
use crate::io::config::{LauncherConfig, load_config_or_default};
use crate::io::orchestrator::{Orchestrator, UpRequest};
use crate::io::paths::LauncherPaths;

/// Always the last line the launcher writes to stdout.
pub const COMPLETION_MESSAGE: &str = "PostgreSQL database setup complete.";

/// What one launch did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchReport {
    /// `None` when delegation was skipped before an argv could be built.
    pub invocation: Option<ComposeInvocation>,
    pub outcome: LaunchOutcome,
}

/// Delegate to `orchestrator` using the descriptor beside `paths.launcher_dir`,
/// then write [`COMPLETION_MESSAGE`] to `out`.
///
/// Only a failure to write the completion line is returned as `Err`.
pub fn run_launch<O: Orchestrator, W: Write>(
    paths: &LauncherPaths,
    config: &LauncherConfig,
    orchestrator: &O,
    out: &mut W,
) -> Result<LaunchReport> {
    let descriptor_path = paths.descriptor_path(&config.descriptor);
    debug!(
        descriptor = %descriptor_path.display(),
        exists = descriptor_path.exists(),
        "resolved descriptor"
    );

    let report = match build_invocation(&config.command, &descriptor_path) {
        Ok(invocation) => {
            let request = UpRequest {
                invocation: invocation.clone(),
                timeout: config.timeout(),
            };
            let outcome = match orchestrator.up(&request) {
                Ok(outcome) => outcome,
                Err(err) => LaunchOutcome::SpawnFailed(format!("{err:#}")),
            };
            LaunchReport {
                invocation: Some(invocation),
                outcome,
            }
        }
        Err(err) => LaunchReport {
            invocation: None,
            outcome: LaunchOutcome::Skipped(format!("{err:#}")),
        },
    };

    log_outcome(&report.outcome);
    finish(out)?;
    Ok(report)
}

/// Resolve the launcher directory from the running executable, load the
/// optional config beside it, and run the launch sequence.
///
/// If the launcher directory cannot be determined the delegated call is
/// skipped, but the completion line is still written.
pub fn launch_from_current_exe<O: Orchestrator, W: Write>(
    orchestrator: &O,
    out: &mut W,
) -> Result<LaunchReport> {
    let paths = match LauncherPaths::from_current_exe() {
        Ok(paths) => paths,
        Err(err) => {
            let outcome = LaunchOutcome::Skipped(format!("{err:#}"));
            log_outcome(&outcome);
            finish(out)?;
            return Ok(LaunchReport {
                invocation: None,
                outcome,
            });
        }
    };
    debug!(launcher_dir = %paths.launcher_dir.display(), "resolved launcher directory");

    let config = load_config_or_default(&paths.config_path);
    run_launch(&paths, &config, orchestrator, out)
}

fn log_outcome(outcome: &LaunchOutcome) {
    if outcome.is_success() {
        info!("compose up finished");
        return;
    }
    match outcome {
        LaunchOutcome::Exited(_)
        | LaunchOutcome::Signalled
        | LaunchOutcome::TimedOut
        | LaunchOutcome::StatusUnknown(_) => {
            warn!(%outcome, "compose up did not succeed");
        }
        LaunchOutcome::SpawnFailed(_) | LaunchOutcome::Skipped(_) => {
            error!(%outcome, "compose up did not run");
        }
    }
}

fn finish<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "{COMPLETION_MESSAGE}").context("write completion message")?;
    out.flush().context("flush stdout")?;
    Ok(())
}
