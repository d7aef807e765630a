//! Orchestrator abstraction for the delegated `compose up` call.
//!
//! The [`Orchestrator`] trait separates the launch sequence from the actual
//! container tool. Tests use scripted orchestrators that record requests
//! without spawning processes.

use std::process::Command;
use std::time::Duration;

use anyhow::Result;
use tracing::{info, instrument};

use crate::core::invocation::ComposeInvocation;
use crate::core::outcome::LaunchOutcome;
use crate::io::process::{CommandStatus, run_command_inherited};

/// Parameters for one `compose up` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpRequest {
    pub invocation: ComposeInvocation,
    /// `None` waits until the tool exits on its own.
    pub timeout: Option<Duration>,
}

/// Abstraction over container orchestration backends.
pub trait Orchestrator {
    /// Bring the described services up. `Err` means the tool never started.
    fn up(&self, request: &UpRequest) -> Result<LaunchOutcome>;
}

/// Orchestrator that spawns the configured compose CLI.
pub struct ComposeOrchestrator;

impl Orchestrator for ComposeOrchestrator {
    #[instrument(skip_all, fields(program = %request.invocation.program))]
    fn up(&self, request: &UpRequest) -> Result<LaunchOutcome> {
        info!(command = %request.invocation.display_line(), "starting compose up");

        let mut cmd = Command::new(&request.invocation.program);
        cmd.args(&request.invocation.args);

        let status = run_command_inherited(cmd, request.timeout)?;
        Ok(outcome_from_status(status))
    }
}

/// Map how the child ended onto a launch outcome. Every input here describes
/// a tool that was started, so none of them becomes `SpawnFailed`.
pub fn outcome_from_status(status: CommandStatus) -> LaunchOutcome {
    match status {
        CommandStatus::Finished(status) => LaunchOutcome::from_status(status),
        CommandStatus::TimedOut => LaunchOutcome::TimedOut,
        CommandStatus::Unknown(reason) => LaunchOutcome::StatusUnknown(reason),
    }
}

#[cfg(all(test, unix))]
mod tests {
    use std::ffi::OsString;
    use std::path::PathBuf;

    use super::*;

    fn request(program: &str, args: &[&str]) -> UpRequest {
        UpRequest {
            invocation: ComposeInvocation {
                program: program.to_string(),
                args: args.iter().map(OsString::from).collect(),
                descriptor_path: PathBuf::from("/nonexistent/docker-compose.yml"),
            },
            timeout: None,
        }
    }

    #[test]
    fn passes_tool_exit_code_through() {
        let outcome = ComposeOrchestrator
            .up(&request("sh", &["-c", "exit 4"]))
            .expect("up");
        assert_eq!(outcome, LaunchOutcome::Exited(4));
    }

    #[test]
    fn timeout_is_reported() {
        let mut req = request("sh", &["-c", "sleep 30"]);
        req.timeout = Some(Duration::from_millis(100));
        let outcome = ComposeOrchestrator.up(&req).expect("up");
        assert_eq!(outcome, LaunchOutcome::TimedOut);
    }

    #[test]
    fn started_tool_is_never_classified_as_spawn_failure() {
        use std::os::unix::process::ExitStatusExt;
        use std::process::ExitStatus;

        assert_eq!(
            outcome_from_status(CommandStatus::Finished(ExitStatus::from_raw(2 << 8))),
            LaunchOutcome::Exited(2)
        );
        assert_eq!(
            outcome_from_status(CommandStatus::TimedOut),
            LaunchOutcome::TimedOut
        );
        assert_eq!(
            outcome_from_status(CommandStatus::Unknown("wait for command: EINTR".to_string())),
            LaunchOutcome::StatusUnknown("wait for command: EINTR".to_string())
        );
    }

    #[test]
    fn missing_tool_is_an_error() {
        let result = ComposeOrchestrator.up(&request("pgup-test-no-such-tool", &["compose"]));
        assert!(result.is_err());
    }
}
