//! Running a child process with inherited stdio and an optional timeout.

use std::io;
use std::process::{Command, ExitStatus, Stdio};
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{debug, error, instrument, warn};
use wait_timeout::ChildExt;

/// How a spawned child ended, as far as the launcher could observe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandStatus {
    Finished(ExitStatus),
    /// Killed after the deadline and reaped.
    TimedOut,
    /// The child was started, but waiting on it (or killing it) failed.
    Unknown(String),
}

/// Run `cmd` with stdin, stdout and stderr inherited from the launcher.
///
/// Blocks until the child exits. With `Some(timeout)` the child is killed
/// once the deadline passes. Only a spawn failure is an `Err`; once the child
/// is running every later failure becomes [`CommandStatus::Unknown`].
#[instrument(skip_all, fields(timeout_secs = timeout.map(|t| t.as_secs())))]
pub fn run_command_inherited(mut cmd: Command, timeout: Option<Duration>) -> Result<CommandStatus> {
    cmd.stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());

    debug!("spawning child process");
    let mut child = match cmd.spawn() {
        Ok(c) => c,
        Err(e) => {
            error!(err = %e, "failed to spawn command");
            return Err(e).context("spawn command");
        }
    };

    let status = match timeout {
        None => settle_wait(child.wait()),
        Some(timeout) => match child.wait_timeout(timeout) {
            Ok(Some(status)) => CommandStatus::Finished(status),
            Ok(None) => {
                warn!(
                    timeout_secs = timeout.as_secs(),
                    "command timed out, killing"
                );
                let kill = child.kill();
                settle_after_timeout(kill, || child.wait())
            }
            Err(e) => settle_wait(Err(e)),
        },
    };

    debug!(?status, "command finished");
    Ok(status)
}

fn settle_wait(result: io::Result<ExitStatus>) -> CommandStatus {
    match result {
        Ok(status) => CommandStatus::Finished(status),
        Err(e) => {
            error!(err = %e, "failed to wait for command");
            CommandStatus::Unknown(format!("wait for command: {e}"))
        }
    }
}

/// Reap a child that overran its deadline. The wait runs even if the kill failed.
fn settle_after_timeout(
    kill: io::Result<()>,
    wait: impl FnOnce() -> io::Result<ExitStatus>,
) -> CommandStatus {
    if let Err(e) = &kill {
        warn!(err = %e, "failed to kill timed out command");
    }
    match (kill, wait()) {
        (Ok(()), Ok(_)) => CommandStatus::TimedOut,
        // The kill did not land, so whatever the wait saw is the child's own exit.
        (Err(_), Ok(status)) => CommandStatus::Finished(status),
        (Ok(()), Err(e)) => {
            error!(err = %e, "failed to wait for killed command");
            CommandStatus::Unknown(format!("wait command after kill: {e}"))
        }
        (Err(kill_err), Err(wait_err)) => {
            error!(err = %wait_err, "failed to wait for command after failed kill");
            CommandStatus::Unknown(format!(
                "kill command: {kill_err}; wait command: {wait_err}"
            ))
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use std::os::unix::process::ExitStatusExt;

    use super::*;

    fn sh(script: &str) -> Command {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(script);
        cmd
    }

    fn exited(code: i32) -> ExitStatus {
        ExitStatus::from_raw(code << 8)
    }

    #[test]
    fn reports_exit_code_without_timeout() {
        let result = run_command_inherited(sh("exit 7"), None).expect("run");
        assert_eq!(result, CommandStatus::Finished(exited(7)));
    }

    #[test]
    fn finishes_before_timeout() {
        let result =
            run_command_inherited(sh("exit 0"), Some(Duration::from_secs(30))).expect("run");
        assert_eq!(result, CommandStatus::Finished(exited(0)));
    }

    #[test]
    fn kills_child_after_timeout() {
        let result =
            run_command_inherited(sh("sleep 30"), Some(Duration::from_millis(100))).expect("run");
        assert_eq!(result, CommandStatus::TimedOut);
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let cmd = Command::new("pgup-test-no-such-program");
        let err = run_command_inherited(cmd, None).expect_err("spawn should fail");
        assert!(format!("{err:#}").contains("spawn command"));
    }

    #[test]
    fn wait_failure_after_spawn_is_unknown_status() {
        let status = settle_wait(Err(io::Error::other("interrupted")));
        match status {
            CommandStatus::Unknown(reason) => assert!(reason.contains("interrupted")),
            other => panic!("unexpected status {other:?}"),
        }
    }

    #[test]
    fn killed_and_reaped_child_is_timed_out() {
        let status = settle_after_timeout(Ok(()), || Ok(ExitStatus::from_raw(9)));
        assert_eq!(status, CommandStatus::TimedOut);
    }

    #[test]
    fn failed_kill_still_waits_for_child() {
        let mut waited = false;
        let status = settle_after_timeout(Err(io::Error::other("EPERM")), || {
            waited = true;
            Ok(exited(0))
        });
        assert!(waited);
        assert_eq!(status, CommandStatus::Finished(exited(0)));
    }

    #[test]
    fn failed_kill_and_wait_is_unknown_status() {
        let status = settle_after_timeout(Err(io::Error::other("EPERM")), || {
            Err(io::Error::other("ECHILD"))
        });
        match status {
            CommandStatus::Unknown(reason) => {
                assert!(reason.contains("EPERM"));
                assert!(reason.contains("ECHILD"));
            }
            other => panic!("unexpected status {other:?}"),
        }
    }

    #[test]
    fn failed_wait_after_kill_is_unknown_status() {
        let status = settle_after_timeout(Ok(()), || Err(io::Error::other("ECHILD")));
        assert!(matches!(status, CommandStatus::Unknown(_)));
    }
}
