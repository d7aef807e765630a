//! Classification of what happened to the delegated call.

use std::fmt;
use std::process::ExitStatus;

/// Result of handing the descriptor to the orchestration tool.
///
/// None of these variants change the launcher's exit code or its completion
/// line; they only decide how loudly the launcher logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchOutcome {
    /// The tool ran to completion with this exit code.
    Exited(i32),
    /// The tool was terminated by a signal.
    Signalled,
    /// The tool exceeded the configured timeout and was killed.
    TimedOut,
    /// The tool was started but its exit status could not be collected.
    StatusUnknown(String),
    /// The tool could not be started (typically not on `PATH`).
    SpawnFailed(String),
    /// Delegation never happened (launcher directory or argv unavailable).
    Skipped(String),
}

impl LaunchOutcome {
    pub fn from_status(status: ExitStatus) -> Self {
        match status.code() {
            Some(code) => Self::Exited(code),
            None => Self::Signalled,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Exited(0))
    }
}

impl fmt::Display for LaunchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exited(code) => write!(f, "exited with code {code}"),
            Self::Signalled => f.write_str("terminated by signal"),
            Self::TimedOut => f.write_str("timed out"),
            Self::StatusUnknown(reason) => write!(f, "started, status unknown: {reason}"),
            Self::SpawnFailed(reason) => write!(f, "failed to start: {reason}"),
            Self::Skipped(reason) => write!(f, "skipped: {reason}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_zero_exit_is_success() {
        assert!(LaunchOutcome::Exited(0).is_success());
        assert!(!LaunchOutcome::Exited(1).is_success());
        assert!(!LaunchOutcome::Signalled.is_success());
        assert!(!LaunchOutcome::TimedOut.is_success());
        assert!(!LaunchOutcome::StatusUnknown("wait failed".to_string()).is_success());
        assert!(!LaunchOutcome::SpawnFailed("not found".to_string()).is_success());
        assert!(!LaunchOutcome::Skipped("no dir".to_string()).is_success());
    }

    #[cfg(unix)]
    #[test]
    fn from_status_maps_code_and_signal() {
        use std::os::unix::process::ExitStatusExt;

        assert_eq!(
            LaunchOutcome::from_status(ExitStatus::from_raw(0)),
            LaunchOutcome::Exited(0)
        );
        // Raw wait status: exit code lives in the high byte.
        assert_eq!(
            LaunchOutcome::from_status(ExitStatus::from_raw(3 << 8)),
            LaunchOutcome::Exited(3)
        );
        // SIGKILL
        assert_eq!(
            LaunchOutcome::from_status(ExitStatus::from_raw(9)),
            LaunchOutcome::Signalled
        );
    }

    #[test]
    fn display_names_the_failure() {
        assert_eq!(LaunchOutcome::Exited(2).to_string(), "exited with code 2");
        assert_eq!(
            LaunchOutcome::SpawnFailed("No such file".to_string()).to_string(),
            "failed to start: No such file"
        );
    }
}
