//! Argv construction for the delegated `compose up` call.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

/// Arguments that follow `-f <descriptor>`: start detached, rebuild images first.
pub const UP_ARGS: [&str; 3] = ["up", "-d", "--build"];

/// Fully-resolved command line for the orchestration tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeInvocation {
    /// Executable looked up on `PATH` (e.g. `docker`).
    pub program: String,
    /// Everything after the program, in order.
    pub args: Vec<OsString>,
    /// Descriptor handed to `-f`.
    pub descriptor_path: PathBuf,
}

impl ComposeInvocation {
    /// Render the command line for log output. Lossy for non-UTF-8 paths.
    pub fn display_line(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(&arg.to_string_lossy());
        }
        line
    }
}

/// Build `<command...> -f <descriptor_path> up -d --build`.
///
/// `command` is the tool prefix, `["docker", "compose"]` by default. Extra
/// prefix words (e.g. `["podman", "compose"]` or a wrapper script) are kept
/// in order between the program and `-f`.
pub fn build_invocation(command: &[String], descriptor_path: &Path) -> Result<ComposeInvocation> {
    let Some((program, prefix)) = command.split_first() else {
        bail!("orchestration command must not be empty");
    };
    if program.trim().is_empty() {
        bail!("orchestration program must not be blank");
    }

    let mut args: Vec<OsString> = prefix.iter().map(OsString::from).collect();
    args.push(OsString::from("-f"));
    args.push(descriptor_path.as_os_str().to_os_string());
    args.extend(UP_ARGS.iter().map(OsString::from));

    Ok(ComposeInvocation {
        program: program.clone(),
        args,
        descriptor_path: descriptor_path.to_path_buf(),
    })
}
