//! `pgup`: start the RNA-seq metadata PostgreSQL container.
//!
//! Runs `docker compose -f <dir>/docker-compose.yml up -d --build`, where
//! `<dir>` is the directory holding this executable, then prints
//! `PostgreSQL database setup complete.` and exits `0`.

use std::ffi::OsString;

use clap::Parser;
use pgup::exit_codes;
use pgup::io::orchestrator::ComposeOrchestrator;
use pgup::launch::launch_from_current_exe;
use pgup::logging;
use tracing::debug;

/// The launcher recognizes no arguments; anything passed is collected and dropped.
#[derive(Parser, Debug, Default)]
#[command(
    name = "pgup",
    about = "Start the RNA-seq metadata PostgreSQL container",
    disable_help_flag = true,
    disable_version_flag = true
)]
struct Cli {
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, hide = true)]
    ignored: Vec<OsString>,
}

fn main() {
    logging::init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            debug!(err = %err, "argument parsing failed, ignoring arguments");
            Cli::default()
        }
    };
    if !cli.ignored.is_empty() {
        debug!(count = cli.ignored.len(), "ignoring command-line arguments");
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if let Err(err) = launch_from_current_exe(&ComposeOrchestrator, &mut out) {
        eprintln!("{:#}", err);
    }
    std::process::exit(exit_codes::OK);
}
