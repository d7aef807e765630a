//! Launcher for the single-cell RNA-seq metadata PostgreSQL container.
//!
//! `pgup` finds the `docker-compose.yml` that sits next to its own executable
//! and hands it to `docker compose up -d --build`. Whatever the delegated
//! tool does, the launcher prints its completion line and exits `0`; the
//! outcome of the delegated call is reported through `tracing` only.
//!
//! - **[`core`]**: Pure argv construction and outcome classification.
//! - **[`io`]**: Executable location, config file, process spawning.
//!
//! [`launch`] ties the two together for the binary.

pub mod core;
pub mod exit_codes;
pub mod io;
pub mod launch;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
