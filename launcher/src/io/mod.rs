//! I/O helpers for the launcher.

pub mod config;
pub mod orchestrator;
pub mod paths;
pub mod process;
