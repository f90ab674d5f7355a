//! CLI command handlers for `SkillGraph`.
//!
//! Each subcommand is implemented in its own submodule. `render` and `check`
//! return the process exit code.

pub mod check;
pub mod config;
pub mod render;

use skill_graph::core::error::Error;
use skill_graph::error;

/// Log a pipeline failure and print it for the user; returns the exit code
pub fn report_failure(context: &str, err: &Error) -> i32 {
    error!("{context}: {err}");
    eprintln!("✗ {context}: {err}");
    1
}
