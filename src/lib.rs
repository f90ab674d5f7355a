//! Shared library for `SkillGraph`
//! Loads a skill dictionary, builds the dependency graph and renders it as an
//! interactive HTML page. The CLI in `src/cli` is a thin layer over this crate.

pub mod core;
pub mod logger;

pub use core::{config, get_version};
