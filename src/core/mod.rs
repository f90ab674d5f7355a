//! Core module: the skill graph pipeline and its configuration

pub mod builder;
pub mod color;
pub mod config;
pub mod error;
pub mod loader;
pub mod models;
pub mod pipeline;
pub mod reduce;
pub mod report;

/// Returns the current version of the `SkillGraph` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
