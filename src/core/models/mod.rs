//! Data models for `SkillGraph`

pub mod dag;
pub mod node;
pub mod skill;

pub use dag::SkillGraph;
pub use node::{Link, SkillNode, Tooltip};
pub use skill::{Resource, Skill};
