//! Builds the styled skill graph from validated skills

use crate::core::color::{color_of, ColorScheme};
use crate::core::loader::SkillSet;
use crate::core::models::{SkillGraph, SkillNode};
use crate::debug;

/// Build the dependency graph
///
/// One node per skill, colored by completion, and one edge `prerequisite -> skill`
/// per `depends_on` entry. References are expected to be validated by the
/// loader; any that are not are skipped.
#[must_use]
pub fn build_graph(skills: &SkillSet, scheme: ColorScheme) -> SkillGraph {
    let mut graph = SkillGraph::new();

    for skill in skills.values() {
        let color = color_of(skill.completion, scheme);
        debug!("Node '{}' colored {color}", skill.name);
        graph.add_node(SkillNode::new(skill.clone(), color));
    }

    for skill in skills.values() {
        for prereq in &skill.depends_on {
            if !graph.add_dependency(&skill.name, prereq) {
                debug!(
                    "Skipping edge {prereq} -> {}: unknown prerequisite",
                    skill.name
                );
            }
        }
    }

    graph
}
