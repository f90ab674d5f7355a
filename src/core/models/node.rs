//! Graph node: a skill plus its presentation attributes

use super::skill::{Resource, Skill};
use crate::core::color::Color;
use serde::Serialize;
use std::fmt::Write;

/// Shape used for every node
pub const NODE_SHAPE: &str = "dot";

/// Size used for every node
pub const NODE_SIZE: u32 = 15;

/// A labelled link in a tooltip
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    /// Text shown to the user
    pub label: String,
    /// Target, when the resource has one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl From<&Resource> for Link {
    fn from(resource: &Resource) -> Self {
        Self {
            label: resource.name.clone(),
            url: resource.url.clone(),
        }
    }
}

/// Structured tooltip for a skill
///
/// Carries data only; renderers decide how it looks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltip {
    /// Skill name
    pub name: String,
    /// Raw completion value
    pub completion: f64,
    /// Completion formatted for display (e.g. `75%`)
    pub completion_label: String,
    /// Mandatory resources
    pub mandatory: Vec<Link>,
    /// Optional resources
    pub optional: Vec<Link>,
}

impl Tooltip {
    /// Build the tooltip for a skill
    #[must_use]
    pub fn for_skill(skill: &Skill) -> Self {
        Self {
            name: skill.name.clone(),
            completion: skill.completion,
            completion_label: skill.completion_label(),
            mandatory: skill.mandatory_resources.iter().map(Link::from).collect(),
            optional: skill.optional_resources.iter().map(Link::from).collect(),
        }
    }

    /// Plain-text rendering, used for the hover title
    #[must_use]
    pub fn plain_text(&self) -> String {
        let mut text = String::new();
        let _ = writeln!(text, "{}", self.name);
        let _ = writeln!(text, "Completion: {}", self.completion_label);
        let _ = writeln!(text, "Mandatory: {}", Self::labels(&self.mandatory));
        let _ = write!(text, "Optional: {}", Self::labels(&self.optional));
        text
    }

    fn labels(links: &[Link]) -> String {
        if links.is_empty() {
            "None".to_string()
        } else {
            links
                .iter()
                .map(|l| l.label.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        }
    }
}

/// A node of the skill graph
#[derive(Debug, Clone, PartialEq)]
pub struct SkillNode {
    /// Underlying skill record
    pub skill: Skill,
    /// Fill color derived from completion
    pub color: Color,
    /// Structured tooltip payload
    pub tooltip: Tooltip,
    /// Node shape
    pub shape: &'static str,
    /// Node size
    pub size: u32,
}

impl SkillNode {
    /// Wrap a skill with its computed color
    #[must_use]
    pub fn new(skill: Skill, color: Color) -> Self {
        let tooltip = Tooltip::for_skill(&skill);
        Self {
            skill,
            color,
            tooltip,
            shape: NODE_SHAPE,
            size: NODE_SIZE,
        }
    }

    /// Node key
    #[must_use]
    pub fn name(&self) -> &str {
        &self.skill.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::color::RED;

    fn sample_skill() -> Skill {
        let mut skill = Skill::new("Traits".to_string(), 60.0);
        skill.mandatory_resources.push(Resource::new(
            "Book ch. 10".to_string(),
            Some("https://doc.rust-lang.org/book/ch10-02-traits.html".to_string()),
        ));
        skill
    }

    #[test]
    fn test_tooltip_fields() {
        let tooltip = Tooltip::for_skill(&sample_skill());

        assert_eq!(tooltip.name, "Traits");
        assert_eq!(tooltip.completion_label, "60%");
        assert_eq!(tooltip.mandatory.len(), 1);
        assert_eq!(tooltip.mandatory[0].label, "Book ch. 10");
        assert!(tooltip.mandatory[0].url.is_some());
        assert!(tooltip.optional.is_empty());
    }

    #[test]
    fn test_plain_text_uses_none_marker() {
        let text = Tooltip::for_skill(&sample_skill()).plain_text();

        assert!(text.starts_with("Traits\n"));
        assert!(text.contains("Completion: 60%"));
        assert!(text.contains("Mandatory: Book ch. 10"));
        assert!(text.ends_with("Optional: None"));
    }

    #[test]
    fn test_node_constants() {
        let node = SkillNode::new(sample_skill(), RED);

        assert_eq!(node.name(), "Traits");
        assert_eq!(node.shape, "dot");
        assert_eq!(node.size, 15);
        assert_eq!(node.color, RED);
    }
}
