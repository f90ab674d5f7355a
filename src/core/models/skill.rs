//! Skill model

use serde::{Deserialize, Serialize};

/// A learning resource attached to a skill
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Display name (e.g., "The Rust Book")
    pub name: String,

    /// Link target, if the resource has a usable one
    pub url: Option<String>,
}

impl Resource {
    /// Create a resource, keeping the link only when it is safe to put in an `href`.
    ///
    /// Accepted: `http`, `https`, `mailto` and relative links. Anything else
    /// (`javascript:`, `data:`, ...) is dropped and the resource renders as a plain label.
    #[must_use]
    pub fn new(name: String, url: Option<String>) -> Self {
        let url = url
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty() && is_safe_link(u));
        Self { name, url }
    }

    /// A resource with a name only
    #[must_use]
    pub const fn unlinked(name: String) -> Self {
        Self { name, url: None }
    }
}

fn is_safe_link(url: &str) -> bool {
    match url.split_once(':') {
        // A colon after the first '/', '?' or '#' is part of a relative path, not a scheme
        Some((scheme, _)) if !scheme.contains(['/', '?', '#']) => {
            matches!(
                scheme.to_ascii_lowercase().as_str(),
                "http" | "https" | "mailto"
            )
        }
        _ => true,
    }
}

/// Represents one skill in the dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    /// Unique skill name, also the graph node key
    pub name: String,

    /// Completion percentage in `[0, 100]`
    pub completion: f64,

    /// Prerequisite skill names, without duplicates, in declaration order
    pub depends_on: Vec<String>,

    /// Resources that must be worked through
    pub mandatory_resources: Vec<Resource>,

    /// Additional reading
    pub optional_resources: Vec<Resource>,
}

impl Skill {
    /// Create a skill with no dependencies and no resources
    #[must_use]
    pub const fn new(name: String, completion: f64) -> Self {
        Self {
            name,
            completion,
            depends_on: Vec::new(),
            mandatory_resources: Vec::new(),
            optional_resources: Vec::new(),
        }
    }

    /// Add a prerequisite by skill name
    pub fn add_dependency(&mut self, name: String) {
        if !self.depends_on.contains(&name) {
            self.depends_on.push(name);
        }
    }

    /// Completion formatted for display, e.g. `75%` or `37.5%`
    #[must_use]
    pub fn completion_label(&self) -> String {
        format_percent(self.completion)
    }
}

/// Format a percentage without a trailing `.0` for whole numbers
#[must_use]
pub fn format_percent(value: f64) -> String {
    if value.fract().abs() < f64::EPSILON {
        format!("{value:.0}%")
    } else {
        let trimmed = format!("{value:.2}");
        let trimmed = trimmed.trim_end_matches('0').trim_end_matches('.');
        format!("{trimmed}%")
    }
}
