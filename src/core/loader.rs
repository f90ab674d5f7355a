//! JSON loader for skill data
//!
//! The input is an object keyed by skill name:
//!
//! ```json
//! {
//!   "Ownership": {
//!     "completion": 40,
//!     "depends_on": ["Syntax"],
//!     "mandatory_resources": [
//!       {"name": "The Book", "url": "https://doc.rust-lang.org/book/"}
//!     ],
//!     "optional_resources": ["Rustlings"]
//!   }
//! }
//! ```
//!
//! Every field is optional. Resources may be given as `{"name", "url"}` objects
//! or as bare strings (a name without a link).

use crate::core::error::{DataError, Error, Result};
use crate::core::models::{Resource, Skill};
use crate::{debug, info};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Validated skills keyed by name (sorted, so output order is stable)
pub type SkillSet = BTreeMap<String, Skill>;

/// One skill as written in the input file
#[derive(Debug, Deserialize)]
struct SkillEntry {
    #[serde(default)]
    completion: Option<f64>,
    #[serde(default)]
    depends_on: Vec<String>,
    #[serde(default)]
    mandatory_resources: Vec<ResourceEntry>,
    #[serde(default)]
    optional_resources: Vec<ResourceEntry>,
}

/// A resource reference, either a plain name or a name with a link
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ResourceEntry {
    Named(String),
    Linked {
        name: String,
        #[serde(default)]
        url: Option<String>,
    },
}

impl From<ResourceEntry> for Resource {
    fn from(entry: ResourceEntry) -> Self {
        match entry {
            ResourceEntry::Named(name) => Self::unlinked(name),
            ResourceEntry::Linked { name, url } => Self::new(name, url),
        }
    }
}

/// Load and validate a skill file
///
/// # Arguments
/// * `path` - Path to the JSON document
///
/// # Errors
/// Returns `Error::Io` if the file cannot be read and `Error::Data` if its
/// content is malformed or inconsistent (see [`parse_skills`]).
pub fn load_skills<P: AsRef<Path>>(path: P) -> Result<SkillSet> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let skills = parse_skills(&content)?;
    info!("Loaded {} skills from {}", skills.len(), path.display());
    Ok(skills)
}

/// Parse and validate skill data from a JSON string
///
/// # Errors
/// - `DataError::Malformed` if the JSON is invalid or not shaped like a skill map
/// - `DataError::Empty` if no skills are defined
/// - `DataError::CompletionOutOfRange` if a completion is outside `[0, 100]`
/// - `DataError::UnknownDependency` if `depends_on` names a missing skill
pub fn parse_skills(json: &str) -> Result<SkillSet> {
    let entries: BTreeMap<String, SkillEntry> =
        serde_json::from_str(json).map_err(DataError::from)?;

    if entries.is_empty() {
        return Err(DataError::Empty.into());
    }

    let mut skills = SkillSet::new();
    for (name, entry) in entries {
        let skill = convert_entry(name, entry)?;
        debug!(
            "Skill '{}': {} complete, {} prerequisites",
            skill.name,
            skill.completion_label(),
            skill.depends_on.len()
        );
        skills.insert(skill.name.clone(), skill);
    }

    validate_dependencies(&skills)?;
    Ok(skills)
}

fn convert_entry(name: String, entry: SkillEntry) -> Result<Skill> {
    let completion = entry.completion.unwrap_or(0.0);
    if !(0.0..=100.0).contains(&completion) {
        return Err(DataError::CompletionOutOfRange {
            skill: name,
            value: completion,
        }
        .into());
    }

    let mut skill = Skill::new(name, completion);
    for dep in entry.depends_on {
        skill.add_dependency(dep);
    }
    skill.mandatory_resources = entry
        .mandatory_resources
        .into_iter()
        .map(Resource::from)
        .collect();
    skill.optional_resources = entry
        .optional_resources
        .into_iter()
        .map(Resource::from)
        .collect();

    Ok(skill)
}

/// Check that every `depends_on` entry names a skill in the set
///
/// # Errors
/// Returns the first unknown reference, in skill name order.
pub fn validate_dependencies(skills: &SkillSet) -> Result<()> {
    for skill in skills.values() {
        if let Some(missing) = skill
            .depends_on
            .iter()
            .find(|dep| !skills.contains_key(dep.as_str()))
        {
            return Err(DataError::UnknownDependency {
                skill: skill.name.clone(),
                dependency: missing.clone(),
            }
            .into());
        }
    }
    Ok(())
}

/// Arithmetic mean of all completion values, 0 for an empty set
#[must_use]
pub fn mean_completion(skills: &SkillSet) -> f64 {
    let values: Vec<f64> = skills.values().map(|s| s.completion).collect();
    crate::core::report::global_completion(&values)
}
