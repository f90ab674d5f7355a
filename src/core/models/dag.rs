//! Directed graph of skill dependencies

use super::node::SkillNode;
use std::collections::{HashMap, HashSet, VecDeque};

/// Directed graph of skills, edges pointing from prerequisite to dependent
///
/// Keeps two association lists:
/// - `dependencies`: maps each skill to its prerequisites
/// - `dependents`: maps each skill to the skills that depend on it (reverse graph)
///
/// `skills` keeps insertion order so every traversal and export is deterministic.
/// Acyclicity is not enforced here; the reducer checks it when it needs it.
#[derive(Debug, Clone, Default)]
pub struct SkillGraph {
    /// Maps skill name -> node with presentation attributes
    pub nodes: HashMap<String, SkillNode>,

    /// Maps skill name -> list of prerequisite names
    pub dependencies: HashMap<String, Vec<String>>,

    /// Maps skill name -> list of skills that depend on it
    pub dependents: HashMap<String, Vec<String>>,

    /// All skill names in insertion order
    pub skills: Vec<String>,
}

impl SkillGraph {
    /// Create a new empty graph
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node, replacing the attributes of an existing node with the same name
    pub fn add_node(&mut self, node: SkillNode) {
        let name = node.name().to_string();
        if !self.nodes.contains_key(&name) {
            self.skills.push(name.clone());
            self.dependencies.entry(name.clone()).or_default();
            self.dependents.entry(name.clone()).or_default();
        }
        self.nodes.insert(name, node);
    }

    /// Add a dependency edge `prerequisite -> skill`
    ///
    /// Both endpoints must already be nodes; returns `false` (and adds nothing)
    /// otherwise. Duplicate edges are ignored.
    pub fn add_dependency(&mut self, skill: &str, prerequisite: &str) -> bool {
        if !self.contains_skill(skill) || !self.contains_skill(prerequisite) {
            return false;
        }

        if let Some(deps) = self.dependencies.get_mut(skill) {
            if !deps.iter().any(|d| d == prerequisite) {
                deps.push(prerequisite.to_string());
            }
        }

        if let Some(deps) = self.dependents.get_mut(prerequisite) {
            if !deps.iter().any(|d| d == skill) {
                deps.push(skill.to_string());
            }
        }

        true
    }

    /// Get a node by name
    #[must_use]
    pub fn node(&self, name: &str) -> Option<&SkillNode> {
        self.nodes.get(name)
    }

    /// Nodes in insertion order
    pub fn nodes_in_order(&self) -> impl Iterator<Item = &SkillNode> {
        self.skills.iter().filter_map(|name| self.nodes.get(name))
    }

    /// Get all prerequisites of a skill
    #[must_use]
    pub fn get_prerequisites(&self, name: &str) -> Option<&Vec<String>> {
        self.dependencies.get(name)
    }

    /// Get all skills that depend on a given skill
    #[must_use]
    pub fn get_dependents(&self, name: &str) -> Option<&Vec<String>> {
        self.dependents.get(name)
    }

    /// All edges as `(prerequisite, dependent)` pairs, ordered by dependent then declaration
    #[must_use]
    pub fn edges(&self) -> Vec<(&str, &str)> {
        let dependencies = &self.dependencies;
        self.skills
            .iter()
            .flat_map(move |skill| {
                dependencies
                    .get(skill)
                    .into_iter()
                    .flatten()
                    .map(move |prereq| (prereq.as_str(), skill.as_str()))
            })
            .collect()
    }

    /// Whether the edge `prerequisite -> skill` exists
    #[must_use]
    pub fn has_edge(&self, prerequisite: &str, skill: &str) -> bool {
        self.dependencies
            .get(skill)
            .is_some_and(|deps| deps.iter().any(|d| d == prerequisite))
    }

    /// Get the number of skills in the graph
    #[must_use]
    pub fn skill_count(&self) -> usize {
        self.skills.len()
    }

    /// Get the number of dependency edges
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.dependencies.values().map(Vec::len).sum()
    }

    /// Check if a skill exists in the graph
    #[must_use]
    pub fn contains_skill(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    /// Whether `to` can be reached from `from` along one or more edges
    #[must_use]
    pub fn reaches(&self, from: &str, to: &str) -> bool {
        let mut visited: HashSet<&str> = HashSet::new();
        let mut queue: VecDeque<&str> = VecDeque::new();
        queue.push_back(from);

        while let Some(current) = queue.pop_front() {
            for next in self.dependents.get(current).into_iter().flatten() {
                if next == to {
                    return true;
                }
                if visited.insert(next.as_str()) {
                    queue.push_back(next);
                }
            }
        }

        false
    }

    /// Completion value of every skill, in insertion order
    #[must_use]
    pub fn completion_values(&self) -> Vec<f64> {
        self.nodes_in_order().map(|n| n.skill.completion).collect()
    }

    /// Copy of this graph with the same nodes and only the edges accepted by `keep`
    #[must_use]
    pub fn with_edges_filtered<F>(&self, mut keep: F) -> Self
    where
        F: FnMut(&str, &str) -> bool,
    {
        let mut filtered = Self::new();
        for node in self.nodes_in_order() {
            filtered.add_node(node.clone());
        }
        for (prereq, skill) in self.edges() {
            if keep(prereq, skill) {
                filtered.add_dependency(skill, prereq);
            }
        }
        filtered
    }
}

impl std::fmt::Display for SkillGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Skill graph ({} skills, {} dependencies):",
            self.skill_count(),
            self.edge_count()
        )?;
        writeln!(f)?;

        let mut sorted = self.skills.clone();
        sorted.sort();

        for name in sorted {
            let completion = self
                .node(&name)
                .map_or_else(String::new, |n| n.skill.completion_label());
            match self.dependencies.get(&name) {
                Some(deps) if !deps.is_empty() => {
                    writeln!(f, "  {name} [{completion}] ← {}", deps.join(", "))?;
                }
                _ => writeln!(f, "  {name} [{completion}] ← (no prerequisites)")?,
            }
        }

        Ok(())
    }
}
