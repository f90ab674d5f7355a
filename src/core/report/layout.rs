//! Force-directed layout parameters
//!
//! Positions are computed in the browser by the network library's
//! `forceAtlas2Based` solver; this module only decides how it is tuned and
//! serializes the options object it expects.

use serde::Serialize;
use serde_json::{json, Value};

/// Tuning for the `forceAtlas2Based` physics solver
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForceAtlasLayout {
    /// Repulsion between nodes (negative pushes apart)
    pub gravitational_constant: f64,
    /// Pull towards the center of the canvas
    pub central_gravity: f64,
    /// Rest length of edge springs
    pub spring_length: f64,
    /// Stiffness of edge springs
    pub spring_constant: f64,
    /// Velocity damping per step
    pub damping: f64,
    /// How strongly node bodies avoid overlapping, `[0, 1]`
    pub avoid_overlap: f64,
    /// Seed for the initial node placement; random when `None`
    #[serde(skip)]
    pub random_seed: Option<u64>,
}

impl Default for ForceAtlasLayout {
    fn default() -> Self {
        Self {
            gravitational_constant: -50.0,
            central_gravity: 0.01,
            spring_length: 100.0,
            spring_constant: 0.08,
            damping: 0.4,
            avoid_overlap: 0.0,
            random_seed: None,
        }
    }
}

impl ForceAtlasLayout {
    /// Use a fixed seed so repeated renders start from the same placement
    #[must_use]
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.random_seed = seed;
        self
    }

    /// Options object for `new vis.Network(container, data, options)`
    #[must_use]
    pub fn network_options(&self) -> Value {
        let mut options = json!({
            "nodes": {
                "font": { "color": "white" },
                "borderWidth": 1
            },
            "edges": {
                "arrows": { "to": { "enabled": true, "scaleFactor": 0.6 } },
                "color": { "inherit": true },
                "smooth": { "enabled": true, "type": "dynamic" }
            },
            "physics": {
                "enabled": true,
                "solver": "forceAtlas2Based",
                "forceAtlas2Based": self,
                "stabilization": { "enabled": true, "iterations": 1000 }
            },
            "interaction": { "hover": true, "tooltipDelay": 200 }
        });

        if let Some(seed) = self.random_seed {
            options["layout"] = json!({ "randomSeed": seed });
        }

        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_solver_settings() {
        let options = ForceAtlasLayout::default().network_options();
        let physics = &options["physics"];

        assert_eq!(physics["solver"], "forceAtlas2Based");
        assert_eq!(physics["forceAtlas2Based"]["gravitationalConstant"], -50.0);
        assert_eq!(physics["forceAtlas2Based"]["centralGravity"], 0.01);
        assert_eq!(physics["forceAtlas2Based"]["springLength"], 100.0);
        assert_eq!(physics["forceAtlas2Based"]["springConstant"], 0.08);
        assert_eq!(physics["forceAtlas2Based"]["damping"], 0.4);
        assert_eq!(physics["forceAtlas2Based"]["avoidOverlap"], 0.0);
        assert!(physics["forceAtlas2Based"].get("randomSeed").is_none());
    }

    #[test]
    fn test_edges_are_directed() {
        let options = ForceAtlasLayout::default().network_options();
        assert_eq!(options["edges"]["arrows"]["to"]["enabled"], true);
    }

    #[test]
    fn test_seed_sets_layout() {
        let options = ForceAtlasLayout::default().with_seed(Some(7)).network_options();
        assert_eq!(options["layout"]["randomSeed"], 7);

        let unseeded = ForceAtlasLayout::default().network_options();
        assert!(unseeded.get("layout").is_none());
    }
}
