//! Rendering of the skill graph
//!
//! The renderer does not lay the graph out itself: it hands the styled nodes,
//! the edges and a [`ForceAtlasLayout`] to the browser-side network library
//! and assembles the page around it (banner, completion badge, detail panel).

pub mod html;
pub mod layout;

use crate::core::error::{Error, Result};
use crate::core::models::SkillGraph;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub use html::HtmlRenderer;
pub use layout::ForceAtlasLayout;

/// Default location of the vis-network runtime
pub const DEFAULT_RUNTIME_URL: &str =
    "https://unpkg.com/vis-network@9.1.9/standalone/umd/vis-network.min.js";

/// A static reference link shown in the banner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BannerLink {
    /// Link text
    pub label: String,
    /// Link target
    pub url: String,
}

/// Where the page gets the visualization runtime from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeSource {
    /// `<script src=...>` pointing at a URL
    Url(String),
    /// Script source inlined into the page, for offline use
    Inline(String),
}

impl Default for RuntimeSource {
    fn default() -> Self {
        Self::Url(DEFAULT_RUNTIME_URL.to_string())
    }
}

/// Everything a renderer needs to produce the page
#[derive(Debug, Clone)]
pub struct RenderContext<'a> {
    /// Graph to draw (possibly reduced)
    pub graph: &'a SkillGraph,
    /// Page and banner title
    pub title: &'a str,
    /// Reference links for the banner
    pub links: &'a [BannerLink],
    /// Visualization runtime
    pub runtime: &'a RuntimeSource,
    /// Physics parameters for the force-directed layout
    pub layout: &'a ForceAtlasLayout,
    /// Mean completion over all skills
    pub global_completion: f64,
}

impl<'a> RenderContext<'a> {
    /// Create a render context; the global completion is computed from the graph
    #[must_use]
    pub fn new(
        graph: &'a SkillGraph,
        title: &'a str,
        links: &'a [BannerLink],
        runtime: &'a RuntimeSource,
        layout: &'a ForceAtlasLayout,
    ) -> Self {
        Self {
            graph,
            title,
            links,
            runtime,
            layout,
            global_completion: global_completion(&graph.completion_values()),
        }
    }

    /// Global completion with two decimals, e.g. `50.00`
    #[must_use]
    pub fn global_completion_label(&self) -> String {
        format_completion(self.global_completion)
    }
}

/// Trait for graph renderers
pub trait GraphRenderer {
    /// Render the page as a string
    ///
    /// # Errors
    /// Returns an error if rendering fails
    fn render(&self, ctx: &RenderContext) -> Result<String>;

    /// Render the page and write it to `output_path`, creating parent directories
    ///
    /// # Errors
    /// Returns an error if rendering fails or the file cannot be written
    fn generate(&self, ctx: &RenderContext, output_path: &Path) -> Result<()> {
        let content = self.render(ctx)?;
        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        fs::write(output_path, content).map_err(|e| Error::io(output_path, e))
    }
}

/// Arithmetic mean of completion values, 0 when there are none
#[must_use]
pub fn global_completion(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let count = values.len() as f64;
    values.iter().sum::<f64>() / count
}

/// Format a completion value with two decimals
#[must_use]
pub fn format_completion(value: f64) -> String {
    format!("{value:.2}")
}
