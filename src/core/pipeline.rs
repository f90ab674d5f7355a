//! End-to-end pipeline: load, build, optionally reduce, render
//!
//! Every run is explicit about its inputs ([`RenderOptions`]) and returns what
//! it did ([`RenderSummary`]); nothing is kept between runs.

use crate::core::builder::build_graph;
use crate::core::color::ColorScheme;
use crate::core::config::Config;
use crate::core::error::{Error, Result};
use crate::core::loader::load_skills;
use crate::core::models::SkillGraph;
use crate::core::reduce::{ensure_acyclic, transitive_reduction};
use crate::core::report::{
    BannerLink, ForceAtlasLayout, GraphRenderer, HtmlRenderer, RenderContext, RuntimeSource,
    DEFAULT_RUNTIME_URL,
};
use crate::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

/// Inputs of a render run
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Skill data JSON file
    pub input: PathBuf,
    /// HTML file to write
    pub output: PathBuf,
    /// Drop edges implied by longer paths
    pub transitive_reduction: bool,
    /// Completion to color mapping
    pub color_scheme: ColorScheme,
    /// Page title
    pub title: String,
    /// Banner links
    pub links: Vec<BannerLink>,
    /// URL of the network runtime, used unless `runtime_file` is set
    pub runtime_url: String,
    /// Local runtime build to inline
    pub runtime_file: Option<PathBuf>,
    /// Fixed layout seed
    pub layout_seed: Option<u64>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            input: PathBuf::from("data/skills.json"),
            output: PathBuf::from("docs/index.html"),
            transitive_reduction: false,
            color_scheme: ColorScheme::default(),
            title: "Skill Graph".to_string(),
            links: Vec::new(),
            runtime_url: DEFAULT_RUNTIME_URL.to_string(),
            runtime_file: None,
            layout_seed: None,
        }
    }
}

impl RenderOptions {
    /// Options for a run as described by the (already overridden) config
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let render = &config.render;
        Self {
            input: PathBuf::from(&config.paths.input),
            output: PathBuf::from(&config.paths.output),
            transitive_reduction: render.transitive_reduction,
            color_scheme: render.color_scheme,
            title: render.title.clone(),
            links: render.links.clone(),
            runtime_url: config.runtime_url().to_string(),
            runtime_file: Some(render.runtime_file.as_str())
                .filter(|f| !f.is_empty())
                .map(PathBuf::from),
            layout_seed: render.layout_seed,
        }
    }

    /// Resolve where the page gets its runtime from
    ///
    /// # Errors
    /// Returns `Error::Io` if the runtime file cannot be read.
    pub fn runtime(&self) -> Result<RuntimeSource> {
        match &self.runtime_file {
            Some(path) => {
                let source = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
                debug!("Inlining runtime from {} ({} bytes)", path.display(), source.len());
                Ok(RuntimeSource::Inline(source))
            }
            None => Ok(RuntimeSource::Url(self.runtime_url.clone())),
        }
    }
}

/// What a run produced
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSummary {
    /// Number of skills (nodes)
    pub skill_count: usize,
    /// Number of edges in the rendered graph
    pub edge_count: usize,
    /// Edges dropped by transitive reduction, as `(prerequisite, dependent)`
    pub removed_edges: Vec<(String, String)>,
    /// Mean completion over all skills
    pub global_completion: f64,
    /// Where the page was written; `None` for checks
    pub output_path: Option<PathBuf>,
}

/// Graph as it will be drawn, plus the edges reduction dropped
fn prepare(
    input: &Path,
    reduce: bool,
    scheme: ColorScheme,
) -> Result<(SkillGraph, Vec<(String, String)>)> {
    let skills = load_skills(input)?;
    let graph = build_graph(&skills, scheme);
    info!(
        "Built graph with {} skills and {} dependencies",
        graph.skill_count(),
        graph.edge_count()
    );

    if reduce {
        let reduction = transitive_reduction(&graph)?;
        Ok((reduction.graph, reduction.removed))
    } else {
        Ok((graph, Vec::new()))
    }
}

/// Load, build, optionally reduce and write the HTML page
///
/// Nothing is written unless every earlier step succeeded.
///
/// # Errors
/// Returns any data, graph, template or I/O error from the stages.
pub fn run(options: &RenderOptions) -> Result<RenderSummary> {
    let (graph, removed_edges) =
        prepare(&options.input, options.transitive_reduction, options.color_scheme)?;

    let runtime = options.runtime()?;
    let layout = ForceAtlasLayout::default().with_seed(options.layout_seed);
    let ctx = RenderContext::new(&graph, &options.title, &options.links, &runtime, &layout);

    HtmlRenderer::new().generate(&ctx, &options.output)?;
    info!(
        "Wrote {} (global completion {}%)",
        options.output.display(),
        ctx.global_completion_label()
    );

    Ok(RenderSummary {
        skill_count: graph.skill_count(),
        edge_count: graph.edge_count(),
        removed_edges,
        global_completion: ctx.global_completion,
        output_path: Some(options.output.clone()),
    })
}

/// Validate the input and report what a render would draw, without writing
///
/// Cycles are reported even when `reduce` is off.
///
/// # Errors
/// Returns the same data and graph errors as [`run`], plus `GraphError::Cycle`
/// for a cyclic graph.
pub fn check(input: &Path, reduce: bool) -> Result<RenderSummary> {
    let (graph, removed_edges) = prepare(input, reduce, ColorScheme::default())?;
    if !reduce {
        ensure_acyclic(&graph)?;
    }

    Ok(RenderSummary {
        skill_count: graph.skill_count(),
        edge_count: graph.edge_count(),
        removed_edges,
        global_completion: crate::core::report::global_completion(&graph.completion_values()),
        output_path: None,
    })
}
