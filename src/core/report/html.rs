//! HTML renderer
//!
//! Produces one self-contained page: inline styles, the network runtime (linked
//! or inlined), graph data as JSON, and a small script wiring node clicks to
//! the detail panel.

use crate::core::error::Result;
use crate::core::models::Tooltip;
use crate::core::report::{BannerLink, GraphRenderer, RenderContext, RuntimeSource};
use askama::Template;
use serde::Serialize;
use std::collections::BTreeMap;

/// Page template, see `templates/skill_graph.html`
#[derive(Template)]
#[template(path = "skill_graph.html")]
struct SkillGraphPage<'a> {
    title: &'a str,
    global_completion: String,
    skill_count: usize,
    edge_count: usize,
    links: &'a [BannerLink],
    runtime_url: &'a str,
    runtime_inline: String,
    nodes_json: String,
    edges_json: String,
    details_json: String,
    options_json: String,
}

/// Node record in the format the network library expects
#[derive(Debug, Serialize)]
struct VisNode<'a> {
    id: &'a str,
    label: &'a str,
    color: String,
    shape: &'a str,
    size: u32,
    title: String,
}

/// Directed edge record
#[derive(Debug, Serialize)]
struct VisEdge<'a> {
    from: &'a str,
    to: &'a str,
}

/// HTML renderer backed by the vis-network runtime
pub struct HtmlRenderer;

impl HtmlRenderer {
    /// Create a new HTML renderer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn nodes<'a>(ctx: &RenderContext<'a>) -> Vec<VisNode<'a>> {
        ctx.graph
            .nodes_in_order()
            .map(|node| VisNode {
                id: node.name(),
                label: node.name(),
                color: node.color.to_hex(),
                shape: node.shape,
                size: node.size,
                title: node.tooltip.plain_text(),
            })
            .collect()
    }

    fn edges<'a>(ctx: &RenderContext<'a>) -> Vec<VisEdge<'a>> {
        ctx.graph
            .edges()
            .into_iter()
            .map(|(from, to)| VisEdge { from, to })
            .collect()
    }

    /// Tooltip records keyed by node id, read by the detail panel script
    fn details<'a>(ctx: &RenderContext<'a>) -> BTreeMap<&'a str, &'a Tooltip> {
        ctx.graph
            .nodes_in_order()
            .map(|node| (node.name(), &node.tooltip))
            .collect()
    }
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphRenderer for HtmlRenderer {
    fn render(&self, ctx: &RenderContext) -> Result<String> {
        let (runtime_url, runtime_inline) = match ctx.runtime {
            RuntimeSource::Url(url) => (url.as_str(), String::new()),
            RuntimeSource::Inline(source) => ("", inline_script(source)),
        };

        let page = SkillGraphPage {
            title: ctx.title,
            global_completion: ctx.global_completion_label(),
            skill_count: ctx.graph.skill_count(),
            edge_count: ctx.graph.edge_count(),
            links: ctx.links,
            runtime_url,
            runtime_inline,
            nodes_json: script_json(&Self::nodes(ctx))?,
            edges_json: script_json(&Self::edges(ctx))?,
            details_json: script_json(&Self::details(ctx))?,
            options_json: script_json(&ctx.layout.network_options())?,
        };

        Ok(page.render()?)
    }
}

/// Serialize a value for embedding in a `<script>` block
///
/// `<` only occurs inside JSON strings, so writing it as `\u003c` keeps the
/// data identical while making `</script>` impossible.
///
/// # Errors
/// Returns `Error::Template` if the value cannot be serialized.
fn script_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let json = serde_json::to_string(value).map_err(|e| askama::Error::Custom(Box::new(e)))?;
    Ok(json.replace('<', "\\u003c"))
}

/// Make inlined script source safe to place inside a `<script>` element
///
/// Every `</script` (any letter case) becomes `<\/script`, which JavaScript
/// reads the same inside strings, regexes and comments.
fn inline_script(source: &str) -> String {
    const CLOSING: &[u8] = b"</script";
    let bytes = source.as_bytes();
    let mut out = String::with_capacity(source.len());
    let mut start = 0;
    let mut i = 0;

    while i + CLOSING.len() <= bytes.len() {
        if bytes[i..i + CLOSING.len()].eq_ignore_ascii_case(CLOSING) {
            out.push_str(&source[start..=i]);
            out.push('\\');
            start = i + 1;
            i += CLOSING.len();
        } else {
            i += 1;
        }
    }
    out.push_str(&source[start..]);
    out
}
