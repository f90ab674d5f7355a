//! Render command handler

use super::report_failure;
use skill_graph::config::Config;
use skill_graph::core::pipeline::{self, RenderOptions};
use skill_graph::core::report::format_completion;
use skill_graph::verbose;

/// Run the full pipeline and print a short summary
pub fn run(config: &Config) -> i32 {
    let options = RenderOptions::from_config(config);
    verbose!(
        "Rendering {} -> {} (reduce: {}, colors: {})",
        options.input.display(),
        options.output.display(),
        options.transitive_reduction,
        options.color_scheme
    );

    match pipeline::run(&options) {
        Ok(summary) => {
            println!(
                "✓ Rendered {} skills, {} dependencies to {}",
                summary.skill_count,
                summary.edge_count,
                options.output.display()
            );
            if !summary.removed_edges.is_empty() {
                println!(
                    "  Transitive reduction removed {} redundant dependencies",
                    summary.removed_edges.len()
                );
            }
            println!(
                "  Global completion: {}%",
                format_completion(summary.global_completion)
            );
            0
        }
        Err(e) => report_failure(
            &format!("Failed to render {}", options.input.display()),
            &e,
        ),
    }
}
