//! Check command handler

use super::report_failure;
use skill_graph::config::Config;
use skill_graph::core::pipeline;
use skill_graph::core::report::format_completion;
use std::path::Path;

/// Validate the input without writing anything
pub fn run(config: &Config) -> i32 {
    let input = Path::new(&config.paths.input);
    let reduce = config.render.transitive_reduction;

    match pipeline::check(input, reduce) {
        Ok(summary) => {
            println!("✓ {} is valid", input.display());
            println!("  Skills:            {}", summary.skill_count);
            println!("  Dependencies:      {}", summary.edge_count);
            if reduce {
                println!("  Redundant removed: {}", summary.removed_edges.len());
                for (prereq, skill) in &summary.removed_edges {
                    println!("    {prereq} -> {skill}");
                }
            }
            println!(
                "  Global completion: {}%",
                format_completion(summary.global_completion)
            );
            0
        }
        Err(e) => report_failure(&format!("Invalid skill data in {}", input.display()), &e),
    }
}
