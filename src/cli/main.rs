//! Command-line interface entry point for `SkillGraph`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use skill_graph::config::Config;
use skill_graph::info;
use skill_graph::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};

fn main() {
    let args = Cli::parse();

    // The loaded file config stays untouched; CLI flags only shape this run
    let mut file_config = Config::load();
    let defaults = Config::from_defaults();
    let config = file_config.with_overrides(&args.to_config_overrides());

    // --log-level overrides config logging.level; fallback warn
    let mut level = config.logging.level.parse().unwrap_or(Level::Warn);

    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    // --log-file overrides config logging.file
    let log_path = Some(config.logging.file.as_str())
        .filter(|f| !f.is_empty())
        .map(std::path::PathBuf::from);

    if let Some(log_path) = log_path {
        let display_path = log_path.to_string_lossy();
        if init_file_logging(&log_path) {
            if verbose {
                eprintln!("✓ File logging initialized at: {display_path}");
            } else {
                info!("File logging initialized at: {display_path}");
            }
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    let code = match args.command.unwrap_or(Command::Render) {
        Command::Render => commands::render::run(&config),
        Command::Check => commands::check::run(&config),
        Command::Config { subcommand } => {
            commands::config::run(subcommand, &mut file_config, &defaults)
        }
    };

    std::process::exit(code);
}
