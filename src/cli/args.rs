//! CLI argument definitions for `SkillGraph`

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::str::FromStr;

use skill_graph::config::ConfigOverrides;
use skill_graph::core::color::ColorScheme;
use skill_graph::logger::Level;

/// CLI log level argument
///
/// Converts to lowercase strings for config storage and to `logger::Level` for
/// runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        write!(f, "{as_str}")
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `input`, `title`, `color_scheme`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render the skill graph to an HTML page (default).
    Render,
    /// Validate the skill data and print what would be rendered.
    ///
    /// Nothing is written.
    Check,
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "skillgraph",
    about = "Render a skill dependency graph as an interactive HTML page",
    version = env!("CARGO_PKG_VERSION")
)]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Skill data JSON file
    #[arg(long, global = true, value_name = "PATH", env = "SKILLGRAPH_INPUT")]
    pub input: Option<PathBuf>,

    /// HTML file to write
    #[arg(long, global = true, value_name = "PATH", env = "SKILLGRAPH_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Remove dependencies implied by longer chains
    #[arg(long, global = true, overrides_with = "no_reduce")]
    pub reduce: bool,

    /// Keep every declared dependency
    #[arg(long, global = true, overrides_with = "reduce")]
    pub no_reduce: bool,

    /// Node coloring: gradient or buckets
    #[arg(long, global = true, value_name = "SCHEME", value_parser = ColorScheme::from_str)]
    pub color_scheme: Option<ColorScheme>,

    /// Page title
    #[arg(long, global = true, value_name = "TITLE")]
    pub title: Option<String>,

    /// Inline this vis-network build instead of linking the CDN
    #[arg(long, global = true, value_name = "PATH")]
    pub runtime_file: Option<PathBuf>,

    /// Fixed seed for the initial layout
    #[arg(long, global = true, value_name = "SEED")]
    pub layout_seed: Option<u64>,

    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, global = true, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug", global = true)]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Subcommand to execute; renders when omitted
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Convert CLI flags into config overrides for this run
    ///
    /// `None` means the flag was not given and the config value stands.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        let transitive_reduction = if self.reduce {
            Some(true)
        } else if self.no_reduce {
            Some(false)
        } else {
            None
        };

        ConfigOverrides {
            level: self.log_level.map(|lvl| lvl.to_string()),
            file: self
                .log_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            verbose: self.verbose.then_some(true),
            input: self.input.as_ref().map(|p| p.to_string_lossy().to_string()),
            output: self
                .output
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            transitive_reduction,
            color_scheme: self.color_scheme,
            title: self.title.clone(),
            runtime_file: self
                .runtime_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            layout_seed: self.layout_seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("skillgraph").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevelArg::Error.to_string(), "error");
        assert_eq!(LogLevelArg::Warn.to_string(), "warn");
        assert_eq!(LogLevelArg::Info.to_string(), "info");
        assert_eq!(LogLevelArg::Debug.to_string(), "debug");
    }

    #[test]
    fn test_log_level_to_logger_level() {
        assert_eq!(Level::from(LogLevelArg::Error), Level::Error);
        assert_eq!(Level::from(LogLevelArg::Debug), Level::Debug);
    }

    #[test]
    fn test_no_subcommand_means_render() {
        let cli = parse(&[]);
        assert!(cli.command.is_none());
        let overrides = cli.to_config_overrides();
        assert_eq!(overrides.transitive_reduction, None);
        assert_eq!(overrides.title, None);
    }

    #[test]
    fn test_flags_become_overrides() {
        let cli = parse(&[
            "render",
            "--output",
            "site/graph.html",
            "--reduce",
            "--color-scheme",
            "buckets",
            "--layout-seed",
            "11",
        ]);
        assert!(matches!(cli.command, Some(Command::Render)));

        let overrides = cli.to_config_overrides();
        assert_eq!(overrides.output.as_deref(), Some("site/graph.html"));
        assert_eq!(overrides.transitive_reduction, Some(true));
        assert_eq!(overrides.color_scheme, Some(ColorScheme::Buckets));
        assert_eq!(overrides.layout_seed, Some(11));
    }

    #[test]
    fn test_logging_flags_become_overrides() {
        let cli = parse(&["check", "--log-level", "info", "--log-file", "run.log", "-v"]);
        let overrides = cli.to_config_overrides();
        assert_eq!(overrides.level.as_deref(), Some("info"));
        assert_eq!(overrides.file.as_deref(), Some("run.log"));
        assert_eq!(overrides.verbose, Some(true));

        let quiet = parse(&["check"]).to_config_overrides();
        assert_eq!(quiet.level, None);
        assert_eq!(quiet.verbose, None);
    }

    #[test]
    fn test_no_reduce_wins_when_last() {
        let cli = parse(&["--reduce", "--no-reduce"]);
        assert_eq!(cli.to_config_overrides().transitive_reduction, Some(false));
    }

    #[test]
    fn test_bad_color_scheme_rejected() {
        let result = Cli::try_parse_from(["skillgraph", "--color-scheme", "rainbow"]);
        assert!(result.is_err());
    }
}
