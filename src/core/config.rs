//! Configuration module for `SkillGraph`

use crate::core::color::ColorScheme;
use crate::core::report::{BannerLink, DEFAULT_RUNTIME_URL};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Variable expanded to the config directory in path values
const DIR_VARIABLE: &str = "$SKILL_GRAPH";

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Paths configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Skill data JSON file
    #[serde(default)]
    pub input: String,
    /// Generated HTML page
    #[serde(default)]
    pub output: String,
}

/// Rendering configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Page and banner title
    #[serde(default)]
    pub title: String,
    /// Drop edges implied by longer paths
    #[serde(default)]
    pub transitive_reduction: bool,
    /// How completion maps to node color
    #[serde(default)]
    pub color_scheme: ColorScheme,
    /// Where the page loads vis-network from
    #[serde(default)]
    pub runtime_url: String,
    /// Local vis-network build to inline instead of linking (empty = link)
    #[serde(default)]
    pub runtime_file: String,
    /// Fixed seed for the initial layout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_seed: Option<u64>,
    /// Reference links shown in the banner
    #[serde(default)]
    pub links: Vec<BannerLink>,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
    /// Render settings
    #[serde(default)]
    pub render: RenderConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override input file
    pub input: Option<String>,
    /// Override output file
    pub output: Option<String>,
    /// Override transitive reduction
    pub transitive_reduction: Option<bool>,
    /// Override color scheme
    pub color_scheme: Option<ColorScheme>,
    /// Override page title
    pub title: Option<String>,
    /// Override inlined runtime file
    pub runtime_file: Option<String>,
    /// Override layout seed
    pub layout_seed: Option<u64>,
}

impl Config {
    /// Get the `$SKILL_GRAPH` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/skillgraph`
    /// - macOS: `~/Library/Application Support/skillgraph`
    /// - Windows: `%APPDATA%\skillgraph`
    #[must_use]
    pub fn get_skillgraph_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("skillgraph")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Used when loading so that fields added in a newer version get their
    /// default values. Only string fields that are empty here and non-empty in
    /// `defaults` are filled in.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;

        for (value, default) in [
            (&mut self.logging.level, &defaults.logging.level),
            (&mut self.logging.file, &defaults.logging.file),
            (&mut self.paths.input, &defaults.paths.input),
            (&mut self.paths.output, &defaults.paths.output),
            (&mut self.render.title, &defaults.render.title),
            (&mut self.render.runtime_url, &defaults.render.runtime_url),
        ] {
            if value.is_empty() && !default.is_empty() {
                value.clone_from(default);
                changed = true;
            }
        }

        changed
    }

    /// Effective configuration for one run: a copy of `self` with `overrides` applied
    ///
    /// `self` stays as loaded, so saving it never persists per-run flags.
    #[must_use]
    pub fn with_overrides(&self, overrides: &ConfigOverrides) -> Self {
        let mut effective = self.clone();
        effective.apply_overrides(overrides);
        effective
    }

    /// Apply CLI-provided overrides onto this configuration in place
    ///
    /// `None` fields leave the config as is. Do not [`save()`](Config::save) a
    /// value that has been overridden; use [`with_overrides`](Config::with_overrides)
    /// to keep the loaded config separate.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file = Self::expand_variables(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }

        if let Some(input) = &overrides.input {
            self.paths.input = Self::expand_variables(input);
        }
        if let Some(output) = &overrides.output {
            self.paths.output = Self::expand_variables(output);
        }

        if let Some(reduce) = overrides.transitive_reduction {
            self.render.transitive_reduction = reduce;
        }
        if let Some(scheme) = overrides.color_scheme {
            self.render.color_scheme = scheme;
        }
        if let Some(title) = &overrides.title {
            self.render.title.clone_from(title);
        }
        if let Some(runtime_file) = &overrides.runtime_file {
            self.render.runtime_file = Self::expand_variables(runtime_file);
        }
        if overrides.layout_seed.is_some() {
            self.render.layout_seed = overrides.layout_seed;
        }
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds, inside
    /// [`get_skillgraph_dir`](Self::get_skillgraph_dir).
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_skillgraph_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$SKILL_GRAPH` to the config directory
    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let dir = Self::get_skillgraph_dir();
            value.replace(DIR_VARIABLE, dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Missing fields take their serde defaults. `$SKILL_GRAPH` is expanded in
    /// path-like values.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let config = Config::from_toml(r#"
    /// [paths]
    /// input = "$SKILL_GRAPH/skills.json"
    /// "#)?;
    /// ```
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.input = Self::expand_variables(&config.paths.input);
        config.paths.output = Self::expand_variables(&config.paths.output);
        config.render.runtime_file = Self::expand_variables(&config.render.runtime_file);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// Debug builds use `DefaultCLIConfigDebug.toml`, release builds
    /// `DefaultCLIConfigRelease.toml`.
    ///
    /// # Panics
    /// Panics if the embedded default configuration cannot be parsed. The
    /// defaults are compiled in and covered by tests.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from file, or create from defaults if not found
    ///
    /// - If the config file exists: load it, merge fields missing from it, and
    ///   save it back when something was added.
    /// - First run: create the config directory and write the defaults.
    ///
    /// Falls back to the defaults if the file cannot be read or parsed.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if config_file.exists() {
            if let Ok(content) = fs::read_to_string(&config_file) {
                if let Ok(mut config) = Self::from_toml(&content) {
                    if config.merge_defaults(&defaults) {
                        let _ = config.save();
                    }
                    return config;
                }
            }
        } else {
            if let Some(parent) = config_file.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let _ = defaults.save();
            return defaults;
        }

        defaults
    }

    /// Save configuration to the user config file
    ///
    /// # Errors
    /// Returns an error if the config cannot be serialized, the directory cannot
    /// be created or the file cannot be written.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_file = Self::get_config_file_path();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&config_file, self.to_toml()?)?;
        Ok(())
    }

    /// Serialize to pretty TOML
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Get a configuration value by key
    ///
    /// Supported keys: `level`, `file`, `verbose`, `input`, `output`, `title`,
    /// `transitive_reduction` (alias `reduce`), `color_scheme`, `runtime_url`,
    /// `runtime_file`, `layout_seed`. Dashes may be used instead of underscores.
    ///
    /// Returns `None` for unknown keys. An unset layout seed reads as an empty
    /// string.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match normalize_key(key).as_str() {
            "level" => self.logging.level.clone(),
            "file" => self.logging.file.clone(),
            "verbose" => self.logging.verbose.to_string(),
            "input" => self.paths.input.clone(),
            "output" => self.paths.output.clone(),
            "title" => self.render.title.clone(),
            "transitive_reduction" | "reduce" => self.render.transitive_reduction.to_string(),
            "color_scheme" => self.render.color_scheme.to_string(),
            "runtime_url" => self.render.runtime_url.clone(),
            "runtime_file" => self.render.runtime_file.clone(),
            "layout_seed" => self
                .render
                .layout_seed
                .map(|seed| seed.to_string())
                .unwrap_or_default(),
            _ => return None,
        };
        Some(value)
    }

    /// Set a configuration value by key
    ///
    /// Values are validated and converted: `verbose` and `transitive_reduction`
    /// take `true`/`false`, `color_scheme` takes `gradient` or `buckets`,
    /// `layout_seed` takes an unsigned integer (or `none` to clear it), `level`
    /// takes a log level name.
    ///
    /// Only the in-memory config changes. Call [`save()`](Config::save) to persist.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized or the value cannot be parsed.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match normalize_key(key).as_str() {
            "level" => {
                value
                    .parse::<crate::logger::Level>()
                    .map_err(|_| format!("Invalid log level: '{value}'"))?;
                self.logging.level = value.to_lowercase();
            }
            "file" => self.logging.file = Self::expand_variables(value),
            "verbose" => self.logging.verbose = parse_bool("verbose", value)?,
            "input" => self.paths.input = Self::expand_variables(value),
            "output" => self.paths.output = Self::expand_variables(value),
            "title" => self.render.title = value.to_string(),
            "transitive_reduction" | "reduce" => {
                self.render.transitive_reduction = parse_bool("transitive_reduction", value)?;
            }
            "color_scheme" => self.render.color_scheme = value.parse()?,
            "runtime_url" => self.render.runtime_url = value.to_string(),
            "runtime_file" => self.render.runtime_file = Self::expand_variables(value),
            "layout_seed" => {
                self.render.layout_seed = match value.trim() {
                    "" | "none" => None,
                    seed => Some(
                        seed.parse::<u64>()
                            .map_err(|_| format!("Invalid layout seed: '{value}'"))?,
                    ),
                };
            }
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to default)
    ///
    /// Only the in-memory config changes. Call [`save()`](Config::save) to persist.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match normalize_key(key).as_str() {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "input" => self.paths.input.clone_from(&defaults.paths.input),
            "output" => self.paths.output.clone_from(&defaults.paths.output),
            "title" => self.render.title.clone_from(&defaults.render.title),
            "transitive_reduction" | "reduce" => {
                self.render.transitive_reduction = defaults.render.transitive_reduction;
            }
            "color_scheme" => self.render.color_scheme = defaults.render.color_scheme,
            "runtime_url" => self
                .render
                .runtime_url
                .clone_from(&defaults.render.runtime_url),
            "runtime_file" => self
                .render
                .runtime_file
                .clone_from(&defaults.render.runtime_file),
            "layout_seed" => self.render.layout_seed = defaults.render.layout_seed,
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Reset all configuration to defaults
    ///
    /// Deletes the configuration file so the next [`load()`](Config::load)
    /// recreates it. Succeeds if the file does not exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be deleted.
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }

    /// Runtime URL to link, falling back to the built-in CDN location
    #[must_use]
    pub fn runtime_url(&self) -> &str {
        if self.render.runtime_url.is_empty() {
            DEFAULT_RUNTIME_URL
        } else {
            &self.render.runtime_url
        }
    }
}

fn normalize_key(key: &str) -> String {
    key.trim().to_lowercase().replace('-', "_")
}

fn parse_bool(key: &str, value: &str) -> Result<bool, String> {
    value
        .trim()
        .parse::<bool>()
        .map_err(|_| format!("Invalid boolean value for '{key}': '{value}'"))
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  input = \"{}\"", self.paths.input)?;
        writeln!(f, "  output = \"{}\"", self.paths.output)?;

        writeln!(f, "\n[render]")?;
        writeln!(f, "  title = \"{}\"", self.render.title)?;
        writeln!(f, "  transitive_reduction = {}", self.render.transitive_reduction)?;
        writeln!(f, "  color_scheme = \"{}\"", self.render.color_scheme)?;
        writeln!(f, "  runtime_url = \"{}\"", self.render.runtime_url)?;
        writeln!(f, "  runtime_file = \"{}\"", self.render.runtime_file)?;
        match self.render.layout_seed {
            Some(seed) => writeln!(f, "  layout_seed = {seed}")?,
            None => writeln!(f, "  layout_seed = (random)")?,
        }
        for link in &self.render.links {
            writeln!(f, "  link = \"{}\" -> {}", link.label, link.url)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_parse() {
        let config = Config::from_defaults();
        assert_eq!(config.paths.input, "data/skills.json");
        assert_eq!(config.paths.output, "docs/index.html");
        assert!(!config.render.transitive_reduction);
        assert_eq!(config.render.color_scheme, ColorScheme::Gradient);
        assert_eq!(config.runtime_url(), DEFAULT_RUNTIME_URL);
    }

    #[test]
    fn test_set_validates_values() {
        let mut config = Config::from_defaults();

        assert!(config.set("color-scheme", "buckets").is_ok());
        assert_eq!(config.render.color_scheme, ColorScheme::Buckets);
        assert!(config.set("color_scheme", "rainbow").is_err());

        assert!(config.set("reduce", "true").is_ok());
        assert!(config.render.transitive_reduction);
        assert!(config.set("transitive_reduction", "maybe").is_err());

        assert!(config.set("level", "shouting").is_err());
        assert!(config.set("level", "DEBUG").is_ok());
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_layout_seed_round_trip() {
        let mut config = Config::from_defaults();

        config.set("layout_seed", "42").unwrap();
        assert_eq!(config.render.layout_seed, Some(42));
        assert_eq!(config.get("layout-seed").unwrap(), "42");

        config.set("layout_seed", "none").unwrap();
        assert_eq!(config.render.layout_seed, None);
        assert_eq!(config.get("layout_seed").unwrap(), "");

        assert!(config.set("layout_seed", "-1").is_err());
    }

    #[test]
    fn test_overrides_win() {
        let mut config = Config::from_defaults();
        config.apply_overrides(&ConfigOverrides {
            input: Some("other.json".to_string()),
            transitive_reduction: Some(true),
            color_scheme: Some(ColorScheme::Buckets),
            layout_seed: Some(9),
            ..Default::default()
        });

        assert_eq!(config.paths.input, "other.json");
        assert_eq!(config.paths.output, "docs/index.html");
        assert!(config.render.transitive_reduction);
        assert_eq!(config.render.color_scheme, ColorScheme::Buckets);
        assert_eq!(config.render.layout_seed, Some(9));
    }

    #[test]
    fn test_saved_config_ignores_run_overrides() {
        let mut file_config = Config::from_defaults();
        let effective = file_config.with_overrides(&ConfigOverrides {
            input: Some("/tmp/one_off.json".to_string()),
            title: Some("Temp".to_string()),
            transitive_reduction: Some(true),
            ..Default::default()
        });
        assert_eq!(effective.paths.input, "/tmp/one_off.json");
        assert!(effective.render.transitive_reduction);

        file_config.set("color_scheme", "buckets").unwrap();
        let saved = file_config.to_toml().unwrap();

        assert!(saved.contains("color_scheme = \"buckets\""));
        assert!(!saved.contains("one_off.json"));
        assert!(!saved.contains("\"Temp\""));
        assert!(saved.contains("transitive_reduction = false"));
    }

    #[test]
    fn test_merge_fills_only_empty_fields() {
        let defaults = Config::from_defaults();
        let mut config = Config::from_toml("[paths]\ninput = \"mine.json\"\n").unwrap();

        assert!(config.merge_defaults(&defaults));
        assert_eq!(config.paths.input, "mine.json");
        assert_eq!(config.paths.output, defaults.paths.output);
        assert!(!config.merge_defaults(&defaults));
    }

    #[test]
    fn test_toml_round_trip_keeps_links() {
        let mut config = Config::from_defaults();
        config.render.links = vec![BannerLink {
            label: "Roadmap".to_string(),
            url: "https://example.com".to_string(),
        }];
        config.render.layout_seed = Some(3);

        let parsed = Config::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed.render.links, config.render.links);
        assert_eq!(parsed.render.layout_seed, Some(3));
    }
}
