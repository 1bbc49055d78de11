//! Configuration module for cstitch.
//!
//! This module provides a layered configuration system that supports:
//! - Default values
//! - TOML configuration file
//! - Environment variable overrides
//! - CLI argument overrides
//!
//! # Environment Variables
//!
//! Environment variables must be prefixed with `CSTITCH_` and use double
//! underscores to separate nested levels:
//! - `CSTITCH_PARSING__LINE_ENDING=crlf` sets `parsing.line_ending`
//! - `CSTITCH_OUTPUT__FORMAT=outline` sets `output.format`
//! - `CSTITCH_DEBUG=true` sets `debug`

use crate::types::LineEnding;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = ".cstitch";
const CONFIG_FILE: &str = "settings.toml";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Settings {
    /// Version of the configuration schema
    #[serde(default = "default_version")]
    pub version: u32,

    /// Global debug mode
    #[serde(default = "default_false")]
    pub debug: bool,

    /// Resolution settings
    #[serde(default)]
    pub parsing: ParsingConfig,

    /// Output settings for the CLI
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ParsingConfig {
    /// Terminator used for synthesized text: "auto", "lf" or "crlf"
    #[serde(default)]
    pub line_ending: LineEndingSetting,

    /// Move method symbols reported beside their container back under it
    #[serde(default = "default_true")]
    pub relocate_nested_methods: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,

    /// Pretty-print JSON output
    #[serde(default = "default_true")]
    pub pretty: bool,

    /// Include header/body/footer text in JSON output
    #[serde(default = "default_true")]
    pub include_text: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LineEndingSetting {
    #[default]
    Auto,
    Lf,
    Crlf,
}

impl LineEndingSetting {
    /// The terminator to use, falling back to `detected` for `Auto`.
    pub fn resolve(self, detected: LineEnding) -> LineEnding {
        match self {
            LineEndingSetting::Auto => detected,
            LineEndingSetting::Lf => LineEnding::Lf,
            LineEndingSetting::Crlf => LineEnding::CrLf,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Outline,
}

// Default value functions
fn default_version() -> u32 {
    1
}
fn default_true() -> bool {
    true
}
fn default_false() -> bool {
    false
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            debug: false,
            parsing: ParsingConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            line_ending: LineEndingSetting::Auto,
            relocate_nested_methods: true,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Json,
            pretty: true,
            include_text: true,
        }
    }
}

impl Settings {
    /// Load configuration from all sources
    pub fn load() -> Result<Self, Box<figment::Error>> {
        let config_path = Self::find_workspace_config()
            .unwrap_or_else(|| PathBuf::from(CONFIG_DIR).join(CONFIG_FILE));
        Self::load_from(config_path)
    }

    /// Load configuration from a specific file, still honoring environment
    /// overrides
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, Box<figment::Error>> {
        Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path.as_ref()))
            // Double underscore (__) separates nested levels
            .merge(Env::prefixed("CSTITCH_").map(|key| {
                key.as_str().to_lowercase().replace("__", ".").into()
            }))
            .extract()
            .map_err(Box::new)
    }

    /// Find the settings file by looking for a .cstitch directory from the
    /// current directory up to root
    fn find_workspace_config() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;

        for ancestor in current.ancestors() {
            let config_dir = ancestor.join(CONFIG_DIR);
            if config_dir.is_dir() {
                return Some(config_dir.join(CONFIG_FILE));
            }
        }

        None
    }

    /// Save current configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
        let parent = path.as_ref().parent().ok_or("Invalid path")?;
        std::fs::create_dir_all(parent)?;

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }

    /// Create a default settings file with helpful comments
    pub fn init_config_file(force: bool) -> Result<PathBuf, Box<dyn std::error::Error>> {
        Self::init_config_file_in(Path::new("."), force)
    }

    /// Create the default settings file under `root`
    pub fn init_config_file_in(root: &Path, force: bool) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let config_path = root.join(CONFIG_DIR).join(CONFIG_FILE);

        if !force && config_path.exists() {
            return Err("Configuration file already exists. Use --force to overwrite".into());
        }

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let template = r#"# cstitch configuration file

# Version of the configuration schema
version = 1

# Global debug mode (same as --debug)
debug = false

[parsing]
# Terminator for synthesized text: "auto" (detected from the file), "lf" or "crlf"
line_ending = "auto"

# Some language servers report nested delegates as siblings of their type.
# When enabled they are moved back under the type before resolution.
relocate_nested_methods = true

[output]
# "json" or "outline"
format = "json"

# Pretty-print JSON output
pretty = true

# Include header/body/footer text in JSON output
include_text = true
"#;

        std::fs::write(&config_path, template)?;
        Ok(config_path)
    }
}
