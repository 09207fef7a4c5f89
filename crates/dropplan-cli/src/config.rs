//! Configuration file management for dropplan.
//!
//! Provides a TOML-based config file at `~/.config/dropplan/config.toml` and a
//! resolution chain: CLI flag > env var > config file > default.

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use dropplan_core::{GeneratorConfig, OutputFormat};

/// Drop count used when neither flag, env var, nor config file sets one.
pub const DEFAULT_DROPS: usize = 24;

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub generate: GenerateSection,
    #[serde(default)]
    pub output: OutputSection,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerateSection {
    /// Drops generated when `--drops` is not given.
    #[serde(default = "default_drops")]
    pub default_drops: usize,
    /// Largest drop count accepted.
    #[serde(default = "default_max_drops")]
    pub max_drops: usize,
}

impl Default for GenerateSection {
    fn default() -> Self {
        Self {
            default_drops: default_drops(),
            max_drops: default_max_drops(),
        }
    }
}

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputSection {
    #[serde(default)]
    pub format: OutputFormat,
}

fn default_drops() -> usize {
    DEFAULT_DROPS
}

fn default_max_drops() -> usize {
    GeneratorConfig::DEFAULT_MAX_DROPS
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the dropplan config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/dropplan` or `~/.config/dropplan`.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("dropplan");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("dropplan")
}

/// Return the path to the dropplan config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Load and parse the config file. Returns `Ok(None)` if it does not exist;
/// a file that exists but does not parse is an error.
pub fn load_config() -> Result<Option<ConfigFile>> {
    let path = config_path();
    if !path.exists() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&contents)
        .with_context(|| format!("failed to parse config file at {}", path.display()))?;
    Ok(Some(config))
}

/// Serialize and write the config file, creating parent dirs as needed.
pub fn save_config(config: &ConfigFile) -> Result<()> {
    let path = config_path();
    let dir = config_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create config directory {}", dir.display()))?;

    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(&path, &contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;

    Ok(())
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Values given on the command line, if any.
#[derive(Debug, Default, Clone, Copy)]
pub struct Overrides {
    pub drops: Option<usize>,
    pub max_drops: Option<usize>,
    pub format: Option<OutputFormat>,
}

/// Fully resolved configuration, ready for use.
#[derive(Debug, PartialEq)]
pub struct DropplanConfig {
    pub drops: usize,
    pub generator: GeneratorConfig,
    pub format: OutputFormat,
}

impl DropplanConfig {
    /// Resolve configuration using the chain: CLI flag > env var > config file > default.
    ///
    /// - Drops: `--drops` > `DROPPLAN_DROPS` > `generate.default_drops` > 24
    /// - Max drops: `--max-drops` > `DROPPLAN_MAX_DROPS` > `generate.max_drops` > 1000
    /// - Format: `--format` > `DROPPLAN_FORMAT` > `output.format` > text
    pub fn resolve(overrides: &Overrides) -> Result<Self> {
        let file_config = load_config()?.unwrap_or_default();

        let drops = match overrides.drops {
            Some(drops) => drops,
            None => env_var("DROPPLAN_DROPS")?.unwrap_or(file_config.generate.default_drops),
        };

        let max_drops = match overrides.max_drops {
            Some(max) => max,
            None => env_var("DROPPLAN_MAX_DROPS")?.unwrap_or(file_config.generate.max_drops),
        };

        let format = match overrides.format {
            Some(format) => format,
            None => env_var("DROPPLAN_FORMAT")?.unwrap_or(file_config.output.format),
        };

        Ok(Self {
            drops,
            generator: GeneratorConfig::new(max_drops),
            format,
        })
    }
}

/// Read and parse an environment variable. Unset is `Ok(None)`; set but
/// unparseable is an error naming the variable.
fn env_var<T>(name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("{name} env var is not valid: {raw:?}")),
        Err(_) => Ok(None),
    }
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------
