//! Configuration loading for fmigrid.
//! Reads fmigrid.toml from the current directory or path in FMIGRID_CONFIG env var.
//! Every field has a built-in default, so running without a config file is fine.

use std::path::{Path, PathBuf};

use fmigrid_common::{FmigridError, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Environment variable naming an alternative config file.
pub const CONFIG_ENV_VAR: &str = "FMIGRID_CONFIG";

/// Config file looked up in the current directory.
pub const DEFAULT_CONFIG_FILE: &str = "fmigrid.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub targets: TargetsConfig,
    #[serde(default)]
    pub extract: ExtractConfig,
    #[serde(default)]
    pub plot: PlotConfig,
}

// ── Targets ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetsConfig {
    /// File listing one target gene per line
    #[serde(default = "default_gene_list")]
    pub gene_list: PathBuf,
}

fn default_gene_list() -> PathBuf { PathBuf::from("/usr/local/data/fmi_gene_list.txt") }

impl Default for TargetsConfig {
    fn default() -> Self {
        Self { gene_list: default_gene_list() }
    }
}

// ── Extract ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// Inserted before `.tsv` when deriving the extractor's output name
    #[serde(default = "default_output_suffix")]
    pub output_suffix: String,
}

fn default_output_suffix() -> String { "_fmi".to_string() }

impl Default for ExtractConfig {
    fn default() -> Self {
        Self { output_suffix: default_output_suffix() }
    }
}

// ── Plot ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotConfig {
    #[serde(default = "default_outfile")]
    pub outfile: PathBuf,
    #[serde(default = "default_columns")]
    pub columns: i64,
    #[serde(default = "default_cell_width")]
    pub cell_width: u32,
    #[serde(default = "default_cell_height")]
    pub cell_height: u32,
    #[serde(default = "default_font_size")]
    pub font_size: u32,
    #[serde(default = "default_margin")]
    pub margin: u32,
}

fn default_outfile()     -> PathBuf { PathBuf::from("fmi_table.png") }
fn default_columns()     -> i64     { 10 }
fn default_cell_width()  -> u32     { 120 }
fn default_cell_height() -> u32     { 32 }
fn default_font_size()   -> u32     { 14 }
fn default_margin()      -> u32     { 20 }

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            outfile: default_outfile(),
            columns: default_columns(),
            cell_width: default_cell_width(),
            cell_height: default_cell_height(),
            font_size: default_font_size(),
            margin: default_margin(),
        }
    }
}

mod tests;

impl Config {
    /// Load configuration from fmigrid.toml.
    /// Checks FMIGRID_CONFIG env var first, then current directory.
    pub fn load() -> Result<Self> {
        Self::load_from(std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from))
    }

    /// Load `explicit` if given, otherwise fmigrid.toml in the current directory.
    /// A missing default file yields the defaults; a missing explicit file or a
    /// malformed one is an error.
    pub fn load_from(explicit: Option<PathBuf>) -> Result<Self> {
        let path = match explicit {
            Some(path) => {
                if !path.is_file() {
                    return Err(FmigridError::Config(format!(
                        "{CONFIG_ENV_VAR} points at {}, which is not a readable file",
                        path.display()
                    )));
                }
                path
            }
            None => {
                let path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !path.exists() {
                    debug!(path = %path.display(), "No config file, using defaults");
                    return Ok(Self::default());
                }
                path
            }
        };

        let config = Self::from_file(&path)?;
        info!(path = %path.display(), "Configuration loaded");
        Ok(config)
    }

    /// Parse a specific config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| FmigridError::file_read(path, e))?;
        Self::from_toml(&content)
            .map_err(|e| FmigridError::Config(format!("{}: {e}", path.display())))
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
