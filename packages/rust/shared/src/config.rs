//! Application configuration for layoutmap.
//!
//! User config lives at `~/.layoutmap/layoutmap.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{LayoutMapError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "layoutmap.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".layoutmap";

// ---------------------------------------------------------------------------
// Config structs (matching layoutmap.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Extraction vocabulary and post-processing.
    #[serde(default)]
    pub extraction: ExtractionConfig,

    /// Response rendering.
    #[serde(default)]
    pub output: OutputConfig,
}

/// `[extraction]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Prefix stripped from custom field ids during canonicalization.
    #[serde(default = "default_custom_field_prefix")]
    pub custom_field_prefix: String,

    /// Field id that marks an empty grid cell.
    #[serde(default = "default_blank_cell_marker")]
    pub blank_cell_marker: String,

    /// Layout name used when a layout definition has none.
    #[serde(default = "default_layout_name")]
    pub default_layout_name: String,

    /// Section name used when a section has no label.
    #[serde(default = "default_section_name")]
    pub default_section_name: String,

    /// Fill `dbInfo` and `lovs` on field records from the schema section.
    #[serde(default)]
    pub link_db_fields: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            custom_field_prefix: default_custom_field_prefix(),
            blank_cell_marker: default_blank_cell_marker(),
            default_layout_name: default_layout_name(),
            default_section_name: default_section_name(),
            link_db_fields: false,
        }
    }
}

fn default_custom_field_prefix() -> String {
    "cust_".into()
}
fn default_blank_cell_marker() -> String {
    "BLANK_CELL".into()
}
fn default_layout_name() -> String {
    "Unnamed Layout".into()
}
fn default_section_name() -> String {
    "Untitled Section".into()
}

/// `[output]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Pretty-print JSON responses.
    #[serde(default)]
    pub pretty: bool,
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.layoutmap/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| LayoutMapError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.layoutmap/layoutmap.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| LayoutMapError::io(path, e))?;

    let config: AppConfig = toml::from_str(&content).map_err(|e| {
        LayoutMapError::config(format!("failed to parse {}: {e}", path.display()))
    })?;

    validate_config(&config)?;
    Ok(config)
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| LayoutMapError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| LayoutMapError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| LayoutMapError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

/// Reject values that would make extraction ambiguous.
pub fn validate_config(config: &AppConfig) -> Result<()> {
    if config.extraction.blank_cell_marker.trim().is_empty() {
        return Err(LayoutMapError::config(
            "extraction.blank_cell_marker must not be empty",
        ));
    }
    Ok(())
}
