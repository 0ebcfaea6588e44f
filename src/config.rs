//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. The file lives in
//! the project root (next to `src/` and `assets/`) and is sparse: stock
//! defaults are overridden by whatever keys the file sets.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! path_prefix = "/twofold/"   # URL prefix the site is served under
//!
//! [dir]
//! input = "src"               # Content root (holds places/ and visits/)
//! output = "_site"            # Rendered site
//! includes = "_includes"      # Template partials, relative to input
//! data = "_data"              # Generated site data, relative to input
//!
//! [passthrough]
//! copy = ["assets", "css"]    # Static directories copied verbatim
//!
//! [compress]
//! assets_dir = "assets"       # Images compressed by `twofold compress`
//! quality = 45                # JPEG quality (1-100)
//! extensions = ["jpg", "jpeg", "png", "webp"]
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the config file looked up in the project root.
pub const CONFIG_FILENAME: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// URL prefix the site is served under; starts and ends with `/`.
    pub path_prefix: String,
    pub dir: DirConfig,
    pub passthrough: PassthroughConfig,
    pub compress: CompressConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            path_prefix: "/twofold/".to_string(),
            dir: DirConfig::default(),
            passthrough: PassthroughConfig::default(),
            compress: CompressConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.path_prefix.starts_with('/') || !self.path_prefix.ends_with('/') {
            return Err(ConfigError::Validation(
                "path_prefix must start and end with '/'".into(),
            ));
        }
        if !(1..=100).contains(&self.compress.quality) {
            return Err(ConfigError::Validation(
                "compress.quality must be 1-100".into(),
            ));
        }
        if self.compress.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "compress.extensions must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Directory layout, relative to the project root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DirConfig {
    pub input: String,
    pub output: String,
    /// Relative to `input`.
    pub includes: String,
    /// Relative to `input`.
    pub data: String,
}

impl Default for DirConfig {
    fn default() -> Self {
        Self {
            input: "src".to_string(),
            output: "_site".to_string(),
            includes: "_includes".to_string(),
            data: "_data".to_string(),
        }
    }
}

impl DirConfig {
    pub fn input_dir(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.input)
    }

    pub fn data_dir(&self, project_root: &Path) -> PathBuf {
        self.input_dir(project_root).join(&self.data)
    }
}

/// Static directories the renderer copies without processing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PassthroughConfig {
    pub copy: Vec<String>,
}

impl Default for PassthroughConfig {
    fn default() -> Self {
        Self {
            copy: vec!["assets".to_string(), "css".to_string()],
        }
    }
}

/// Asset compression settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompressConfig {
    /// Directory scanned by `twofold compress`, relative to the project root.
    pub assets_dir: String,
    /// JPEG encoding quality (1 = worst, 100 = best).
    pub quality: u32,
    /// Lowercase file extensions treated as images.
    pub extensions: Vec<String>,
}

impl Default for CompressConfig {
    fn default() -> Self {
        Self {
            assets_dir: "assets".to_string(),
            quality: 45,
            extensions: ["jpg", "jpeg", "png", "webp"]
                .iter()
                .map(|e| e.to_string())
                .collect(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// Base layer for merging user overrides on top.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(SiteConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the project root.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Twofold Configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# URL prefix the site is served under. Must start and end with '/'.
path_prefix = "/twofold/"

# ---------------------------------------------------------------------------
# Directories (relative to the project root)
# ---------------------------------------------------------------------------
[dir]
# Content root. Place records live in places/, visit records in visits/.
input = "src"

# Where the renderer writes the finished site.
output = "_site"

# Template partials, relative to the content root.
includes = "_includes"

# Generated data (site-data.json, years.json), relative to the content root.
data = "_data"

# ---------------------------------------------------------------------------
# Static directories copied verbatim into the output
# ---------------------------------------------------------------------------
[passthrough]
copy = ["assets", "css"]

# ---------------------------------------------------------------------------
# Asset compression (twofold compress)
# ---------------------------------------------------------------------------
[compress]
# Directory holding the images to compress.
assets_dir = "assets"

# JPEG quality (1 = worst, 100 = best). Low values compress aggressively.
quality = 45

# File extensions treated as images (case-insensitive).
extensions = ["jpg", "jpeg", "png", "webp"]
"##
}
