//! Batch configuration module.
//!
//! Handles loading, validating, and layering configuration. Values come from
//! three layers, each overriding the one before it:
//!
//! 1. stock defaults (below)
//! 2. an optional `batch-resize.toml` file
//! 3. command-line flags
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [naming]
//! prefix = "image_"     # Output names are <prefix><NNN>.png
//! start_index = 1       # First number of the batch (negative → 1)
//!
//! [resize]
//! # width = 800         # Target width in pixels (omit to leave unset)
//! # height = 600        # Target height in pixels (omit to leave unset)
//! keep_aspect = false   # Derive the missing edge from the source ratio
//! ```
//!
//! Unset width/height is expressed by omitting the key. Zero is not a way to
//! say "unset": it is rejected by validation. Unknown keys are rejected to
//! catch typos early.

use crate::imaging::{Quality, TargetSize};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File name looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "batch-resize.toml";

/// Prefix used when none (or an empty one) is configured.
pub const DEFAULT_PREFIX: &str = "image_";

/// Start index used when none (or a negative one) is configured.
pub const DEFAULT_START_INDEX: u64 = 1;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `batch-resize.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatchConfig {
    /// Output naming settings.
    pub naming: NamingConfig,
    /// Target size settings.
    pub resize: ResizeSettings,
}

/// Output naming settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NamingConfig {
    /// Text placed before the zero-padded index. Empty means the default.
    pub prefix: String,
    /// Index given to the first processed image. Negative means the default.
    pub start_index: i64,
}

impl Default for NamingConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            start_index: DEFAULT_START_INDEX as i64,
        }
    }
}

/// Target size settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResizeSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    pub keep_aspect: bool,
}

/// Values given on the command line. `None` leaves the lower layer in place.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub prefix: Option<String>,
    pub start_index: Option<i64>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Flags can only switch aspect locking on.
    pub keep_aspect: bool,
}

/// Settings for one batch run, after layering and normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeConfig {
    pub prefix: String,
    pub start_index: u64,
    pub target: TargetSize,
    pub quality: Quality,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        BatchConfig::default().resize_config()
    }
}

impl BatchConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resize.width == Some(0) {
            return Err(ConfigError::Validation(
                "resize.width must be at least 1 (omit it to leave the width unset)".into(),
            ));
        }
        if self.resize.height == Some(0) {
            return Err(ConfigError::Validation(
                "resize.height must be at least 1 (omit it to leave the height unset)".into(),
            ));
        }
        if self.naming.prefix.contains(['/', '\\']) {
            return Err(ConfigError::Validation(
                "naming.prefix must not contain path separators".into(),
            ));
        }
        Ok(())
    }

    /// Apply command-line values on top of this config.
    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(prefix) = overrides.prefix {
            self.naming.prefix = prefix;
        }
        if let Some(start) = overrides.start_index {
            self.naming.start_index = start;
        }
        if let Some(width) = overrides.width {
            self.resize.width = Some(width);
        }
        if let Some(height) = overrides.height {
            self.resize.height = Some(height);
        }
        if overrides.keep_aspect {
            self.resize.keep_aspect = true;
        }
    }

    /// Normalize into the settings a batch runs with.
    ///
    /// - empty prefix → `image_`
    /// - negative start index → 1
    pub fn resize_config(&self) -> ResizeConfig {
        let prefix = if self.naming.prefix.is_empty() {
            DEFAULT_PREFIX.to_string()
        } else {
            self.naming.prefix.clone()
        };
        ResizeConfig {
            prefix,
            start_index: normalize_start_index(self.naming.start_index),
            target: TargetSize {
                width: self.resize.width,
                height: self.resize.height,
                keep_aspect: self.resize.keep_aspect,
            },
            quality: Quality::default(),
        }
    }
}

/// Negative start indices fall back to 1.
pub fn normalize_start_index(raw: i64) -> u64 {
    u64::try_from(raw).unwrap_or(DEFAULT_START_INDEX)
}

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(BatchConfig::default()).expect("default config must serialize")
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

/// Read a config file as a raw TOML value.
pub fn read_config_file(path: &Path) -> Result<toml::Value, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Load `batch-resize.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(DEFAULT_CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    read_config_file(&config_path).map(Some)
}

/// Merge an optional overlay onto a base value, then deserialize.
///
/// Validation happens later, once command-line overrides are applied.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<BatchConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    Ok(merged.try_into()?)
}

/// Load configuration.
///
/// An explicit `path` must exist. Without one, `batch-resize.toml` in `dir`
/// is used if present, else the stock defaults.
pub fn load_config(path: Option<&Path>, dir: &Path) -> Result<BatchConfig, ConfigError> {
    let overlay = match path {
        Some(p) => Some(read_config_file(p)?),
        None => load_raw_config(dir)?,
    };
    resolve_config(stock_defaults_value(), overlay)
}

/// Returns a fully-commented stock `batch-resize.toml` with all keys explained.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# batch-resize configuration
# ==========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Command-line flags override this file.
#
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Output naming
# ---------------------------------------------------------------------------
[naming]
# Text placed before the index. Output files are named <prefix><NNN>.png,
# with the index zero-padded to at least three digits. Empty means "image_".
prefix = "image_"

# Number given to the first successfully processed image. Each further
# success takes the next number; failed inputs do not use one up.
# Negative values fall back to 1.
start_index = 1

# ---------------------------------------------------------------------------
# Target size
# ---------------------------------------------------------------------------
[resize]
# Target size in pixels. Leave a key out to keep that edge unset; zero is
# rejected. With neither set, images keep their original size.
# width = 800
# height = 600

# When only one of width/height is set, derive the other from the source
# aspect ratio. Ignored when both or neither are set.
keep_aspect = false
"##
}
