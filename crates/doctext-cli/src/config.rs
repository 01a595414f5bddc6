//! Configuration files for the `doctext` command
//!
//! Configuration files can be placed in:
//! - User home directory: `~/.doctext.toml` (user defaults)
//! - Project directory: `./.doctext.toml` (project defaults)
//! - Custom location via `--config` (replaces both)
//!
//! Precedence order (highest to lowest):
//! 1. Command-line arguments (`--preview-chars`, `--max-depth`, etc.)
//! 2. Project config (`./.doctext.toml`)
//! 3. User config (`~/.doctext.toml`)
//! 4. Built-in defaults

use anyhow::{Context, Result};
use colored::Colorize;
use doctext_backend::{BackendOptions, FallbackPolicy};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the home and current directories
pub const CONFIG_FILE_NAME: &str = ".doctext.toml";

/// Configuration file structure for `.doctext.toml`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default settings for the convert command
    #[serde(skip_serializing_if = "Option::is_none")]
    pub convert: Option<ConvertConfig>,
}

/// `[convert]` section
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// Characters shown in the preview
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_chars: Option<usize>,

    /// Handling of unrecognised extensions ("report" or "decode-text")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<FallbackPolicy>,

    /// Deepest archive nesting that is still opened
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_nesting_depth: Option<usize>,

    /// Largest archive entry that is converted, e.g. "100M"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_entry_size: Option<String>,
}

impl ConvertConfig {
    /// Fill unset fields from a lower-precedence config
    #[must_use]
    pub fn or(self, lower: Self) -> Self {
        Self {
            preview_chars: self.preview_chars.or(lower.preview_chars),
            fallback: self.fallback.or(lower.fallback),
            max_nesting_depth: self.max_nesting_depth.or(lower.max_nesting_depth),
            max_entry_size: self.max_entry_size.or(lower.max_entry_size),
        }
    }

    /// Backend options described by this section, defaults for unset fields
    ///
    /// # Errors
    ///
    /// Returns an error if `max_entry_size` is not a valid size.
    pub fn backend_options(&self) -> Result<BackendOptions> {
        let mut options = BackendOptions::default();
        if let Some(fallback) = self.fallback {
            options = options.with_fallback(fallback);
        }
        if let Some(depth) = self.max_nesting_depth {
            options = options.with_max_nesting_depth(Some(depth));
        }
        if let Some(ref size) = self.max_entry_size {
            let bytes = parse_file_size(size)
                .map_err(|e| anyhow::anyhow!("Invalid max_entry_size '{size}': {e}"))?;
            options = options.with_max_entry_size(bytes);
        }
        Ok(options)
    }
}

impl Config {
    /// Load configuration from file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content).map_err(|e| {
            // TOML errors include line/column information, preserve it
            anyhow::anyhow!("Failed to parse config file {}: {e}", path.display())
        })
    }

    /// Load the configuration in effect
    ///
    /// An explicit path must exist and parse. Otherwise the user and project
    /// files are discovered and merged; a broken discovered file is reported
    /// as a warning and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit config file cannot be loaded.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from_file(path);
        }
        let (user_config, project_config) = Self::discover_configs();
        Ok(Self::merge(user_config, project_config))
    }

    /// Find and load configuration files
    /// Returns (`user_config`, `project_config`)
    fn discover_configs() -> (Option<Self>, Option<Self>) {
        let user_config = Self::user_config_path().and_then(|p| Self::load_optional(&p, "user"));
        let project_config = Self::load_optional(&PathBuf::from(CONFIG_FILE_NAME), "project");
        (user_config, project_config)
    }

    /// Path of the user config (`~/.doctext.toml`)
    #[must_use]
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(CONFIG_FILE_NAME))
    }

    fn load_optional(path: &Path, kind: &str) -> Option<Self> {
        if !path.exists() {
            return None;
        }
        match Self::load_from_file(path) {
            Ok(config) => {
                debug!("Loaded {kind} config from {}", path.display());
                Some(config)
            }
            Err(e) => {
                eprintln!(
                    "{} Failed to load {kind} config from {}: {e}",
                    "Warning:".yellow().bold(),
                    path.display(),
                );
                None
            }
        }
    }

    /// Merge configs with precedence: project config > user config > defaults
    #[must_use]
    pub fn merge(user_config: Option<Self>, project_config: Option<Self>) -> Self {
        let user = user_config.and_then(|c| c.convert);
        let project = project_config.and_then(|c| c.convert);

        let convert = match (project, user) {
            (Some(project), Some(user)) => Some(project.or(user)),
            (project, user) => project.or(user),
        };

        Self { convert }
    }

    /// The `[convert]` section, empty when absent
    #[must_use]
    pub fn convert(&self) -> ConvertConfig {
        self.convert.clone().unwrap_or_default()
    }
}

/// Parse a human-readable file size string into bytes.
///
/// Supports formats:
/// - Plain numbers: "1048576" -> 1048576 bytes
/// - KB suffix: "100K", "100KB", "100k" -> 102400 bytes
/// - MB suffix: "10M", "10MB", "10m" -> 10485760 bytes
/// - GB suffix: "1G", "1GB", "1g" -> 1073741824 bytes
///
/// Decimal values are supported: "1.5M" -> 1572864 bytes
///
/// # Errors
///
/// Returns a message describing why the string is not a size.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn parse_file_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty file size".to_string());
    }

    // Check for suffix (case-insensitive)
    let s_upper = s.to_uppercase();
    let (num_str, multiplier) = if s_upper.ends_with("GB") {
        (&s[..s.len() - 2], 1024 * 1024 * 1024)
    } else if s_upper.ends_with("MB") {
        (&s[..s.len() - 2], 1024 * 1024)
    } else if s_upper.ends_with("KB") {
        (&s[..s.len() - 2], 1024)
    } else if s_upper.ends_with('G') {
        (&s[..s.len() - 1], 1024 * 1024 * 1024)
    } else if s_upper.ends_with('M') {
        (&s[..s.len() - 1], 1024 * 1024)
    } else if s_upper.ends_with('K') {
        (&s[..s.len() - 1], 1024)
    } else if s_upper.ends_with('B') {
        // Just "B" suffix means bytes
        (&s[..s.len() - 1], 1)
    } else {
        // No suffix - assume bytes
        (s, 1)
    };

    let num_str = num_str.trim();
    if num_str.is_empty() {
        return Err("missing numeric value".to_string());
    }

    // Parse as float to support decimals like "1.5M"
    let value: f64 = num_str
        .parse()
        .map_err(|_| format!("invalid number: '{num_str}'"))?;

    if !value.is_finite() || value < 0.0 {
        return Err("file size must be a non-negative number".to_string());
    }

    Ok((value * f64::from(multiplier)).round() as u64)
}
