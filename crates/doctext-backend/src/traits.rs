//! Core trait definitions for document backends

use doctext_archive::{MAX_FILE_SIZE, MAX_NESTING_DEPTH};
use doctext_core::{DoctextError, InputFormat};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What the converter does with a file whose extension is not in the format table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FallbackPolicy {
    /// Report the file as unsupported without looking at its bytes
    #[default]
    Report,
    /// Return the bytes verbatim when they are valid UTF-8, otherwise report
    /// the file as unsupported
    DecodeText,
}

impl fmt::Display for FallbackPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Report => write!(f, "report"),
            Self::DecodeText => write!(f, "decode-text"),
        }
    }
}

impl std::str::FromStr for FallbackPolicy {
    type Err = String;

    /// Parse policy from string (case-insensitive)
    ///
    /// Accepts: "report", "unsupported" | "decode-text", "decode", "text"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "report" | "unsupported" => Ok(Self::Report),
            "decode-text" | "decode" | "text" => Ok(Self::DecodeText),
            _ => Err(format!(
                "Unknown fallback '{s}'. Valid options: report, decode-text"
            )),
        }
    }
}

/// Options for backend processing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendOptions {
    /// Handling of unrecognised extensions
    pub fallback: FallbackPolicy,

    /// Deepest archive nesting that is still opened (None = unlimited)
    ///
    /// The outermost archive is depth 0, a ZIP inside it depth 1, and so on.
    pub max_nesting_depth: Option<usize>,

    /// Largest uncompressed archive entry, in bytes, that is converted
    pub max_entry_size: u64,
}

impl BackendOptions {
    /// Set the fallback policy for unrecognised extensions
    #[inline]
    #[must_use = "returns options with fallback policy configured"]
    pub const fn with_fallback(mut self, fallback: FallbackPolicy) -> Self {
        self.fallback = fallback;
        self
    }

    /// Set the archive nesting limit
    ///
    /// # Examples
    /// ```
    /// use doctext_backend::BackendOptions;
    ///
    /// // Only the top-level archive is opened; nested ZIPs report an error
    /// let opts = BackendOptions::default().with_max_nesting_depth(Some(0));
    /// assert_eq!(opts.max_nesting_depth, Some(0));
    /// ```
    #[inline]
    #[must_use = "returns options with nesting limit configured"]
    pub const fn with_max_nesting_depth(mut self, depth: Option<usize>) -> Self {
        self.max_nesting_depth = depth;
        self
    }

    /// Set the per-entry size limit for archives
    #[inline]
    #[must_use = "returns options with entry size limit configured"]
    pub const fn with_max_entry_size(mut self, bytes: u64) -> Self {
        self.max_entry_size = bytes;
        self
    }
}

impl Default for BackendOptions {
    #[inline]
    fn default() -> Self {
        Self {
            fallback: FallbackPolicy::default(),
            max_nesting_depth: Some(MAX_NESTING_DEPTH),
            max_entry_size: MAX_FILE_SIZE,
        }
    }
}

/// Main trait for document backends
///
/// Each backend (DOCX, XLSX, etc.) implements this trait to flatten one
/// document held in memory to text.
pub trait DocumentBackend: Send + Sync {
    /// Get the format this backend handles
    fn format(&self) -> InputFormat;

    /// Extract the text of a document from bytes
    ///
    /// # Errors
    /// Returns an error if the bytes are not a readable document of this format.
    fn extract_text(&self, data: &[u8], options: &BackendOptions) -> Result<String, DoctextError>;

    /// Check if this backend can handle the given format
    fn can_handle(&self, format: InputFormat) -> bool {
        self.format() == format
    }
}
