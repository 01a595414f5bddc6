//! Extension-based dispatcher over the document backends
//!
//! [`RustDocumentConverter`] looks at nothing but the file name: the lowercase
//! extension picks the backend, and an unknown extension is handled by the
//! configured [`FallbackPolicy`]. A backend error never escapes
//! [`RustDocumentConverter::convert_bytes`]; it becomes the text
//! `An error occurred while processing {name}: {message}` in place of the
//! document. Archive members go through the same path one at a time, so a
//! damaged member only replaces its own text.

use crate::archive::ArchiveBackend;
use crate::docx::DocxBackend;
use crate::html::HtmlBackend;
use crate::pptx::PptxBackend;
use crate::traits::{BackendOptions, DocumentBackend, FallbackPolicy};
use crate::xlsx::XlsxBackend;
use doctext_core::format::dotted_extension;
use doctext_core::{ConversionResult, DoctextError, InputFormat};
use log::{debug, warn};
use std::fmt::Display;
use std::path::Path;
use std::time::Instant;

/// Inline text standing in for a document (or archive member) that failed to convert
///
/// ```
/// use doctext_backend::processing_error;
///
/// assert_eq!(
///     processing_error("deck.pptx", "Missing ppt/presentation.xml"),
///     "An error occurred while processing deck.pptx: Missing ppt/presentation.xml"
/// );
/// ```
#[must_use]
pub fn processing_error(name: &str, error: impl Display) -> String {
    format!("An error occurred while processing {name}: {error}")
}

/// Inline text for a file whose extension is not in the format table
///
/// ```
/// use doctext_backend::unsupported_message;
///
/// assert_eq!(unsupported_message("scan.PDF"), "Unsupported file type: '.pdf'");
/// assert_eq!(unsupported_message("README"), "Unsupported file type: ''");
/// ```
#[must_use]
pub fn unsupported_message(name: &str) -> String {
    format!("Unsupported file type: '{}'", dotted_extension(name))
}

/// Document converter dispatching on file extension
///
/// Holds only immutable options, so one converter can be reused for any
/// number of inputs and shared between threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RustDocumentConverter {
    options: BackendOptions,
}

/// Type alias for convenience - makes `DocumentConverter` available as a more natural name
pub type DocumentConverter = RustDocumentConverter;

impl RustDocumentConverter {
    /// Create a converter with default options
    #[inline]
    #[must_use = "creating a converter that is not used is a waste of resources"]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a converter with the given options
    ///
    /// # Examples
    /// ```
    /// use doctext_backend::{BackendOptions, DocumentConverter, FallbackPolicy};
    ///
    /// let converter = DocumentConverter::with_options(
    ///     BackendOptions::default().with_fallback(FallbackPolicy::DecodeText),
    /// );
    /// assert_eq!(converter.convert_bytes("notes.txt", b"plain"), "plain");
    /// ```
    #[inline]
    #[must_use = "creating a converter that is not used is a waste of resources"]
    pub const fn with_options(options: BackendOptions) -> Self {
        Self { options }
    }

    /// Options every backend is invoked with
    #[inline]
    #[must_use = "returns the backend options"]
    pub const fn options(&self) -> &BackendOptions {
        &self.options
    }

    /// Detect the format of a file from its name
    #[inline]
    #[must_use = "detects format from file name"]
    pub fn detect_format(name: &str) -> Option<InputFormat> {
        InputFormat::from_file_name(name)
    }

    /// Convert a document held in memory to text
    ///
    /// Never fails: conversion errors are returned as descriptive text.
    #[must_use = "returns the text of the document"]
    pub fn convert_bytes(&self, name: &str, data: &[u8]) -> String {
        self.convert_at_depth(name, data, 0)
    }

    /// Convert a document held in memory, reporting a top-level failure as an error
    ///
    /// Archive members are still isolated: a damaged member inside a valid
    /// ZIP shows up as text, not as an error.
    ///
    /// # Errors
    /// Returns an error if the document (or the archive as a whole) cannot be read.
    pub fn try_convert_bytes(&self, name: &str, data: &[u8]) -> Result<String, DoctextError> {
        self.try_convert_at_depth(name, data, 0)
    }

    /// Convert a document from a file path
    ///
    /// The file name (without directories) is what conversion messages and
    /// archive dispatch see.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read.
    #[must_use = "conversion result contains the converted text and should be processed"]
    pub fn convert_file<P: AsRef<Path>>(&self, path: P) -> Result<ConversionResult, DoctextError> {
        let path_ref = path.as_ref();
        let name = path_ref
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                DoctextError::FormatError(format!("Not a file path: {}", path_ref.display()))
            })?;

        let data = std::fs::read(path_ref)?;

        let start = Instant::now();
        let text = self.convert_bytes(&name, &data);
        let latency = start.elapsed();
        debug!("Converted {name} in {latency:?}");

        Ok(ConversionResult {
            format: Self::detect_format(&name),
            name,
            text,
            latency,
        })
    }

    pub(crate) fn convert_at_depth(&self, name: &str, data: &[u8], depth: usize) -> String {
        match self.try_convert_at_depth(name, data, depth) {
            Ok(text) => text,
            Err(e) => {
                warn!("Failed to convert {name}: {e}");
                processing_error(name, &e)
            }
        }
    }

    fn try_convert_at_depth(
        &self,
        name: &str,
        data: &[u8],
        depth: usize,
    ) -> Result<String, DoctextError> {
        let Some(format) = Self::detect_format(name) else {
            return Ok(self.fallback_text(name, data));
        };
        debug!("Dispatching {name} to {format} backend (depth {depth})");

        let options = &self.options;
        match format {
            InputFormat::Docx => DocxBackend.extract_text(data, options),
            InputFormat::Xlsx => XlsxBackend.extract_text(data, options),
            InputFormat::Pptx => PptxBackend.extract_text(data, options),
            InputFormat::Html => HtmlBackend.extract_text(data, options),
            InputFormat::Zip => ArchiveBackend::new(self, depth).extract_text(data, options),
        }
    }

    fn fallback_text(&self, name: &str, data: &[u8]) -> String {
        match self.options.fallback {
            FallbackPolicy::Report => unsupported_message(name),
            FallbackPolicy::DecodeText => match std::str::from_utf8(data) {
                Ok(text) => text.to_string(),
                Err(_) => {
                    debug!("{name} is not valid UTF-8, reporting as unsupported");
                    unsupported_message(name)
                }
            },
        }
    }
}
