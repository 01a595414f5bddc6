//! ZIP archive backend
//!
//! Every file member of the archive is converted by the same dispatcher that
//! handles top-level inputs, using the member's own path as its file name, so
//! a `.docx` inside a ZIP reads exactly like a `.docx` on disk and a ZIP inside
//! a ZIP is walked recursively. Each member's text is preceded by a
//! `--- Zipped File: {path} ---` line and followed by a blank line.

use crate::converter::{processing_error, DocumentConverter};
use crate::traits::{BackendOptions, DocumentBackend};
use doctext_archive::{extract_zip_streaming, ArchiveError};
use doctext_core::{DoctextError, InputFormat};
use log::{debug, warn};
use std::fmt::Write;

/// Archive backend for ZIP files
///
/// Borrows the converter that dispatches its members and remembers how deeply
/// it is nested (0 for an archive given directly to the converter).
#[derive(Debug, Clone, Copy)]
pub struct ArchiveBackend<'a> {
    converter: &'a DocumentConverter,
    depth: usize,
}

impl<'a> ArchiveBackend<'a> {
    /// Create an archive backend at the given nesting depth
    #[inline]
    #[must_use = "creates a new archive backend"]
    pub const fn new(converter: &'a DocumentConverter, depth: usize) -> Self {
        Self { converter, depth }
    }

    /// Nesting depth of the archive this backend reads
    #[inline]
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }
}

impl DocumentBackend for ArchiveBackend<'_> {
    #[inline]
    fn format(&self) -> InputFormat {
        InputFormat::Zip
    }

    fn extract_text(&self, data: &[u8], options: &BackendOptions) -> Result<String, DoctextError> {
        if let Some(max) = options.max_nesting_depth {
            if self.depth > max {
                return Err(ArchiveError::TooDeep { max }.into());
            }
        }

        let mut text = String::new();
        let members = extract_zip_streaming(data, options.max_entry_size, |member| {
            let _ = writeln!(text, "--- Zipped File: {} ---", member.name);
            match member.contents {
                Ok(bytes) => {
                    let converted =
                        self.converter
                            .convert_at_depth(&member.name, &bytes, self.depth + 1);
                    text.push_str(&converted);
                }
                Err(e) => {
                    warn!("Skipping archive entry {}: {e}", member.name);
                    text.push_str(&processing_error(&member.name, &e));
                }
            }
            text.push_str("\n\n");
        })?;

        debug!("Converted {members} archive member(s) at depth {}", self.depth);
        Ok(text)
    }
}
