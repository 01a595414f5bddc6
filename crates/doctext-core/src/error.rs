//! Error types for document conversion operations.
//!
//! Backends report failures through [`DoctextError`]. The dispatcher in
//! `doctext-backend` turns these into inline text for the caller, so most users
//! of the library only see them when calling the `try_*` entry points.

use doctext_archive::ArchiveError;
use thiserror::Error;

/// Error types that can occur during document conversion.
///
/// # Examples
///
/// ```rust,ignore
/// // Note: DocumentConverter is in doctext-backend crate
/// use doctext_backend::DocumentConverter;
/// use doctext_core::DoctextError;
///
/// let converter = DocumentConverter::new();
///
/// match converter.try_convert_bytes("report.docx", &bytes) {
///     Ok(text) => println!("{text}"),
///     Err(DoctextError::BackendError(msg)) => eprintln!("Corrupt document: {msg}"),
///     Err(e) => eprintln!("Other error: {e}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum DoctextError {
    /// File I/O error.
    ///
    /// Occurs when reading an input file from disk fails.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Format detection error.
    #[error("Format detection error: {0}")]
    FormatError(String),

    /// A backend could not make sense of the document
    /// (not a valid package, missing required part, malformed XML).
    #[error("Backend error: {0}")]
    BackendError(String),

    /// ZIP container could not be walked, or an archive limit was hit.
    #[error("Archive error: {0}")]
    ArchiveError(#[from] ArchiveError),
}

/// Result type alias for doctext operations
pub type Result<T> = std::result::Result<T, DoctextError>;
