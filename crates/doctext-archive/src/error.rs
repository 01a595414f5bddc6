//! Error types for archive operations

use thiserror::Error;

/// Errors that can occur during archive operations
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// IO error while decompressing a member
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid ZIP archive format
    #[error("Invalid ZIP archive: {0}")]
    InvalidZip(#[from] zip::result::ZipError),

    /// Member is password-protected
    #[error("File '{name}' is password-protected")]
    PasswordProtected {
        /// Name of the encrypted member
        name: String,
    },

    /// Archive nesting exceeds depth limit
    #[error("Archive nesting too deep (max depth {max})")]
    TooDeep {
        /// Maximum allowed nesting depth
        max: usize,
    },

    /// File within archive exceeds size limit
    #[error("File '{name}' is too large ({size} bytes, max {max} bytes)")]
    FileTooLarge {
        /// Name of the file that exceeded the limit
        name: String,
        /// Uncompressed size in bytes (declared, or observed while reading)
        size: u64,
        /// Maximum allowed file size in bytes
        max: u64,
    },
}
