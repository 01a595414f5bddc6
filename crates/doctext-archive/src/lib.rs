//! Archive member enumeration for doctext
//!
//! This crate walks ZIP archives held in memory and hands each file member to a
//! caller-supplied processor. It does not interpret member contents; recursive
//! conversion of nested documents (including ZIP within ZIP) is driven by the
//! dispatcher in `doctext-backend`, which calls back into this crate for every
//! archive it meets.
//!
//! # Features
//!
//! - **In-memory**: archives are read from a byte slice, nothing touches disk
//! - **Archive order**: members are delivered in central-directory order
//! - **Filtering**: directory records and macOS resource forks (`__MACOSX/...`)
//!   are skipped
//! - **Per-member failures**: encrypted or oversized members are reported to the
//!   processor as errors instead of aborting the walk
//!
//! # Usage
//!
//! ```no_run
//! use doctext_archive::zip::extract_zip_streaming;
//! use doctext_archive::MAX_FILE_SIZE;
//!
//! let data = std::fs::read("bundle.zip").unwrap();
//! extract_zip_streaming(&data, MAX_FILE_SIZE, |member| {
//!     match member.contents {
//!         Ok(bytes) => println!("{} ({} bytes)", member.name, bytes.len()),
//!         Err(e) => println!("{}: {e}", member.name),
//!     }
//! })
//! .unwrap();
//! ```

pub mod error;
pub mod zip;

// =============================================================================
// Archive Constants
// =============================================================================

/// Maximum size for a single file within an archive (100 MB).
///
/// Members exceeding this limit are reported as [`ArchiveError::FileTooLarge`]
/// instead of being decompressed.
pub const MAX_FILE_SIZE: u64 = 100_000_000;

/// Maximum nesting depth for recursive archive extraction.
///
/// Limits how deeply nested archives can be opened (e.g., ZIP within ZIP).
pub const MAX_NESTING_DEPTH: usize = 10;

/// Path prefix macOS Finder adds for resource forks when compressing folders.
pub const RESOURCE_FORK_PREFIX: &str = "__MACOSX";

// Re-export commonly used types
pub use error::ArchiveError;
pub use zip::{extract_zip_streaming, is_resource_fork, ZipMember};
