//! # doctext Core
//!
//! Shared types for flattening office documents and archives to plain text.
//!
//! The conversion backends and the extension dispatcher live in
//! `doctext-backend`; this crate holds what both the backends and the front
//! ends need to agree on:
//!
//! - [`InputFormat`]: the fixed extension table (`.docx`, `.xlsx`, `.pptx`,
//!   `.html`/`.htm`, `.zip`)
//! - [`DoctextError`]: the error type backends return
//! - [`ConversionResult`], [`output::preview`] and [`output::text_file_name`]:
//!   how a finished conversion is shown and saved
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! // Note: DocumentConverter is in doctext-backend crate
//! use doctext_backend::DocumentConverter;
//! use doctext_core::output::{preview, DEFAULT_PREVIEW_CHARS};
//!
//! let converter = DocumentConverter::new();
//! let bytes = std::fs::read("minutes.docx")?;
//! let text = converter.convert_bytes("minutes.docx", &bytes);
//! println!("{}", preview(&text, DEFAULT_PREVIEW_CHARS));
//! # Ok::<(), std::io::Error>(())
//! ```

pub mod error;
pub mod format;
pub mod output;

pub use error::{DoctextError, Result};
pub use format::InputFormat;
pub use output::{ConversionResult, DEFAULT_PREVIEW_CHARS};
