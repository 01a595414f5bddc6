//! Document format backends for `doctext`
//!
//! This crate flattens office documents and archives to text. Each format has
//! a backend implementing [`DocumentBackend`]; the [`DocumentConverter`] picks
//! one by file extension and never lets a conversion failure escape as a
//! panic or an error from [`DocumentConverter::convert_bytes`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         DocumentConverter                           │
//! │       (extension dispatch, fallback policy, error isolation)        │
//! └─────────────────────────────────────────────────────────────────────┘
//!                                    │
//!                                    ▼
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       DocumentBackend Trait                         │
//! │  fn extract_text(&self, data: &[u8], options) -> Result<String>     │
//! └─────────────────────────────────────────────────────────────────────┘
//!          │              │              │              │            │
//!          ▼              ▼              ▼              ▼            ▼
//!    DocxBackend    XlsxBackend    PptxBackend    HtmlBackend   ArchiveBackend
//!   (zip + xml)     (calamine)    (zip + xml)     (html2md)    (recurses into
//!                                                               the converter)
//! ```
//!
//! # Supported Formats
//!
//! | Format | Backend | Output |
//! |--------|---------|--------|
//! | DOCX | [`DocxBackend`] | Body paragraphs, one per line |
//! | XLSX | [`XlsxBackend`] | `--- Sheet: name ---`, then tab-separated rows |
//! | PPTX | [`PptxBackend`] | `--- Slide n ---`, then the text of each text shape |
//! | HTML/HTM | [`HtmlBackend`] | Markdown |
//! | ZIP | [`ArchiveBackend`] | `--- Zipped File: path ---`, then the member's text |
//!
//! Any other extension yields `Unsupported file type: '.ext'`, or the raw
//! text when [`FallbackPolicy::DecodeText`] is selected and the bytes are
//! valid UTF-8.
//!
//! # Quick Start
//!
//! ```no_run
//! use doctext_backend::DocumentConverter;
//!
//! let converter = DocumentConverter::new();
//! let bytes = std::fs::read("bundle.zip")?;
//! let text = converter.convert_bytes("bundle.zip", &bytes);
//! println!("{text}");
//! # Ok::<(), std::io::Error>(())
//! ```
//!
//! # Configuration
//!
//! ```
//! use doctext_backend::{BackendOptions, DocumentConverter, FallbackPolicy};
//!
//! let options = BackendOptions::default()
//!     .with_fallback(FallbackPolicy::DecodeText)
//!     .with_max_nesting_depth(Some(3))
//!     .with_max_entry_size(10 * 1024 * 1024);
//! let converter = DocumentConverter::with_options(options);
//! assert_eq!(converter.options().max_nesting_depth, Some(3));
//! ```

pub mod archive;
pub mod converter;
pub mod docx;
pub mod html;
pub mod pptx;
pub mod traits;
pub mod utils;
pub mod xlsx;

pub use archive::ArchiveBackend;
pub use converter::{processing_error, unsupported_message, DocumentConverter, RustDocumentConverter};
pub use docx::DocxBackend;
pub use html::HtmlBackend;
pub use pptx::{PptxBackend, SlideShape};
pub use traits::{BackendOptions, DocumentBackend, FallbackPolicy};
pub use xlsx::XlsxBackend;
