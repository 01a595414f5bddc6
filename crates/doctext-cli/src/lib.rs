//! Command-line interface for `doctext`
//!
//! This crate provides the `doctext` command-line tool, which flattens office
//! documents and ZIP archives to plain text.
//!
//! # Installation
//!
//! ```bash
//! # From source
//! cargo install --path crates/doctext-cli
//!
//! # Or build the binary
//! cargo build --release -p doctext-cli
//! ```
//!
//! # Quick Start
//!
//! ```bash
//! # Convert a document: prints a preview, saves minutes.txt next to it
//! doctext convert minutes.docx
//!
//! # Convert every document inside an archive
//! doctext convert bundle.zip -o bundle-contents.txt
//!
//! # Print the full text instead of saving it
//! doctext convert deck.pptx --stdout
//!
//! # List supported input formats
//! doctext formats
//! ```
//!
//! # Commands
//!
//! ## `convert` - Single File Conversion
//!
//! ```bash
//! # Longer preview, overwrite an existing output file
//! doctext convert report.docx --preview-chars 5000 --force
//!
//! # Return plain-text files inside archives verbatim
//! doctext convert bundle.zip --decode-unknown
//!
//! # Tighter archive limits
//! doctext convert upload.zip --max-depth 2 --max-entry-size 20M
//! ```
//!
//! Problems inside a document (a corrupt archive member, an unsupported
//! extension) become part of the text and do not change the exit code.
//!
//! ## `formats` - List Supported Formats
//!
//! ```bash
//! doctext formats
//! doctext formats --json
//! ```
//!
//! # Configuration
//!
//! Defaults for `convert` are read from `~/.doctext.toml` and
//! `./.doctext.toml` (project settings win), or from the file given with
//! `--config`. Command-line flags override both. See [`config`].
//!
//! ```toml
//! [convert]
//! preview_chars = 1000
//! fallback = "report"      # or "decode-text"
//! max_nesting_depth = 10
//! max_entry_size = "100M"
//! ```
//!
//! # Logging
//!
//! Diagnostics go to stderr through `env_logger`. The default level is
//! `warn`, `info` with `-v` and `error` with `-q`; `RUST_LOG` overrides it.

pub mod config;

use doctext_core::output::text_file_name;
use std::path::{Path, PathBuf};

/// Default output path for an input: `<stem>.txt` in the input's directory
///
/// ```
/// use doctext_cli::default_output_path;
/// use std::path::{Path, PathBuf};
///
/// assert_eq!(
///     default_output_path(Path::new("uploads/report.final.docx")),
///     PathBuf::from("uploads/report.final.txt")
/// );
/// ```
#[must_use]
pub fn default_output_path(input: &Path) -> PathBuf {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(text_file_name(&name))
}

/// Whether writing to `output` would replace `input`
///
/// Both paths are resolved (`.`, `..` and symlinks) before comparing. An
/// output that does not exist yet is resolved through its parent directory.
#[must_use]
pub fn is_same_file(input: &Path, output: &Path) -> bool {
    let Ok(input) = input.canonicalize() else {
        return false;
    };
    resolve_output(output).is_some_and(|output| output == input)
}

fn resolve_output(output: &Path) -> Option<PathBuf> {
    if let Ok(path) = output.canonicalize() {
        return Some(path);
    }
    let file_name = output.file_name()?;
    let parent = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    parent.canonicalize().ok().map(|dir| dir.join(file_name))
}
