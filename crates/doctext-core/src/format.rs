//! Input format types for document conversion
//!
//! This module defines the `InputFormat` enum, the fixed table of file
//! extensions doctext knows how to flatten to text. Detection looks at the
//! file name only; content is never sniffed.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Input document format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputFormat {
    /// Microsoft Word document (.docx)
    #[serde(rename = "DOCX")]
    Docx,
    /// Microsoft Excel workbook (.xlsx)
    #[serde(rename = "XLSX")]
    Xlsx,
    /// Microsoft `PowerPoint` presentation (.pptx)
    #[serde(rename = "PPTX")]
    Pptx,
    /// HTML document (.html, .htm)
    #[serde(rename = "HTML")]
    Html,
    /// ZIP archive (.zip)
    #[serde(rename = "ZIP")]
    Zip,
}

impl InputFormat {
    /// Every supported format, in the order they are listed to users
    pub const ALL: [Self; 5] = [Self::Docx, Self::Xlsx, Self::Pptx, Self::Html, Self::Zip];

    /// Detect format from a file extension (without the leading dot)
    ///
    /// Matching is case-insensitive.
    #[inline]
    #[must_use = "detects format from file extension"]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "docx" => Some(Self::Docx),
            "xlsx" => Some(Self::Xlsx),
            "pptx" => Some(Self::Pptx),
            "html" | "htm" => Some(Self::Html),
            "zip" => Some(Self::Zip),
            _ => None,
        }
    }

    /// Detect format from a file name or archive entry path
    ///
    /// ```
    /// use doctext_core::InputFormat;
    ///
    /// assert_eq!(InputFormat::from_file_name("Q1/Report.DOCX"), Some(InputFormat::Docx));
    /// assert_eq!(InputFormat::from_file_name("notes.pdf"), None);
    /// ```
    #[inline]
    #[must_use = "detects format from file name"]
    pub fn from_file_name(name: &str) -> Option<Self> {
        Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// File extensions (without dot) mapped to this format
    #[inline]
    #[must_use = "returns the extensions for this format"]
    pub const fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::Docx => &["docx"],
            Self::Xlsx => &["xlsx"],
            Self::Pptx => &["pptx"],
            Self::Html => &["html", "htm"],
            Self::Zip => &["zip"],
        }
    }

    /// Human-readable description used by `doctext formats`
    #[inline]
    #[must_use = "returns the description of this format"]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Docx => "Microsoft Word document (body paragraphs)",
            Self::Xlsx => "Microsoft Excel workbook (cell values per sheet)",
            Self::Pptx => "Microsoft PowerPoint presentation (shape text per slide)",
            Self::Html => "HTML page (converted to Markdown)",
            Self::Zip => "ZIP archive (every entry converted recursively)",
        }
    }

    /// Check if this is an archive format
    #[inline]
    #[must_use = "returns whether this is an archive format"]
    pub const fn is_archive(&self) -> bool {
        matches!(self, Self::Zip)
    }
}

impl std::fmt::Display for InputFormat {
    #[inline]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Docx => "DOCX",
            Self::Xlsx => "XLSX",
            Self::Pptx => "PPTX",
            Self::Html => "HTML",
            Self::Zip => "ZIP",
        };
        write!(f, "{s}")
    }
}

/// Lowercase extension of a file name, including the leading dot
///
/// Returns an empty string when the name has no extension. Dotfiles such as
/// `.bashrc` have no extension, and only the last suffix counts
/// (`backup.tar.gz` → `.gz`).
///
/// ```
/// use doctext_core::format::dotted_extension;
///
/// assert_eq!(dotted_extension("Slides.PPTX"), ".pptx");
/// assert_eq!(dotted_extension("README"), "");
/// ```
#[must_use]
pub fn dotted_extension(name: &str) -> String {
    Path::new(name)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension_case_insensitive() {
        assert_eq!(InputFormat::from_extension("docx"), Some(InputFormat::Docx));
        assert_eq!(InputFormat::from_extension("XLSX"), Some(InputFormat::Xlsx));
        assert_eq!(InputFormat::from_extension("PpTx"), Some(InputFormat::Pptx));
        assert_eq!(InputFormat::from_extension("htm"), Some(InputFormat::Html));
        assert_eq!(InputFormat::from_extension("HTML"), Some(InputFormat::Html));
        assert_eq!(InputFormat::from_extension("zip"), Some(InputFormat::Zip));
    }

    #[test]
    fn test_from_extension_unknown() {
        assert_eq!(InputFormat::from_extension("pdf"), None);
        assert_eq!(InputFormat::from_extension("doc"), None);
        assert_eq!(InputFormat::from_extension(""), None);
    }

    #[test]
    fn test_from_file_name_uses_last_suffix() {
        assert_eq!(
            InputFormat::from_file_name("archive.docx.zip"),
            Some(InputFormat::Zip)
        );
        assert_eq!(InputFormat::from_file_name("backup.tar.gz"), None);
        assert_eq!(InputFormat::from_file_name(".zip"), None);
        assert_eq!(
            InputFormat::from_file_name("nested/dir/page.HTM"),
            Some(InputFormat::Html)
        );
    }

    #[test]
    fn test_extensions_round_trip() {
        for format in InputFormat::ALL {
            for ext in format.extensions() {
                assert_eq!(InputFormat::from_extension(ext), Some(format));
            }
        }
    }

    #[test]
    fn test_is_archive() {
        assert!(InputFormat::Zip.is_archive());
        assert!(!InputFormat::Docx.is_archive());
        assert!(!InputFormat::Html.is_archive());
    }

    #[test]
    fn test_display() {
        assert_eq!(InputFormat::Pptx.to_string(), "PPTX");
        assert_eq!(InputFormat::Zip.to_string(), "ZIP");
    }

    #[test]
    fn test_dotted_extension() {
        assert_eq!(dotted_extension("report.PDF"), ".pdf");
        assert_eq!(dotted_extension("backup.tar.gz"), ".gz");
        assert_eq!(dotted_extension(".bashrc"), "");
        assert_eq!(dotted_extension("Makefile"), "");
        assert_eq!(dotted_extension("docs/readme.md"), ".md");
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&InputFormat::Xlsx).expect("serialize");
        assert_eq!(json, "\"XLSX\"");
        let back: InputFormat = serde_json::from_str("\"HTML\"").expect("deserialize");
        assert_eq!(back, InputFormat::Html);
    }
}
