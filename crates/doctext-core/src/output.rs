//! Conversion results and the helpers front ends use to present them
//!
//! A conversion always produces one UTF-8 string. Front ends show the first
//! [`DEFAULT_PREVIEW_CHARS`] characters of it and save the whole string as
//! `<input-stem>.txt`.

use crate::format::InputFormat;
use std::path::Path;
use std::time::Duration;

/// Number of characters shown in a conversion preview
pub const DEFAULT_PREVIEW_CHARS: usize = 1000;

/// Result of converting one input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionResult {
    /// Name of the input (file name or archive entry path)
    pub name: String,
    /// Detected format, `None` when the extension is not in the format table
    pub format: Option<InputFormat>,
    /// Flattened text of the whole input
    pub text: String,
    /// Time taken to perform the conversion
    pub latency: Duration,
}

impl ConversionResult {
    /// First `max_chars` characters of the text
    #[inline]
    #[must_use]
    pub fn preview(&self, max_chars: usize) -> &str {
        preview(&self.text, max_chars)
    }

    /// File name the full text should be saved under
    #[inline]
    #[must_use]
    pub fn output_file_name(&self) -> String {
        text_file_name(&self.name)
    }

    /// Number of characters in the text
    #[inline]
    #[must_use]
    pub fn num_characters(&self) -> usize {
        self.text.chars().count()
    }

    /// Save the full text to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_text<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        std::fs::write(path, &self.text)
    }
}

/// First `max_chars` characters of `text`, never splitting a character
///
/// ```
/// use doctext_core::output::preview;
///
/// assert_eq!(preview("Grüße", 3), "Grü");
/// assert_eq!(preview("short", 100), "short");
/// ```
#[must_use]
pub fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

/// Output file name for a converted input: the input's stem plus `.txt`
///
/// Only the last suffix is replaced, and any directory part is dropped.
///
/// ```
/// use doctext_core::output::text_file_name;
///
/// assert_eq!(text_file_name("report.final.docx"), "report.final.txt");
/// assert_eq!(text_file_name("uploads/deck.pptx"), "deck.txt");
/// ```
#[must_use]
pub fn text_file_name(name: &str) -> String {
    let stem = Path::new(name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{stem}.txt")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(text: &str) -> ConversionResult {
        ConversionResult {
            name: "sample.html".to_string(),
            format: Some(InputFormat::Html),
            text: text.to_string(),
            latency: Duration::from_millis(3),
        }
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        assert_eq!(preview("日本語のテキスト", 3), "日本語");
        assert_eq!(preview("abc", 0), "");
        assert_eq!(preview("", 10), "");
    }

    #[test]
    fn test_preview_exact_length() {
        assert_eq!(preview("abcd", 4), "abcd");
    }

    #[test]
    fn test_text_file_name() {
        assert_eq!(text_file_name("book.xlsx"), "book.txt");
        assert_eq!(text_file_name("archive.tar.gz"), "archive.tar.txt");
        assert_eq!(text_file_name("no_extension"), "no_extension.txt");
        assert_eq!(text_file_name(".hidden"), ".hidden.txt");
    }

    #[test]
    fn test_conversion_result_helpers() {
        let r = result("# Title\n\nBody text");
        assert_eq!(r.preview(7), "# Title");
        assert_eq!(r.output_file_name(), "sample.txt");
        assert_eq!(r.num_characters(), 18);
    }

    #[test]
    fn test_save_text() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("out.txt");

        result("saved body").save_text(&path).expect("save");
        assert_eq!(std::fs::read_to_string(&path).expect("read"), "saved body");
    }
}
