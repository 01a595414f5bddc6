//! HTML to Markdown conversion
//!
//! The page is decoded as UTF-8 with invalid byte sequences dropped, then
//! handed to `html2md`. Conversion itself cannot fail; malformed markup is
//! repaired by the HTML5 parser the same way a browser would.

use crate::traits::{BackendOptions, DocumentBackend};
use crate::utils::decode_utf8_ignoring_invalid;
use doctext_core::{DoctextError, InputFormat};

/// HTML backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct HtmlBackend;

impl HtmlBackend {
    /// Create a new HTML backend
    #[inline]
    #[must_use = "creates a new HTML backend"]
    pub const fn new() -> Self {
        Self
    }

    /// Convert HTML markup to Markdown
    #[must_use = "returns the Markdown rendering of the markup"]
    pub fn to_markdown(html: &str) -> String {
        html2md::parse_html(html)
    }
}

impl DocumentBackend for HtmlBackend {
    #[inline]
    fn format(&self) -> InputFormat {
        InputFormat::Html
    }

    fn extract_text(&self, data: &[u8], _options: &BackendOptions) -> Result<String, DoctextError> {
        Ok(Self::to_markdown(&decode_utf8_ignoring_invalid(data)))
    }
}
