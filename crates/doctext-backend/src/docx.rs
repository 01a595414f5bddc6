//! DOCX (Microsoft Word) text extraction
//!
//! DOCX files are ZIP archives; the body text lives in `word/document.xml`.
//! Only the paragraphs that sit directly in `w:body` are extracted, one per
//! line. Paragraphs inside tables, text boxes and headers are not part of the
//! body paragraph list and are left out.

use crate::traits::{BackendOptions, DocumentBackend};
use crate::utils::{open_package, read_part, truncated_xml_error};
use doctext_core::{DoctextError, InputFormat};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

const DOCUMENT_PART: &str = "word/document.xml";

/// Element paths (by local name) of runs that belong to a body paragraph
const BODY_RUN_PATHS: [&[&[u8]]; 2] = [
    &[b"document", b"body", b"p", b"r"],
    &[b"document", b"body", b"p", b"hyperlink", b"r"],
];

const BODY_PATH: &[&[u8]] = &[b"document", b"body"];

/// DOCX backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DocxBackend;

impl DocxBackend {
    /// Create a new DOCX backend
    #[inline]
    #[must_use = "creates a new DOCX backend"]
    pub const fn new() -> Self {
        Self
    }

    /// Extract body paragraphs from the XML of `word/document.xml`
    ///
    /// # Errors
    /// Returns an error if the XML is malformed or contains unknown entities.
    pub fn body_paragraphs(xml: &str) -> Result<Vec<String>, DoctextError> {
        let mut reader = Reader::from_str(xml);
        let mut buf = Vec::new();
        let mut path: Vec<Vec<u8>> = Vec::new();
        let mut paragraphs = Vec::new();
        let mut current: Option<String> = None;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    let name = e.local_name().as_ref().to_vec();
                    if name == b"p" && path_is(&path, BODY_PATH) {
                        current = Some(String::new());
                    }
                    path.push(name);
                }
                Ok(Event::Empty(e)) => {
                    let name = e.local_name();
                    if name.as_ref() == b"p" && path_is(&path, BODY_PATH) {
                        paragraphs.push(String::new());
                    } else if let Some(text) = current.as_mut() {
                        if is_body_run(&path) {
                            if let Some(ch) = run_control_text(&e) {
                                text.push(ch);
                            }
                        }
                    }
                }
                Ok(Event::Text(t)) => {
                    if let Some(text) = current.as_mut() {
                        if path.last().is_some_and(|n| n == b"t")
                            && is_body_run(&path[..path.len() - 1])
                        {
                            let value = t.unescape().map_err(|e| {
                                DoctextError::BackendError(format!(
                                    "XML parse error in {DOCUMENT_PART}: {e}"
                                ))
                            })?;
                            text.push_str(&value);
                        }
                    }
                }
                Ok(Event::End(_)) => {
                    let closed = path.pop();
                    if closed.as_deref() == Some(b"p".as_slice()) && path_is(&path, BODY_PATH) {
                        if let Some(text) = current.take() {
                            paragraphs.push(text);
                        }
                    }
                }
                Ok(Event::Eof) if !path.is_empty() => {
                    return Err(truncated_xml_error(DOCUMENT_PART))
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(DoctextError::BackendError(format!(
                        "XML parse error in {DOCUMENT_PART}: {e}"
                    )))
                }
                _ => {}
            }
            buf.clear();
        }

        Ok(paragraphs)
    }
}

/// Text produced by an empty run child such as `<w:tab/>` or `<w:br/>`
fn run_control_text(e: &BytesStart<'_>) -> Option<char> {
    match e.local_name().as_ref() {
        b"tab" => Some('\t'),
        b"cr" => Some('\n'),
        b"br" => {
            // Page and column breaks carry no text
            let break_type = e
                .attributes()
                .flatten()
                .find(|a| a.key.local_name().as_ref() == b"type")
                .map(|a| a.value.into_owned());
            match break_type.as_deref() {
                None | Some(b"textWrapping") => Some('\n'),
                Some(_) => None,
            }
        }
        _ => None,
    }
}

fn path_is(path: &[Vec<u8>], expected: &[&[u8]]) -> bool {
    path.len() == expected.len() && path.iter().zip(expected).all(|(p, e)| p.as_slice() == *e)
}

fn is_body_run(path: &[Vec<u8>]) -> bool {
    BODY_RUN_PATHS.iter().any(|expected| path_is(path, expected))
}

impl DocumentBackend for DocxBackend {
    #[inline]
    fn format(&self) -> InputFormat {
        InputFormat::Docx
    }

    fn extract_text(&self, data: &[u8], _options: &BackendOptions) -> Result<String, DoctextError> {
        let mut archive = open_package(data, "DOCX")?;
        let xml = read_part(&mut archive, DOCUMENT_PART)?;
        Ok(Self::body_paragraphs(&xml)?.join("\n"))
    }
}
