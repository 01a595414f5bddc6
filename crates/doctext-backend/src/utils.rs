//! Shared utility functions for backend implementations.
//!
//! The Office backends all read XML parts out of an OPC package (a ZIP
//! container); the helpers here open that package from memory, pull parts out
//! of it and resolve relationship targets, with errors reported the same way
//! by every backend.

use doctext_core::DoctextError;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::collections::HashMap;
use std::io::{Cursor, Read};
use zip::ZipArchive;

/// An Office package opened over in-memory bytes
pub type Package<'a> = ZipArchive<Cursor<&'a [u8]>>;

/// Create a backend error with standardized formatting.
///
/// Formats: `Failed to {operation} {format_name}: {error}`
///
/// # Examples
///
/// ```
/// use doctext_backend::utils::backend_error;
/// use std::io;
///
/// let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
/// let error = backend_error("open", "DOCX", io_err);
/// assert!(error.to_string().contains("Failed to open DOCX"));
/// ```
#[must_use = "creates a backend error with formatted message"]
pub fn backend_error<E: std::fmt::Display>(
    operation: &str,
    format_name: &str,
    error: E,
) -> DoctextError {
    DoctextError::BackendError(format!("Failed to {operation} {format_name}: {error}"))
}

/// Open an Office package held in memory.
///
/// # Errors
///
/// Returns `BackendError` if the bytes are not a ZIP container.
pub fn open_package<'a>(data: &'a [u8], format_name: &str) -> Result<Package<'a>, DoctextError> {
    ZipArchive::new(Cursor::new(data)).map_err(|e| backend_error("open", format_name, e))
}

/// Read a required XML part from a package as a string.
///
/// # Errors
///
/// Returns `BackendError` if the part is absent, or `IoError` if it cannot be
/// decompressed as UTF-8 text.
pub fn read_part(archive: &mut Package<'_>, path: &str) -> Result<String, DoctextError> {
    let mut file = archive
        .by_name(path)
        .map_err(|e| DoctextError::BackendError(format!("Missing {path}: {e}")))?;
    let mut content = String::new();
    file.read_to_string(&mut content)
        .map_err(DoctextError::IoError)?;
    Ok(content)
}

/// Parse a relationships part (`*.rels`) into an `Id -> Target` map.
///
/// Targets are returned as written; see [`resolve_target`] to turn them into
/// package paths.
///
/// # Errors
///
/// Returns `BackendError` if the XML is malformed.
pub fn parse_relationships(xml: &str) -> Result<HashMap<String, String>, DoctextError> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();
    let mut rels = HashMap::new();
    let mut open_elements = 0usize;

    loop {
        let event = reader.read_event_into(&mut buf);
        match &event {
            Ok(Event::Start(_)) => open_elements += 1,
            Ok(Event::End(_)) => open_elements = open_elements.saturating_sub(1),
            _ => {}
        }
        match event {
            Ok(Event::Empty(e) | Event::Start(e))
                if e.local_name().as_ref() == b"Relationship" =>
            {
                let mut id = None;
                let mut target = None;
                for attr in e.attributes().flatten() {
                    match attr.key.as_ref() {
                        b"Id" => id = attr.unescape_value().ok().map(|v| v.into_owned()),
                        b"Target" => target = attr.unescape_value().ok().map(|v| v.into_owned()),
                        _ => {}
                    }
                }
                if let (Some(id), Some(target)) = (id, target) {
                    rels.insert(id, target);
                }
            }
            Ok(Event::Eof) if open_elements > 0 => {
                return Err(truncated_xml_error("relationships"))
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(DoctextError::BackendError(format!(
                    "XML parse error in relationships: {e}"
                )))
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(rels)
}

/// Error for an XML part that ends while elements are still open
#[must_use = "creates a backend error for a truncated part"]
pub fn truncated_xml_error(part: &str) -> DoctextError {
    DoctextError::BackendError(format!(
        "XML parse error in {part}: unexpected end of document"
    ))
}

/// Resolve a relationship target against the folder of the part that owns it.
///
/// Absolute targets (`/ppt/slides/slide1.xml`) are taken from the package
/// root; relative ones may climb with `..`.
///
/// ```
/// use doctext_backend::utils::resolve_target;
///
/// assert_eq!(resolve_target("ppt", "slides/slide2.xml"), "ppt/slides/slide2.xml");
/// assert_eq!(resolve_target("ppt/slides", "../media/a.png"), "ppt/media/a.png");
/// assert_eq!(resolve_target("ppt", "/ppt/slides/slide1.xml"), "ppt/slides/slide1.xml");
/// ```
#[must_use]
pub fn resolve_target(base_dir: &str, target: &str) -> String {
    let (mut parts, rest): (Vec<&str>, &str) = match target.strip_prefix('/') {
        Some(absolute) => (Vec::new(), absolute),
        None => (
            base_dir.split('/').filter(|p| !p.is_empty()).collect(),
            target,
        ),
    };

    for segment in rest.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            other => parts.push(other),
        }
    }

    parts.join("/")
}

/// Decode bytes as UTF-8, dropping invalid sequences instead of replacing them.
///
/// ```
/// use doctext_backend::utils::decode_utf8_ignoring_invalid;
///
/// assert_eq!(decode_utf8_ignoring_invalid(b"caf\xC3\xA9"), "café");
/// assert_eq!(decode_utf8_ignoring_invalid(b"a\xFFb\xC3"), "ab");
/// ```
#[must_use]
pub fn decode_utf8_ignoring_invalid(data: &[u8]) -> String {
    if let Ok(text) = std::str::from_utf8(data) {
        return text.to_string();
    }

    let mut text = String::with_capacity(data.len());
    for chunk in data.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    text
}
