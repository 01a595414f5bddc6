//! PPTX (Microsoft `PowerPoint`) text extraction
//!
//! PPTX files are ZIP archives containing:
//! - `ppt/presentation.xml`: slide list (`p:sldIdLst`) in presentation order
//! - `ppt/_rels/presentation.xml.rels`: maps slide ids to slide parts
//! - `ppt/slides/slideN.xml`: the shape tree of each slide
//!
//! Slides are numbered by their position in `p:sldIdLst`, not by the number in
//! the part name, so reordered decks come out in the order they are shown.

use crate::traits::{BackendOptions, DocumentBackend};
use crate::utils::{
    open_package, parse_relationships, read_part, resolve_target, truncated_xml_error,
};
use doctext_core::{DoctextError, InputFormat};
use log::debug;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fmt::Write;

const PRESENTATION_PART: &str = "ppt/presentation.xml";
const PRESENTATION_RELS_PART: &str = "ppt/_rels/presentation.xml.rels";

const SHAPE_TREE_PATH: &[&[u8]] = &[b"sld", b"cSld", b"spTree"];

/// A top-level shape of a slide's shape tree
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SlideShape {
    /// An auto shape (`p:sp`) and the text of its text frame, paragraphs
    /// joined with newlines. Empty when the shape has no text frame.
    Text(String),
    /// A picture, graphic frame, group, connector or content part
    NonText,
}

impl SlideShape {
    /// Text this shape contributes, if it is a text shape
    #[inline]
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::NonText => None,
        }
    }
}

/// Text shape being read: paragraphs finished so far and the open paragraph
#[derive(Debug, Default)]
struct TextFrame {
    paragraphs: Vec<String>,
    current: Option<String>,
}

/// PPTX backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PptxBackend;

impl PptxBackend {
    /// Create a new PPTX backend
    #[inline]
    #[must_use = "creates a new PPTX backend"]
    pub const fn new() -> Self {
        Self
    }

    /// Relationship ids of the slides listed in `ppt/presentation.xml`, in order
    ///
    /// # Errors
    /// Returns an error if the XML is malformed.
    pub fn slide_ids(xml: &str) -> Result<Vec<String>, DoctextError> {
        let mut reader = Reader::from_str(xml);
        let mut buf = Vec::new();
        let mut ids = Vec::new();
        let mut open_elements = 0usize;

        loop {
            let event = reader.read_event_into(&mut buf);
            match &event {
                Ok(Event::Start(_)) => open_elements += 1,
                Ok(Event::End(_)) => open_elements = open_elements.saturating_sub(1),
                _ => {}
            }
            match event {
                Ok(Event::Empty(e) | Event::Start(e)) if e.local_name().as_ref() == b"sldId" => {
                    // The relationship id is the namespaced `r:id`, not the numeric `id`
                    let rel_id = e
                        .attributes()
                        .flatten()
                        .find(|a| {
                            a.key.local_name().as_ref() == b"id" && a.key.prefix().is_some()
                        })
                        .and_then(|a| a.unescape_value().ok().map(|v| v.into_owned()));
                    if let Some(rel_id) = rel_id {
                        ids.push(rel_id);
                    }
                }
                Ok(Event::Eof) if open_elements > 0 => {
                    return Err(truncated_xml_error(PRESENTATION_PART))
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(DoctextError::BackendError(format!(
                        "XML parse error in {PRESENTATION_PART}: {e}"
                    )))
                }
                _ => {}
            }
            buf.clear();
        }

        Ok(ids)
    }

    /// Classify the top-level shapes of a slide and read the text of text shapes
    ///
    /// # Errors
    /// Returns an error if the XML is malformed or contains unknown entities.
    pub fn slide_shapes(xml: &str) -> Result<Vec<SlideShape>, DoctextError> {
        let parse_error =
            |e: quick_xml::Error| DoctextError::BackendError(format!("XML parse error in slide: {e}"));

        let mut reader = Reader::from_str(xml);
        let mut buf = Vec::new();
        let mut path: Vec<Vec<u8>> = Vec::new();
        let mut shapes = Vec::new();
        let mut frame: Option<TextFrame> = None;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    let name = e.local_name().as_ref().to_vec();
                    if path_is(&path, SHAPE_TREE_PATH) {
                        if name == b"sp" {
                            frame = Some(TextFrame::default());
                        } else if is_shape_element(&name) {
                            shapes.push(SlideShape::NonText);
                        }
                    } else if name == b"p" && in_text_body(&path) {
                        if let Some(frame) = frame.as_mut() {
                            frame.current = Some(String::new());
                        }
                    }
                    path.push(name);
                }
                Ok(Event::Empty(e)) => {
                    let name = e.local_name();
                    if path_is(&path, SHAPE_TREE_PATH) {
                        if name.as_ref() == b"sp" {
                            shapes.push(SlideShape::Text(String::new()));
                        } else if is_shape_element(name.as_ref()) {
                            shapes.push(SlideShape::NonText);
                        }
                    } else if let Some(frame) = frame.as_mut() {
                        if name.as_ref() == b"p" && in_text_body(&path) {
                            frame.paragraphs.push(String::new());
                        } else if name.as_ref() == b"br" && in_paragraph(&path) {
                            if let Some(current) = frame.current.as_mut() {
                                current.push('\n');
                            }
                        }
                    }
                }
                Ok(Event::Text(t)) => {
                    if let Some(current) = frame.as_mut().and_then(|f| f.current.as_mut()) {
                        if in_text_run(&path) {
                            current.push_str(&t.unescape().map_err(parse_error)?);
                        }
                    }
                }
                Ok(Event::End(_)) => {
                    let closed = path.pop();
                    let closed = closed.as_deref();
                    if closed == Some(b"p".as_slice()) && in_text_body(&path) {
                        if let Some(frame) = frame.as_mut() {
                            if let Some(paragraph) = frame.current.take() {
                                frame.paragraphs.push(paragraph);
                            }
                        }
                    } else if closed == Some(b"sp".as_slice()) && path_is(&path, SHAPE_TREE_PATH) {
                        if let Some(frame) = frame.take() {
                            shapes.push(SlideShape::Text(frame.paragraphs.join("\n")));
                        }
                    }
                }
                Ok(Event::Eof) if !path.is_empty() => return Err(truncated_xml_error("slide")),
                Ok(Event::Eof) => break,
                Err(e) => return Err(parse_error(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(shapes)
    }

    /// Render slides: a `--- Slide {n} ---` line per slide, then one block per
    /// text shape
    #[must_use = "returns the text of the slides"]
    pub fn render_slides(slides: &[Vec<SlideShape>]) -> String {
        let mut text = String::new();
        for (index, shapes) in slides.iter().enumerate() {
            let _ = writeln!(text, "--- Slide {} ---", index + 1);
            for shape_text in shapes.iter().filter_map(SlideShape::text) {
                let _ = writeln!(text, "{shape_text}");
            }
        }
        text
    }
}

/// Elements that form a top-level shape in `p:spTree`
fn is_shape_element(name: &[u8]) -> bool {
    matches!(
        name,
        b"sp" | b"pic" | b"graphicFrame" | b"grpSp" | b"cxnSp" | b"contentPart"
    )
}

fn path_is(path: &[Vec<u8>], expected: &[&[u8]]) -> bool {
    path.len() == expected.len() && path.iter().zip(expected).all(|(p, e)| p.as_slice() == *e)
}

/// Inside the text body of a top-level auto shape
fn in_text_body(path: &[Vec<u8>]) -> bool {
    path.len() == SHAPE_TREE_PATH.len() + 2
        && path_is(&path[..SHAPE_TREE_PATH.len()], SHAPE_TREE_PATH)
        && path[SHAPE_TREE_PATH.len()] == b"sp"
        && path[SHAPE_TREE_PATH.len() + 1] == b"txBody"
}

fn in_paragraph(path: &[Vec<u8>]) -> bool {
    path.last().is_some_and(|n| n == b"p") && in_text_body(&path[..path.len() - 1])
}

/// Inside `a:t` of a run or field of a text body paragraph
fn in_text_run(path: &[Vec<u8>]) -> bool {
    let n = path.len();
    n >= 3
        && path[n - 1] == b"t"
        && (path[n - 2] == b"r" || path[n - 2] == b"fld")
        && in_paragraph(&path[..n - 2])
}

impl DocumentBackend for PptxBackend {
    #[inline]
    fn format(&self) -> InputFormat {
        InputFormat::Pptx
    }

    fn extract_text(&self, data: &[u8], _options: &BackendOptions) -> Result<String, DoctextError> {
        let mut archive = open_package(data, "PPTX")?;

        let ids = Self::slide_ids(&read_part(&mut archive, PRESENTATION_PART)?)?;
        let rels = parse_relationships(&read_part(&mut archive, PRESENTATION_RELS_PART)?)?;
        debug!("PPTX presentation lists {} slide(s)", ids.len());

        let mut slides = Vec::with_capacity(ids.len());
        for id in &ids {
            let target = rels.get(id).ok_or_else(|| {
                DoctextError::BackendError(format!(
                    "Slide relationship {id} not found in {PRESENTATION_RELS_PART}"
                ))
            })?;
            let slide_path = resolve_target("ppt", target);
            slides.push(Self::slide_shapes(&read_part(&mut archive, &slide_path)?)?);
        }

        Ok(Self::render_slides(&slides))
    }
}
