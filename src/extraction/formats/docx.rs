//! Flow-document extraction for `.docx` files.
//!
//! Only body paragraphs are read. Tables, text boxes, headers, footers, and embedded objects are
//! skipped.

use quick_xml::Reader;
use quick_xml::events::Event;
use std::io::{Cursor, Read};
use zip::ZipArchive;

use crate::extraction::types::{ExtractionFailure, RawUnit};

const DOCUMENT_PART: &str = "word/document.xml";

/// Concatenate every body paragraph with `\n` into a single candidate.
pub fn extract_docx(bytes: &[u8]) -> Result<Vec<RawUnit>, ExtractionFailure> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut xml = String::new();
    archive.by_name(DOCUMENT_PART)?.read_to_string(&mut xml)?;

    let paragraphs = body_paragraphs(&xml)?;
    tracing::debug!(paragraphs = paragraphs.len(), "Parsed docx body");
    Ok(vec![RawUnit::whole(paragraphs.join("\n"))])
}

/// Collect the text of every paragraph outside tables, in document order.
///
/// Text boxes (`w:txbxContent`) and markup-compatibility fallbacks (`mc:Fallback`) are skipped as
/// whole subtrees; a paragraph nested inside an open paragraph never replaces it.
pub(crate) fn body_paragraphs(xml: &str) -> Result<Vec<String>, ExtractionFailure> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut paragraphs = Vec::new();
    let mut current: Option<String> = None;
    let mut table_depth = 0usize;
    let mut skip_depth = 0usize;
    let mut nested_paragraphs = 0usize;
    let mut run_depth = 0usize;
    let mut in_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(_) if skip_depth > 0 => skip_depth += 1,
            Event::End(_) if skip_depth > 0 => skip_depth -= 1,
            Event::Start(element) => match element.local_name().as_ref() {
                b"txbxContent" | b"Fallback" => skip_depth = 1,
                b"tbl" => table_depth += 1,
                b"p" if table_depth == 0 => {
                    if current.is_some() {
                        nested_paragraphs += 1;
                    } else {
                        current = Some(String::new());
                    }
                }
                b"r" => run_depth += 1,
                b"t" => in_text = run_depth > 0 && current.is_some() && nested_paragraphs == 0,
                _ => {}
            },
            Event::Empty(_) if skip_depth > 0 => {}
            Event::Empty(element) => match element.local_name().as_ref() {
                b"p" if table_depth == 0 && current.is_none() => paragraphs.push(String::new()),
                b"tab" if run_depth > 0 && nested_paragraphs == 0 => push_to(&mut current, "\t"),
                b"br" | b"cr" if run_depth > 0 && nested_paragraphs == 0 => {
                    push_to(&mut current, "\n")
                }
                _ => {}
            },
            Event::Text(text) if in_text && skip_depth == 0 => {
                let unescaped = text.unescape()?;
                push_to(&mut current, &unescaped);
            }
            Event::End(element) => match element.local_name().as_ref() {
                b"tbl" => table_depth = table_depth.saturating_sub(1),
                b"p" if table_depth == 0 => {
                    if nested_paragraphs > 0 {
                        nested_paragraphs -= 1;
                    } else if let Some(paragraph) = current.take() {
                        paragraphs.push(paragraph);
                    }
                }
                b"r" => run_depth = run_depth.saturating_sub(1),
                b"t" => in_text = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    if table_depth != 0 || skip_depth != 0 || current.is_some() {
        return Err(ExtractionFailure::Malformed(
            "document body ended inside an open element".to_string(),
        ));
    }
    Ok(paragraphs)
}

fn push_to(paragraph: &mut Option<String>, text: &str) {
    if let Some(paragraph) = paragraph.as_mut() {
        paragraph.push_str(text);
    }
}
