//! Core data types and error definitions for the extraction pipeline.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use super::sniff::sniff_format;

/// Closed classification of a document's parsing strategy, derived from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatTag {
    /// Paginated document (`.pdf`).
    Pdf,
    /// Flow document (`.docx`).
    Docx,
    /// Plain text (`.txt`).
    #[serde(rename = "txt")]
    PlainText,
    /// Delimited text (`.csv`).
    #[serde(rename = "csv")]
    Tabular,
    /// Tabular workbook (`.xlsx`).
    #[serde(rename = "xlsx")]
    Spreadsheet,
    /// Any extension outside the known vocabulary.
    Unsupported,
}

impl FormatTag {
    /// Every tag that has an extractor, in vocabulary order.
    pub const SUPPORTED: [FormatTag; 5] = [
        FormatTag::Pdf,
        FormatTag::Docx,
        FormatTag::PlainText,
        FormatTag::Tabular,
        FormatTag::Spreadsheet,
    ];

    /// Map a bare extension (no dot) to its tag, case-insensitively.
    pub fn from_extension(extension: &str) -> Self {
        match extension.to_ascii_lowercase().as_str() {
            "pdf" => Self::Pdf,
            "docx" => Self::Docx,
            "txt" => Self::PlainText,
            "csv" => Self::Tabular,
            "xlsx" => Self::Spreadsheet,
            _ => Self::Unsupported,
        }
    }

    /// Vocabulary name used on the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::PlainText => "txt",
            Self::Tabular => "csv",
            Self::Spreadsheet => "xlsx",
            Self::Unsupported => "unsupported",
        }
    }
}

impl fmt::Display for FormatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a document's bytes come from.
#[derive(Debug, Clone)]
pub enum ByteSource {
    /// A file persisted by the storage collaborator.
    Path(PathBuf),
    /// Bytes already held in memory (e.g. a streamed upload).
    Bytes(Vec<u8>),
}

impl ByteSource {
    /// Read the full contents of the source.
    ///
    /// Called from the document's own worker; sources are never shared between tasks.
    pub fn read(self) -> std::io::Result<Vec<u8>> {
        match self {
            Self::Path(path) => std::fs::read(path),
            Self::Bytes(bytes) => Ok(bytes),
        }
    }
}

/// A submitted document. The format tag is derived once, at construction.
#[derive(Debug, Clone)]
pub struct Document {
    id: String,
    source: ByteSource,
    format: FormatTag,
}

impl Document {
    /// Build a document from an already-sanitized identifier and its byte source.
    pub fn new(id: impl Into<String>, source: ByteSource) -> Self {
        let id = id.into();
        let format = sniff_format(&id);
        Self { id, source, format }
    }

    /// Convenience constructor for in-memory content.
    pub fn from_bytes(id: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self::new(id, ByteSource::Bytes(bytes.into()))
    }

    /// Convenience constructor for a file on disk.
    pub fn from_path(id: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::new(id, ByteSource::Path(path.into()))
    }

    /// Identifier the result is keyed under.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Format tag derived from the identifier.
    pub fn format(&self) -> FormatTag {
        self.format
    }

    pub(crate) fn into_parts(self) -> (String, ByteSource, FormatTag) {
        (self.id, self.source, self.format)
    }
}

/// Candidate text produced by an extractor before trimming and truncation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawUnit {
    /// 1-based page number, or `1` for non-paginated formats.
    pub unit_index: u32,
    /// Extracted text exactly as the parser produced it.
    pub text: String,
}

impl RawUnit {
    /// Candidate for a non-paginated document.
    pub fn whole(text: String) -> Self {
        Self {
            unit_index: 1,
            text,
        }
    }
}

/// One extraction result reported back to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionUnit {
    /// Page number for paginated formats, `1` otherwise.
    pub unit_index: u32,
    /// Trimmed, bounded preview text, or an error message when `is_error` is set.
    pub snippet: String,
    /// Whether this unit reports a failure rather than content.
    pub is_error: bool,
}

impl ExtractionUnit {
    /// Successful unit carrying an already-built snippet.
    pub fn content(unit_index: u32, snippet: String) -> Self {
        Self {
            unit_index,
            snippet,
            is_error: false,
        }
    }

    /// Error unit whose message is the error's rendered description. Never truncated.
    pub fn error(err: &ExtractionError) -> Self {
        Self {
            unit_index: 1,
            snippet: err.to_string(),
            is_error: true,
        }
    }
}

/// Aggregated results keyed by document identifier, in submission order.
pub type BatchResult = IndexMap<String, Vec<ExtractionUnit>>;

/// Low-level causes raised while reading or parsing a byte source.
#[derive(Debug, Error)]
pub enum ExtractionFailure {
    /// The byte source could not be read.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// The PDF parser rejected the document.
    #[error("{0}")]
    Pdf(#[from] lopdf::Error),
    /// The Office container is not a readable zip archive.
    #[error("{0}")]
    Archive(#[from] zip::result::ZipError),
    /// The document XML could not be parsed.
    #[error("{0}")]
    Xml(#[from] quick_xml::Error),
    /// The workbook could not be parsed.
    #[error("{0}")]
    Spreadsheet(#[from] calamine::XlsxError),
    /// The file parsed but did not have the expected structure.
    #[error("{0}")]
    Malformed(String),
    /// The worker running the extraction stopped before producing a result.
    #[error("extraction task aborted: {0}")]
    TaskAborted(String),
}

/// Per-document failures; always converted to an error unit, never propagated.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The document's extension is outside the accepted vocabulary.
    #[error("Unsupported file type '{extension}'")]
    UnsupportedFormat {
        /// Lowercased extension as it appeared in the identifier.
        extension: String,
    },
    /// The selected extractor failed.
    #[error("Failed to read file ({0})")]
    Failure(#[from] ExtractionFailure),
}

/// Errors that abort a whole batch call.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BatchError {
    /// The batch was empty or every identifier was blank.
    #[error("no documents submitted")]
    EmptyBatch,
}
