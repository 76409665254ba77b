//! Span ingestion.
//!
//! Opening a document and extracting its text runs is the job of an
//! external collaborator. This module defines the seam ([`SpanSource`])
//! and ships two sources: spans already in memory, and spans serialized
//! as JSON by an upstream extractor.
//!
//! ## JSON format
//!
//! Either a bare array or an object with a `spans` array:
//!
//! ```text
//! {"spans": [
//!   {"text": "Introduction", "fontSize": 18.0, "bold": true, "page": 1,
//!    "position": {"x": 72.0, "y": 96.5}, "order": 0}
//! ]}
//! ```
//!
//! `bold` defaults to false, `position` to the page origin and `order` to
//! the span's index in the file.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::geometry::Point;
use crate::layout::TextSpan;

/// Producer of the spans of one document.
pub trait SpanSource {
    /// Name used in logs and batch reports.
    fn name(&self) -> &str;

    /// Produce the document's spans in emission order.
    fn load_spans(&self) -> Result<Vec<TextSpan>>;
}

/// Spans held in memory.
#[derive(Debug, Clone)]
pub struct VecSpanSource {
    name: String,
    spans: Vec<TextSpan>,
}

impl VecSpanSource {
    /// Wrap a span vector.
    pub fn new(name: impl Into<String>, spans: Vec<TextSpan>) -> Self {
        Self {
            name: name.into(),
            spans,
        }
    }
}

impl SpanSource for VecSpanSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn load_spans(&self) -> Result<Vec<TextSpan>> {
        validate_all(&self.spans)?;
        Ok(self.spans.clone())
    }
}

/// Spans read from a JSON file.
#[derive(Debug, Clone)]
pub struct JsonSpanSource {
    path: PathBuf,
    name: String,
}

impl JsonSpanSource {
    /// Read spans from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path.display().to_string();
        Self { path, name }
    }

    /// Path of the span file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SpanSource for JsonSpanSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn load_spans(&self) -> Result<Vec<TextSpan>> {
        let raw = std::fs::read_to_string(&self.path)?;
        parse_spans(&raw)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SpanFile {
    Bare(Vec<RawSpan>),
    Wrapped { spans: Vec<RawSpan> },
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSpan {
    text: String,
    font_size: f32,
    #[serde(default)]
    bold: bool,
    page: u32,
    #[serde(default)]
    position: Point,
    order: Option<usize>,
}

/// Parse and validate spans from JSON text.
///
/// # Examples
///
/// ```
/// use pdf_outline::ingest::parse_spans;
///
/// let spans = parse_spans(r#"[{"text": "Title", "fontSize": 24, "page": 1}]"#).unwrap();
/// assert_eq!(spans[0].order, 0);
/// assert!(!spans[0].bold);
/// ```
pub fn parse_spans(json: &str) -> Result<Vec<TextSpan>> {
    let raw = match serde_json::from_str::<SpanFile>(json)? {
        SpanFile::Bare(spans) | SpanFile::Wrapped { spans } => spans,
    };

    let spans: Vec<TextSpan> = raw
        .into_iter()
        .enumerate()
        .map(|(index, raw)| TextSpan {
            text: raw.text,
            font_size: raw.font_size,
            bold: raw.bold,
            page: raw.page,
            position: raw.position,
            order: raw.order.unwrap_or(index),
        })
        .collect();

    validate_all(&spans)?;
    Ok(spans)
}

fn validate_all(spans: &[TextSpan]) -> Result<()> {
    spans
        .iter()
        .enumerate()
        .try_for_each(|(index, span)| span.validate(index))
}
