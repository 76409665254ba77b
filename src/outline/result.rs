//! Exported extraction result.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;
use crate::layout::HeadingLevel;

/// One heading of the outline.
///
/// Serializes as `{"level": "H1", "text": "...", "page": 1}` with keys in
/// that order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineEntry {
    /// Heading level
    pub level: HeadingLevel,
    /// Heading text, trimmed; multi-run headings are joined with one space
    pub text: String,
    /// 1-based page number
    pub page: u32,
}

impl OutlineEntry {
    /// Create a new outline entry.
    pub fn new(level: HeadingLevel, text: impl Into<String>, page: u32) -> Self {
        Self {
            level,
            text: text.into(),
            page,
        }
    }
}

/// Title and outline of one document.
///
/// # Examples
///
/// ```
/// use pdf_outline::outline::ExtractionResult;
///
/// let empty = ExtractionResult::empty();
/// assert_eq!(empty.to_json().unwrap(), r#"{"title":"","outline":[]}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Document title, possibly empty
    pub title: String,
    /// Headings in reading order
    pub outline: Vec<OutlineEntry>,
}

impl ExtractionResult {
    /// The result for a document that could not be read or has no text.
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when there is neither a title nor any heading.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.outline.is_empty()
    }

    /// Compact JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Indented JSON, as written by the batch tool.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the result as indented JSON to `path`.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }
}
