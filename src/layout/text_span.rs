//! Text span representation.
//!
//! A span is the unit the ingestion collaborator hands over: one run of
//! text sharing a single font size and weight at one position on a page.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::error::{Error, Result};
use crate::geometry::Point;

/// A run of text with its typographic and positional metadata.
///
/// Spans are immutable once produced. Classification never edits a span;
/// it builds derived views that refer back to spans by index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextSpan {
    /// The text of the run, untrimmed
    pub text: String,
    /// Font size in document units (comparable across the whole document)
    pub font_size: f32,
    /// Whether the run is set in a bold weight
    pub bold: bool,
    /// 1-based page number
    pub page: u32,
    /// Top-left position of the run on its page
    pub position: Point,
    /// Emission index from the collaborator, monotonic in reading order
    pub order: usize,
}

impl TextSpan {
    /// Create a regular-weight span at the page origin.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_outline::layout::TextSpan;
    ///
    /// let span = TextSpan::new("Introduction", 18.0, 1)
    ///     .bold()
    ///     .at(72.0, 100.0)
    ///     .with_order(3);
    /// assert!(span.bold);
    /// assert_eq!(span.position.y, 100.0);
    /// assert_eq!(span.order, 3);
    /// ```
    pub fn new(text: impl Into<String>, font_size: f32, page: u32) -> Self {
        Self {
            text: text.into(),
            font_size,
            bold: false,
            page,
            position: Point::default(),
            order: 0,
        }
    }

    /// Mark the span as bold.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Set the span position.
    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.position = Point::new(x, y);
        self
    }

    /// Set the emission order.
    pub fn with_order(mut self, order: usize) -> Self {
        self.order = order;
        self
    }

    /// Number of characters this span contributes to the body-size vote.
    ///
    /// Whitespace does not count, but every span weighs at least one so that
    /// documents made only of blank runs still have a baseline.
    pub fn char_weight(&self) -> usize {
        self.text.chars().filter(|c| !c.is_whitespace()).count().max(1)
    }

    /// Check the span against the data model constraints.
    ///
    /// `index` is the span's position in the ingested sequence and is only
    /// used for the error message.
    pub fn validate(&self, index: usize) -> Result<()> {
        let reason = if !self.font_size.is_finite() || self.font_size <= 0.0 {
            format!("font size must be a positive number, got {}", self.font_size)
        } else if self.page == 0 {
            "page numbers are 1-based, got 0".to_string()
        } else if !self.position.is_finite() {
            format!(
                "position must be finite, got ({}, {})",
                self.position.x, self.position.y
            )
        } else {
            return Ok(());
        };
        Err(Error::InvalidSpan { index, reason })
    }

    /// Compare two spans in document reading order: page, then emission order.
    pub fn reading_cmp(&self, other: &TextSpan) -> Ordering {
        self.page
            .cmp(&other.page)
            .then_with(|| self.order.cmp(&other.order))
    }
}

/// Indices of `spans` sorted into document reading order.
///
/// Ties on (page, order) keep their input position, so the result is
/// deterministic even when the collaborator repeats an order value.
pub fn reading_sequence(spans: &[TextSpan]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..spans.len()).collect();
    indices.sort_by(|&a, &b| spans[a].reading_cmp(&spans[b]));
    indices
}
