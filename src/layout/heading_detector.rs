//! Heading detection using font clustering.
//!
//! Spans that are noticeably larger than the body text, or bold at body size
//! or above, become heading candidates. The distinct candidate font sizes
//! are clustered and the largest three clusters become H1, H2 and H3.

use serde::{Deserialize, Serialize};

use crate::config::{OutlineConfig, MAX_HEADING_LEVELS};
use crate::layout::baseline::BodyFontSize;
use crate::layout::text_filter::TextFilter;
use crate::layout::TextSpan;
use crate::utils::safe_float_cmp;

/// Heading rank of a font-size cluster. Largest size is H1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HeadingLevel {
    /// Largest heading size
    H1,
    /// Second-largest heading size
    H2,
    /// Third-largest heading size
    H3,
}

impl HeadingLevel {
    /// Level for a 0-based cluster rank, `None` past H3.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_outline::layout::HeadingLevel;
    ///
    /// assert_eq!(HeadingLevel::from_rank(0), Some(HeadingLevel::H1));
    /// assert_eq!(HeadingLevel::from_rank(2), Some(HeadingLevel::H3));
    /// assert_eq!(HeadingLevel::from_rank(3), None);
    /// ```
    pub fn from_rank(rank: usize) -> Option<Self> {
        match rank {
            0 => Some(HeadingLevel::H1),
            1 => Some(HeadingLevel::H2),
            2 => Some(HeadingLevel::H3),
            _ => None,
        }
    }

    /// Get the hierarchy level as a number (0 = H1, 1 = H2, 2 = H3).
    pub fn hierarchy_level(&self) -> u8 {
        match self {
            HeadingLevel::H1 => 0,
            HeadingLevel::H2 => 1,
            HeadingLevel::H3 => 2,
        }
    }

    /// Label used in exported outlines.
    pub fn as_str(&self) -> &'static str {
        match self {
            HeadingLevel::H1 => "H1",
            HeadingLevel::H2 => "H2",
            HeadingLevel::H3 => "H3",
        }
    }
}

impl std::fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A span that passed the candidate predicate.
///
/// This is a read-only view over the source span. `level` is `None` when
/// the span's size falls outside the top clusters and the candidate is
/// dropped from the outline.
#[derive(Debug, Clone, Copy)]
pub struct HeadingCandidate<'a> {
    /// Position of the span in the document's span sequence
    pub index: usize,
    /// The source span
    pub span: &'a TextSpan,
    /// Assigned level, if the span's size cluster is ranked
    pub level: Option<HeadingLevel>,
}

/// Output of the heading classifier for one document.
#[derive(Debug, Clone)]
pub struct HeadingClassification<'a> {
    cluster_sizes: Vec<f32>,
    candidates: Vec<HeadingCandidate<'a>>,
}

impl<'a> HeadingClassification<'a> {
    fn empty() -> Self {
        Self {
            cluster_sizes: Vec::new(),
            candidates: Vec::new(),
        }
    }

    /// All candidates in span-sequence order, leveled or not.
    pub fn candidates(&self) -> &[HeadingCandidate<'a>] {
        &self.candidates
    }

    /// Candidates that received a level.
    pub fn leveled(&self) -> impl Iterator<Item = &HeadingCandidate<'a>> {
        self.candidates.iter().filter(|c| c.level.is_some())
    }

    /// Representative size of each ranked cluster, largest first.
    ///
    /// Index 0 is the H1 size; the vector never holds more than three sizes.
    pub fn cluster_sizes(&self) -> &[f32] {
        &self.cluster_sizes
    }

    /// Look up the candidate built from span `index`.
    pub fn candidate(&self, index: usize) -> Option<&HeadingCandidate<'a>> {
        self.candidates
            .binary_search_by_key(&index, |c| c.index)
            .ok()
            .map(|pos| &self.candidates[pos])
    }

    /// Check whether span `index` is a heading candidate.
    pub fn is_candidate(&self, index: usize) -> bool {
        self.candidate(index).is_some()
    }

    /// Level assigned to span `index`, if any.
    pub fn level_of(&self, index: usize) -> Option<HeadingLevel> {
        self.candidate(index).and_then(|c| c.level)
    }

    /// True when no span qualified as a candidate.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Rule-based heading classifier.
#[derive(Debug, Clone)]
pub struct HeadingClassifier {
    size_ratio: f32,
    bold_min_ratio: f32,
    max_levels: usize,
    tolerance: f32,
    filter: Option<TextFilter>,
}

impl Default for HeadingClassifier {
    fn default() -> Self {
        Self::from_config(&OutlineConfig::default())
    }
}

impl HeadingClassifier {
    /// Build a classifier from the thresholds in `config`.
    pub fn from_config(config: &OutlineConfig) -> Self {
        Self {
            size_ratio: config.heading_size_ratio,
            bold_min_ratio: config.bold_min_size_ratio,
            max_levels: config.max_levels.clamp(1, MAX_HEADING_LEVELS),
            tolerance: config.size_tolerance,
            filter: config
                .text_filter
                .then(|| TextFilter::new(config.max_heading_chars)),
        }
    }

    /// The candidate predicate.
    ///
    /// A span qualifies when it is at least `heading_size_ratio` times the
    /// body size, or when it is bold and no smaller than
    /// `bold_min_size_ratio` times the body size. Sizes within the
    /// tolerance count as equal, so 11.99 at body 10 still clears 1.2x.
    pub fn is_candidate(&self, span: &TextSpan, body: BodyFontSize) -> bool {
        let body = body.value();
        let qualifies = at_least(span.font_size, self.size_ratio * body, self.tolerance)
            || (span.bold && at_least(span.font_size, self.bold_min_ratio * body, self.tolerance));

        qualifies
            && self
                .filter
                .as_ref()
                .map_or(true, |filter| filter.accepts(&span.text))
    }

    /// Classify every span of a document.
    ///
    /// With no body size (empty document) nothing is a candidate.
    pub fn classify<'a>(
        &self,
        spans: &'a [TextSpan],
        body: Option<BodyFontSize>,
    ) -> HeadingClassification<'a> {
        let Some(body) = body else {
            return HeadingClassification::empty();
        };

        let mut candidates: Vec<HeadingCandidate<'a>> = spans
            .iter()
            .enumerate()
            .filter(|(_, span)| self.is_candidate(span, body))
            .map(|(index, span)| HeadingCandidate {
                index,
                span,
                level: None,
            })
            .collect();

        let sizes: Vec<f32> = candidates.iter().map(|c| c.span.font_size).collect();
        let mut cluster_sizes = cluster_font_sizes(&sizes, self.tolerance);
        cluster_sizes.truncate(self.max_levels);

        for candidate in &mut candidates {
            candidate.level = cluster_sizes
                .iter()
                .position(|&size| (size - candidate.span.font_size).abs() <= self.tolerance)
                .and_then(HeadingLevel::from_rank);
        }

        log::debug!(
            "Heading classifier: body {:.2}, {} candidates, level sizes {:?}, {} dropped",
            body.value(),
            candidates.len(),
            cluster_sizes,
            candidates.iter().filter(|c| c.level.is_none()).count()
        );

        HeadingClassification {
            cluster_sizes,
            candidates,
        }
    }
}

/// Detect heading candidates and levels with the given configuration.
///
/// # Examples
///
/// ```
/// use pdf_outline::config::OutlineConfig;
/// use pdf_outline::layout::{detect_headings, BodyFontSize, HeadingLevel, TextSpan};
///
/// let spans = vec![
///     TextSpan::new("Methods", 18.0, 1),
///     TextSpan::new("Background", 14.0, 1).bold(),
///     TextSpan::new("Plain paragraph text.", 10.0, 1),
/// ];
/// let headings = detect_headings(&spans, Some(BodyFontSize::new(10.0)), &OutlineConfig::default());
///
/// assert_eq!(headings.level_of(0), Some(HeadingLevel::H1));
/// assert_eq!(headings.level_of(1), Some(HeadingLevel::H2));
/// assert!(!headings.is_candidate(2));
/// ```
pub fn detect_headings<'a>(
    spans: &'a [TextSpan],
    body: Option<BodyFontSize>,
    config: &OutlineConfig,
) -> HeadingClassification<'a> {
    HeadingClassifier::from_config(config).classify(spans, body)
}

/// Cluster font sizes into distinct values, largest first.
///
/// Sizes within `tolerance` of a cluster's largest member join that
/// cluster. The returned values are the cluster representatives.
pub fn cluster_font_sizes(sizes: &[f32], tolerance: f32) -> Vec<f32> {
    let mut unique_sizes: Vec<f32> = sizes.iter().copied().filter(|s| s.is_finite()).collect();
    unique_sizes.sort_by(|a, b| safe_float_cmp(*b, *a));
    unique_sizes.dedup_by(|next, kept| (*kept - *next).abs() <= tolerance);
    unique_sizes
}

fn at_least(size: f32, threshold: f32, tolerance: f32) -> bool {
    size + tolerance >= threshold
}
