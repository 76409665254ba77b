//! Body font size estimation.
//!
//! The body size is the character-weighted mode of the font sizes in a
//! document: the size that covers the most characters. A handful of large
//! title or heading runs cannot move it, unlike a mean.

use std::collections::BTreeMap;

use crate::layout::TextSpan;
use crate::utils::safe_float_cmp;

/// The font size of a document's ordinary paragraph text.
///
/// Computed once per document from the full span population and threaded
/// through the pipeline as a value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyFontSize(f32);

impl BodyFontSize {
    /// Wrap an already-known body size.
    pub fn new(size: f32) -> Self {
        Self(size)
    }

    /// The size in document units.
    pub fn value(&self) -> f32 {
        self.0
    }
}

/// Estimate the body font size of a document.
///
/// Sizes are bucketed to `precision` (0.1 by default) so that rendering
/// noise such as 9.98 vs 10.0 votes for one size. Each span votes with its
/// [`TextSpan::char_weight`]. When two buckets cover the same number of
/// characters the smaller size wins.
///
/// The bucket only decides the vote. The returned size is the exact size
/// covering the most characters inside the winning bucket, so thresholds
/// derived from it are relative to a size that actually occurs.
///
/// Returns `None` for a document without spans.
///
/// # Examples
///
/// ```
/// use pdf_outline::layout::{estimate_body_font_size, TextSpan};
///
/// let spans = vec![
///     TextSpan::new("Annual Report", 24.0, 1),
///     TextSpan::new("This paragraph is the body of the document.", 10.25, 1),
/// ];
/// let body = estimate_body_font_size(&spans, 0.1).unwrap();
/// assert_eq!(body.value(), 10.25);
/// ```
pub fn estimate_body_font_size(spans: &[TextSpan], precision: f32) -> Option<BodyFontSize> {
    let precision = if precision.is_finite() && precision > 0.0 {
        precision
    } else {
        0.1
    };
    let bucket_of = |size: f32| (size / precision).round() as i64;
    let voters = spans
        .iter()
        .filter(|span| span.font_size.is_finite() && span.font_size > 0.0);

    // BTreeMap iterates buckets smallest first, which gives the tie-break.
    let mut coverage: BTreeMap<i64, usize> = BTreeMap::new();
    for span in voters.clone() {
        *coverage.entry(bucket_of(span.font_size)).or_insert(0) += span.char_weight();
    }

    let mut best: Option<(i64, usize)> = None;
    for (&bucket, &weight) in &coverage {
        match best {
            Some((_, best_weight)) if weight <= best_weight => {},
            _ => best = Some((bucket, weight)),
        }
    }
    let (bucket, weight) = best?;

    let mut exact: Vec<(f32, usize)> = Vec::new();
    for span in voters.filter(|span| bucket_of(span.font_size) == bucket) {
        match exact.iter_mut().find(|(size, _)| *size == span.font_size) {
            Some((_, w)) => *w += span.char_weight(),
            None => exact.push((span.font_size, span.char_weight())),
        }
    }
    exact.sort_by(|a, b| safe_float_cmp(a.0, b.0));
    let size = exact
        .iter()
        .fold(None, |best: Option<(f32, usize)>, &(size, w)| match best {
            Some((_, best_w)) if w <= best_w => best,
            _ => Some((size, w)),
        })
        .map(|(size, _)| size)?;

    log::debug!(
        "Body font size {:.2} covers {} of {} weighted characters",
        size,
        weight,
        coverage.values().sum::<usize>()
    );
    Some(BodyFontSize(size))
}
