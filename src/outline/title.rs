//! Document title selection.

use std::cmp::Ordering;

use crate::layout::{HeadingClassification, TextSpan};
use crate::utils::safe_float_cmp;

/// Pick the span that carries the document title.
///
/// The largest heading candidate on page 1 wins. Without page-1
/// candidates the largest span anywhere in the document is used. Spans
/// within `tolerance` of the largest size count as equally large; among
/// those the topmost, then leftmost, then earliest-emitted span wins.
///
/// Returns the span index, or `None` for a document without spans.
pub fn select_title_span(
    spans: &[TextSpan],
    headings: &HeadingClassification<'_>,
    tolerance: f32,
) -> Option<usize> {
    let first_page: Vec<usize> = headings
        .candidates()
        .iter()
        .filter(|c| c.span.page == 1)
        .map(|c| c.index)
        .collect();

    best_span(spans, &first_page, tolerance).or_else(|| {
        log::debug!("No page-1 heading candidate, falling back to largest span");
        let all: Vec<usize> = (0..spans.len()).collect();
        best_span(spans, &all, tolerance)
    })
}

/// Largest span of `indices`, ties broken by position.
///
/// The maximum is fixed first and the tolerance is measured from it, so
/// the choice does not depend on the order of `indices`.
fn best_span(spans: &[TextSpan], indices: &[usize], tolerance: f32) -> Option<usize> {
    let largest = indices
        .iter()
        .map(|&i| spans[i].font_size)
        .filter(|size| size.is_finite())
        .max_by(|a, b| safe_float_cmp(*a, *b));

    indices
        .iter()
        .copied()
        .filter(|&i| largest.map_or(true, |max| max - spans[i].font_size <= tolerance))
        .min_by(|&a, &b| position_cmp(&spans[a], &spans[b]))
}

fn position_cmp(a: &TextSpan, b: &TextSpan) -> Ordering {
    a.position
        .reading_cmp(&b.position)
        .then_with(|| a.order.cmp(&b.order))
}
