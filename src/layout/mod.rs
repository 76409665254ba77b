//! Typographic analysis of a document's spans.
//!
//! - Span model and reading-order sequencing
//! - Body font size estimation (character-weighted mode)
//! - Heading candidate filtering and font-size clustering into H1-H3
//! - Optional noise text rejection

pub mod baseline;
pub mod heading_detector;
pub mod text_filter;
pub mod text_span;

// Re-export main types
pub use baseline::{estimate_body_font_size, BodyFontSize};
pub use heading_detector::{
    cluster_font_sizes, detect_headings, HeadingCandidate, HeadingClassification,
    HeadingClassifier, HeadingLevel,
};
pub use text_filter::TextFilter;
pub use text_span::{reading_sequence, TextSpan};
