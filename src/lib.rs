// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]

//! # PDF Outline
//!
//! Title and heading outline classification for paginated documents, from
//! typographic signals only: font size, weight, page and position of each
//! text span. No layout model, no OCR.
//!
//! ## Pipeline
//!
//! 1. **Span ingestion** ([`ingest`]): an external extractor supplies the
//!    ordered text spans of a document.
//! 2. **Baseline** ([`layout::baseline`]): character-weighted mode of the
//!    font sizes gives the body text size.
//! 3. **Heading classification** ([`layout::heading_detector`]): spans at
//!    least 1.2x the body size, or bold at body size, are candidates; their
//!    three largest size clusters become H1, H2 and H3.
//! 4. **Assembly** ([`outline`]): the largest page-1 candidate becomes the
//!    title and the remaining headings are emitted in reading order.
//!
//! ## Quick Start
//!
//! ```
//! use pdf_outline::layout::TextSpan;
//! use pdf_outline::OutlinePipeline;
//!
//! let spans = vec![
//!     TextSpan::new("Introduction", 18.0, 1).at(72.0, 60.0).with_order(0),
//!     TextSpan::new("Some body text on the first page.", 10.0, 1).at(72.0, 90.0).with_order(1),
//!     TextSpan::new("Background", 14.0, 2).bold().at(72.0, 60.0).with_order(2),
//!     TextSpan::new("More body text on the second page.", 10.0, 2).at(72.0, 90.0).with_order(3),
//!     TextSpan::new("Methods", 18.0, 2).at(72.0, 300.0).with_order(4),
//! ];
//!
//! let result = OutlinePipeline::new().process(&spans);
//! assert_eq!(result.title, "Introduction");
//! assert_eq!(
//!     result.to_json().unwrap(),
//!     r#"{"title":"Introduction","outline":[{"level":"H2","text":"Background","page":2},{"level":"H1","text":"Methods","page":2}]}"#
//! );
//! ```
//!
//! ## License
//!
//! Licensed under either of:
//!
//! * Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
//! * MIT license ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]

// Error handling
pub mod error;

// Configuration
pub mod config;

// Span model and typographic analysis
pub mod geometry;
pub mod layout;

// Title and outline assembly
pub mod outline;

// Span ingestion seam
pub mod ingest;

// Pipeline orchestration
pub mod pipeline;

// Directory batch processing
pub mod batch;

// Re-exports
pub use config::{ExtractionProfile, OutlineConfig, TitlePolicy};
pub use error::{Error, Result};
pub use layout::{HeadingLevel, TextSpan};
pub use outline::{ExtractionResult, OutlineEntry};
pub use pipeline::OutlinePipeline;

// Internal utilities
pub(crate) mod utils {
    //! Internal utility functions for the library.

    use std::cmp::Ordering;

    /// Compare two floats with a total order.
    ///
    /// NaN values are treated as equal to each other and greater than all other values,
    /// so sorting never panics on malformed sizes or coordinates.
    #[inline]
    pub fn safe_float_cmp(a: f32, b: f32) -> Ordering {
        match (a.is_nan(), b.is_nan()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        }
    }

}

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
