//! Title and outline assembly.
//!
//! Takes the classified headings of one document and produces the
//! exported [`ExtractionResult`]: the title plus H1-H3 entries in reading
//! order.

pub mod assembler;
pub mod result;
pub mod title;

pub use assembler::{AssembledOutline, OutlineAssembler, SourcedEntry};
pub use result::{ExtractionResult, OutlineEntry};
pub use title::select_title_span;
