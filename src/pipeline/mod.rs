//! Outline extraction pipeline.
//!
//! ```text
//! [SpanSource] (external collaborator)
//!     ↓
//! TextSpan[]
//!     ↓
//! [estimate_body_font_size] (full span population)
//!     ↓
//! BodyFontSize
//!     ↓
//! [HeadingClassifier] (candidates, size clusters, H1-H3)
//!     ↓
//! HeadingClassification
//!     ↓
//! [OutlineAssembler] (title, reading order, multi-run merge)
//!     ↓
//! ExtractionResult
//! ```
//!
//! Each stage reads the previous stage's output and never modifies it.
//! The pipeline holds only configuration, so one instance can serve many
//! documents from many threads.

use crate::config::OutlineConfig;
use crate::error::Result;
use crate::ingest::SpanSource;
use crate::layout::{
    estimate_body_font_size, BodyFontSize, HeadingClassification, HeadingClassifier, TextSpan,
};
use crate::outline::{AssembledOutline, ExtractionResult, OutlineAssembler};

/// The outline extraction pipeline.
#[derive(Debug, Clone)]
pub struct OutlinePipeline {
    config: OutlineConfig,
    classifier: HeadingClassifier,
    assembler: OutlineAssembler,
}

impl OutlinePipeline {
    /// Create a pipeline with default configuration.
    pub fn new() -> Self {
        Self::with_config(OutlineConfig::default())
    }

    /// Create a pipeline with custom configuration.
    ///
    /// The configuration is taken as is. Thresholds that are NaN or out of
    /// range silently disable classification, so configurations built from
    /// outside input should go through [`try_with_config`](Self::try_with_config).
    pub fn with_config(config: OutlineConfig) -> Self {
        Self {
            classifier: HeadingClassifier::from_config(&config),
            assembler: OutlineAssembler::from_config(&config),
            config,
        }
    }

    /// Validate `config` and create a pipeline from it.
    pub fn try_with_config(config: OutlineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    /// Get the current configuration.
    pub fn config(&self) -> &OutlineConfig {
        &self.config
    }

    /// Body font size of a document.
    pub fn body_font_size(&self, spans: &[TextSpan]) -> Option<BodyFontSize> {
        estimate_body_font_size(spans, self.config.baseline_precision)
    }

    /// Estimate the baseline and classify headings.
    pub fn classify<'a>(&self, spans: &'a [TextSpan]) -> HeadingClassification<'a> {
        let body = self.body_font_size(spans);
        self.classifier.classify(spans, body)
    }

    /// Run the full pipeline over one document's spans.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_outline::layout::TextSpan;
    /// use pdf_outline::pipeline::OutlinePipeline;
    ///
    /// let spans = vec![
    ///     TextSpan::new("Report Title", 24.0, 1).bold().at(72.0, 40.0).with_order(0),
    ///     TextSpan::new("Body text of the report.", 10.0, 1).at(72.0, 90.0).with_order(1),
    /// ];
    /// let result = OutlinePipeline::new().process(&spans);
    /// assert_eq!(result.title, "Report Title");
    /// assert!(result.outline.is_empty());
    /// ```
    pub fn process(&self, spans: &[TextSpan]) -> ExtractionResult {
        self.process_sourced(spans).into()
    }

    /// Run the full pipeline, keeping the source spans of each entry.
    pub fn process_sourced(&self, spans: &[TextSpan]) -> AssembledOutline {
        let headings = self.classify(spans);
        self.assembler.assemble_sourced(spans, &headings)
    }

    /// Load spans from `source` and run the pipeline.
    pub fn extract(&self, source: &dyn SpanSource) -> Result<ExtractionResult> {
        let spans = source.load_spans()?;
        log::debug!("{}: {} spans", source.name(), spans.len());
        Ok(self.process(&spans))
    }

    /// Like [`extract`](Self::extract), but an ingestion failure yields the
    /// empty result instead of an error.
    pub fn extract_or_empty(&self, source: &dyn SpanSource) -> ExtractionResult {
        self.extract(source).unwrap_or_else(|e| {
            log::warn!("{}: ingestion failed, emitting empty result: {}", source.name(), e);
            ExtractionResult::empty()
        })
    }
}

impl Default for OutlinePipeline {
    fn default() -> Self {
        Self::new()
    }
}
