//! Configuration for outline extraction.
//!
//! Every heuristic threshold used by the classifier and the assembler lives
//! here as a named value with a documented default, so the policy can be
//! tuned without touching control flow.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Upper bound on heading levels (H1, H2, H3).
pub const MAX_HEADING_LEVELS: usize = 3;

/// What to do when the title span also qualifies as an H1 outline entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitlePolicy {
    /// The title is never repeated as an outline row
    #[default]
    Exclude,
    /// Keep the title in the outline when it is the only H1 heading
    KeepSoleH1,
}

/// Outline extraction configuration.
///
/// Deserializes from a partial JSON object: missing keys take the defaults.
///
/// # Example
///
/// ```
/// use pdf_outline::config::{OutlineConfig, TitlePolicy};
///
/// let config = OutlineConfig::default()
///     .with_heading_size_ratio(1.3)
///     .with_title_policy(TitlePolicy::KeepSoleH1);
/// assert_eq!(config.max_levels, 3);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutlineConfig {
    /// A span is a candidate when `font_size >= heading_size_ratio * body` (default 1.2)
    pub heading_size_ratio: f32,

    /// Bold spans qualify at `font_size >= bold_min_size_ratio * body` (default 1.0)
    pub bold_min_size_ratio: f32,

    /// Number of distinct font-size clusters mapped to levels (1..=3, default 3)
    pub max_levels: usize,

    /// Two font sizes closer than this are the same size (default 0.05)
    pub size_tolerance: f32,

    /// Step used to bucket font sizes for the body-size vote (default 0.1)
    pub baseline_precision: f32,

    /// Join adjacent runs of one visual heading into a single entry (default true)
    pub merge_multi_run: bool,

    /// Max vertical gap between merged runs, in multiples of their font size (default 2.0)
    pub merge_max_line_gap: f32,

    /// Title / outline overlap policy (default `Exclude`)
    pub title_policy: TitlePolicy,

    /// Reject noise text (page numbers, bullets, URLs, dates...) as candidates (default false)
    pub text_filter: bool,

    /// Drop outline entries whose text repeats an earlier entry (default false)
    pub dedupe_repeated_text: bool,

    /// Longest text accepted as a heading when `text_filter` is on (default 200)
    pub max_heading_chars: usize,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        Self {
            heading_size_ratio: 1.2,
            bold_min_size_ratio: 1.0,
            max_levels: MAX_HEADING_LEVELS,
            size_tolerance: 0.05,
            baseline_precision: 0.1,
            merge_multi_run: true,
            merge_max_line_gap: 2.0,
            title_policy: TitlePolicy::Exclude,
            text_filter: false,
            dedupe_repeated_text: false,
            max_heading_chars: 200,
        }
    }
}

impl OutlineConfig {
    /// Create configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a (partial) configuration from a JSON file and validate it.
    ///
    /// Missing keys take the library defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::default().overlay_json_file(path)
    }

    /// Override this configuration with the keys present in a JSON file.
    ///
    /// Keys absent from the file keep their current values, so a profile
    /// can be tuned by a small file. The result is validated.
    pub fn overlay_json_file(&self, path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        self.overlay_json(&raw)
    }

    /// Override this configuration with the keys of a JSON object.
    pub fn overlay_json(&self, json: &str) -> Result<Self> {
        let serde_json::Value::Object(overrides) = serde_json::from_str::<serde_json::Value>(json)? else {
            return Err(Error::InvalidConfig(
                "configuration must be a JSON object".to_string(),
            ));
        };
        let mut merged = serde_json::to_value(self)?;
        if let serde_json::Value::Object(base) = &mut merged {
            base.extend(overrides);
        }
        let config: Self = serde_json::from_value(merged)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make the classifier meaningless.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("heading_size_ratio", self.heading_size_ratio),
            ("bold_min_size_ratio", self.bold_min_size_ratio),
            ("baseline_precision", self.baseline_precision),
            ("merge_max_line_gap", self.merge_max_line_gap),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }
        if !self.size_tolerance.is_finite() || self.size_tolerance < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "size_tolerance must be non-negative, got {}",
                self.size_tolerance
            )));
        }
        if self.max_levels == 0 || self.max_levels > MAX_HEADING_LEVELS {
            return Err(Error::InvalidConfig(format!(
                "max_levels must be between 1 and {}, got {}",
                MAX_HEADING_LEVELS, self.max_levels
            )));
        }
        Ok(())
    }

    /// Set the size multiplier of the candidate predicate.
    pub fn with_heading_size_ratio(mut self, ratio: f32) -> Self {
        self.heading_size_ratio = ratio;
        self
    }

    /// Set how many font-size clusters become heading levels.
    pub fn with_max_levels(mut self, levels: usize) -> Self {
        self.max_levels = levels;
        self
    }

    /// Set the font-size equality tolerance.
    pub fn with_size_tolerance(mut self, tolerance: f32) -> Self {
        self.size_tolerance = tolerance;
        self
    }

    /// Enable or disable multi-run heading merging.
    pub fn with_merge_multi_run(mut self, enable: bool) -> Self {
        self.merge_multi_run = enable;
        self
    }

    /// Set the title / outline overlap policy.
    pub fn with_title_policy(mut self, policy: TitlePolicy) -> Self {
        self.title_policy = policy;
        self
    }

    /// Enable or disable the noise text filter.
    pub fn with_text_filter(mut self, enable: bool) -> Self {
        self.text_filter = enable;
        self
    }

    /// Enable or disable repeated heading removal.
    pub fn with_dedupe_repeated_text(mut self, enable: bool) -> Self {
        self.dedupe_repeated_text = enable;
        self
    }
}

/// Preset configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractionProfile {
    /// Pure typographic classification, no text heuristics
    #[default]
    Strict,
    /// Typographic classification plus noise filtering and running-header removal
    ///
    /// Suited to forms, flyers and reports where page numbers, bullets and
    /// repeated headers are set in heading-sized type.
    Heuristic,
}

impl ExtractionProfile {
    /// Create the configuration for this profile.
    pub fn create_config(&self) -> OutlineConfig {
        match self {
            Self::Strict => OutlineConfig::default(),
            Self::Heuristic => OutlineConfig {
                text_filter: true,
                dedupe_repeated_text: true,
                max_heading_chars: 80,
                ..OutlineConfig::default()
            },
        }
    }

    /// Parse a profile name as given on the command line.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "strict" => Some(Self::Strict),
            "heuristic" => Some(Self::Heuristic),
            _ => None,
        }
    }
}
