//! Outline assembly.
//!
//! Turns leveled heading candidates into outline entries in reading order,
//! joins multi-run headings, resolves the title and keeps it out of the
//! outline.

use std::collections::HashSet;

use crate::config::{OutlineConfig, TitlePolicy};
use crate::layout::{reading_sequence, HeadingClassification, HeadingLevel, TextFilter, TextSpan};
use crate::outline::result::{ExtractionResult, OutlineEntry};
use crate::outline::title::select_title_span;

/// An outline entry together with the spans it was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct SourcedEntry {
    /// The exported entry
    pub entry: OutlineEntry,
    /// Indices of the source spans, in reading order
    pub span_indices: Vec<usize>,
}

/// Assembly output that keeps provenance for inspection and testing.
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledOutline {
    /// Title text
    pub title: String,
    /// Span the title was selected from
    pub title_span: Option<usize>,
    /// Outline entries in reading order
    pub entries: Vec<SourcedEntry>,
}

impl From<AssembledOutline> for ExtractionResult {
    fn from(assembled: AssembledOutline) -> Self {
        ExtractionResult {
            title: assembled.title,
            outline: assembled.entries.into_iter().map(|e| e.entry).collect(),
        }
    }
}

/// Heading runs collected into one visual heading.
#[derive(Debug)]
struct HeadingGroup {
    level: HeadingLevel,
    page: u32,
    members: Vec<usize>,
}

impl HeadingGroup {
    fn text(&self, spans: &[TextSpan]) -> String {
        self.members
            .iter()
            .map(|&i| spans[i].text.trim())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Builds the title and outline of one document.
#[derive(Debug, Clone)]
pub struct OutlineAssembler {
    merge_multi_run: bool,
    merge_max_line_gap: f32,
    tolerance: f32,
    title_policy: TitlePolicy,
    dedupe_repeated_text: bool,
    reject_web_titles: bool,
}

impl Default for OutlineAssembler {
    fn default() -> Self {
        Self::from_config(&OutlineConfig::default())
    }
}

impl OutlineAssembler {
    /// Build an assembler from `config`.
    pub fn from_config(config: &OutlineConfig) -> Self {
        Self {
            merge_multi_run: config.merge_multi_run,
            merge_max_line_gap: config.merge_max_line_gap,
            tolerance: config.size_tolerance,
            title_policy: config.title_policy,
            dedupe_repeated_text: config.dedupe_repeated_text,
            reject_web_titles: config.text_filter,
        }
    }

    /// Assemble the exported result.
    pub fn assemble(
        &self,
        spans: &[TextSpan],
        headings: &HeadingClassification<'_>,
    ) -> ExtractionResult {
        self.assemble_sourced(spans, headings).into()
    }

    /// Assemble the result, keeping the source spans of every entry.
    pub fn assemble_sourced(
        &self,
        spans: &[TextSpan],
        headings: &HeadingClassification<'_>,
    ) -> AssembledOutline {
        let groups = self.group_headings(spans, headings);
        let title_span = select_title_span(spans, headings, self.tolerance);
        let title_group = title_span.and_then(|t| groups.iter().position(|g| g.members.contains(&t)));

        let mut title = match (title_group, title_span) {
            (Some(g), _) => groups[g].text(spans),
            (None, Some(t)) => spans[t].text.trim().to_string(),
            (None, None) => String::new(),
        };
        if self.reject_web_titles && TextFilter::is_web_address(&title) {
            log::debug!("Blanking web address title {:?}", title);
            title.clear();
        }

        let excluded = title_group.filter(|&g| self.excludes_title_group(&groups, g));

        let mut seen: HashSet<String> = HashSet::new();
        let mut entries = Vec::with_capacity(groups.len());
        for (i, group) in groups.into_iter().enumerate() {
            if Some(i) == excluded {
                continue;
            }
            let text = group.text(spans);
            if text.is_empty() {
                continue;
            }
            if self.dedupe_repeated_text && !seen.insert(text.clone()) {
                log::debug!("Dropping repeated heading {:?} on page {}", text, group.page);
                continue;
            }
            entries.push(SourcedEntry {
                entry: OutlineEntry::new(group.level, text, group.page),
                span_indices: group.members,
            });
        }

        log::debug!(
            "Assembled outline: title {:?}, {} entries",
            title,
            entries.len()
        );

        AssembledOutline {
            title,
            title_span,
            entries,
        }
    }

    /// Walk all spans in reading order and collect leveled candidates into
    /// heading groups.
    ///
    /// A run joins the previous group only when it directly follows that
    /// group's last run in the span sequence (nothing in between, heading
    /// or not), sits on the same page, has the same level and is within
    /// `merge_max_line_gap` font sizes vertically.
    fn group_headings(
        &self,
        spans: &[TextSpan],
        headings: &HeadingClassification<'_>,
    ) -> Vec<HeadingGroup> {
        let mut groups: Vec<HeadingGroup> = Vec::new();
        let mut previous: Option<usize> = None;

        for index in reading_sequence(spans) {
            let Some(level) = headings.level_of(index) else {
                previous = None;
                continue;
            };
            let span = &spans[index];

            let joins = self.merge_multi_run
                && previous.is_some_and(|prev| {
                    let last = &spans[prev];
                    groups.last().is_some_and(|g| g.level == level)
                        && last.page == span.page
                        && last.position.vertical_distance(&span.position)
                            <= self.merge_max_line_gap * last.font_size.max(span.font_size)
                });

            match groups.last_mut() {
                Some(group) if joins => group.members.push(index),
                _ => groups.push(HeadingGroup {
                    level,
                    page: span.page,
                    members: vec![index],
                }),
            }
            previous = Some(index);
        }

        groups
    }

    fn excludes_title_group(&self, groups: &[HeadingGroup], title_group: usize) -> bool {
        if groups[title_group].level != HeadingLevel::H1 {
            return false;
        }
        match self.title_policy {
            TitlePolicy::Exclude => true,
            TitlePolicy::KeepSoleH1 => groups
                .iter()
                .enumerate()
                .any(|(i, g)| i != title_group && g.level == HeadingLevel::H1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{BodyFontSize, HeadingClassifier};

    fn run(spans: &[TextSpan], config: &OutlineConfig) -> AssembledOutline {
        let headings =
            HeadingClassifier::from_config(config).classify(spans, Some(BodyFontSize::new(10.0)));
        OutlineAssembler::from_config(config).assemble_sourced(spans, &headings)
    }

    fn texts(assembled: &AssembledOutline) -> Vec<&str> {
        assembled.entries.iter().map(|e| e.entry.text.as_str()).collect()
    }

    #[test]
    fn test_entries_follow_page_then_order() {
        let spans = vec![
            TextSpan::new("Later", 18.0, 2).at(0.0, 10.0).with_order(5),
            TextSpan::new("Title", 24.0, 1).at(0.0, 10.0).with_order(0),
            TextSpan::new("body text", 10.0, 1).at(0.0, 200.0).with_order(1),
            TextSpan::new("First", 18.0, 1).at(0.0, 400.0).with_order(2),
            TextSpan::new("body text", 10.0, 2).at(0.0, 30.0).with_order(3),
            TextSpan::new("Earlier on page 2", 18.0, 2).at(0.0, 500.0).with_order(4),
        ];
        let assembled = run(&spans, &OutlineConfig::default());
        assert_eq!(assembled.title, "Title");
        assert_eq!(texts(&assembled), vec!["First", "Earlier on page 2", "Later"]);
        assert!(assembled.entries.iter().all(|e| e.entry.level == HeadingLevel::H2));
    }

    #[test]
    fn test_multi_run_heading_is_joined() {
        let spans = vec![
            TextSpan::new("Cover", 28.0, 1).with_order(0),
            TextSpan::new("body", 10.0, 1).at(0.0, 50.0).with_order(1),
            TextSpan::new("2. Results ", 16.0, 2).bold().at(72.0, 100.0).with_order(2),
            TextSpan::new(" and Discussion", 16.0, 2).at(150.0, 100.0).with_order(3),
            TextSpan::new("body", 10.0, 2).at(72.0, 130.0).with_order(4),
        ];
        let assembled = run(&spans, &OutlineConfig::default());
        assert_eq!(texts(&assembled), vec!["2. Results and Discussion"]);
        assert_eq!(assembled.entries[0].span_indices, vec![2, 3]);
    }

    #[test]
    fn test_merge_stops_at_non_candidate() {
        let spans = vec![
            TextSpan::new("Cover", 28.0, 1).with_order(0),
            TextSpan::new("Alpha", 16.0, 1).at(0.0, 100.0).with_order(1),
            TextSpan::new("text", 10.0, 1).at(0.0, 110.0).with_order(2),
            TextSpan::new("Beta", 16.0, 1).at(0.0, 120.0).with_order(3),
        ];
        let assembled = run(&spans, &OutlineConfig::default());
        assert_eq!(texts(&assembled), vec!["Alpha", "Beta"]);
    }

    #[test]
    fn test_merge_never_crosses_pages() {
        let spans = vec![
            TextSpan::new("Cover", 28.0, 1).with_order(0),
            TextSpan::new("Alpha", 16.0, 1).at(0.0, 700.0).with_order(1),
            TextSpan::new("Beta", 16.0, 2).at(0.0, 700.0).with_order(2),
        ];
        let assembled = run(&spans, &OutlineConfig::default());
        assert_eq!(texts(&assembled), vec!["Alpha", "Beta"]);
    }

    #[test]
    fn test_merge_requires_same_level_and_proximity() {
        let spans = vec![
            TextSpan::new("Cover", 28.0, 1).with_order(0),
            TextSpan::new("Chapter", 20.0, 1).at(0.0, 100.0).with_order(1),
            TextSpan::new("Section", 16.0, 1).at(0.0, 120.0).with_order(2),
            TextSpan::new("Far away", 16.0, 1).at(0.0, 600.0).with_order(3),
        ];
        let assembled = run(&spans, &OutlineConfig::default());
        assert_eq!(texts(&assembled), vec!["Chapter", "Section", "Far away"]);
    }

    #[test]
    fn test_merge_can_be_disabled() {
        let spans = vec![
            TextSpan::new("Cover", 28.0, 1).with_order(0),
            TextSpan::new("Part", 16.0, 1).at(0.0, 100.0).with_order(1),
            TextSpan::new("One", 16.0, 1).at(40.0, 100.0).with_order(2),
        ];
        let config = OutlineConfig::default().with_merge_multi_run(false);
        assert_eq!(texts(&run(&spans, &config)), vec!["Part", "One"]);
    }

    #[test]
    fn test_sole_h1_title_is_excluded_by_default() {
        let spans = vec![
            TextSpan::new("Report Title", 24.0, 1).bold().with_order(0),
            TextSpan::new("Scope", 14.0, 1).bold().at(0.0, 100.0).with_order(1),
        ];
        let assembled = run(&spans, &OutlineConfig::default());
        assert_eq!(assembled.title, "Report Title");
        assert_eq!(assembled.title_span, Some(0));
        assert_eq!(texts(&assembled), vec!["Scope"]);
    }

    #[test]
    fn test_keep_sole_h1_policy() {
        let spans = vec![
            TextSpan::new("Report Title", 24.0, 1).bold().with_order(0),
            TextSpan::new("Scope", 14.0, 1).bold().at(0.0, 100.0).with_order(1),
        ];
        let config = OutlineConfig::default().with_title_policy(TitlePolicy::KeepSoleH1);
        let assembled = run(&spans, &config);
        assert_eq!(texts(&assembled), vec!["Report Title", "Scope"]);

        // With a second H1 the title is dropped again.
        let mut spans = spans;
        spans.push(TextSpan::new("Appendix", 24.0, 2).with_order(2));
        let assembled = run(&spans, &config);
        assert_eq!(texts(&assembled), vec!["Scope", "Appendix"]);
    }

    #[test]
    fn test_title_that_is_not_h1_stays_in_outline() {
        let spans = vec![
            TextSpan::new("Overview", 16.0, 1).with_order(0),
            TextSpan::new("text", 10.0, 1).at(0.0, 40.0).with_order(1),
            TextSpan::new("Chapter One", 24.0, 2).with_order(2),
        ];
        let assembled = run(&spans, &OutlineConfig::default());
        assert_eq!(assembled.title, "Overview");
        assert_eq!(texts(&assembled), vec!["Overview", "Chapter One"]);
        assert_eq!(assembled.entries[0].entry.level, HeadingLevel::H2);
    }

    #[test]
    fn test_multi_run_title_uses_whole_group() {
        let spans = vec![
            TextSpan::new("Annual", 24.0, 1).at(100.0, 40.0).with_order(0),
            TextSpan::new("Report 2024", 24.0, 1).at(100.0, 70.0).with_order(1),
            TextSpan::new("body", 10.0, 1).at(0.0, 200.0).with_order(2),
        ];
        let assembled = run(&spans, &OutlineConfig::default());
        assert_eq!(assembled.title, "Annual Report 2024");
        assert!(assembled.entries.is_empty());
    }

    #[test]
    fn test_blank_headings_are_skipped() {
        let spans = vec![
            TextSpan::new("Cover", 28.0, 1).with_order(0),
            TextSpan::new("   ", 16.0, 1).bold().at(0.0, 300.0).with_order(1),
            TextSpan::new("body", 10.0, 1).at(0.0, 320.0).with_order(2),
        ];
        assert!(run(&spans, &OutlineConfig::default()).entries.is_empty());
    }

    #[test]
    fn test_dedupe_repeated_text() {
        let spans = vec![
            TextSpan::new("Cover", 28.0, 1).with_order(0),
            TextSpan::new("Running Header", 16.0, 1).at(0.0, 100.0).with_order(1),
            TextSpan::new("body", 10.0, 1).at(0.0, 120.0).with_order(2),
            TextSpan::new("Running Header", 16.0, 2).at(0.0, 100.0).with_order(3),
        ];
        let plain = run(&spans, &OutlineConfig::default());
        assert_eq!(plain.entries.len(), 2);

        let config = OutlineConfig::default().with_dedupe_repeated_text(true);
        let deduped = run(&spans, &config);
        assert_eq!(texts(&deduped), vec!["Running Header"]);
        assert_eq!(deduped.entries[0].entry.page, 1);
    }

    #[test]
    fn test_web_address_title_is_blanked_when_filtering() {
        let spans = vec![
            TextSpan::new("www.example.org", 20.0, 1).with_order(0),
            TextSpan::new("body", 10.0, 1).at(0.0, 120.0).with_order(1),
            TextSpan::new("Overview", 16.0, 2).at(0.0, 40.0).with_order(2),
        ];
        let plain = run(&spans, &OutlineConfig::default());
        assert_eq!(plain.title, "www.example.org");

        let filtered = run(&spans, &OutlineConfig::default().with_text_filter(true));
        assert_eq!(filtered.title, "");
        assert_eq!(filtered.title_span, Some(0));
        assert_eq!(texts(&filtered), vec!["Overview"]);
        assert_eq!(filtered.entries[0].entry.level, HeadingLevel::H1);
    }

    #[test]
    fn test_empty_document() {
        let assembled = run(&[], &OutlineConfig::default());
        assert_eq!(assembled.title, "");
        assert_eq!(assembled.title_span, None);
        assert!(assembled.entries.is_empty());
    }
}
