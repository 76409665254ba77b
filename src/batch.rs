//! Batch extraction over a directory of span files.
//!
//! Documents are independent: each one runs the whole pipeline on its own
//! rayon task, and a failure in one document never stops the others. A
//! document whose spans cannot be ingested still gets an output file
//! holding the empty result.

use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::ingest::{JsonSpanSource, SpanSource};
use crate::outline::ExtractionResult;
use crate::pipeline::OutlinePipeline;

/// What happened to one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentStatus {
    /// The pipeline ran and the result was written
    Extracted {
        /// Number of outline entries
        entries: usize,
    },
    /// Ingestion or output failed; the empty result was written if possible
    Failed {
        /// Error message
        reason: String,
    },
}

/// Per-document line of a batch report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentOutcome {
    /// Span file that was read
    pub input: PathBuf,
    /// Result file that was written
    pub output: PathBuf,
    /// Outcome
    pub status: DocumentStatus,
}

impl DocumentOutcome {
    /// True when the document was extracted and written.
    pub fn is_success(&self) -> bool {
        matches!(self.status, DocumentStatus::Extracted { .. })
    }
}

/// Outcomes of a batch run, in input path order.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// One outcome per input document
    pub outcomes: Vec<DocumentOutcome>,
}

impl BatchReport {
    /// Number of documents extracted successfully.
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    /// Number of documents that failed.
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }
}

/// List the `*.json` span files directly inside `dir`, sorted by path.
pub fn discover_span_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .filter(|p| {
            p.extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
        })
        .collect();
    files.sort();
    Ok(files)
}

/// Extract every span file in `input_dir` into `output_dir`.
///
/// Each input `name.json` produces `output_dir/name.json`. Only problems
/// with the directories themselves are returned as errors; per-document
/// failures are reported in the [`BatchReport`].
pub fn process_directory(
    pipeline: &OutlinePipeline,
    input_dir: &Path,
    output_dir: &Path,
) -> Result<BatchReport> {
    fs::create_dir_all(output_dir)?;
    if fs::canonicalize(input_dir)? == fs::canonicalize(output_dir)? {
        return Err(Error::InvalidConfig(
            "output directory must differ from the input directory".to_string(),
        ));
    }

    let inputs = discover_span_files(input_dir)?;
    log::info!(
        "Extracting outlines for {} documents from {}",
        inputs.len(),
        input_dir.display()
    );

    let outcomes: Vec<DocumentOutcome> = inputs
        .par_iter()
        .map(|input| process_document(pipeline, input, output_dir))
        .collect();

    let report = BatchReport { outcomes };
    log::info!(
        "Batch complete: {} extracted, {} failed",
        report.succeeded(),
        report.failed()
    );
    Ok(report)
}

/// Run one document and write its result.
pub fn process_document(
    pipeline: &OutlinePipeline,
    input: &Path,
    output_dir: &Path,
) -> DocumentOutcome {
    let output = output_path(input, output_dir);
    let source = JsonSpanSource::new(input);

    let (result, mut failure) = match pipeline.extract(&source) {
        Ok(result) => (result, None),
        Err(e) => {
            log::warn!("{}: {}", source.name(), e);
            (ExtractionResult::empty(), Some(e.to_string()))
        },
    };
    let entries = result.outline.len();

    if let Err(e) = result.write_json(&output) {
        log::error!("{}: could not write {}: {}", source.name(), output.display(), e);
        let write_error = format!("writing {}: {}", output.display(), e);
        failure = Some(match failure {
            Some(reason) => format!("{}; {}", reason, write_error),
            None => write_error,
        });
    }

    let status = match failure {
        Some(reason) => DocumentStatus::Failed { reason },
        None => DocumentStatus::Extracted { entries },
    };
    DocumentOutcome {
        input: input.to_path_buf(),
        output,
        status,
    }
}

fn output_path(input: &Path, output_dir: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    output_dir.join(format!("{}.json", stem))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discover_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.json", "a.JSON", "notes.txt"] {
            fs::write(dir.path().join(name), "[]").unwrap();
        }
        fs::create_dir(dir.path().join("nested.json")).unwrap();

        let files = discover_span_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.JSON", "b.json"]);
    }

    #[test]
    fn test_output_path_uses_stem() {
        let out = output_path(Path::new("/in/report.json"), Path::new("/out"));
        assert_eq!(out, PathBuf::from("/out/report.json"));
    }

    #[test]
    fn test_same_input_and_output_dir_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let result = process_directory(&OutlinePipeline::new(), dir.path(), dir.path());
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_failed_document_gets_empty_output() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        let bad = input.path().join("broken.json");
        fs::write(&bad, "{ this is not json").unwrap();

        let outcome = process_document(&OutlinePipeline::new(), &bad, output.path());
        assert!(!outcome.is_success());
        let written = fs::read_to_string(outcome.output).unwrap();
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&written).unwrap(),
            serde_json::json!({"title": "", "outline": []})
        );
    }
}
