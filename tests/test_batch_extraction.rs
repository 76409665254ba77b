//! Integration tests for directory batch extraction.

use pdf_outline::batch::{process_directory, DocumentStatus};
use pdf_outline::{ExtractionProfile, ExtractionResult, OutlinePipeline};
use std::fs;
use std::path::Path;

const REPORT: &str = r#"{"spans": [
    {"text": "Annual Report", "fontSize": 24, "bold": true, "page": 1, "position": {"x": 72, "y": 40}},
    {"text": "The year in review, told in ordinary body text.", "fontSize": 10, "page": 1, "position": {"x": 72, "y": 90}},
    {"text": "Finances", "fontSize": 16, "page": 2, "position": {"x": 72, "y": 40}},
    {"text": "Numbers and commentary on the numbers.", "fontSize": 10, "page": 2, "position": {"x": 72, "y": 80}}
]}"#;

const PLAIN: &str = r#"[
    {"text": "just a note", "fontSize": 11, "page": 1}
]"#;

fn read_result(path: &Path) -> ExtractionResult {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_batch_writes_one_result_per_document() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    fs::write(input.path().join("report.json"), REPORT).unwrap();
    fs::write(input.path().join("plain.json"), PLAIN).unwrap();
    fs::write(input.path().join("readme.txt"), "not a span file").unwrap();

    let report = process_directory(&OutlinePipeline::new(), input.path(), output.path()).unwrap();

    assert_eq!(report.outcomes.len(), 2);
    assert_eq!(report.succeeded(), 2);

    let annual = read_result(&output.path().join("report.json"));
    assert_eq!(annual.title, "Annual Report");
    assert_eq!(annual.outline.len(), 1);
    assert_eq!(annual.outline[0].text, "Finances");
    assert_eq!(annual.outline[0].page, 2);

    let plain = read_result(&output.path().join("plain.json"));
    assert_eq!(plain.title, "just a note");
    assert!(plain.outline.is_empty());

    assert!(!output.path().join("readme.json").exists());
}

#[test]
fn test_batch_continues_after_bad_document() {
    let input = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    fs::write(input.path().join("a_good.json"), REPORT).unwrap();
    fs::write(input.path().join("b_truncated.json"), r#"{"spans": [{"text": "#).unwrap();
    fs::write(
        input.path().join("c_invalid.json"),
        r#"[{"text": "Zero", "fontSize": 0, "page": 1}]"#,
    )
    .unwrap();

    let report = process_directory(&OutlinePipeline::new(), input.path(), output.path()).unwrap();

    assert_eq!(report.succeeded(), 1);
    assert_eq!(report.failed(), 2);
    assert_eq!(
        report.outcomes[0].status,
        DocumentStatus::Extracted { entries: 1 }
    );
    assert!(matches!(report.outcomes[1].status, DocumentStatus::Failed { .. }));
    assert!(matches!(report.outcomes[2].status, DocumentStatus::Failed { .. }));

    for name in ["b_truncated.json", "c_invalid.json"] {
        assert_eq!(read_result(&output.path().join(name)), ExtractionResult::empty());
    }
}

#[test]
fn test_batch_creates_output_directory() {
    let input = tempfile::tempdir().unwrap();
    let root = tempfile::tempdir().unwrap();
    let output = root.path().join("nested").join("out");
    fs::write(input.path().join("report.json"), REPORT).unwrap();

    let pipeline = OutlinePipeline::with_config(ExtractionProfile::Heuristic.create_config());
    let report = process_directory(&pipeline, input.path(), &output).unwrap();

    assert_eq!(report.succeeded(), 1);
    assert!(output.join("report.json").is_file());
}

#[test]
fn test_missing_input_directory_is_an_error() {
    let root = tempfile::tempdir().unwrap();
    let result = process_directory(
        &OutlinePipeline::new(),
        &root.path().join("does-not-exist"),
        &root.path().join("out"),
    );
    assert!(result.is_err());
}
