//! Extract title and outline for every span file in a directory
//!
//! Reads `*.json` span files (as produced by an upstream text extractor)
//! and writes one `{"title", "outline"}` JSON file per input.
//!
//! Usage:
//!   cargo run --release --bin extract_outline
//!   cargo run --release --bin extract_outline -- --input-dir spans --output-dir outlines
//!   cargo run --release --bin extract_outline -- --profile heuristic --config tuning.json -v

use pdf_outline::batch::{process_directory, DocumentStatus};
use pdf_outline::config::{ExtractionProfile, OutlineConfig};
use pdf_outline::pipeline::OutlinePipeline;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

struct ExtractArgs {
    input_dir: PathBuf,
    output_dir: PathBuf,
    config_file: Option<PathBuf>,
    profile: ExtractionProfile,
    verbose: bool,
}

impl ExtractArgs {
    fn from_args() -> Result<Self, String> {
        let args: Vec<String> = std::env::args().collect();
        let mut parsed = Self {
            input_dir: PathBuf::from("input"),
            output_dir: PathBuf::from("output"),
            config_file: None,
            profile: ExtractionProfile::Strict,
            verbose: false,
        };

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--input-dir" | "-i" => {
                    i += 1;
                    parsed.input_dir = PathBuf::from(value_of(&args, i, "--input-dir")?);
                },
                "--output-dir" | "-o" => {
                    i += 1;
                    parsed.output_dir = PathBuf::from(value_of(&args, i, "--output-dir")?);
                },
                "--config" | "-c" => {
                    i += 1;
                    parsed.config_file = Some(PathBuf::from(value_of(&args, i, "--config")?));
                },
                "--profile" | "-p" => {
                    i += 1;
                    let name = value_of(&args, i, "--profile")?;
                    parsed.profile = ExtractionProfile::from_name(name)
                        .ok_or_else(|| format!("unknown profile '{}'", name))?;
                },
                "--verbose" | "-v" => {
                    parsed.verbose = true;
                },
                other => return Err(format!("unknown argument '{}'", other)),
            }
            i += 1;
        }

        Ok(parsed)
    }

    /// Profile defaults, with the keys of the config file laid over them.
    fn load_config(&self) -> Result<OutlineConfig, String> {
        let profile = self.profile.create_config();
        match &self.config_file {
            Some(path) => profile
                .overlay_json_file(path)
                .map_err(|e| format!("config {}: {}", path.display(), e)),
            None => Ok(profile),
        }
    }
}

fn value_of<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str, String> {
    args.get(i)
        .map(String::as_str)
        .ok_or_else(|| format!("{} needs a value", flag))
}

fn main() -> ExitCode {
    let args = match ExtractArgs::from_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!(
                "Usage: extract_outline [--input-dir DIR] [--output-dir DIR] \
                 [--config FILE] [--profile strict|heuristic] [--verbose]"
            );
            return ExitCode::from(2);
        },
    };

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config = match args.load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        },
    };

    println!("Outline Extractor");
    println!("=================");
    println!("Input directory: {}", args.input_dir.display());
    println!("Output directory: {}", args.output_dir.display());
    println!();

    let pipeline = match OutlinePipeline::try_with_config(config) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        },
    };
    let start = Instant::now();

    let report = match process_directory(&pipeline, &args.input_dir, &args.output_dir) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        },
    };

    for (i, outcome) in report.outcomes.iter().enumerate() {
        let name = outcome
            .input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        match &outcome.status {
            DocumentStatus::Extracted { entries } => {
                println!("[{}/{}] {} ✓ ({} headings)", i + 1, report.outcomes.len(), name, entries)
            },
            DocumentStatus::Failed { reason } => {
                println!("[{}/{}] {} ✗ Error: {}", i + 1, report.outcomes.len(), name, reason)
            },
        }
    }

    println!("\n{}", "=".repeat(70));
    println!("Extraction Complete");
    println!("{}", "=".repeat(70));
    println!("Success: {}/{}", report.succeeded(), report.outcomes.len());
    println!("Errors: {}", report.failed());
    println!("Time: {:?}", start.elapsed());
    println!("Output: {}", args.output_dir.display());
    println!("{}", "=".repeat(70));

    ExitCode::SUCCESS
}
