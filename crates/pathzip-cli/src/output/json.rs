//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use pathzip_core::ArchiveOutcome;
use pathzip_core::ExtractionReport;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use std::path::Path;

pub struct JsonFormatter;

#[derive(Debug, Serialize)]
struct CreationOutput {
    target: String,
    noop: bool,
    files_added: usize,
    directories_added: usize,
    bytes_written: u64,
    bytes_compressed: u64,
    compression_ratio: f64,
    compression_percentage: f64,
    files_skipped: usize,
    duration_ms: u128,
    warnings: Vec<String>,
}

impl CreationOutput {
    fn new(target: &Path, outcome: &ArchiveOutcome) -> Self {
        let target = target.display().to_string();
        match outcome.report() {
            Some(report) => Self {
                target,
                noop: false,
                files_added: report.files_added,
                directories_added: report.directories_added,
                bytes_written: report.bytes_written,
                bytes_compressed: report.bytes_compressed,
                compression_ratio: report.compression_ratio(),
                compression_percentage: report.compression_percentage(),
                files_skipped: report.files_skipped,
                duration_ms: report.duration.as_millis(),
                warnings: report.warnings.clone(),
            },
            None => Self {
                target,
                noop: true,
                files_added: 0,
                directories_added: 0,
                bytes_written: 0,
                bytes_compressed: 0,
                compression_ratio: 0.0,
                compression_percentage: 0.0,
                files_skipped: 0,
                duration_ms: 0,
                warnings: Vec::new(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct ExtractionOutput {
    target: String,
    files_extracted: usize,
    directories_created: usize,
    files_overwritten: usize,
    bytes_written: u64,
    duration_ms: u128,
    warnings: Vec<String>,
}

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_creation_result(&self, target: &Path, outcome: &ArchiveOutcome) -> Result<()> {
        let output = JsonOutput::success("archive", CreationOutput::new(target, outcome));
        Self::output(&output)
    }

    fn format_extraction_result(&self, target: &Path, report: &ExtractionReport) -> Result<()> {
        let data = ExtractionOutput {
            target: target.display().to_string(),
            files_extracted: report.files_extracted,
            directories_created: report.directories_created,
            files_overwritten: report.files_overwritten,
            bytes_written: report.bytes_written,
            duration_ms: report.duration.as_millis(),
            warnings: report.warnings.clone(),
        };

        Self::output(&JsonOutput::success("extract", data))
    }

    fn format_error(&self, error: &anyhow::Error) {
        let output = JsonOutput::error("pathzip", format!("{error:#}"));
        let _ = Self::output(&output);
    }

    // Warnings already travel inside the result's `warnings` array.
    fn format_warning(&self, _message: &str) {}
}
