//! Extract command implementation.

use crate::error::with_source_context;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Result;
use pathzip_core::Job;
use pathzip_core::NoopProgress;
use pathzip_core::extraction::extract_zip_with_progress;

pub fn execute(job: &Job, formatter: &dyn OutputFormatter, show_progress: bool) -> Result<()> {
    // Progress bar only on a TTY, never in quiet or JSON mode
    let report = if show_progress {
        let mut progress = CliProgress::new("Extracting");
        extract_zip_with_progress(&job.source, &job.target, &job.extraction, &mut progress)
    } else {
        extract_zip_with_progress(&job.source, &job.target, &job.extraction, &mut NoopProgress)
    };
    let report = with_source_context(report, &job.source)?;

    formatter.format_extraction_result(&job.target, &report)?;
    for warning in &report.warnings {
        formatter.format_warning(warning);
    }

    Ok(())
}
