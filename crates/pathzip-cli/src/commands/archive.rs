//! Archive command implementation.

use crate::error::with_source_context;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Result;
use pathzip_core::Job;
use pathzip_core::NoopProgress;
use pathzip_core::creation::zip::create_zip_with_progress;

pub fn execute(job: &Job, formatter: &dyn OutputFormatter, show_progress: bool) -> Result<()> {
    let outcome = if show_progress {
        let mut progress = CliProgress::new("Archiving");
        create_zip_with_progress(&job.source, &job.target, &job.creation, &mut progress)
    } else {
        create_zip_with_progress(&job.source, &job.target, &job.creation, &mut NoopProgress)
    };
    let outcome = with_source_context(outcome, &job.source)?;

    formatter.format_creation_result(&job.target, &outcome)?;
    if let Some(report) = outcome.report() {
        for warning in &report.warnings {
            formatter.format_warning(warning);
        }
    }

    Ok(())
}
