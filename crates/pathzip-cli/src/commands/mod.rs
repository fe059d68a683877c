//! Command dispatch.

pub mod archive;
pub mod extract;

use crate::cli::Cli;
use crate::error::with_source_context;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Result;
use pathzip_core::Operation;

/// Builds the job from `cli` and runs whichever operation SOURCE selects.
pub fn run(cli: &Cli, formatter: &dyn OutputFormatter) -> Result<()> {
    let job = cli.job()?;
    let operation = with_source_context(job.operation(), &job.source)?;
    let show_progress = !cli.quiet && !cli.json && CliProgress::should_show();

    tracing::info!(
        operation = operation.as_str(),
        source = %job.source.display(),
        target = %job.target.display(),
        "dispatching"
    );

    match operation {
        Operation::Archive => archive::execute(&job, formatter, show_progress),
        Operation::Extract => extract::execute(&job, formatter, show_progress),
    }
}
