//! CLI argument parsing using clap.

use anyhow::Result;
use anyhow::bail;
use clap::ArgAction;
use clap::Parser;
use pathzip_core::CreationConfig;
use pathzip_core::ExtractionConfig;
use pathzip_core::Job;
use std::path::PathBuf;

/// Zip a path, or unzip an archive, depending on what SOURCE is.
///
/// A directory, or any file not ending in `.zip`, is archived into TARGET.
/// A `.zip` file is extracted under the TARGET directory.
#[derive(Parser, Debug)]
#[command(name = "pathzip")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to archive, or archive to extract
    #[arg(long, env = "SOURCE", value_name = "PATH")]
    pub source: Option<PathBuf>,

    /// Archive to write, or directory to extract into
    #[arg(long, env = "TARGET", value_name = "PATH")]
    pub target: Option<PathBuf>,

    /// Deflate level (0 stores entries uncompressed)
    #[arg(
        short = 'l',
        long,
        default_value_t = 6,
        value_parser = clap::value_parser!(u8).range(0..=9)
    )]
    pub compression_level: u8,

    /// Archive the targets of symbolic links instead of skipping them
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Warn instead of failing when a directory entry cannot be created
    #[arg(long)]
    pub best_effort_dirs: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long)]
    pub json: bool,
}

impl Cli {
    /// Builds the job described by the flags and environment.
    ///
    /// # Errors
    ///
    /// Fails when SOURCE or TARGET is missing.
    pub fn job(&self) -> Result<Job> {
        let Some(source) = self.source.clone() else {
            bail!(
                "SOURCE is not set\n\
                 HINT: export SOURCE=<path> or pass --source <path>"
            );
        };
        let Some(target) = self.target.clone() else {
            bail!(
                "TARGET is not set\n\
                 HINT: export TARGET=<path> or pass --target <path>"
            );
        };

        let creation = CreationConfig::default()
            .with_compression_level(self.compression_level)
            .with_follow_symlinks(self.follow_symlinks);
        let extraction =
            ExtractionConfig::default().with_best_effort_directories(self.best_effort_dirs);

        Ok(Job::new(source, target)
            .with_creation_config(creation)
            .with_extraction_config(extraction))
    }

    /// Log filter used when `RUST_LOG` is not set.
    #[must_use]
    pub const fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
