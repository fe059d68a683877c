//! High-level dispatcher: pick archive or extract from the source path.

use std::path::Path;
use std::path::PathBuf;

use tracing::debug;

use crate::ArchiveError;
use crate::ExtractionConfig;
use crate::ExtractionReport;
use crate::NoopProgress;
use crate::ProgressCallback;
use crate::Result;
use crate::creation::ArchiveOutcome;
use crate::creation::CreationConfig;
use crate::creation::zip::create_zip_with_progress;
use crate::extraction::extract_zip_with_progress;

/// File extension that selects extraction, compared case-insensitively.
pub const ARCHIVE_EXTENSION: &str = ".zip";

/// Returns `true` if the file name of `path` ends in `.zip` in any case.
///
/// # Examples
///
/// ```
/// use pathzip_core::api::has_archive_extension;
///
/// assert!(has_archive_extension("backup.ZIP"));
/// assert!(!has_archive_extension("notes.txt"));
/// assert!(!has_archive_extension(".zip.d/readme"));
/// ```
#[must_use]
pub fn has_archive_extension<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .file_name()
        .map(|name| name.to_string_lossy().to_ascii_lowercase())
        .is_some_and(|name| name.ends_with(ARCHIVE_EXTENSION))
}

/// Which core operation a job runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Compress the source into a new archive at the target.
    Archive,
    /// Unpack the source archive under the target root.
    Extract,
}

impl Operation {
    /// Selects the operation for `source`.
    ///
    /// Directories are always archived, even when named `something.zip`.
    /// Any other path is extracted only if it carries the `.zip` extension.
    #[must_use]
    pub fn detect(source: &Path, is_dir: bool) -> Self {
        if is_dir || !has_archive_extension(source) {
            Self::Archive
        } else {
            Self::Extract
        }
    }

    /// Lowercase name used in logs and JSON output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Archive => "archive",
            Self::Extract => "extract",
        }
    }
}

/// What a finished [`Job`] produced.
#[derive(Debug, Clone)]
pub enum JobOutcome {
    /// The source was archived (or found missing, see [`ArchiveOutcome::NoOp`]).
    Archived(ArchiveOutcome),
    /// The source archive was extracted.
    Extracted(ExtractionReport),
}

/// One archive-or-extract request with all of its configuration.
///
/// # Examples
///
/// ```no_run
/// use pathzip_core::Job;
/// use pathzip_core::JobOutcome;
///
/// let job = Job::new("photos", "photos.zip");
/// match job.run()? {
///     JobOutcome::Archived(outcome) => println!("{} entries", outcome.entry_count()),
///     JobOutcome::Extracted(report) => println!("{} files", report.files_extracted),
/// }
/// # Ok::<(), pathzip_core::ArchiveError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Job {
    /// Path to compress, or archive to extract.
    pub source: PathBuf,
    /// Archive to write, or root directory to extract into.
    pub target: PathBuf,
    /// Settings used when the job archives.
    pub creation: CreationConfig,
    /// Settings used when the job extracts.
    pub extraction: ExtractionConfig,
}

impl Job {
    /// Creates a job with default creation and extraction settings.
    #[must_use]
    pub fn new(source: impl Into<PathBuf>, target: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            creation: CreationConfig::default(),
            extraction: ExtractionConfig::default(),
        }
    }

    /// Replaces the settings used when the job archives.
    #[must_use]
    pub fn with_creation_config(mut self, config: CreationConfig) -> Self {
        self.creation = config;
        self
    }

    /// Replaces the settings used when the job extracts.
    #[must_use]
    pub fn with_extraction_config(mut self, config: ExtractionConfig) -> Self {
        self.extraction = config;
        self
    }

    /// Stats the source and decides what [`Job::run`] will do.
    ///
    /// # Errors
    ///
    /// Returns `ArchiveError::SourceNotFound` if the source cannot be
    /// inspected, including when it is an empty path.
    pub fn operation(&self) -> Result<Operation> {
        let metadata = std::fs::metadata(&self.source).map_err(|e| {
            debug!(source = %self.source.display(), error = %e, "cannot stat source");
            ArchiveError::SourceNotFound {
                path: self.source.clone(),
            }
        })?;

        Ok(Operation::detect(&self.source, metadata.is_dir()))
    }

    /// Runs the job without progress reporting.
    ///
    /// # Errors
    ///
    /// See [`Job::run_with_progress`].
    pub fn run(&self) -> Result<JobOutcome> {
        self.run_with_progress(&mut NoopProgress)
    }

    /// Runs the job, forwarding progress events to `progress`.
    ///
    /// # Errors
    ///
    /// Returns `ArchiveError::SourceNotFound` if the source cannot be stat'ed,
    /// otherwise whatever the selected archive or extract call returns.
    pub fn run_with_progress(&self, progress: &mut dyn ProgressCallback) -> Result<JobOutcome> {
        match self.operation()? {
            Operation::Archive => {
                create_zip_with_progress(&self.source, &self.target, &self.creation, progress)
                    .map(JobOutcome::Archived)
            }
            Operation::Extract => {
                extract_zip_with_progress(&self.source, &self.target, &self.extraction, progress)
                    .map(JobOutcome::Extracted)
            }
        }
    }
}
