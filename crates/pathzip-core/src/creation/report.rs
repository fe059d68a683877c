//! Archive creation operation reporting.

use std::time::Duration;

/// Result of archiving a source path.
///
/// A source that cannot be inspected is not an error: the archive is still
/// written (with an empty central directory) and the caller receives
/// [`ArchiveOutcome::NoOp`] to tell "nothing to archive" apart from a
/// successful walk.
#[derive(Debug, Clone)]
pub enum ArchiveOutcome {
    /// The source was walked and every entry was written.
    Archived(CreationReport),

    /// The source could not be stat'ed; an empty archive was written.
    NoOp,
}

impl ArchiveOutcome {
    /// Returns the report when something was archived.
    #[must_use]
    pub fn report(&self) -> Option<&CreationReport> {
        match self {
            Self::Archived(report) => Some(report),
            Self::NoOp => None,
        }
    }

    /// Returns `true` for the "nothing to archive" outcome.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        matches!(self, Self::NoOp)
    }

    /// Number of entries written, zero for [`ArchiveOutcome::NoOp`].
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.report()
            .map_or(0, |r| r.files_added + r.directories_added)
    }
}

/// Report of an archive creation operation.
///
/// # Examples
///
/// ```
/// use pathzip_core::creation::CreationReport;
///
/// let mut report = CreationReport::default();
/// report.bytes_written = 1024;
/// report.bytes_compressed = 512;
///
/// assert_eq!(report.compression_ratio(), 2.0);
/// assert_eq!(report.compression_percentage(), 50.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CreationReport {
    /// Number of files added to the archive.
    pub files_added: usize,

    /// Number of directory entries added to the archive.
    pub directories_added: usize,

    /// Total payload bytes read from the source (uncompressed).
    pub bytes_written: u64,

    /// Size of the finished archive file.
    pub bytes_compressed: u64,

    /// Duration of the creation operation.
    pub duration: Duration,

    /// Number of nodes skipped (symbolic links).
    pub files_skipped: usize,

    /// Warnings generated during creation.
    pub warnings: Vec<String>,
}

impl CreationReport {
    /// Creates a new empty creation report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a warning message to the report.
    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    /// Returns whether any warnings were generated.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Returns the compression ratio (uncompressed / compressed).
    ///
    /// Returns 0.0 if either side is 0.
    #[must_use]
    pub fn compression_ratio(&self) -> f64 {
        if self.bytes_compressed == 0 || self.bytes_written == 0 {
            return 0.0;
        }
        self.bytes_written as f64 / self.bytes_compressed as f64
    }

    /// Returns the space saved as a percentage of the uncompressed size.
    ///
    /// Returns 0.0 if nothing was written, and never goes below 0.0 when the
    /// container overhead exceeds the savings.
    #[must_use]
    pub fn compression_percentage(&self) -> f64 {
        if self.bytes_written == 0 || self.bytes_compressed >= self.bytes_written {
            return 0.0;
        }
        let saved = self.bytes_written - self.bytes_compressed;
        (saved as f64 / self.bytes_written as f64) * 100.0
    }
}
