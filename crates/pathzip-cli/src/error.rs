//! Error conversion utilities for CLI.
//!
//! Turns pathzip-core's typed errors into contextual anyhow errors with a
//! hint about what to do next.

use anyhow::anyhow;
use pathzip_core::ArchiveError;
use std::path::Path;

/// Converts `ArchiveError` into a user-facing error naming `source`.
pub fn convert_archive_error(err: ArchiveError, source: &Path) -> anyhow::Error {
    match err {
        ArchiveError::SourceNotFound { path } => anyhow!(
            "Cannot access source '{}'\n\
             HINT: Check that SOURCE points to an existing file or directory.",
            path.display()
        ),
        ArchiveError::PathTraversal { path } => anyhow!(
            "Security violation: Archive '{}' contains an entry escaping the target: '{}'\n\
             HINT: This archive may be malicious. Do not extract from untrusted sources.",
            source.display(),
            path.display()
        ),
        ArchiveError::InvalidEntryName { reason } => anyhow!(
            "Archive '{}' contains an unusable entry name: {reason}",
            source.display()
        ),
        ArchiveError::InvalidArchive(reason) => anyhow!(
            "Invalid archive '{}': {reason}\n\
             HINT: The archive may be corrupted or not a ZIP file.",
            source.display()
        ),
        ArchiveError::InvalidConfiguration { reason } => anyhow!("Invalid configuration: {reason}"),
        ArchiveError::Io(io_err) => anyhow!(
            "I/O error while processing '{}': {io_err}",
            source.display()
        ),
    }
}

/// Maps a core result onto an anyhow result with source context.
pub fn with_source_context<T>(
    result: Result<T, ArchiveError>,
    source: &Path,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_archive_error(e, source))
}
