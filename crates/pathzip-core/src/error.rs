//! Error types for archiving and extraction operations.

use std::path::PathBuf;
use thiserror::Error;
use zip::result::ZipError;

/// Result type alias using `ArchiveError`.
pub type Result<T> = std::result::Result<T, ArchiveError>;

/// Errors that can occur while archiving a path or extracting an archive.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Archive is corrupted, truncated, or not a ZIP container.
    #[error("invalid archive: {0}")]
    InvalidArchive(String),

    /// The source path given to the dispatcher could not be inspected.
    #[error("source not found: {path}")]
    SourceNotFound {
        /// The source path.
        path: PathBuf,
    },

    /// An entry name would resolve outside the extraction root.
    #[error("path traversal detected: {path}")]
    PathTraversal {
        /// The offending entry name.
        path: PathBuf,
    },

    /// An entry name cannot be stored or restored on this platform.
    #[error("invalid entry name: {reason}")]
    InvalidEntryName {
        /// Why the name was rejected.
        reason: String,
    },

    /// Configuration values are out of range.
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration {
        /// Why the configuration was rejected.
        reason: String,
    },
}

impl ArchiveError {
    /// Returns `true` if this error was raised by entry-name validation.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathzip_core::ArchiveError;
    /// use std::path::PathBuf;
    ///
    /// let err = ArchiveError::PathTraversal {
    ///     path: PathBuf::from("../etc/passwd"),
    /// };
    /// assert!(err.is_security_violation());
    ///
    /// let err = ArchiveError::InvalidArchive("bad header".into());
    /// assert!(!err.is_security_violation());
    /// ```
    #[must_use]
    pub const fn is_security_violation(&self) -> bool {
        matches!(
            self,
            Self::PathTraversal { .. } | Self::InvalidEntryName { .. }
        )
    }
}

impl From<ZipError> for ArchiveError {
    fn from(err: ZipError) -> Self {
        match err {
            ZipError::Io(io) => Self::Io(io),
            other => Self::InvalidArchive(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ArchiveError::InvalidArchive("missing end of central directory".into());
        assert_eq!(
            err.to_string(),
            "invalid archive: missing end of central directory"
        );
    }

    #[test]
    fn test_path_traversal_error() {
        let err = ArchiveError::PathTraversal {
            path: PathBuf::from("../etc/passwd"),
        };
        assert!(err.to_string().contains("path traversal"));
        assert!(err.to_string().contains("../etc/passwd"));
        assert!(err.is_security_violation());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ArchiveError = io_err.into();
        assert!(matches!(err, ArchiveError::Io(_)));
        assert!(!err.is_security_violation());
    }

    #[test]
    fn test_zip_error_conversion_keeps_io() {
        let zip_err = ZipError::Io(std::io::Error::other("disk full"));
        let err: ArchiveError = zip_err.into();
        assert!(matches!(err, ArchiveError::Io(_)));
    }

    #[test]
    fn test_zip_error_conversion_invalid_archive() {
        let zip_err = ZipError::InvalidArchive("bad magic".into());
        let err: ArchiveError = zip_err.into();
        assert!(matches!(err, ArchiveError::InvalidArchive(_)));
        assert!(err.to_string().contains("bad magic"));
    }
}
