//! Configuration for archive creation operations.

use crate::ArchiveError;
use crate::Result;

/// Configuration for archive creation operations.
///
/// # Examples
///
/// ```
/// use pathzip_core::creation::CreationConfig;
///
/// let config = CreationConfig::default()
///     .with_compression_level(9)
///     .with_follow_symlinks(true);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreationConfig {
    /// Deflate level (1-9).
    ///
    /// `None` or `Some(0)` stores file payloads without compression.
    ///
    /// Default: `Some(6)`.
    pub compression_level: Option<u8>,

    /// Archive the targets of symbolic links instead of skipping them.
    ///
    /// Default: `false`. Links themselves are never stored.
    pub follow_symlinks: bool,

    /// Record each entry's unix mode in the archive.
    ///
    /// Default: `true`.
    pub preserve_permissions: bool,
}

impl Default for CreationConfig {
    fn default() -> Self {
        Self {
            compression_level: Some(6),
            follow_symlinks: false,
            preserve_permissions: true,
        }
    }
}

impl CreationConfig {
    /// Creates a new `CreationConfig` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the compression level.
    ///
    /// # Panics
    ///
    /// Panics if the compression level is not in the range 0-9.
    /// Use `validate()` for non-panicking validation.
    #[must_use]
    pub fn with_compression_level(mut self, level: u8) -> Self {
        assert!(level <= 9, "compression level must be 0-9");
        self.compression_level = Some(level);
        self
    }

    /// Sets whether to follow symlinks.
    #[must_use]
    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Sets whether to preserve permissions.
    #[must_use]
    pub fn with_preserve_permissions(mut self, preserve: bool) -> Self {
        self.preserve_permissions = preserve;
        self
    }

    /// Returns `true` when file payloads are stored uncompressed.
    #[must_use]
    pub fn is_stored(&self) -> bool {
        matches!(self.compression_level, None | Some(0))
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ArchiveError::InvalidConfiguration` if the compression level
    /// is above 9.
    pub fn validate(&self) -> Result<()> {
        if let Some(level) = self.compression_level
            && level > 9
        {
            return Err(ArchiveError::InvalidConfiguration {
                reason: format!("compression level must be 0-9, got {level}"),
            });
        }
        Ok(())
    }
}
