//! Configuration for archive extraction.

/// Extraction behavior switches.
///
/// # Examples
///
/// ```
/// use pathzip_core::ExtractionConfig;
///
/// // Strict defaults: directory failures abort the extraction
/// let config = ExtractionConfig::default();
/// assert!(!config.best_effort_directories);
///
/// // Tolerate directory creation failures like older releases did
/// let legacy = ExtractionConfig::legacy();
/// assert!(legacy.best_effort_directories);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractionConfig {
    /// Apply the unix mode stored in each entry to the extracted file or
    /// newly created directory.
    pub preserve_permissions: bool,

    /// Log and record directory creation failures instead of aborting.
    ///
    /// Only directory entries are affected; parent directories created for a
    /// file entry always propagate their errors.
    pub best_effort_directories: bool,
}

impl Default for ExtractionConfig {
    /// Default values:
    /// - `preserve_permissions`: `true`
    /// - `best_effort_directories`: `false`
    fn default() -> Self {
        Self {
            preserve_permissions: true,
            best_effort_directories: false,
        }
    }
}

impl ExtractionConfig {
    /// Creates a new `ExtractionConfig` with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration matching the historical tolerant behavior, where
    /// directory entries are created on a best-effort basis.
    #[must_use]
    pub fn legacy() -> Self {
        Self {
            best_effort_directories: true,
            ..Self::default()
        }
    }

    /// Sets whether stored permissions are applied.
    #[must_use]
    pub fn with_preserve_permissions(mut self, preserve: bool) -> Self {
        self.preserve_permissions = preserve;
        self
    }

    /// Sets whether directory creation failures are tolerated.
    #[must_use]
    pub fn with_best_effort_directories(mut self, best_effort: bool) -> Self {
        self.best_effort_directories = best_effort;
        self
    }
}
