//! Validated extraction root type.

use crate::ArchiveError;
use crate::Result;
use std::path::Path;
use std::path::PathBuf;

use super::EntryPath;

/// The directory an archive is unpacked into.
///
/// Once constructed, a `DestDir` is an existing directory held as an
/// absolute canonical path, which is what [`EntryPath::resolve`] compares
/// against.
///
/// # Examples
///
/// ```no_run
/// use pathzip_core::types::DestDir;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let dest = DestDir::create("/tmp/unpacked")?;
/// println!("Extracting to: {}", dest.as_path().display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestDir(PathBuf);

impl DestDir {
    /// Creates the directory (and any missing parents) and canonicalizes it.
    ///
    /// An already existing directory is accepted as is.
    ///
    /// # Errors
    ///
    /// Returns `ArchiveError::Io` if the directory cannot be created, if the
    /// path names something other than a directory, or if canonicalization
    /// fails.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        std::fs::create_dir_all(path).map_err(|e| {
            ArchiveError::Io(std::io::Error::new(
                e.kind(),
                format!("failed to create directory {}: {e}", path.display()),
            ))
        })?;

        Self::existing(path)
    }

    /// Validates an already existing directory.
    ///
    /// # Errors
    ///
    /// Returns `ArchiveError::Io` if the path is missing, is not a directory,
    /// or cannot be canonicalized.
    pub fn existing(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.is_dir() {
            return Err(ArchiveError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("path is not a directory: {}", path.display()),
            )));
        }

        let canonical = path.canonicalize().map_err(|e| {
            ArchiveError::Io(std::io::Error::new(
                e.kind(),
                format!("failed to canonicalize path {}: {e}", path.display()),
            ))
        })?;

        Ok(Self(canonical))
    }

    /// Returns the canonical path.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Joins a validated entry name onto this directory.
    #[inline]
    #[must_use]
    pub fn join(&self, entry: &EntryPath) -> PathBuf {
        self.0.join(entry.as_path())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_create_missing_nested() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("a").join("b").join("c");

        let dest = DestDir::create(&nested).unwrap();
        assert!(nested.is_dir());
        assert!(dest.as_path().is_absolute());
    }

    #[test]
    fn test_create_existing_untouched() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("keep.txt"), "keep").unwrap();

        let dest = DestDir::create(temp.path()).unwrap();
        assert_eq!(dest.as_path(), temp.path().canonicalize().unwrap());
        assert_eq!(fs::read_to_string(temp.path().join("keep.txt")).unwrap(), "keep");
    }

    #[test]
    fn test_create_over_file_fails() {
        let temp = TempDir::new().unwrap();
        let file_path = temp.path().join("file.txt");
        fs::write(&file_path, "test").unwrap();

        assert!(matches!(
            DestDir::create(&file_path),
            Err(ArchiveError::Io(_))
        ));
    }

    #[test]
    fn test_existing_requires_directory() {
        let temp = TempDir::new().unwrap();
        assert!(DestDir::existing(temp.path().join("missing")).is_err());
    }

    #[test]
    fn test_canonicalization() {
        let temp = TempDir::new().unwrap();
        let subdir = temp.path().join("subdir");
        fs::create_dir(&subdir).unwrap();

        let dest = DestDir::create(subdir.join(".").join("..")).unwrap();
        assert_eq!(dest.as_path(), temp.path().canonicalize().unwrap());
    }

    #[test]
    fn test_join() {
        let temp = TempDir::new().unwrap();
        let dest = DestDir::create(temp.path()).unwrap();
        let entry = EntryPath::parse("x/y.txt").unwrap();
        assert_eq!(dest.join(&entry), dest.as_path().join("x/y.txt"));
    }
}
