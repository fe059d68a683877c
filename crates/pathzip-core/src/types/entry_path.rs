//! Validated entry name type for archive extraction.

use crate::ArchiveError;
use crate::Result;
use std::path::Path;
use std::path::PathBuf;

use super::DestDir;

/// A stored entry name that is safe to join onto an extraction root.
///
/// `EntryPath` can only be built through [`EntryPath::parse`], which
/// rejects:
/// - names containing null bytes
/// - absolute names (`/etc/passwd`) and, on Windows, drive prefixes
/// - any `..` segment
/// - names with no segment left after normalization
///
/// Both `/` and `\` are treated as separators and `.` / empty segments are
/// dropped, so `a//./b/` becomes `a/b`.
///
/// # Examples
///
/// ```
/// use pathzip_core::types::EntryPath;
///
/// let path = EntryPath::parse("photos/2024/beach.jpg").unwrap();
/// assert_eq!(path.as_path(), std::path::Path::new("photos/2024/beach.jpg"));
///
/// assert!(EntryPath::parse("../etc/passwd").is_err());
/// assert!(EntryPath::parse("/etc/passwd").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryPath(PathBuf);

impl EntryPath {
    /// Validates and normalizes a stored entry name.
    ///
    /// # Errors
    ///
    /// - `ArchiveError::PathTraversal` for absolute names, drive prefixes and
    ///   `..` segments
    /// - `ArchiveError::InvalidEntryName` for null bytes and empty names
    pub fn parse(name: &str) -> Result<Self> {
        if name.contains('\0') {
            return Err(ArchiveError::InvalidEntryName {
                reason: format!("entry name contains null bytes: {}", name.escape_default()),
            });
        }

        if name.starts_with('/') || name.starts_with('\\') {
            return Err(ArchiveError::PathTraversal {
                path: PathBuf::from(name),
            });
        }

        let mut normalized = PathBuf::new();
        for segment in name.split(['/', '\\']) {
            match segment {
                "" | "." => {}
                ".." => {
                    return Err(ArchiveError::PathTraversal {
                        path: PathBuf::from(name),
                    });
                }
                _ => {
                    if has_drive_prefix(segment) {
                        return Err(ArchiveError::PathTraversal {
                            path: PathBuf::from(name),
                        });
                    }
                    normalized.push(segment);
                }
            }
        }

        if normalized.as_os_str().is_empty() {
            return Err(ArchiveError::InvalidEntryName {
                reason: format!("entry name has no path segments: {name:?}"),
            });
        }

        Ok(Self(normalized))
    }

    /// Joins this name onto `dest`, verifying the result stays inside it.
    ///
    /// The deepest existing ancestor of the joined path is canonicalized so
    /// that symlinked directories already present under `dest` cannot
    /// redirect writes elsewhere. The final component is not inspected:
    /// callers writing a file must not follow a symlink already at that path.
    ///
    /// # Errors
    ///
    /// Returns `ArchiveError::PathTraversal` if an existing ancestor resolves
    /// outside `dest`, or `Io` if canonicalization fails for a reason other
    /// than the path not existing yet.
    pub fn resolve(&self, dest: &DestDir) -> Result<PathBuf> {
        let resolved = dest.join(self);

        for ancestor in resolved.ancestors().skip(1) {
            match ancestor.canonicalize() {
                Ok(canonical) => {
                    if !canonical.starts_with(dest.as_path()) {
                        return Err(ArchiveError::PathTraversal {
                            path: self.0.clone(),
                        });
                    }
                    break;
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(ArchiveError::Io(std::io::Error::new(
                        e.kind(),
                        format!("failed to canonicalize {}: {e}", ancestor.display()),
                    )));
                }
            }
        }

        Ok(resolved)
    }

    /// Returns the normalized relative path.
    #[inline]
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

#[cfg(windows)]
fn has_drive_prefix(segment: &str) -> bool {
    segment.contains(':')
}

#[cfg(not(windows))]
fn has_drive_prefix(_segment: &str) -> bool {
    false
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_plain_names() {
        assert_eq!(
            EntryPath::parse("file.txt").unwrap().as_path(),
            Path::new("file.txt")
        );
        assert_eq!(
            EntryPath::parse("dir/sub/").unwrap().as_path(),
            Path::new("dir/sub")
        );
    }

    #[test]
    fn test_parse_normalizes_segments() {
        assert_eq!(
            EntryPath::parse("./a//b/./c.txt").unwrap().as_path(),
            Path::new("a/b/c.txt")
        );
        assert_eq!(
            EntryPath::parse("win\\style\\name.txt").unwrap().as_path(),
            Path::new("win/style/name.txt")
        );
    }

    #[test]
    fn test_parse_rejects_traversal() {
        for name in ["../evil", "a/../../evil", "a/..", "..\\evil", "ok/..\\..\\x"] {
            assert!(
                matches!(
                    EntryPath::parse(name),
                    Err(ArchiveError::PathTraversal { .. })
                ),
                "{name} should be rejected"
            );
        }
    }

    #[test]
    fn test_parse_rejects_absolute() {
        assert!(matches!(
            EntryPath::parse("/etc/passwd"),
            Err(ArchiveError::PathTraversal { .. })
        ));
        assert!(matches!(
            EntryPath::parse("\\windows\\system32"),
            Err(ArchiveError::PathTraversal { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_null_and_empty() {
        assert!(matches!(
            EntryPath::parse("bad\0name"),
            Err(ArchiveError::InvalidEntryName { .. })
        ));
        for name in ["", "/", "./", "./."] {
            assert!(EntryPath::parse(name).is_err(), "{name:?} should be rejected");
        }
    }

    #[test]
    fn test_resolve_inside_dest() {
        let temp = TempDir::new().unwrap();
        let dest = DestDir::create(temp.path()).unwrap();

        let resolved = EntryPath::parse("a/b/c.txt").unwrap().resolve(&dest).unwrap();
        assert!(resolved.starts_with(dest.as_path()));
        assert!(resolved.ends_with("a/b/c.txt"));
    }

    #[cfg(unix)]
    #[test]
    fn test_resolve_rejects_symlinked_ancestor() {
        let temp = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        let root = temp.path().join("root");
        fs::create_dir(&root).unwrap();
        std::os::unix::fs::symlink(outside.path(), root.join("escape")).unwrap();

        let dest = DestDir::create(&root).unwrap();
        let result = EntryPath::parse("escape/payload.txt")
            .unwrap()
            .resolve(&dest);
        assert!(matches!(result, Err(ArchiveError::PathTraversal { .. })));
    }
}
