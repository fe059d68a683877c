//! Source tree walking and entry naming.
//!
//! The walker produces one [`WalkedEntry`] per filesystem node in pre-order,
//! siblings sorted by file name, so two walks of an unchanged tree yield the
//! same sequence.

use crate::ArchiveError;
use crate::Result;
use crate::creation::config::CreationConfig;
use std::fs::Metadata;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;
use walkdir::WalkDir;

/// Kind of a walked filesystem node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Regular file, stored with a payload.
    File,

    /// Directory, stored as a name ending in `/`.
    Directory,

    /// Symbolic link that was not followed. Never stored.
    Symlink,

    /// Socket, FIFO or device node. Never stored.
    Special,
}

/// A walked node together with the name it is stored under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkedEntry {
    /// Full filesystem path of the node.
    pub path: PathBuf,

    /// Forward-slash entry name; directories end with `/`.
    pub entry_name: String,

    /// Node kind.
    pub kind: EntryKind,

    /// Permission bits (`0o777` mask) when available on this platform.
    pub mode: Option<u32>,

    /// Size in bytes (0 for directories).
    pub size: u64,
}

/// Walks a source path and computes archive entry names.
///
/// # Examples
///
/// ```no_run
/// use pathzip_core::creation::CreationConfig;
/// use pathzip_core::creation::walker::SourceWalker;
/// use std::path::Path;
///
/// let config = CreationConfig::default();
/// let walker = SourceWalker::new(Path::new("./project"), Some("project".into()), &config);
///
/// for entry in walker.walk() {
///     println!("{}", entry?.entry_name);
/// }
/// # Ok::<(), pathzip_core::ArchiveError>(())
/// ```
pub struct SourceWalker<'a> {
    root: &'a Path,
    base_dir: Option<String>,
    config: &'a CreationConfig,
}

impl<'a> SourceWalker<'a> {
    /// Creates a walker for `root`.
    ///
    /// `base_dir` is the prefix applied to every entry name; pass `None` when
    /// `root` is a single file.
    #[must_use]
    pub fn new(root: &'a Path, base_dir: Option<String>, config: &'a CreationConfig) -> Self {
        Self {
            root,
            base_dir,
            config,
        }
    }

    /// Returns an iterator over walked entries in pre-order.
    ///
    /// The unnamed root of a filesystem root directory (`/`) is skipped since
    /// it has no entry name.
    pub fn walk(&self) -> impl Iterator<Item = Result<WalkedEntry>> + '_ {
        WalkDir::new(self.root)
            .follow_links(self.config.follow_symlinks)
            .sort_by_file_name()
            .into_iter()
            .filter_map(move |entry| match entry {
                Ok(entry) => self.build_entry(&entry).transpose(),
                Err(e) => Some(Err(ArchiveError::Io(e.into()))),
            })
    }

    fn build_entry(&self, entry: &walkdir::DirEntry) -> Result<Option<WalkedEntry>> {
        let path = entry.path().to_path_buf();
        let metadata = entry.metadata().map_err(|e| {
            ArchiveError::Io(std::io::Error::other(format!(
                "cannot read metadata for {}: {e}",
                path.display()
            )))
        })?;

        let file_type = entry.file_type();
        let kind = if file_type.is_dir() {
            EntryKind::Directory
        } else if file_type.is_symlink() {
            EntryKind::Symlink
        } else if file_type.is_file() {
            EntryKind::File
        } else {
            EntryKind::Special
        };

        let Some(entry_name) = entry_name(&path, self.root, self.base_dir.as_deref(), kind)?
        else {
            return Ok(None);
        };

        let size = if kind == EntryKind::File {
            metadata.len()
        } else {
            0
        };

        Ok(Some(WalkedEntry {
            path,
            entry_name,
            kind,
            mode: permission_bits(&metadata),
            size,
        }))
    }
}

/// Collects every walked entry up front so progress totals are known.
///
/// # Errors
///
/// Returns the first walk or metadata error encountered.
pub fn collect_entries(
    root: &Path,
    base_dir: Option<String>,
    config: &CreationConfig,
) -> Result<Vec<WalkedEntry>> {
    SourceWalker::new(root, base_dir, config).walk().collect()
}

/// Returns the base directory name for a directory source.
///
/// This is the last path segment of `source`. Paths without one (`.`,
/// `dir/..`) are canonicalized first; a filesystem root yields `None`.
///
/// # Errors
///
/// Returns an error if canonicalization fails or the name is not valid
/// UTF-8.
///
/// # Examples
///
/// ```
/// use pathzip_core::creation::walker::base_dir_name;
/// use std::path::Path;
///
/// let name = base_dir_name(Path::new("/srv/data/photos")).unwrap();
/// assert_eq!(name.as_deref(), Some("photos"));
/// ```
pub fn base_dir_name(source: &Path) -> Result<Option<String>> {
    let name = match source.file_name() {
        Some(name) => Some(name.to_os_string()),
        None => source.canonicalize()?.file_name().map(ToOwned::to_owned),
    };

    name.map(|n| {
        n.into_string().map_err(|n| ArchiveError::InvalidEntryName {
            reason: format!("directory name is not valid UTF-8: {}", n.to_string_lossy()),
        })
    })
    .transpose()
}

/// Computes the stored entry name for `path`.
///
/// - With a base directory: `base` + `/` + path relative to `root`.
/// - Without one (single file source): the file's own name.
/// - Directories get a trailing `/`.
///
/// Returns `Ok(None)` when the result would be empty.
///
/// # Errors
///
/// Returns `ArchiveError::InvalidEntryName` for non UTF-8 components.
pub fn entry_name(
    path: &Path,
    root: &Path,
    base_dir: Option<&str>,
    kind: EntryKind,
) -> Result<Option<String>> {
    let mut segments: Vec<&str> = Vec::new();

    if let Some(base) = base_dir {
        segments.push(base);
        let relative = path.strip_prefix(root).unwrap_or(path);
        for component in relative.components() {
            if let Component::Normal(part) = component {
                segments.push(utf8_segment(part, path)?);
            }
        }
    } else if let Some(file_name) = path.file_name() {
        segments.push(utf8_segment(file_name, path)?);
    }

    if segments.is_empty() {
        return Ok(None);
    }

    let mut name = segments.join("/");
    if kind == EntryKind::Directory {
        name.push('/');
    }
    Ok(Some(name))
}

fn utf8_segment<'p>(part: &'p std::ffi::OsStr, path: &Path) -> Result<&'p str> {
    part.to_str().ok_or_else(|| ArchiveError::InvalidEntryName {
        reason: format!("path is not valid UTF-8: {}", path.display()),
    })
}

#[cfg(unix)]
fn permission_bits(metadata: &Metadata) -> Option<u32> {
    use std::os::unix::fs::PermissionsExt;
    Some(metadata.permissions().mode() & 0o777)
}

#[cfg(not(unix))]
fn permission_bits(_metadata: &Metadata) -> Option<u32> {
    None
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn names(entries: &[WalkedEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.entry_name.as_str()).collect()
    }

    #[test]
    fn test_walker_prefixes_base_dir() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("project");
        fs::create_dir(&root).unwrap();
        fs::write(root.join("b.txt"), "b").unwrap();
        fs::write(root.join("a.txt"), "a").unwrap();
        fs::create_dir(root.join("sub")).unwrap();
        fs::write(root.join("sub/c.txt"), "c").unwrap();

        let config = CreationConfig::default();
        let entries = collect_entries(&root, Some("project".into()), &config).unwrap();

        assert_eq!(
            names(&entries),
            vec![
                "project/",
                "project/a.txt",
                "project/b.txt",
                "project/sub/",
                "project/sub/c.txt",
            ]
        );
    }

    #[test]
    fn test_walker_single_file_uses_file_name() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("notes.md");
        fs::write(&file, "# notes").unwrap();

        let config = CreationConfig::default();
        let entries = collect_entries(&file, None, &config).unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].entry_name, "notes.md");
        assert_eq!(entries[0].kind, EntryKind::File);
        assert_eq!(entries[0].size, 7);
    }

    #[test]
    fn test_walker_is_deterministic() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("tree");
        fs::create_dir_all(root.join("x/y")).unwrap();
        for name in ["z", "m", "a"] {
            fs::write(root.join(name), name).unwrap();
            fs::write(root.join("x/y").join(name), name).unwrap();
        }

        let config = CreationConfig::default();
        let first = collect_entries(&root, Some("tree".into()), &config).unwrap();
        let second = collect_entries(&root, Some("tree".into()), &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_directories_end_with_separator() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("root");
        fs::create_dir_all(root.join("empty/nested")).unwrap();

        let config = CreationConfig::default();
        let entries = collect_entries(&root, Some("root".into()), &config).unwrap();

        for entry in &entries {
            assert_eq!(entry.kind, EntryKind::Directory);
            assert!(entry.entry_name.ends_with('/'), "{}", entry.entry_name);
        }
        assert_eq!(entries.len(), 3);
    }

    #[cfg(unix)]
    #[test]
    fn test_walker_records_permission_bits() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let root = temp.path().join("bin");
        fs::create_dir(&root).unwrap();
        let script = root.join("run.sh");
        fs::write(&script, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o750)).unwrap();

        let config = CreationConfig::default();
        let entries = collect_entries(&root, Some("bin".into()), &config).unwrap();
        let entry = entries
            .iter()
            .find(|e| e.entry_name == "bin/run.sh")
            .unwrap();
        assert_eq!(entry.mode, Some(0o750));
    }

    #[cfg(unix)]
    #[test]
    fn test_walker_reports_symlinks_when_not_following() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("links");
        fs::create_dir(&root).unwrap();
        fs::write(root.join("target.txt"), "content").unwrap();
        std::os::unix::fs::symlink(root.join("target.txt"), root.join("link.txt")).unwrap();

        let config = CreationConfig::default();
        let entries = collect_entries(&root, Some("links".into()), &config).unwrap();
        let link = entries
            .iter()
            .find(|e| e.entry_name == "links/link.txt")
            .unwrap();
        assert_eq!(link.kind, EntryKind::Symlink);

        let config = CreationConfig::default().with_follow_symlinks(true);
        let entries = collect_entries(&root, Some("links".into()), &config).unwrap();
        let link = entries
            .iter()
            .find(|e| e.entry_name == "links/link.txt")
            .unwrap();
        assert_eq!(link.kind, EntryKind::File);
    }

    #[test]
    fn test_walker_missing_root_errors() {
        let temp = TempDir::new().unwrap();
        let config = CreationConfig::default();
        let result = collect_entries(&temp.path().join("missing"), None, &config);
        assert!(matches!(result, Err(ArchiveError::Io(_))));
    }

    #[test]
    fn test_base_dir_name() {
        assert_eq!(
            base_dir_name(Path::new("some/dir")).unwrap().as_deref(),
            Some("dir")
        );
        assert_eq!(
            base_dir_name(Path::new("some/dir/")).unwrap().as_deref(),
            Some("dir")
        );
    }

    #[test]
    fn test_base_dir_name_resolves_dot() {
        let temp = TempDir::new().unwrap();
        let inner = temp.path().join("inner");
        fs::create_dir(&inner).unwrap();

        let name = base_dir_name(&inner.join(".")).unwrap();
        assert_eq!(name.as_deref(), Some("inner"));
    }

    #[test]
    fn test_entry_name_rules() {
        let root = Path::new("/data/photos");
        assert_eq!(
            entry_name(root, root, Some("photos"), EntryKind::Directory).unwrap(),
            Some("photos/".to_string())
        );
        assert_eq!(
            entry_name(
                Path::new("/data/photos/2024/a.jpg"),
                root,
                Some("photos"),
                EntryKind::File
            )
            .unwrap(),
            Some("photos/2024/a.jpg".to_string())
        );
        assert_eq!(
            entry_name(
                Path::new("/data/report.pdf"),
                Path::new("/data/report.pdf"),
                None,
                EntryKind::File
            )
            .unwrap(),
            Some("report.pdf".to_string())
        );
        assert_eq!(
            entry_name(Path::new("/"), Path::new("/"), None, EntryKind::Directory).unwrap(),
            None
        );
    }
}
