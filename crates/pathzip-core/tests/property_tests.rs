//! Property-based tests for entry-name validation and tree round trips.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use pathzip_core::ArchiveError;
use pathzip_core::CreationConfig;
use pathzip_core::ExtractionConfig;
use pathzip_core::create_zip;
use pathzip_core::extract_zip;
use pathzip_core::types::DestDir;
use pathzip_core::types::EntryPath;
use proptest::prelude::*;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use tempfile::TempDir;
use walkdir::WalkDir;

fn create_test_dest() -> (TempDir, DestDir) {
    let temp = TempDir::new().expect("failed to create temp dir");
    let dest = DestDir::create(temp.path()).expect("failed to create dest");
    (temp, dest)
}

proptest! {
    /// Any name with a `..` segment is rejected, whatever surrounds it.
    #[test]
    fn prop_parent_segment_rejected(
        prefix in "([a-z]+[/\\\\]){0,5}",
        suffix in "([a-z]+/?){0,5}"
    ) {
        let name = format!("{prefix}../{suffix}");
        let result = EntryPath::parse(&name);
        prop_assert!(
            matches!(result, Err(ArchiveError::PathTraversal { .. })),
            "name with .. should be rejected: {name}"
        );
    }

    /// Plain relative names are accepted and keep every segment.
    #[test]
    fn prop_relative_names_accepted(
        segments in prop::collection::vec("[a-zA-Z0-9_-]{1,20}", 1..6),
        trailing_slash in any::<bool>()
    ) {
        let mut name = segments.join("/");
        if trailing_slash {
            name.push('/');
        }
        let path = EntryPath::parse(&name).unwrap();
        prop_assert_eq!(path.as_path().components().count(), segments.len());
    }

    /// Absolute names never validate.
    #[test]
    fn prop_absolute_names_rejected(rest in "[a-z/]{0,30}") {
        let name = format!("/{rest}");
        prop_assert!(EntryPath::parse(&name).is_err());
    }

    /// Whatever parses resolves inside the destination root.
    #[test]
    fn prop_resolved_paths_stay_inside(name in "[a-z./\\\\]{1,40}") {
        let (_temp, dest) = create_test_dest();
        if let Ok(path) = EntryPath::parse(&name) {
            let resolved = path.resolve(&dest).unwrap();
            prop_assert!(resolved.starts_with(dest.as_path()));
        }
    }

    /// Null bytes are always rejected.
    #[test]
    fn prop_null_bytes_rejected(prefix in "[a-z]{0,10}", suffix in "[a-z]{0,10}") {
        let name = format!("{prefix}\0{suffix}");
        let rejected = matches!(
            EntryPath::parse(&name),
            Err(ArchiveError::InvalidEntryName { .. })
        );
        prop_assert!(rejected);
    }
}

/// One generated node below the tree root.
#[derive(Debug, Clone)]
enum Node {
    File(Vec<u8>, u32),
    EmptyDir(u32),
}

fn node_strategy() -> impl Strategy<Value = Node> {
    prop_oneof![
        3 => (
            prop::collection::vec(any::<u8>(), 0..512),
            prop::sample::select(vec![0o644u32, 0o600, 0o640, 0o755, 0o444]),
        )
            .prop_map(|(data, mode)| Node::File(data, mode)),
        1 => prop::sample::select(vec![0o755u32, 0o750, 0o700, 0o555]).prop_map(Node::EmptyDir),
    ]
}

/// Relative paths to nodes. Intermediate directories are `d_*`, files `f_*`
/// and empty directories `e_*`, so no name is used as two kinds.
fn tree_strategy() -> impl Strategy<Value = BTreeMap<String, Node>> {
    prop::collection::vec(
        (
            prop::collection::vec("d_[a-z]{1,4}", 0..3),
            "[a-z]{1,6}",
            node_strategy(),
        ),
        0..10,
    )
    .prop_map(|items| {
        items
            .into_iter()
            .map(|(dirs, leaf, node)| {
                let prefix = match node {
                    Node::File(..) => "f_",
                    Node::EmptyDir(_) => "e_",
                };
                let mut segments = dirs;
                segments.push(format!("{prefix}{leaf}"));
                (segments.join("/"), node)
            })
            .collect()
    })
}

fn build_tree(root: &Path, tree: &BTreeMap<String, Node>) {
    fs::create_dir_all(root).unwrap();
    for (name, node) in tree {
        let path = root.join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        let mode = match node {
            Node::File(data, mode) => {
                fs::write(&path, data).unwrap();
                *mode
            }
            Node::EmptyDir(mode) => {
                fs::create_dir(&path).unwrap();
                *mode
            }
        };
        set_mode(&path, mode);
    }
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode)).unwrap();
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) {}

#[cfg(unix)]
fn mode_bits(metadata: &fs::Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o777
}

#[cfg(not(unix))]
fn mode_bits(_metadata: &fs::Metadata) -> u32 {
    0
}

/// Relative path -> (is directory, contents, mode bits) for everything under `root`.
fn snapshot(root: &Path) -> BTreeMap<PathBuf, (bool, Vec<u8>, u32)> {
    WalkDir::new(root)
        .min_depth(1)
        .into_iter()
        .map(|entry| {
            let entry = entry.unwrap();
            let metadata = entry.metadata().unwrap();
            let relative = entry.path().strip_prefix(root).unwrap().to_path_buf();
            let contents = if metadata.is_dir() {
                Vec::new()
            } else {
                fs::read(entry.path()).unwrap()
            };
            (relative, (metadata.is_dir(), contents, mode_bits(&metadata)))
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Archiving a tree and extracting it elsewhere reproduces every path,
    /// payload and mode.
    #[test]
    fn prop_tree_round_trip(tree in tree_strategy()) {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("tree");
        build_tree(&source, &tree);
        let archive = temp.path().join("tree.zip");
        let restore = temp.path().join("restore");

        create_zip(&source, &archive, &CreationConfig::default()).unwrap();
        extract_zip(&archive, &restore, &ExtractionConfig::default()).unwrap();

        prop_assert_eq!(snapshot(&source), snapshot(&restore.join("tree")));
    }
}
