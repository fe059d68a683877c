//! ZIP archive creation.
//!
//! Walks a source path and writes one entry per node: directories as
//! `name/` markers without payload, regular files deflated (or stored) with
//! their unix mode recorded in the central directory.

use crate::ArchiveError;
use crate::NoopProgress;
use crate::ProgressCallback;
use crate::Result;
use crate::copy::CopyBuffer;
use crate::copy::copy_with_buffer;
use crate::creation::config::CreationConfig;
use crate::creation::report::ArchiveOutcome;
use crate::creation::report::CreationReport;
use crate::creation::walker::EntryKind;
use crate::creation::walker::WalkedEntry;
use crate::creation::walker::base_dir_name;
use crate::creation::walker::collect_entries;
use std::fs::File;
use std::io::Seek;
use std::io::SeekFrom;
use std::io::Write;
use std::path::Path;
use std::time::Instant;
use tracing::debug;
use tracing::info;
use tracing::warn;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Creates a ZIP archive at `target` from `source`.
///
/// `target` is created or truncated first. If `source` then cannot be
/// stat'ed, the archive is finalized empty and [`ArchiveOutcome::NoOp`] is
/// returned.
///
/// # Examples
///
/// ```no_run
/// use pathzip_core::creation::CreationConfig;
/// use pathzip_core::creation::zip::create_zip;
///
/// let config = CreationConfig::default();
/// let outcome = create_zip("photos", "photos.zip", &config)?;
/// println!("Wrote {} entries", outcome.entry_count());
/// # Ok::<(), pathzip_core::ArchiveError>(())
/// ```
///
/// # Errors
///
/// Returns an error if:
/// - The configuration is invalid
/// - `target` cannot be created
/// - The walk, a source read, or an archive write fails
pub fn create_zip<P: AsRef<Path>, Q: AsRef<Path>>(
    source: P,
    target: Q,
    config: &CreationConfig,
) -> Result<ArchiveOutcome> {
    create_zip_with_progress(source, target, config, &mut NoopProgress)
}

/// Creates a ZIP archive with progress reporting.
///
/// `on_entry_start` and `on_entry_complete` fire once per walked node
/// (including skipped symlinks), `on_bytes_written` once per copied chunk,
/// and `on_complete` after the central directory is written. A
/// [`ArchiveOutcome::NoOp`] run only fires `on_complete`.
///
/// # Errors
///
/// Same as [`create_zip`].
pub fn create_zip_with_progress<P: AsRef<Path>, Q: AsRef<Path>>(
    source: P,
    target: Q,
    config: &CreationConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<ArchiveOutcome> {
    config.validate()?;

    let source = source.as_ref();
    let target = target.as_ref();

    let file = File::create(target)?;
    info!(source = %source.display(), target = %target.display(), "creating archive");

    // The target may sit inside the tree being walked.
    let excluded = target.canonicalize().ok();

    write_zip(file, source, excluded.as_deref(), config, progress)
}

/// Writes the archive for `source` into any seekable writer.
///
/// A walked file whose canonical path equals `excluded` is left out.
fn write_zip<W: Write + Seek>(
    writer: W,
    source: &Path,
    excluded: Option<&Path>,
    config: &CreationConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<ArchiveOutcome> {
    let start = Instant::now();
    let mut zip = ZipWriter::new(writer);

    let metadata = match std::fs::metadata(source) {
        Ok(metadata) => metadata,
        Err(e) => {
            warn!(
                source = %source.display(),
                error = %e,
                "source cannot be inspected, writing empty archive"
            );
            zip.finish()?;
            progress.on_complete();
            return Ok(ArchiveOutcome::NoOp);
        }
    };

    let base_dir = if metadata.is_dir() {
        base_dir_name(source)?
    } else {
        None
    };

    let mut entries = collect_entries(source, base_dir, config)?;
    if let Some(excluded) = excluded {
        entries.retain(|entry| !is_excluded(entry, excluded));
    }
    let total_entries = entries.len();
    let options = base_options(config);

    let mut report = CreationReport::new();
    let mut buffer = CopyBuffer::new();

    for (idx, entry) in entries.iter().enumerate() {
        let label = Path::new(&entry.entry_name);
        progress.on_entry_start(label, total_entries, idx + 1);

        match entry.kind {
            EntryKind::Directory => {
                let dir_options = entry_options(options, entry, config);
                zip.add_directory(entry.entry_name.as_str(), dir_options)?;
                report.directories_added += 1;
                debug!(entry = %entry.entry_name, "added directory");
            }
            EntryKind::File => {
                add_file(&mut zip, entry, options, config, &mut report, &mut buffer, progress)?;
            }
            EntryKind::Symlink | EntryKind::Special => {
                report.files_skipped += 1;
                let kind = kind_label(entry.kind);
                report.add_warning(format!("Skipped {kind}: {}", entry.path.display()));
                warn!(path = %entry.path.display(), kind, "skipped entry");
            }
        }

        progress.on_entry_complete(label);
    }

    let mut inner = zip.finish()?;
    report.bytes_compressed = inner.seek(SeekFrom::End(0))?;
    report.duration = start.elapsed();

    info!(
        files = report.files_added,
        directories = report.directories_added,
        skipped = report.files_skipped,
        bytes = report.bytes_written,
        "archive complete"
    );

    progress.on_complete();

    Ok(ArchiveOutcome::Archived(report))
}

/// Writes one file entry header, then streams the source file into it.
#[allow(clippy::too_many_arguments)]
fn add_file<W: Write + Seek>(
    zip: &mut ZipWriter<W>,
    entry: &WalkedEntry,
    options: SimpleFileOptions,
    config: &CreationConfig,
    report: &mut CreationReport,
    buffer: &mut CopyBuffer,
    progress: &mut dyn ProgressCallback,
) -> Result<()> {
    let file_options =
        entry_options(options, entry, config).large_file(entry.size >= u64::from(u32::MAX));

    zip.start_file(entry.entry_name.as_str(), file_options)?;

    let mut file = File::open(&entry.path).map_err(|e| {
        ArchiveError::Io(std::io::Error::new(
            e.kind(),
            format!("cannot open {}: {e}", entry.path.display()),
        ))
    })?;
    let bytes = copy_with_buffer(&mut file, zip, buffer, progress)?;

    report.files_added += 1;
    report.bytes_written += bytes;
    debug!(entry = %entry.entry_name, bytes, "added file");

    Ok(())
}

/// Compression settings shared by every entry.
fn base_options(config: &CreationConfig) -> SimpleFileOptions {
    match config.compression_level {
        Some(level) if level > 0 => SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(i64::from(level))),
        _ => SimpleFileOptions::default().compression_method(CompressionMethod::Stored),
    }
}

fn entry_options(
    options: SimpleFileOptions,
    entry: &WalkedEntry,
    config: &CreationConfig,
) -> SimpleFileOptions {
    match entry.mode {
        Some(mode) if config.preserve_permissions => options.unix_permissions(mode),
        _ => options,
    }
}

fn is_excluded(entry: &WalkedEntry, excluded: &Path) -> bool {
    if entry.kind != EntryKind::File || entry.path.file_name() != excluded.file_name() {
        return false;
    }
    let matched = entry
        .path
        .canonicalize()
        .is_ok_and(|canonical| canonical == excluded);
    if matched {
        debug!(path = %entry.path.display(), "skipping the archive being written");
    }
    matched
}

fn kind_label(kind: EntryKind) -> &'static str {
    match kind {
        EntryKind::Symlink => "symlink",
        EntryKind::Special => "special file",
        EntryKind::File => "file",
        EntryKind::Directory => "directory",
    }
}
