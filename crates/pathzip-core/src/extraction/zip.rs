//! ZIP archive extraction.

use crate::ArchiveError;
use crate::ExtractionConfig;
use crate::ExtractionReport;
use crate::NoopProgress;
use crate::ProgressCallback;
use crate::Result;
use crate::copy::CopyBuffer;
use crate::copy::copy_with_buffer;
use crate::types::DestDir;
use crate::types::EntryPath;
use std::fs::DirBuilder;
use std::fs::File;
use std::fs::OpenOptions;
use std::io::BufWriter;
use std::io::Read;
use std::io::Seek;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;
use tracing::debug;
use tracing::info;
use tracing::warn;
use zip::ZipArchive;

/// Extracts the ZIP archive at `archive` under `target`.
///
/// The archive is opened and its central directory read before `target` is
/// touched, so a missing or corrupt archive leaves the filesystem unchanged.
/// `target` is then created if needed; existing content is kept, files with
/// the same names are overwritten.
///
/// # Examples
///
/// ```no_run
/// use pathzip_core::ExtractionConfig;
/// use pathzip_core::extraction::extract_zip;
///
/// let report = extract_zip("photos.zip", "restore", &ExtractionConfig::default())?;
/// println!("Extracted {} files", report.files_extracted);
/// # Ok::<(), pathzip_core::ArchiveError>(())
/// ```
///
/// # Errors
///
/// Returns an error if:
/// - The archive cannot be opened (`Io`) or is not a valid ZIP
///   (`InvalidArchive`)
/// - An entry name is absolute or contains `..` (`PathTraversal`)
/// - An entry name contains null bytes (`InvalidEntryName`)
/// - Writing a file fails, or creating a directory fails while
///   `best_effort_directories` is off (`Io`)
pub fn extract_zip<P: AsRef<Path>, Q: AsRef<Path>>(
    archive: P,
    target: Q,
    config: &ExtractionConfig,
) -> Result<ExtractionReport> {
    extract_zip_with_progress(archive, target, config, &mut NoopProgress)
}

/// Extracts a ZIP archive with progress reporting.
///
/// # Errors
///
/// Same as [`extract_zip`].
pub fn extract_zip_with_progress<P: AsRef<Path>, Q: AsRef<Path>>(
    archive: P,
    target: Q,
    config: &ExtractionConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<ExtractionReport> {
    let archive = archive.as_ref();
    let target = target.as_ref();

    let file = File::open(archive).map_err(|e| {
        ArchiveError::Io(std::io::Error::new(
            e.kind(),
            format!("cannot open archive {}: {e}", archive.display()),
        ))
    })?;
    let zip = ZipArchive::new(file)?;

    info!(
        archive = %archive.display(),
        target = %target.display(),
        entries = zip.len(),
        "extracting archive"
    );

    let dest = DestDir::create(target)?;
    unpack(zip, &dest, config, progress)
}

fn unpack<R: Read + Seek>(
    mut zip: ZipArchive<R>,
    dest: &DestDir,
    config: &ExtractionConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<ExtractionReport> {
    let start = Instant::now();
    let mut report = ExtractionReport::new();
    let mut buffer = CopyBuffer::new();
    let mut directory_modes = Vec::new();
    let total_entries = zip.len();

    for idx in 0..total_entries {
        let mut entry = zip.by_index(idx)?;
        let name = entry.name().to_string();

        let entry_path = EntryPath::parse(&name)?;
        let output_path = entry_path.resolve(dest)?;
        let mode = if config.preserve_permissions {
            entry.unix_mode().map(|m| m & 0o777)
        } else {
            None
        };

        progress.on_entry_start(entry_path.as_path(), total_entries, idx + 1);

        if entry.is_dir() {
            ensure_directory(&output_path, mode, config, &mut report, &mut directory_modes)?;
        } else {
            extract_file(&mut entry, &output_path, mode, &mut report, &mut buffer, progress)?;
            debug!(entry = %name, "extracted file");
        }

        progress.on_entry_complete(entry_path.as_path());
    }

    apply_directory_modes(directory_modes, config, &mut report)?;
    report.duration = start.elapsed();

    info!(
        items = report.total_items(),
        files = report.files_extracted,
        directories = report.directories_created,
        overwritten = report.files_overwritten,
        bytes = report.bytes_written,
        "extraction complete"
    );

    progress.on_complete();

    Ok(report)
}

/// Creates `path` and any missing ancestors; an existing directory is left
/// as it is.
///
/// The stored mode is queued in `pending` rather than applied, so a
/// read-only directory still accepts the entries that follow it.
fn ensure_directory(
    path: &Path,
    mode: Option<u32>,
    config: &ExtractionConfig,
    report: &mut ExtractionReport,
    pending: &mut Vec<(PathBuf, u32)>,
) -> Result<()> {
    if path.is_dir() {
        return Ok(());
    }

    match create_directory(path, mode) {
        Ok(()) => {
            report.directories_created += 1;
            if let Some(mode) = mode {
                pending.push((path.to_path_buf(), mode));
            }
            debug!(path = %path.display(), "created directory");
            Ok(())
        }
        Err(e) if config.best_effort_directories => {
            warn!(path = %path.display(), error = %e, "failed to create directory");
            report.add_warning(format!(
                "Failed to create directory {}: {e}",
                path.display()
            ));
            Ok(())
        }
        Err(e) => Err(ArchiveError::Io(std::io::Error::new(
            e.kind(),
            format!("failed to create directory {}: {e}", path.display()),
        ))),
    }
}

#[cfg_attr(not(unix), allow(unused_variables))]
fn create_directory(path: &Path, mode: Option<u32>) -> std::io::Result<()> {
    let mut builder = DirBuilder::new();
    builder.recursive(true);

    // Owner keeps full access until the final mode pass.
    #[cfg(unix)]
    if let Some(mode) = mode {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(mode | 0o700);
    }

    builder.create(path)
}

/// Applies queued directory modes, deepest paths first.
fn apply_directory_modes(
    mut pending: Vec<(PathBuf, u32)>,
    config: &ExtractionConfig,
    report: &mut ExtractionReport,
) -> Result<()> {
    pending.sort_by_key(|(path, _)| std::cmp::Reverse(path.components().count()));

    for (path, mode) in pending {
        match apply_mode(&path, Some(mode)) {
            Ok(()) => {}
            Err(e) if config.best_effort_directories => {
                warn!(path = %path.display(), error = %e, "failed to set directory mode");
                report.add_warning(format!(
                    "Failed to set mode {mode:o} on {}: {e}",
                    path.display()
                ));
            }
            Err(e) => {
                return Err(ArchiveError::Io(std::io::Error::new(
                    e.kind(),
                    format!("failed to set mode on {}: {e}", path.display()),
                )));
            }
        }
    }

    Ok(())
}

/// Streams one entry into `path`, replacing any existing file.
///
/// A symlink already sitting at `path` is removed first so the write lands
/// in a fresh regular file instead of the link's target.
fn extract_file<R: Read>(
    reader: &mut R,
    path: &Path,
    mode: Option<u32>,
    report: &mut ExtractionReport,
    buffer: &mut CopyBuffer,
    progress: &mut dyn ProgressCallback,
) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if let Ok(existing) = path.symlink_metadata() {
        report.files_overwritten += 1;
        if existing.file_type().is_symlink() {
            std::fs::remove_file(path).map_err(|e| {
                ArchiveError::Io(std::io::Error::new(
                    e.kind(),
                    format!("cannot replace symlink {}: {e}", path.display()),
                ))
            })?;
            debug!(path = %path.display(), "removed existing symlink");
        }
    }

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    if let Some(mode) = mode {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(mode);
    }

    let file = options.open(path).map_err(|e| {
        ArchiveError::Io(std::io::Error::new(
            e.kind(),
            format!("cannot write {}: {e}", path.display()),
        ))
    })?;

    let mut writer = BufWriter::with_capacity(buffer.size(), file);
    let bytes = copy_with_buffer(reader, &mut writer, buffer, progress)?;
    writer.flush()?;
    drop(writer);

    apply_mode(path, mode)?;

    report.files_extracted += 1;
    report.bytes_written = report.bytes_written.saturating_add(bytes);

    Ok(())
}

/// Sets the exact permission bits, bypassing the process umask.
#[cfg(unix)]
fn apply_mode(path: &Path, mode: Option<u32>) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    if let Some(mode) = mode {
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))?;
    }
    Ok(())
}

#[cfg(not(unix))]
fn apply_mode(_path: &Path, _mode: Option<u32>) -> std::io::Result<()> {
    Ok(())
}
