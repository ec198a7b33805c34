//! Whole-directory archiving and extraction on top of a [`Codec`].
//!
//! # Platform Behavior
//!
//! **Unix**: Mode bits from the archive are applied exactly, bypassing the
//! process umask. Missing parent directories get `0o755` the same way.
//!
//! **Windows (non-Unix)**: Only the read-only attribute is derived from the
//! mode bits.

use std::fmt;
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::Path;

use tracing::{debug, info, warn};

use crate::codec::{Codec, EntryWriter};
use crate::entry::{ArchiveReport, EntryKind, PendingEntry};
use crate::error::{Error, Result};
use crate::format::ArchiveFormat;
use crate::options::{ArchiveOptions, ExtractOptions};
use crate::walk::walk;

/// Mode for parent directories implied by a file entry.
const PARENT_DIR_MODE: u32 = 0o755;

/// Archives directories into, and extracts them from, one archive format.
pub struct Archiver {
    format: ArchiveFormat,
    codec: Box<dyn Codec>,
    options: ArchiveOptions,
}

impl fmt::Debug for Archiver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Archiver")
            .field("format", &self.format)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Archiver {
    pub fn new(format: ArchiveFormat, codec: Box<dyn Codec>) -> Self {
        Self {
            format,
            codec,
            options: ArchiveOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ArchiveOptions) -> Self {
        self.options = options;
        self
    }

    pub fn format(&self) -> ArchiveFormat {
        self.format
    }

    /// Archive every file below `directory` accepted by `predicate` into `out`.
    ///
    /// `out` is consumed and closed on every path. If both the content and the
    /// close fail, the content error is returned.
    pub fn archive_directory<'w, W, P>(
        &self,
        directory: impl AsRef<Path>,
        predicate: P,
        out: W,
    ) -> Result<ArchiveReport>
    where
        W: Write + 'w,
        P: Fn(&Path) -> bool,
    {
        let directory = directory.as_ref();
        let mut writer = self.codec.entry_writer(Box::new(out), &self.options);
        let mut report = ArchiveReport::new(self.format);

        let content = add_files(writer.as_mut(), directory, predicate, &mut report);
        let closed = writer.close();

        if let (Err(content_err), Err(close_err)) = (&content, &closed) {
            warn!(error = %close_err, cause = %content_err, "close failed after archive error");
        }
        content.and(closed)?;

        info!(
            directory = %directory.display(),
            format = %self.format,
            entries = report.entry_count,
            bytes = report.total_bytes,
            "archived directory"
        );
        Ok(report)
    }

    /// Extract the archive read from `input` into `target_dir`.
    pub fn extract<R: Read>(&self, input: R, target_dir: impl AsRef<Path>) -> Result<ArchiveReport> {
        self.extract_with_options(input, target_dir, &ExtractOptions::default())
    }

    pub fn extract_with_options<R: Read>(
        &self,
        input: R,
        target_dir: impl AsRef<Path>,
        options: &ExtractOptions,
    ) -> Result<ArchiveReport> {
        let target_dir = target_dir.as_ref();
        let mut reader = self.codec.entry_reader(Box::new(input));
        let mut report = ArchiveReport::new(self.format);

        for pending in reader.entries()? {
            let PendingEntry { entry, mut body } = pending?;

            if let EntryKind::Other(_) = entry.kind {
                return Err(Error::UnsupportedEntryKind {
                    kind: entry.kind.typeflag(),
                    path: entry.archive_path,
                });
            }

            let Some(sanitized) = options.sanitize_path(&entry.archive_path, target_dir)? else {
                if entry.is_directory() {
                    debug!(path = %entry.archive_path.display(), "skipped stripped directory");
                    continue;
                }
                return Err(Error::NoComponentsRemaining {
                    original: entry.archive_path,
                    count: options.strip_components,
                });
            };
            let target = sanitized.resolved;

            if entry.is_directory() {
                ensure_directory(&target, entry.mode)?;
            } else {
                write_file(body.as_mut(), &target, entry.mode)?;
            }

            debug!(
                path = %entry.archive_path.display(),
                target = %target.display(),
                "extracted entry"
            );
            report.record(entry.with_target_path(target));
        }

        info!(
            target = %target_dir.display(),
            format = %self.format,
            entries = report.entry_count,
            bytes = report.total_bytes,
            "extracted archive"
        );
        Ok(report)
    }
}

fn add_files<P>(
    writer: &mut dyn EntryWriter,
    directory: &Path,
    predicate: P,
    report: &mut ArchiveReport,
) -> Result<()>
where
    P: Fn(&Path) -> bool,
{
    for file in walk(directory, predicate) {
        let file = file?;
        let entry = writer.add(&file.path, &file.metadata, &file.archive_path)?;
        report.record(entry);
    }
    Ok(())
}

fn ensure_directory(path: &Path, mode: u32) -> Result<()> {
    fs::create_dir_all(path).map_err(|source| Error::DirectoryCreationFailed {
        path: path.to_path_buf(),
        source,
    })?;
    set_mode(path, mode).map_err(|source| Error::DirectoryCreationFailed {
        path: path.to_path_buf(),
        source,
    })
}

fn write_file(body: &mut dyn Read, path: &Path, mode: u32) -> Result<()> {
    if let Some(parent) = path.parent() {
        create_parent_dirs(parent).map_err(|source| Error::DirectoryCreationFailed {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let extract_err = |source| Error::ExtractionFailed {
        path: path.to_path_buf(),
        source,
    };
    let mut file = File::create(path).map_err(extract_err)?;
    io::copy(body, &mut file).map_err(extract_err)?;
    drop(file);
    set_mode(path, mode).map_err(extract_err)
}

/// Create `path` and its missing ancestors with [`PARENT_DIR_MODE`].
///
/// Existing directories keep their mode. The mode is set explicitly so the
/// process umask does not apply.
fn create_parent_dirs(path: &Path) -> io::Result<()> {
    if path.as_os_str().is_empty() || path.is_dir() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        create_parent_dirs(parent)?;
    }
    match fs::create_dir(path) {
        Ok(()) => set_mode(path, PARENT_DIR_MODE),
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists && path.is_dir() => Ok(()),
        Err(err) => Err(err),
    }
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn set_mode(path: &Path, mode: u32) -> io::Result<()> {
    let mut permissions = fs::metadata(path)?.permissions();
    permissions.set_readonly(mode & 0o222 == 0);
    fs::set_permissions(path, permissions)
}
