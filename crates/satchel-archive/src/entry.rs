use std::io::Read;
use std::path::PathBuf;

use crate::format::ArchiveFormat;

/// One archived item, as written or as materialized.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub archive_path: PathBuf,
    pub source_path: Option<PathBuf>,
    pub target_path: Option<PathBuf>,
    pub kind: EntryKind,
    pub mode: u32,
    pub size: u64,
}

impl Entry {
    pub fn new(archive_path: impl Into<PathBuf>, kind: EntryKind, mode: u32, size: u64) -> Self {
        Self {
            archive_path: archive_path.into(),
            source_path: None,
            target_path: None,
            kind,
            mode,
            size,
        }
    }

    pub fn with_source_path(mut self, source_path: PathBuf) -> Self {
        self.source_path = Some(source_path);
        self
    }

    pub fn with_target_path(mut self, target_path: PathBuf) -> Self {
        self.target_path = Some(target_path);
        self
    }

    pub fn is_file(&self) -> bool {
        matches!(self.kind, EntryKind::File)
    }

    pub fn is_directory(&self) -> bool {
        matches!(self.kind, EntryKind::Directory)
    }

    /// Check if entry is executable (has execute bit set)
    pub fn is_executable(&self) -> bool {
        self.mode & 0o111 != 0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    /// Any other entry type, carrying the raw tar typeflag.
    Other(u8),
}

impl EntryKind {
    pub fn typeflag(self) -> char {
        match self {
            Self::File => '0',
            Self::Directory => '5',
            Self::Other(flag) => flag as char,
        }
    }
}

/// An entry decoded from the stream whose body has not been consumed yet.
///
/// The body borrows the underlying reader, so it must be read (or dropped)
/// before the next entry is requested.
pub struct PendingEntry<'a> {
    pub entry: Entry,
    pub body: Box<dyn Read + 'a>,
}

#[derive(Clone, Debug)]
pub struct ArchiveReport {
    pub format: ArchiveFormat,
    pub entry_count: usize,
    pub total_bytes: u64,
    pub entries: Vec<Entry>,
}

impl ArchiveReport {
    pub(crate) fn new(format: ArchiveFormat) -> Self {
        Self {
            format,
            entry_count: 0,
            total_bytes: 0,
            entries: Vec::new(),
        }
    }

    pub(crate) fn record(&mut self, entry: Entry) {
        self.entry_count += 1;
        self.total_bytes += entry.size;
        self.entries.push(entry);
    }
}
