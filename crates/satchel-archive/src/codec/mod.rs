//! Format codecs.
//!
//! A [`Codec`] produces an [`EntryWriter`] for an output stream and an
//! [`EntryReader`] for an input stream. The archiver only talks to these
//! traits, so adding a format means adding a codec and registering it.

use std::fs::Metadata;
use std::io::{Read, Write};
use std::path::Path;

use crate::entry::{Entry, PendingEntry};
use crate::error::Result;
use crate::format::ArchiveFormat;
use crate::options::ArchiveOptions;

mod tar_gz;

pub use tar_gz::{TarGzCodec, TarGzReader, TarGzWriter};

pub trait Codec: Send + Sync {
    fn format(&self) -> ArchiveFormat;

    /// Wrap `sink` in a writer for this format. The writer owns the sink
    /// and releases it in [`EntryWriter::close`].
    fn entry_writer<'a>(
        &self,
        sink: Box<dyn Write + 'a>,
        options: &ArchiveOptions,
    ) -> Box<dyn EntryWriter + 'a>;

    /// Wrap `source` in a reader for this format. The source is dropped
    /// together with the reader.
    fn entry_reader<'a>(&self, source: Box<dyn Read + 'a>) -> Box<dyn EntryReader + 'a>;
}

pub trait EntryWriter {
    /// Stream the file at `path` into the archive under `archive_path`.
    fn add(&mut self, path: &Path, metadata: &Metadata, archive_path: &Path) -> Result<Entry>;

    /// Finish the archive and close the sink.
    fn close(self: Box<Self>) -> Result<()>;
}

pub trait EntryReader {
    /// Entries in stream order. The iterator ends at the end of the archive.
    fn entries(&mut self) -> Result<Box<dyn Iterator<Item = Result<PendingEntry<'_>>> + '_>>;
}
