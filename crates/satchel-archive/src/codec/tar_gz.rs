use std::fs::{File, Metadata};
use std::io::{self, Read, Write};
use std::path::Path;

use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use tracing::debug;

use super::{Codec, EntryReader, EntryWriter};
use crate::entry::{Entry, EntryKind, PendingEntry};
use crate::error::{CloseStage, Error, Result};
use crate::format::ArchiveFormat;
use crate::options::ArchiveOptions;

/// Gzip-compressed tar.
#[derive(Clone, Copy, Debug, Default)]
pub struct TarGzCodec;

impl Codec for TarGzCodec {
    fn format(&self) -> ArchiveFormat {
        ArchiveFormat::TarGz
    }

    fn entry_writer<'a>(
        &self,
        sink: Box<dyn Write + 'a>,
        options: &ArchiveOptions,
    ) -> Box<dyn EntryWriter + 'a> {
        Box::new(TarGzWriter::new(sink, options))
    }

    fn entry_reader<'a>(&self, source: Box<dyn Read + 'a>) -> Box<dyn EntryReader + 'a> {
        Box::new(TarGzReader::new(source))
    }
}

pub struct TarGzWriter<W: Write> {
    builder: tar::Builder<GzEncoder<W>>,
}

impl<W: Write> TarGzWriter<W> {
    pub fn new(sink: W, options: &ArchiveOptions) -> Self {
        let encoder = GzEncoder::new(sink, Compression::new(options.compression_level));
        Self {
            builder: tar::Builder::new(encoder),
        }
    }
}

impl<W: Write> EntryWriter for TarGzWriter<W> {
    fn add(&mut self, path: &Path, metadata: &Metadata, archive_path: &Path) -> Result<Entry> {
        let write_err = |source| Error::EntryWrite {
            path: archive_path.to_path_buf(),
            source,
        };

        if !metadata.is_file() {
            return Err(write_err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "not a regular file",
            )));
        }

        let file = File::open(path).map_err(write_err)?;
        let size = metadata.len();
        let mode = permission_bits(metadata);

        let mut header = tar::Header::new_gnu();
        header.set_metadata(metadata);
        header.set_entry_type(tar::EntryType::Regular);
        header.set_mode(mode);

        let mut body = file.take(size);
        self.builder
            .append_data(&mut header, archive_path, &mut body)
            .map_err(write_err)?;
        if body.limit() > 0 {
            // the builder pads a short body with zeros
            return Err(write_err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("file shrank to {} of {size} bytes", size - body.limit()),
            )));
        }

        debug!(path = %archive_path.display(), size, mode = %format!("{mode:o}"), "added entry");

        Ok(Entry::new(archive_path, EntryKind::File, mode, size).with_source_path(path.to_path_buf()))
    }

    fn close(self: Box<Self>) -> Result<()> {
        // footer, then gzip trailer, then the caller's stream
        let Self { builder } = *self;
        let encoder = builder
            .into_inner()
            .map_err(Error::close(CloseStage::Container))?;
        let mut sink = encoder
            .finish()
            .map_err(Error::close(CloseStage::Compressor))?;
        sink.flush().map_err(Error::close(CloseStage::Sink))
    }
}

#[cfg(unix)]
fn permission_bits(metadata: &Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o7777
}

#[cfg(not(unix))]
fn permission_bits(metadata: &Metadata) -> u32 {
    if metadata.permissions().readonly() {
        0o444
    } else {
        0o644
    }
}

pub struct TarGzReader<R: Read> {
    archive: tar::Archive<GzDecoder<R>>,
}

impl<R: Read> TarGzReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            archive: tar::Archive::new(GzDecoder::new(source)),
        }
    }
}

impl<R: Read> EntryReader for TarGzReader<R> {
    fn entries(&mut self) -> Result<Box<dyn Iterator<Item = Result<PendingEntry<'_>>> + '_>> {
        let entries = self.archive.entries().map_err(Error::read)?;
        Ok(Box::new(
            entries.map(|entry| decode_entry(entry.map_err(Error::read)?)),
        ))
    }
}

fn decode_entry<'a, R: Read + 'a>(entry: tar::Entry<'a, R>) -> Result<PendingEntry<'a>> {
    let archive_path = entry.path().map_err(Error::read)?.into_owned();

    let header = entry.header();
    let entry_type = header.entry_type();
    let kind = if entry_type.is_dir() {
        EntryKind::Directory
    } else if entry_type.is_file() {
        EntryKind::File
    } else {
        EntryKind::Other(entry_type.as_byte())
    };
    let mode = header.mode().map_err(Error::read)?;
    let size = entry.size();

    Ok(PendingEntry {
        entry: Entry::new(archive_path, kind, mode, size),
        body: Box::new(entry),
    })
}
