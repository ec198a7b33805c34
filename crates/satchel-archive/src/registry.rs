use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::archiver::Archiver;
use crate::codec::{Codec, TarGzCodec};
use crate::error::{Error, Result};
use crate::format::ArchiveFormat;

/// Builds a fresh codec for one format.
pub type CodecFactory = fn() -> Box<dyn Codec>;

static DEFAULT_REGISTRY: Lazy<Registry> = Lazy::new(Registry::default);

/// Open an archiver for `format` from the built-in registry.
pub fn open(format: ArchiveFormat) -> Result<Archiver> {
    DEFAULT_REGISTRY.open(format)
}

/// Maps format identifiers to codec factories.
#[derive(Clone, Debug)]
pub struct Registry {
    codecs: HashMap<ArchiveFormat, CodecFactory>,
}

impl Default for Registry {
    fn default() -> Self {
        let mut codecs: HashMap<ArchiveFormat, CodecFactory> = HashMap::new();
        codecs.insert(ArchiveFormat::TarGz, tar_gz);
        Self { codecs }
    }
}

fn tar_gz() -> Box<dyn Codec> {
    Box::new(TarGzCodec)
}

impl Registry {
    /// A registry with no formats.
    pub fn empty() -> Self {
        Self {
            codecs: HashMap::new(),
        }
    }

    /// Add or replace the codec for `format`.
    pub fn register(&mut self, format: ArchiveFormat, factory: CodecFactory) -> Result<()> {
        if format == ArchiveFormat::Unknown {
            return Err(Error::UnsupportedFormat { id: format.id() });
        }
        self.codecs.insert(format, factory);
        Ok(())
    }

    pub fn open(&self, format: ArchiveFormat) -> Result<Archiver> {
        let factory = self
            .codecs
            .get(&format)
            .ok_or(Error::UnsupportedFormat { id: format.id() })?;
        Ok(Archiver::new(format, factory()))
    }

    /// Open by raw identifier, as read from configuration.
    pub fn open_id(&self, id: u32) -> Result<Archiver> {
        let format = ArchiveFormat::from_id(id).ok_or(Error::UnsupportedFormat { id })?;
        self.open(format)
    }

    pub fn formats(&self) -> impl Iterator<Item = ArchiveFormat> + '_ {
        self.codecs.keys().copied()
    }
}
