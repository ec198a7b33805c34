use std::path::Path;

use crate::Result;
use crate::sanitize::{SanitizedPath, sanitize_path};

/// Highest gzip level, used unless the caller asks otherwise.
pub const BEST_COMPRESSION: u32 = 9;

/// Options applied while writing an archive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArchiveOptions {
    pub compression_level: u32,
}

impl Default for ArchiveOptions {
    fn default() -> Self {
        Self {
            compression_level: BEST_COMPRESSION,
        }
    }
}

impl ArchiveOptions {
    pub fn compression_level(mut self, level: u32) -> Self {
        self.compression_level = level.min(BEST_COMPRESSION);
        self
    }
}

/// Options applied while extracting an archive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    pub strip_components: usize,
}

impl ExtractOptions {
    pub fn strip_components(mut self, n: usize) -> Self {
        self.strip_components = n;
        self
    }

    /// Sanitize an entry path against `base` with these options.
    pub fn sanitize_path(&self, entry_path: &Path, base: &Path) -> Result<Option<SanitizedPath>> {
        sanitize_path(entry_path, base, self.strip_components)
    }
}
