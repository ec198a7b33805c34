use std::fmt;
use std::path::Path;
use std::str::FromStr;

use crate::Error;

/// Archive format identifier.
///
/// `Unknown` is the unset value and is never registered, so opening it
/// always fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ArchiveFormat {
    #[default]
    Unknown,
    /// Gzip-compressed tar stream.
    TarGz,
}

impl ArchiveFormat {
    pub const fn id(self) -> u32 {
        match self {
            Self::Unknown => 0,
            Self::TarGz => 1,
        }
    }

    pub const fn from_id(id: u32) -> Option<Self> {
        match id {
            0 => Some(Self::Unknown),
            1 => Some(Self::TarGz),
            _ => None,
        }
    }

    /// Canonical textual name, also used as the file extension.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::TarGz => "tar.gz",
        }
    }

    /// Guess the format from a file name such as `site.tar.gz`.
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        let name = path.as_ref().file_name()?.to_str()?.to_ascii_lowercase();
        if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
            Some(Self::TarGz)
        } else {
            None
        }
    }
}

impl fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ArchiveFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tar.gz" | "tgz" => Ok(Self::TarGz),
            _ => Err(Error::UnsupportedFormat {
                id: Self::Unknown.id(),
            }),
        }
    }
}

/// Detect the archive format from the leading bytes of a stream.
pub fn detect_format(data: &[u8]) -> Option<ArchiveFormat> {
    match data {
        [0x1F, 0x8B, ..] => Some(ArchiveFormat::TarGz),
        _ => None,
    }
}
