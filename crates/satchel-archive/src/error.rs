use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unsupported archive format: {id}")]
    UnsupportedFormat { id: u32 },

    #[error("failed to walk source directory: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("failed to write entry '{path}': {source}")]
    EntryWrite { path: PathBuf, source: io::Error },

    #[error("failed to read archive: {source}")]
    EntryRead { source: io::Error },

    #[error("unable to extract entry of type '{kind}' in '{path}'")]
    UnsupportedEntryKind { kind: char, path: PathBuf },

    #[error("failed to close {stage}: {source}")]
    Close { stage: CloseStage, source: io::Error },

    #[error("entry '{entry}' escapes the target directory")]
    PathTraversal { entry: PathBuf },

    #[error("strip_components({count}) removed all path components from '{original}'")]
    NoComponentsRemaining { original: PathBuf, count: usize },

    #[error("failed to create directory: {path}: {source}")]
    DirectoryCreationFailed { path: PathBuf, source: io::Error },

    #[error("failed to extract '{path}': {source}")]
    ExtractionFailed { path: PathBuf, source: io::Error },
}

/// Which layer failed while an entry writer was being closed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CloseStage {
    Container,
    Compressor,
    Sink,
}

impl fmt::Display for CloseStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Container => "archive container",
            Self::Compressor => "compressor",
            Self::Sink => "output stream",
        })
    }
}

impl Error {
    pub(crate) fn close(stage: CloseStage) -> impl FnOnce(io::Error) -> Self {
        move |source| Self::Close { stage, source }
    }

    pub(crate) fn read(source: io::Error) -> Self {
        Self::EntryRead { source }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
