//! Source tree enumeration for archiving.

use std::fs::Metadata;
use std::path::{Component, Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Error, Result};

/// A file accepted by the walk predicate.
#[derive(Debug)]
pub struct WalkedFile {
    pub path: PathBuf,
    pub metadata: Metadata,
    pub archive_path: PathBuf,
}

/// Depth-first walk over the non-directory entries below a root.
///
/// Entries come in directory listing order. Symbolic links are followed.
/// The first error ends the walk.
pub struct Walk<P> {
    root: PathBuf,
    entries: walkdir::IntoIter,
    predicate: P,
    failed: bool,
}

pub fn walk<P>(root: impl AsRef<Path>, predicate: P) -> Walk<P>
where
    P: Fn(&Path) -> bool,
{
    let root = root.as_ref().to_path_buf();
    let entries = WalkDir::new(&root).follow_links(true).into_iter();
    Walk {
        root,
        entries,
        predicate,
        failed: false,
    }
}

impl<P> Walk<P> {
    fn fail(&mut self, err: walkdir::Error) -> Option<Result<WalkedFile>> {
        self.failed = true;
        Some(Err(Error::Walk(err)))
    }
}

impl<P> Iterator for Walk<P>
where
    P: Fn(&Path) -> bool,
{
    type Item = Result<WalkedFile>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        loop {
            let entry = match self.entries.next()? {
                Ok(entry) => entry,
                Err(err) => return self.fail(err),
            };

            if entry.file_type().is_dir() || !(self.predicate)(entry.path()) {
                continue;
            }

            let metadata = match entry.metadata() {
                Ok(metadata) => metadata,
                Err(err) => return self.fail(err),
            };

            let mut relative = archive_path(&self.root, entry.path());
            if relative.as_os_str().is_empty() {
                // the root itself is a file
                relative = PathBuf::from(entry.file_name());
            }

            return Some(Ok(WalkedFile {
                path: entry.into_path(),
                metadata,
                archive_path: relative,
            }));
        }
    }
}

/// Compute the path of `path` relative to `root`, keeping only normal components.
///
/// Names are kept byte for byte; the archive writer turns separators into `/`.
pub fn archive_path(root: &Path, path: &Path) -> PathBuf {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part),
            _ => None,
        })
        .collect()
}
