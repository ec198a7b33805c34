use std::fs::{self, File};
use std::io;
use std::path::Path;

use tracing::debug;

use crate::{Error, Result};

/// Copy the bytes of `from` into `to`, then apply the permissions of `from`.
///
/// `to` is created or truncated; its parent must already exist.
pub fn copy_file(from: impl AsRef<Path>, to: impl AsRef<Path>) -> Result<()> {
    let from = from.as_ref();
    let to = to.as_ref();
    let read_err = |source| Error::Read {
        path: from.to_path_buf(),
        source,
    };
    let write_err = |source| Error::Write {
        path: to.to_path_buf(),
        source,
    };

    let mut src = File::open(from).map_err(read_err)?;
    let mut dest = File::create(to).map_err(write_err)?;
    io::copy(&mut src, &mut dest).map_err(write_err)?;
    drop(dest);

    let permissions = fs::metadata(from).map_err(read_err)?.permissions();
    fs::set_permissions(to, permissions).map_err(write_err)
}

/// Recursively copy the directory `from` into `to`.
///
/// `filter` sees the full source path of every child, directories included;
/// a rejected directory is skipped with everything below it. `None` copies
/// everything. Children are visited in file-name order.
pub fn copy_dir(
    from: impl AsRef<Path>,
    to: impl AsRef<Path>,
    filter: Option<&dyn Fn(&Path) -> bool>,
) -> Result<()> {
    let from = from.as_ref();
    let to = to.as_ref();
    let read_err = |source| Error::Read {
        path: from.to_path_buf(),
        source,
    };

    if !fs::metadata(from).map_err(read_err)?.is_dir() {
        return Err(Error::NotADirectory {
            path: from.to_path_buf(),
        });
    }

    fs::create_dir_all(to).map_err(|source| Error::Write {
        path: to.to_path_buf(),
        source,
    })?;

    let mut entries = fs::read_dir(from)
        .map_err(read_err)?
        .collect::<io::Result<Vec<_>>>()
        .map_err(read_err)?;
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let src_path = entry.path();
        let dest_path = to.join(entry.file_name());

        if filter.is_some_and(|accept| !accept(&src_path)) {
            debug!(path = %src_path.display(), "filtered out");
            continue;
        }

        let file_type = entry.file_type().map_err(|source| Error::Read {
            path: src_path.clone(),
            source,
        })?;
        if file_type.is_dir() {
            copy_dir(&src_path, &dest_path, filter)?;
        } else {
            copy_file(&src_path, &dest_path)?;
        }
    }

    Ok(())
}
