use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Result of sanitizing an archive entry path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SanitizedPath {
    pub original: PathBuf,
    pub relative: PathBuf,
    pub resolved: PathBuf,
}

/// Resolve an entry path under `base`, rejecting anything that could land
/// outside of it.
///
/// Returns `None` when nothing is left after dropping `strip_components`
/// leading components.
pub fn sanitize_path(
    entry_path: &Path,
    base: &Path,
    strip_components: usize,
) -> Result<Option<SanitizedPath>> {
    let normalized = normalize_path(entry_path)?;

    let components: Vec<_> = normalized.components().collect();
    if components.len() <= strip_components {
        return Ok(None);
    }
    let relative: PathBuf = components[strip_components..].iter().collect();

    Ok(Some(SanitizedPath {
        original: entry_path.to_path_buf(),
        resolved: base.join(&relative),
        relative,
    }))
}

/// Drop `.` components and fold `..` into its parent.
///
/// Absolute paths and `..` that climbs above the start are traversal attempts.
fn normalize_path(path: &Path) -> Result<PathBuf> {
    let mut parts: Vec<&OsStr> = Vec::new();

    for component in path.components() {
        match component {
            Component::Normal(part) => parts.push(part),
            Component::CurDir => {}
            Component::ParentDir => {
                if parts.pop().is_none() {
                    return Err(Error::PathTraversal {
                        entry: path.to_path_buf(),
                    });
                }
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(Error::PathTraversal {
                    entry: path.to_path_buf(),
                });
            }
        }
    }

    Ok(parts.iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_base_path() -> &'static Path {
        if cfg!(windows) {
            Path::new("C:/opt/myapp")
        } else {
            Path::new("/opt/myapp")
        }
    }

    #[test]
    fn basic_path_sanitization() {
        let result = sanitize_path(Path::new("bin/tool"), test_base_path(), 0)
            .unwrap()
            .unwrap();
        assert_eq!(result.original, Path::new("bin/tool"));
        assert_eq!(result.relative, Path::new("bin/tool"));
        assert_eq!(result.resolved, test_base_path().join("bin/tool"));
    }

    #[test]
    fn path_with_component_stripping() {
        let result = sanitize_path(Path::new("tool-1.0/bin/tool"), test_base_path(), 1)
            .unwrap()
            .unwrap();
        let relative_part = result.resolved.strip_prefix(test_base_path()).unwrap();
        assert_eq!(relative_part, Path::new("bin/tool"));
    }

    #[test]
    fn stripping_everything_yields_none() {
        assert_eq!(sanitize_path(Path::new("tool-1.0/"), test_base_path(), 1).unwrap(), None);
        assert_eq!(sanitize_path(Path::new("./"), test_base_path(), 0).unwrap(), None);
    }

    #[test]
    fn absolute_path_rejected() {
        let malicious_path = if cfg!(windows) { "C:\\etc\\passwd" } else { "/etc/passwd" };
        let result = sanitize_path(Path::new(malicious_path), test_base_path(), 0);
        assert!(matches!(result, Err(Error::PathTraversal { .. })));
    }

    #[test]
    fn parent_escape_rejected() {
        let result = sanitize_path(Path::new("../../etc/passwd"), test_base_path(), 0);
        assert!(matches!(result, Err(Error::PathTraversal { .. })));

        let result = sanitize_path(Path::new("a/../../b"), test_base_path(), 0);
        assert!(matches!(result, Err(Error::PathTraversal { .. })));
    }

    #[test]
    fn parent_inside_base_allowed() {
        let result = sanitize_path(Path::new("a/./b/../c.txt"), test_base_path(), 0)
            .unwrap()
            .unwrap();
        assert_eq!(result.relative, Path::new("a/c.txt"));
    }
}
