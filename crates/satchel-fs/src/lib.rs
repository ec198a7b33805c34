//! File and directory copy helpers.
//!
//! Both operations preserve the permission bits of the source files.

mod copy;
mod error;

pub use copy::{copy_dir, copy_file};
pub use error::{Error, Result};
