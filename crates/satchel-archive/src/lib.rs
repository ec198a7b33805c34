//! Streaming directory archiving and extraction.
//!
//! # Architecture
//!
//! - `format.rs` - Format identifiers and detection
//! - `registry.rs` - Format to codec lookup
//! - `walk.rs` - Source tree enumeration
//! - `codec/` - Per-format encode/decode
//! - `archiver.rs` - Directory archiving and extraction
//! - `sanitize.rs` - Path sanitization (zip-slip prevention)
//!
//! # Example
//!
//! ```no_run
//! use std::fs::File;
//! use std::path::Path;
//!
//! use satchel_archive::ArchiveFormat;
//!
//! let archiver = satchel_archive::open(ArchiveFormat::TarGz)?;
//! let out = File::create("site.tar.gz")?;
//! archiver.archive_directory("public", |path: &Path| !path.ends_with(".DS_Store"), out)?;
//!
//! archiver.extract(File::open("site.tar.gz")?, "restored")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub use archiver::Archiver;
pub use codec::{Codec, EntryReader, EntryWriter, TarGzCodec};
pub use entry::{ArchiveReport, Entry, EntryKind, PendingEntry};
pub use error::{CloseStage, Error, Result};
pub use format::{ArchiveFormat, detect_format};
pub use options::{ArchiveOptions, ExtractOptions};
pub use registry::{CodecFactory, Registry, open};
pub use sanitize::{SanitizedPath, sanitize_path};
pub use walk::{Walk, WalkedFile, archive_path, walk};

mod archiver;
pub mod codec;
pub mod entry;
mod error;
mod format;
pub mod options;
mod registry;
mod sanitize;
mod walk;
