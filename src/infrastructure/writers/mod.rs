//! Write destinations
//!
//! - `directory` - files under an output root (also used for merges, whose
//!   paths point into the existing project)
//! - `archive` - entries staged in memory, zipped on finish

mod archive;
mod directory;

pub use archive::ZipArchiveWriter;
pub use directory::{atomic_write, DirectoryWriter};
