//! Tree Implementations
//!
//! Concrete implementations of the TreeContainer port.

mod local;
mod virtual_tree;
mod zip_tree;

pub use local::LocalTree;
pub use virtual_tree::VirtualTree;
pub use zip_tree::ZipTree;

use std::path::{Component, Path, PathBuf};

/// Drop `.` segments and trailing separators so lookups compare equal
pub(crate) fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}
