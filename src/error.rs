//! Error types for Metaform
//!
//! Uses `thiserror` for library errors. The binary wraps these in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::TreeError;

/// Result type alias for Metaform operations
pub type MetaformResult<T> = Result<T, MetaformError>;

/// Main error type for Metaform operations
#[derive(Error, Debug)]
pub enum MetaformError {
    /// No metadata type could be inferred for a path
    #[error("could not infer a metadata type for {path}")]
    TypeInference { path: PathBuf },

    /// A file under a decomposed parent's directory has a suffix that is not a
    /// registered child suffix of that parent
    #[error("unexpected child metadata file {path} under a {parent_type} component")]
    UnexpectedChildType { path: PathBuf, parent_type: String },

    /// Input path does not exist in the tree
    #[error("path not found: {path}")]
    PathNotFound { path: PathBuf },

    /// Registry lookup miss
    #[error("unknown metadata type '{name}'")]
    UnknownType { name: String },

    /// A component is missing a file its type requires (content or metadata xml)
    #[error("{component}: expected source file {path} is missing")]
    MissingSourceFiles { component: String, path: PathBuf },

    /// A merge target cannot receive the incoming component
    #[error("cannot merge {component}: {message}")]
    MergeConflict { component: String, message: String },

    /// Malformed metadata xml
    #[error("invalid xml in {path}: {message}")]
    Xml { path: PathBuf, message: String },

    /// Registry data is inconsistent or unreadable
    #[error("invalid metadata registry: {message}")]
    Registry { message: String },

    /// Zip archive could not be read or written
    #[error("archive error: {message}")]
    Archive { message: String },

    /// Invalid configuration file or option
    #[error("invalid configuration in {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Conversion was cancelled before any work was scheduled
    #[error("conversion cancelled")]
    Cancelled,
}

impl From<TreeError> for MetaformError {
    fn from(err: TreeError) -> Self {
        match err {
            TreeError::NotFound(path) => MetaformError::PathNotFound { path },
            TreeError::Io(err) => MetaformError::Io(err),
            TreeError::Archive(message) => MetaformError::Archive { message },
        }
    }
}

impl From<zip::result::ZipError> for MetaformError {
    fn from(err: zip::result::ZipError) -> Self {
        MetaformError::Archive {
            message: err.to_string(),
        }
    }
}
