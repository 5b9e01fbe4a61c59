//! WriteDestination port
//!
//! Where a conversion lands: an output directory, an in-memory zip archive,
//! or an existing project being merged into. The pipeline hands over every
//! file of one component at once; a destination commits all of them or none.

use std::path::PathBuf;

use crate::error::MetaformResult;

/// A fully staged file, ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    /// Destination path; relative paths land under the destination root
    pub path: PathBuf,
    pub bytes: Vec<u8>,
}

impl StagedFile {
    pub fn new(path: impl Into<PathBuf>, bytes: Vec<u8>) -> Self {
        Self {
            path: path.into(),
            bytes,
        }
    }
}

/// What a destination produced once finished
#[derive(Debug, Clone, Default)]
pub struct DestinationOutput {
    /// Root directory files were written under
    pub root: Option<PathBuf>,
    /// Archive bytes, for zip destinations
    pub zip_buffer: Option<Vec<u8>>,
    /// Archive file, when the zip was also written to disk
    pub zip_path: Option<PathBuf>,
}

pub trait WriteDestination: Send {
    /// Human-readable description for logs and events
    fn display_name(&self) -> String;

    /// Write one component's files
    ///
    /// Either every file lands, or the destination is left as it was before
    /// the call and an error is returned. Returns the written paths.
    fn commit(&mut self, files: &[StagedFile]) -> MetaformResult<Vec<PathBuf>>;

    /// Flush buffered output
    fn finish(&mut self) -> MetaformResult<DestinationOutput>;
}
