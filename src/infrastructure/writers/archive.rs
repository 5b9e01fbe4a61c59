//! Zip destination
//!
//! Entries are staged in memory and archived in path order when the
//! conversion finishes. Entry names use `/` and sit at the archive root.

use std::collections::BTreeMap;
use std::io::{Cursor, Write};
use std::path::{Component, Path, PathBuf};

use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::CompressionMethod;

use super::directory::atomic_write;
use crate::domain::ports::{DestinationOutput, StagedFile, WriteDestination};
use crate::error::{MetaformError, MetaformResult};

#[derive(Debug, Default)]
pub struct ZipArchiveWriter {
    entries: BTreeMap<String, Vec<u8>>,
    /// Archive file written on finish, if any
    output_path: Option<PathBuf>,
}

impl ZipArchiveWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also write the finished archive to `path`
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn archive(&self) -> MetaformResult<Vec<u8>> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        for (name, bytes) in &self.entries {
            writer.start_file(name.as_str(), options)?;
            writer.write_all(bytes)?;
        }
        Ok(writer.finish()?.into_inner())
    }
}

/// Archive entry name for a relative path
fn entry_name(path: &Path) -> MetaformResult<String> {
    let mut parts = Vec::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::CurDir => {}
            _ => {
                return Err(MetaformError::Archive {
                    message: format!("{} cannot be stored in an archive", path.display()),
                })
            }
        }
    }
    Ok(parts.join("/"))
}

impl WriteDestination for ZipArchiveWriter {
    fn display_name(&self) -> String {
        match &self.output_path {
            Some(path) => path.display().to_string(),
            None => "zip archive".to_string(),
        }
    }

    fn commit(&mut self, files: &[StagedFile]) -> MetaformResult<Vec<PathBuf>> {
        let names = files
            .iter()
            .map(|file| entry_name(&file.path))
            .collect::<MetaformResult<Vec<_>>>()?;

        let mut written = Vec::with_capacity(files.len());
        for (name, file) in names.into_iter().zip(files) {
            self.entries.insert(name, file.bytes.clone());
            written.push(file.path.clone());
        }
        Ok(written)
    }

    fn finish(&mut self) -> MetaformResult<DestinationOutput> {
        let buffer = self.archive()?;
        debug!(entries = self.entries.len(), bytes = buffer.len(), "archive built");
        if let Some(path) = &self.output_path {
            atomic_write(path, &buffer)?;
        }
        Ok(DestinationOutput {
            root: None,
            zip_buffer: Some(buffer),
            zip_path: self.output_path.clone(),
        })
    }
}
