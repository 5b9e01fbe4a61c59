//! Type inference
//!
//! Works out the metadata type a path belongs to, from the most to the
//! least specific evidence: a strict directory, the document suffix, the
//! file extension, then the nearest type directory above the path.

use std::path::Path;
use std::sync::Arc;

use tracing::trace;

use crate::domain::entities::{AdapterKind, MetadataRegistry, MetadataType};
use crate::domain::ports::TreeContainer;
use crate::domain::value_objects::source_path::{
    extension, normal_parts, parse_folder_metadata_xml, parse_metadata_xml, parent_name,
};

/// Type inference over one registry
pub struct TypeInference<'a> {
    registry: &'a MetadataRegistry,
}

impl<'a> TypeInference<'a> {
    pub fn new(registry: &'a MetadataRegistry) -> Self {
        Self { registry }
    }

    /// Type of the component a file belongs to
    ///
    /// Child types of decomposed parents resolve to the parent type; the
    /// parent's adapter produces the child.
    pub fn file_type(&self, path: &Path) -> Option<Arc<MetadataType>> {
        let inferred = self
            .strict_directory(path)
            .or_else(|| self.by_document(path))
            .or_else(|| extension(path).and_then(|ext| self.registry.type_by_suffix(ext)))
            .or_else(|| self.by_enclosing_directory(path))?;
        trace!(path = %path.display(), type_ = %inferred.name, "inferred type");
        Some(self.top_level(inferred))
    }

    /// Type of a directory that is itself a component root
    ///
    /// `lwc/cmp`, `objects/Account`, `staticresources/Site`, or any
    /// directory holding a root document named after it (`cmp/cmp.cmp-meta.xml`).
    pub fn directory_type(&self, dir: &Path, tree: &dyn TreeContainer) -> Option<Arc<MetadataType>> {
        if let Some(parent) = parent_name(dir) {
            let by_parent = self
                .registry
                .strict_directory_type(&parent)
                .or_else(|| self.registry.type_by_directory_name(&parent));
            if let Some(type_) = by_parent {
                return type_.adapter().resolves_directories().then_some(type_);
            }
        }

        let name = dir.file_name()?.to_string_lossy().into_owned();
        let entries = tree.read_directory(dir).ok()?;
        entries.iter().find_map(|entry| {
            let parsed = parse_metadata_xml(Path::new(entry))?;
            if parsed.full_name != name {
                return None;
            }
            let type_ = self.top_level(self.registry.type_by_suffix(&parsed.suffix)?);
            type_.adapter().resolves_directories().then_some(type_)
        })
    }

    fn top_level(&self, type_: Arc<MetadataType>) -> Arc<MetadataType> {
        match self.registry.parent_type(&type_) {
            Some(parent) if parent.adapter() == AdapterKind::Decomposed => parent,
            _ => type_,
        }
    }

    fn strict_directory(&self, path: &Path) -> Option<Arc<MetadataType>> {
        let parts = normal_parts(path);
        let parents = &parts[..parts.len().saturating_sub(1)];
        parents
            .iter()
            .rev()
            .find_map(|part| self.registry.strict_directory_type(part))
    }

    fn by_document(&self, path: &Path) -> Option<Arc<MetadataType>> {
        if let Some(parsed) = parse_metadata_xml(path) {
            return self.registry.type_by_suffix(&parsed.suffix);
        }
        // bare folder document: `reports/Sales-meta.xml`
        parse_folder_metadata_xml(path)?;
        let content_type = self.registry.type_by_directory_name(&parent_name(path)?)?;
        self.registry.folder_type_of(&content_type)
    }

    /// Nearest type directory above the path, for types whose files carry
    /// arbitrary extensions (content files, decomposed directories)
    fn by_enclosing_directory(&self, path: &Path) -> Option<Arc<MetadataType>> {
        let parts = normal_parts(path);
        let parents = &parts[..parts.len().saturating_sub(1)];
        parents.iter().rev().find_map(|part| {
            let type_ = self.registry.type_by_directory_name(part)?;
            match type_.adapter() {
                AdapterKind::Default | AdapterKind::NonDecomposed => None,
                _ => Some(type_),
            }
        })
    }
}
