//! Decomposed adapter
//!
//! A parent whose children live in files of their own below the parent's
//! directory:
//!
//! ```text
//! objects/Account/Account.object-meta.xml
//! objects/Account/fields/Name.field-meta.xml            (folder per type)
//! objectTranslations/Acc-es/Name.fieldTranslation-meta.xml   (top level)
//! ```
//!
//! Anything under the parent's directory that is neither the parent's
//! document nor a registered child suffix is invalid input.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use super::naming::{component_name, find_root_xml, is_composed_document};
use super::non_decomposed::embedded_children;
use crate::domain::entities::{DecompositionStrategy, MetadataType, SourceComponent};
use crate::domain::ports::{AdapterContext, SourceAdapter};
use crate::domain::value_objects::source_path::{is_metadata_xml, parse_metadata_xml};
use crate::error::{MetaformError, MetaformResult};

pub struct DecomposedAdapter;

impl DecomposedAdapter {
    /// Parent component whose directory is `dir`
    fn parent_at(
        &self,
        dir: &Path,
        type_: &Arc<MetadataType>,
        ctx: &AdapterContext<'_>,
    ) -> SourceComponent {
        let xml = find_root_xml(ctx.tree.as_ref(), type_, dir, None);
        let name = match &xml {
            Some(xml) => component_name(type_, xml),
            None => dir_name(dir),
        };
        ctx.component(type_.clone(), name)
            .with_xml(xml)
            .with_content(own_directory(type_, dir))
    }

    fn unexpected(path: &Path, parent_type: &MetadataType) -> MetaformError {
        MetaformError::UnexpectedChildType {
            path: path.to_path_buf(),
            parent_type: parent_type.name.clone(),
        }
    }
}

impl SourceAdapter for DecomposedAdapter {
    fn get_component(
        &self,
        path: &Path,
        type_: &Arc<MetadataType>,
        ctx: &AdapterContext<'_>,
    ) -> MetaformResult<Option<SourceComponent>> {
        if ctx.ignore.denies(path) {
            debug!(path = %path.display(), "ignored");
            return Ok(None);
        }
        let parent_type = if type_.has_children() {
            type_.clone()
        } else {
            ctx.registry
                .parent_type(type_)
                .ok_or_else(|| MetaformError::TypeInference {
                    path: path.to_path_buf(),
                })?
        };

        if is_metadata_xml(path) {
            let parsed =
                parse_metadata_xml(path).ok_or_else(|| Self::unexpected(path, &parent_type))?;

            if parent_type.matches_suffix(&parsed.suffix) {
                let content = path.parent().and_then(|dir| own_directory(&parent_type, dir));
                return Ok(Some(
                    ctx.component(parent_type, parsed.full_name)
                        .with_xml(Some(path.to_path_buf()))
                        .with_content(content),
                ));
            }

            let Some(child_type) = parent_type.child_by_suffix(&parsed.suffix) else {
                return Err(Self::unexpected(path, &parent_type));
            };
            let parent_dir = match parent_type.decomposition() {
                DecompositionStrategy::FolderPerType => path.parent().and_then(Path::parent),
                DecompositionStrategy::TopLevel => path.parent(),
            }
            .unwrap_or(Path::new(""));
            let parent = self.parent_at(parent_dir, &parent_type, ctx);
            let child = ctx
                .component(child_type.clone(), String::new())
                .with_parent(&parent, &parsed.full_name)
                .with_xml(Some(path.to_path_buf()));
            return Ok(Some(child));
        }

        if is_composed_document(&parent_type, path) {
            let name = component_name(&parent_type, path);
            return Ok(Some(
                ctx.component(parent_type, name)
                    .with_xml(Some(path.to_path_buf())),
            ));
        }

        if ctx.tree.is_directory(path) {
            if ctx.ignore.denies_dir(path) {
                return Ok(None);
            }
            // A child-type directory (`fields/`) stands for its parent
            let is_child_dir = parent_type
                .children
                .as_ref()
                .is_some_and(|c| c.type_by_directory(&dir_name(path)).is_some());
            let owns_document =
                find_root_xml(ctx.tree.as_ref(), &parent_type, path, None).is_some();
            let dir = match path.parent() {
                Some(parent) if is_child_dir && !owns_document => parent,
                _ => path,
            };
            return Ok(Some(self.parent_at(dir, &parent_type, ctx)));
        }

        Err(Self::unexpected(path, &parent_type))
    }

    fn get_children(&self, component: &SourceComponent) -> MetaformResult<Vec<SourceComponent>> {
        let tree = component.tree();
        let dir = match component.content() {
            Some(dir) if tree.is_directory(dir) => dir,
            // composed metadata-format document: children are its elements
            _ => return embedded_children(component),
        };

        let type_ = component.type_();
        let mut children = Vec::new();
        for file in tree.walk(dir)? {
            if Some(file.as_path()) == component.xml() || component.ignore().denies(&file) {
                continue;
            }
            let parsed =
                parse_metadata_xml(&file).ok_or_else(|| Self::unexpected(&file, type_))?;
            let Some(child_type) = type_.child_by_suffix(&parsed.suffix) else {
                return Err(Self::unexpected(&file, type_));
            };
            let child = SourceComponent::new(
                child_type.clone(),
                String::new(),
                tree.clone(),
                component.ignore().clone(),
            )
            .with_parent(component, &parsed.full_name)
            .with_xml(Some(file));
            children.push(child);
        }
        children.sort_by_key(SourceComponent::key);
        Ok(children)
    }
}

/// `dir` when it belongs to the component alone, not the shared type directory
fn own_directory(type_: &MetadataType, dir: &Path) -> Option<PathBuf> {
    let name = dir_name(dir);
    if name.is_empty() || name == type_.directory_name {
        None
    } else {
        Some(dir.to_path_buf())
    }
}

fn dir_name(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
