//! Bundle adapter
//!
//! The component is a directory named after itself, holding its metadata
//! document and every payload file: `lwc/cmp/cmp.js-meta.xml`,
//! `aura/cmp/cmp.cmp-meta.xml`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use super::naming::{find_root_xml, trim_to_component_root};
use crate::domain::entities::{MetadataType, SourceComponent};
use crate::domain::ports::{AdapterContext, SourceAdapter, TreeContainer};
use crate::error::{MetaformError, MetaformResult};

pub struct BundleAdapter;

impl BundleAdapter {
    /// Bundle directory containing `path`
    fn bundle_root(&self, path: &Path, type_: &MetadataType, tree: &dyn TreeContainer) -> Option<PathBuf> {
        if let Some(root) = trim_to_component_root(type_, path) {
            return Some(root);
        }
        // Outside a type directory: the nearest ancestor holding its own document
        let start = if tree.is_directory(path) {
            path
        } else {
            path.parent()?
        };
        start.ancestors().find_map(|dir| {
            let name = dir.file_name()?.to_str()?;
            find_root_xml(tree, type_, dir, Some(name)).map(|_| dir.to_path_buf())
        })
    }
}

impl SourceAdapter for BundleAdapter {
    fn get_component(
        &self,
        path: &Path,
        type_: &Arc<MetadataType>,
        ctx: &AdapterContext<'_>,
    ) -> MetaformResult<Option<SourceComponent>> {
        let Some(root) = self.bundle_root(path, type_, ctx.tree.as_ref()) else {
            return Err(MetaformError::TypeInference {
                path: path.to_path_buf(),
            });
        };
        if !ctx.tree.is_directory(&root) {
            // loose files directly under the type directory (jsconfig.json)
            debug!(path = %path.display(), "not inside a bundle");
            return Ok(None);
        }
        if ctx.ignore.denies_dir(&root) {
            return Ok(None);
        }

        let name = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let xml = find_root_xml(ctx.tree.as_ref(), type_, &root, Some(&name)).ok_or_else(|| {
            MetaformError::MissingSourceFiles {
                component: format!("{} {}", type_.name, name),
                path: root.join(format!("{}.*-meta.xml", name)),
            }
        })?;
        if ctx.ignore.denies(&xml) {
            return Ok(None);
        }

        Ok(Some(
            ctx.component(type_.clone(), name)
                .with_xml(Some(xml))
                .with_content(Some(root)),
        ))
    }
}
