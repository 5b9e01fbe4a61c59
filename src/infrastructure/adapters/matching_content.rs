//! Matching-content adapter
//!
//! Content and metadata document share a name: `classes/A.cls` pairs with
//! `classes/A.cls-meta.xml`. Either one resolves the component.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use super::naming::component_name;
use crate::domain::entities::{MetadataType, SourceComponent};
use crate::domain::ports::{AdapterContext, FileKind, SourceAdapter};
use crate::domain::value_objects::source_path::{
    base_name, is_metadata_xml, strip_meta_suffix, with_meta_suffix,
};
use crate::error::{MetaformError, MetaformResult};

pub struct MatchingContentAdapter;

impl MatchingContentAdapter {
    fn locate_content(&self, xml: &Path, ctx: &AdapterContext<'_>) -> Option<PathBuf> {
        if let Some(content) = strip_meta_suffix(xml).filter(|p| ctx.tree.exists(p)) {
            return Some(content);
        }
        let dir = xml.parent()?;
        ctx.tree.find(FileKind::Content, &base_name(xml), dir)
    }

    fn locate_xml(&self, content: &Path, ctx: &AdapterContext<'_>) -> Option<PathBuf> {
        let sibling = with_meta_suffix(content);
        if ctx.tree.exists(&sibling) {
            return Some(sibling);
        }
        let dir = content.parent()?;
        ctx.tree
            .find(FileKind::MetadataXml, &base_name(content), dir)
    }
}

impl SourceAdapter for MatchingContentAdapter {
    fn get_component(
        &self,
        path: &Path,
        type_: &Arc<MetadataType>,
        ctx: &AdapterContext<'_>,
    ) -> MetaformResult<Option<SourceComponent>> {
        let (xml, content) = if is_metadata_xml(path) {
            let content = self.locate_content(path, ctx);
            (Some(path.to_path_buf()), content)
        } else {
            (self.locate_xml(path, ctx), Some(path.to_path_buf()))
        };

        let name = component_name(type_, path);
        let missing = |expected: PathBuf| MetaformError::MissingSourceFiles {
            component: format!("{} {}", type_.name, name),
            path: expected,
        };
        let xml = xml.ok_or_else(|| missing(with_meta_suffix(path)))?;
        let content = content.ok_or_else(|| {
            missing(strip_meta_suffix(path).unwrap_or_else(|| path.to_path_buf()))
        })?;

        if ctx.ignore.denies(&xml) || ctx.ignore.denies(&content) {
            debug!(path = %path.display(), "ignored");
            return Ok(None);
        }

        Ok(Some(
            ctx.component(type_.clone(), name)
                .with_xml(Some(xml))
                .with_content(Some(content)),
        ))
    }
}
