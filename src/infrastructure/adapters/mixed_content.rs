//! Mixed-content adapter
//!
//! The content is a single file of any extension or a whole directory next
//! to the metadata document: `staticresources/Site.resource-meta.xml` with
//! `staticresources/Site/` or `staticresources/Site.zip`.

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use super::naming::{component_name, trim_to_component_root};
use crate::domain::entities::{MetadataType, SourceComponent};
use crate::domain::ports::{AdapterContext, FileKind, SourceAdapter};
use crate::domain::value_objects::source_path::{base_name, is_metadata_xml};
use crate::error::{MetaformError, MetaformResult};

pub struct MixedContentAdapter;

impl SourceAdapter for MixedContentAdapter {
    fn get_component(
        &self,
        path: &Path,
        type_: &Arc<MetadataType>,
        ctx: &AdapterContext<'_>,
    ) -> MetaformResult<Option<SourceComponent>> {
        let (anchor, xml, content) = if is_metadata_xml(path) {
            let dir = path.parent().unwrap_or(Path::new(""));
            let content = ctx.tree.find(FileKind::Content, &base_name(path), dir);
            (path.to_path_buf(), Some(path.to_path_buf()), content)
        } else {
            let root = trim_to_component_root(type_, path).unwrap_or_else(|| path.to_path_buf());
            let dir = root.parent().unwrap_or(Path::new(""));
            let xml = ctx.tree.find(FileKind::MetadataXml, &base_name(&root), dir);
            (root.clone(), xml, Some(root))
        };

        let Some(xml) = xml else {
            let name = base_name(&anchor);
            let suffix = type_.suffix.as_deref().unwrap_or_default();
            return Err(MetaformError::MissingSourceFiles {
                component: format!("{} {}", type_.name, name),
                path: anchor.with_file_name(format!("{}.{}-meta.xml", name, suffix)),
            });
        };
        let Some(content) = content else {
            return Err(MetaformError::MissingSourceFiles {
                component: format!("{} {}", type_.name, component_name(type_, &xml)),
                path: xml.with_file_name(base_name(&xml)),
            });
        };

        if ctx.ignore.denies(&xml) || ctx.ignore.denies_dir(&content) {
            debug!(path = %path.display(), "ignored");
            return Ok(None);
        }

        let name = component_name(type_, &xml);
        Ok(Some(
            ctx.component(type_.clone(), name)
                .with_xml(Some(xml))
                .with_content(Some(content)),
        ))
    }
}
