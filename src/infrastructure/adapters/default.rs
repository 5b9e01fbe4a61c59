//! Default adapter - the metadata document is the whole component

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use super::naming::{component_name, is_composed_document};
use crate::domain::entities::{MetadataType, SourceComponent};
use crate::domain::ports::{AdapterContext, SourceAdapter};
use crate::domain::value_objects::source_path::{is_metadata_xml, with_meta_suffix};
use crate::error::{MetaformError, MetaformResult};

/// `layouts/Account-Layout.layout-meta.xml`, `reports/Sales/Q1.report`
pub struct DefaultAdapter;

impl SourceAdapter for DefaultAdapter {
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

        let xml = if is_metadata_xml(path) || is_composed_document(type_, path) {
            path.to_path_buf()
        } else {
            let sibling = with_meta_suffix(path);
            if !ctx.tree.exists(&sibling) {
                return Err(MetaformError::MissingSourceFiles {
                    component: format!("{} {}", type_.name, component_name(type_, path)),
                    path: sibling,
                });
            }
            sibling
        };
        if ctx.ignore.denies(&xml) {
            return Ok(None);
        }

        let name = component_name(type_, &xml);
        Ok(Some(ctx.component(type_.clone(), name).with_xml(Some(xml))))
    }
}
