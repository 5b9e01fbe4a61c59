//! Non-decomposed adapter
//!
//! Children are elements of the single parent document
//! (`labels/CustomLabels.labels-meta.xml`), never files of their own.

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use super::naming::component_name;
use crate::domain::entities::{MetadataType, SourceComponent};
use crate::domain::ports::{AdapterContext, SourceAdapter};
use crate::error::{MetaformError, MetaformResult};

pub struct NonDecomposedAdapter;

impl SourceAdapter for NonDecomposedAdapter {
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
        // A child type (CustomLabel) resolves to the document holding it
        let parent_type = if type_.has_children() {
            type_.clone()
        } else {
            ctx.registry
                .parent_type(type_)
                .ok_or_else(|| MetaformError::TypeInference {
                    path: path.to_path_buf(),
                })?
        };

        let name = component_name(&parent_type, path);
        Ok(Some(
            ctx.component(parent_type, name)
                .with_xml(Some(path.to_path_buf())),
        ))
    }

    fn get_children(&self, component: &SourceComponent) -> MetaformResult<Vec<SourceComponent>> {
        embedded_children(component)
    }
}

/// Children stored as elements of `component`'s document
///
/// Each child is addressed by its unique id element. Children that cannot
/// exist without their parent are left out.
pub(crate) fn embedded_children(component: &SourceComponent) -> MetaformResult<Vec<SourceComponent>> {
    let Some(index) = component.type_().children.as_ref() else {
        return Ok(Vec::new());
    };
    let Some(root) = component.parse_xml()? else {
        return Ok(Vec::new());
    };

    let mut children = Vec::new();
    for child_type in index.types.values() {
        if child_type.unaddressable_without_parent {
            continue;
        }
        let id_element = child_type.unique_id_element.as_deref().unwrap_or("fullName");
        for element in root.children_named(child_type.element_name()) {
            let Some(name) = element.child_text(id_element) else {
                continue;
            };
            let child = SourceComponent::new(
                child_type.clone(),
                String::new(),
                component.tree().clone(),
                component.ignore().clone(),
            )
            .with_parent(component, &name)
            .with_xml(component.xml().map(Path::to_path_buf));
            children.push(child);
        }
    }
    children.sort_by_key(SourceComponent::key);
    Ok(children)
}
