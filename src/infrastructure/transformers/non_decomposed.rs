//! Non-decomposed transformer
//!
//! Children live inside one parent document in both formats. Converting to
//! source format merges every incoming entry into a single document per
//! destination, kept in the context until the conversion finishes.

use std::collections::btree_map::Entry;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::entities::{ConvertContext, MergedDocument, MetadataType, SourceComponent, WriteInfo};
use crate::domain::ports::Transformer;
use crate::domain::services::xml::{parse_document, XmlElement, XmlNode};
use crate::domain::value_objects::META_XML_SUFFIX;
use crate::error::MetaformResult;

use super::{composed_output, source_output};

#[derive(Debug, Default, Clone, Copy)]
pub struct NonDecomposedTransformer;

/// Replace the entry carrying the same id, or append it
fn upsert(document: &mut XmlElement, child_type: &MetadataType, entry: XmlElement) {
    let id_element = child_type.unique_id_element.as_deref().unwrap_or("fullName");
    let id = entry.child_text(id_element);
    let existing = document.children.iter_mut().find_map(|node| match node {
        XmlNode::Element(element)
            if element.name == entry.name && id.is_some() && element.child_text(id_element) == id =>
        {
            Some(element)
        }
        _ => None,
    });
    match existing {
        Some(element) => *element = entry,
        None => document.push(entry),
    }
}

impl NonDecomposedTransformer {
    /// Document path an incoming component is merged into
    fn destination(parent_type: &MetadataType, parent_name: &str, merge_with: Option<&SourceComponent>) -> PathBuf {
        if let Some(xml) = merge_with.and_then(SourceComponent::xml) {
            return xml.to_path_buf();
        }
        let suffix = parent_type.suffix.as_deref().unwrap_or(&parent_type.id);
        source_output(
            &Path::new(&parent_type.directory_name)
                .join(format!("{}.{}{}", parent_name, suffix, META_XML_SUFFIX)),
        )
    }

    /// Merged document for `destination`, seeded from the local file when merging
    fn document<'a>(
        ctx: &'a mut ConvertContext,
        destination: &Path,
        parent_type: &MetadataType,
        merge_with: Option<&SourceComponent>,
    ) -> MetaformResult<&'a mut XmlElement> {
        let document = match ctx.merged_documents.entry(destination.to_path_buf()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let root = match merge_with.and_then(|target| target.xml().map(|xml| (target, xml))) {
                    Some((target, xml)) => parse_document(&target.tree().read_file(xml)?, xml)?,
                    None => XmlElement::metadata_root(parent_type.name.as_str()),
                };
                entry.insert(MergedDocument { root })
            }
        };
        Ok(&mut document.root)
    }
}

impl Transformer for NonDecomposedTransformer {
    fn to_metadata_format(
        &self,
        component: &SourceComponent,
        ctx: &mut ConvertContext,
    ) -> MetaformResult<Vec<WriteInfo>> {
        if let Some(parent) = component.parent_component() {
            let state = ctx.recomposition_for(&parent);
            if !state.emitted {
                state.children.add(component.clone());
            }
            return Ok(Vec::new());
        }

        let state = ctx.recomposition_for(component);
        if state.emitted {
            return Ok(Vec::new());
        }
        state.parent = component.clone();
        state.parent_seen = true;
        state.emitted = true;

        let Some(xml) = component.xml() else {
            return Ok(Vec::new());
        };
        let output = composed_output(component.type_(), component.full_name());
        if component.ignore().denies(&output) {
            return Ok(Vec::new());
        }
        Ok(vec![WriteInfo::copy(output, component.tree().clone(), xml)])
    }

    fn to_source_format(
        &self,
        component: &SourceComponent,
        merge_with: Option<&SourceComponent>,
        ctx: &mut ConvertContext,
    ) -> MetaformResult<Vec<WriteInfo>> {
        let (parent_type, parent_name) = match component.parent() {
            Some(parent) => (parent.type_.clone(), parent.full_name.clone()),
            None => (component.type_().clone(), component.full_name().to_string()),
        };
        let destination = Self::destination(&parent_type, &parent_name, merge_with);
        if component.ignore().denies(&destination) {
            debug!(output = %destination.display(), "merged output ignored");
            return Ok(Vec::new());
        }
        // an embedded merge target stands for the whole local document
        let seed = merge_with.map(|target| target.parent_component().unwrap_or_else(|| target.clone()));

        let Some(incoming) = component.parse_xml()? else {
            return Ok(Vec::new());
        };
        let document = Self::document(ctx, &destination, &parent_type, seed.as_ref())?;

        if component.parent().is_some() {
            let child_type = component.type_();
            let entry = XmlElement {
                name: child_type.element_name().to_string(),
                attributes: Vec::new(),
                children: incoming.children,
            };
            upsert(document, child_type, entry);
            return Ok(Vec::new());
        }

        for element in incoming.elements() {
            let child_type = parent_type.children.as_ref().and_then(|index| {
                index
                    .types
                    .values()
                    .find(|t| t.element_name() == element.name)
            });
            match child_type {
                Some(child_type) => upsert(document, child_type, element.clone()),
                None => {
                    if document.child(&element.name).is_none() {
                        document.push(element.clone());
                    }
                }
            }
        }
        Ok(Vec::new())
    }
}
