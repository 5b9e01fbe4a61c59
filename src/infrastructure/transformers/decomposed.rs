//! Decomposed transformer
//!
//! Metadata format: children are collected in the conversion context and
//! written into one composed parent document. Source format: the parent
//! document is split into one file per addressable child plus the parent's
//! own fields.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::entities::{
    ConvertContext, DecompositionStrategy, DeferredWrite, MetadataType, SourceComponent, WriteInfo,
};
use crate::domain::ports::Transformer;
use crate::domain::services::xml::{XmlElement, XmlNode};
use crate::domain::value_objects::{ComponentKey, META_XML_SUFFIX};
use crate::error::{MetaformError, MetaformResult};

use super::{compose, source_output};

#[derive(Debug, Default, Clone, Copy)]
pub struct DecomposedTransformer;

/// An existing local parent that decomposed files are merged into
struct MergeTarget {
    key: ComponentKey,
    root_dir: PathBuf,
    parent_xml: Option<PathBuf>,
    /// Child key → existing child document
    children: BTreeMap<ComponentKey, PathBuf>,
}

impl MergeTarget {
    fn new(parent_type: &MetadataType, incoming: &str, target: &SourceComponent) -> MetaformResult<Self> {
        let conflict = |message: String| MetaformError::MergeConflict {
            component: incoming.to_string(),
            message,
        };
        if target.type_().id != parent_type.id {
            return Err(conflict(format!(
                "merge target {} is a {}, not a {}",
                target.full_name(),
                target.type_().name,
                parent_type.name
            )));
        }
        let Some(root_dir) = target.content() else {
            return Err(conflict(format!(
                "merge target {} is not stored in decomposed form",
                target.full_name()
            )));
        };

        let mut children = BTreeMap::new();
        for child in target.get_children()? {
            if child.is_embedded() {
                continue;
            }
            if let Some(xml) = child.xml() {
                children.insert(child.key(), xml.to_path_buf());
            }
        }

        Ok(Self {
            key: target.key(),
            root_dir: root_dir.to_path_buf(),
            parent_xml: target.xml().map(Path::to_path_buf),
            children,
        })
    }
}

/// Child document path relative to the parent's directory
fn child_relative(parent_type: &MetadataType, child_type: &MetadataType, name: &str) -> PathBuf {
    let suffix = child_type.suffix.as_deref().unwrap_or(&child_type.id);
    let file = format!("{}.{}{}", name, suffix, META_XML_SUFFIX);
    match parent_type.decomposition() {
        DecompositionStrategy::FolderPerType => Path::new(&child_type.directory_name).join(file),
        DecompositionStrategy::TopLevel => PathBuf::from(file),
    }
}

/// Default source-format directory of a parent: `main/default/objects/Account`
fn default_root(parent_type: &MetadataType, full_name: &str) -> PathBuf {
    source_output(&Path::new(&parent_type.directory_name).join(full_name))
}

/// Standalone child document built from its element inside the parent
fn child_document(child_type: &MetadataType, attributes: &[(String, String)], element: &XmlElement) -> XmlElement {
    XmlElement {
        name: child_type.name.clone(),
        attributes: attributes.to_vec(),
        children: element.children.clone(),
    }
}

/// Addressable child type an element of the parent document stands for
fn addressable_child<'a>(parent_type: &'a MetadataType, element: &XmlElement) -> Option<&'a MetadataType> {
    parent_type
        .children
        .as_ref()?
        .types
        .values()
        .find(|t| t.element_name() == element.name && !t.unaddressable_without_parent)
        .map(|t| t.as_ref())
}

/// Context change made while converting one component
enum Placement {
    /// The child landed on an existing local file
    Claim(ComponentKey),
    /// The child waits for the merge set to be reconciled
    Defer(ComponentKey, DeferredWrite),
}

/// Apply a component's placements once all of it converted
fn commit(ctx: &mut ConvertContext, placements: Vec<Placement>) {
    for placement in placements {
        match placement {
            Placement::Claim(key) => ctx.claim(key),
            Placement::Defer(key, deferred) => ctx.defer(key, deferred),
        }
    }
}

impl DecomposedTransformer {
    /// Place one child document: onto an existing local file, parked for
    /// the end of the conversion, or at its default location
    fn place_child(
        component: &SourceComponent,
        target: Option<&MergeTarget>,
        key: ComponentKey,
        default_path: PathBuf,
        bytes: Vec<u8>,
        writes: &mut Vec<WriteInfo>,
        placements: &mut Vec<Placement>,
    ) {
        let ignore = component.ignore();
        match target {
            Some(target) => match target.children.get(&key) {
                Some(existing) => {
                    placements.push(Placement::Claim(key));
                    if ignore.denies(existing) {
                        debug!(output = %existing.display(), "merged output ignored");
                        return;
                    }
                    writes.push(WriteInfo::bytes(existing.clone(), bytes));
                }
                None => {
                    if ignore.denies(&default_path) {
                        debug!(output = %default_path.display(), "deferred output ignored");
                        return;
                    }
                    debug!(component = %key, "deferring fragment not present in merge target");
                    placements.push(Placement::Defer(
                        key,
                        DeferredWrite {
                            merge_target: target.key.clone(),
                            write: WriteInfo::bytes(default_path, bytes),
                        },
                    ));
                }
            },
            None => {
                if ignore.denies(&default_path) {
                    debug!(output = %default_path.display(), "decomposed output ignored");
                    return;
                }
                writes.push(WriteInfo::bytes(default_path, bytes));
            }
        }
    }

    fn child_to_source(
        &self,
        component: &SourceComponent,
        merge_with: Option<&SourceComponent>,
        placements: &mut Vec<Placement>,
    ) -> MetaformResult<Vec<WriteInfo>> {
        let Some(parent) = component.parent() else {
            return Ok(Vec::new());
        };
        let child_type = component.type_();
        let Some(element) = component.parse_xml()? else {
            return Ok(Vec::new());
        };
        let document = child_document(
            child_type,
            &XmlElement::metadata_root(child_type.name.as_str()).attributes,
            &element,
        );
        let bytes = document.to_document()?;
        let relative = child_relative(&parent.type_, child_type, component.name());
        let mut writes = Vec::new();

        match merge_with {
            Some(existing) if existing.type_().id == child_type.id => {
                let Some(xml) = existing.xml() else {
                    return Err(MetaformError::MergeConflict {
                        component: component.full_name().to_string(),
                        message: format!("merge target {} has no document", existing.full_name()),
                    });
                };
                placements.push(Placement::Claim(component.key()));
                if !component.ignore().denies(xml) {
                    writes.push(WriteInfo::bytes(xml.to_path_buf(), bytes));
                }
            }
            Some(existing) => {
                let target = MergeTarget::new(&parent.type_, component.full_name(), existing)?;
                let default_path = target.root_dir.join(&relative);
                Self::place_child(
                    component,
                    Some(&target),
                    component.key(),
                    default_path,
                    bytes,
                    &mut writes,
                    placements,
                );
            }
            None => {
                let default_path = default_root(&parent.type_, &parent.full_name).join(&relative);
                Self::place_child(component, None, component.key(), default_path, bytes, &mut writes, placements);
            }
        }
        Ok(writes)
    }

    fn parent_to_source(
        &self,
        component: &SourceComponent,
        merge_with: Option<&SourceComponent>,
        placements: &mut Vec<Placement>,
    ) -> MetaformResult<Vec<WriteInfo>> {
        let type_ = component.type_();
        let root = component
            .parse_xml()?
            .ok_or_else(|| MetaformError::MissingSourceFiles {
                component: component.full_name().to_string(),
                path: component.content().unwrap_or(Path::new("")).to_path_buf(),
            })?;

        let target = merge_with
            .map(|existing| MergeTarget::new(type_, component.full_name(), existing))
            .transpose()?;
        let root_dir = match &target {
            Some(target) => target.root_dir.clone(),
            None => default_root(type_, component.full_name()),
        };

        let mut writes = Vec::new();
        let mut parent_document = root.shallow_clone();
        for node in &root.children {
            let element = match node {
                XmlNode::Element(element) => element,
                XmlNode::Text(_) => {
                    parent_document.children.push(node.clone());
                    continue;
                }
            };
            let Some(child_type) = addressable_child(type_, element) else {
                parent_document.push(element.clone());
                continue;
            };
            let id_element = child_type.unique_id_element.as_deref().unwrap_or("fullName");
            let Some(name) = element.child_text(id_element) else {
                parent_document.push(element.clone());
                continue;
            };

            let document = child_document(child_type, &root.attributes, element);
            let key = ComponentKey::of(child_type, format!("{}.{}", component.full_name(), name));
            let default_path = root_dir.join(child_relative(type_, child_type, &name));
            Self::place_child(
                component,
                target.as_ref(),
                key,
                default_path,
                document.to_document()?,
                &mut writes,
                placements,
            );
        }

        // children already stored as their own files travel unchanged
        for child in component.get_children()? {
            if !child.is_embedded() {
                writes.extend(self.child_to_source(&child, merge_with, placements)?);
            }
        }

        let parent_output = match target.as_ref().and_then(|t| t.parent_xml.clone()) {
            Some(existing) => existing,
            None => {
                let suffix = type_.suffix.as_deref().unwrap_or(&type_.id);
                root_dir.join(format!("{}.{}{}", component.full_name(), suffix, META_XML_SUFFIX))
            }
        };
        if !component.ignore().denies(&parent_output) {
            writes.push(WriteInfo::bytes(parent_output, parent_document.to_document()?));
        }
        Ok(writes)
    }
}

impl Transformer for DecomposedTransformer {
    fn to_metadata_format(
        &self,
        component: &SourceComponent,
        ctx: &mut ConvertContext,
    ) -> MetaformResult<Vec<WriteInfo>> {
        if let Some(parent) = component.parent_component() {
            let state = ctx.recomposition_for(&parent);
            if state.emitted {
                return Ok(Vec::new());
            }
            state.children.add(component.clone());
            if !state.is_complete() {
                return Ok(Vec::new());
            }
            state.emitted = true;
            return Ok(compose(state)?.into_iter().collect());
        }

        let children = component.get_children()?;
        let state = ctx.recomposition_for(component);
        if state.emitted {
            return Ok(Vec::new());
        }
        state.parent = component.clone();
        state.parent_seen = true;
        state.expected_children = Some(children.len());
        state.children.extend(children);
        if !state.is_complete() {
            return Ok(Vec::new());
        }
        state.emitted = true;
        Ok(compose(state)?.into_iter().collect())
    }

    fn to_source_format(
        &self,
        component: &SourceComponent,
        merge_with: Option<&SourceComponent>,
        ctx: &mut ConvertContext,
    ) -> MetaformResult<Vec<WriteInfo>> {
        let mut placements = Vec::new();
        let writes = if component.parent().is_some() {
            self.child_to_source(component, merge_with, &mut placements)?
        } else {
            self.parent_to_source(component, merge_with, &mut placements)?
        };
        commit(ctx, placements);
        Ok(writes)
    }
}
