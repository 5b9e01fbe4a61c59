//! Transformers
//!
//! These implement the Transformer port, one per strategy tag. Shared here:
//! package-relative path rewriting, recomposition of a parent document and
//! the end-of-conversion flush of everything parked in the context.

mod decomposed;
mod default;
mod non_decomposed;

pub use decomposed::DecomposedTransformer;
pub use default::DefaultTransformer;
pub use non_decomposed::NonDecomposedTransformer;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::entities::{
    ConvertContext, MetadataType, RecompositionState, SourceComponent, TransformerKind, WriteInfo,
};
use crate::domain::ports::Transformer;
use crate::domain::services::xml::XmlElement;
use crate::domain::value_objects::source_path::trim_until;
use crate::domain::value_objects::DEFAULT_PACKAGE_ROOT;
use crate::error::MetaformResult;

static DEFAULT: DefaultTransformer = DefaultTransformer;
static DECOMPOSED: DecomposedTransformer = DecomposedTransformer;
static NON_DECOMPOSED: NonDecomposedTransformer = NonDecomposedTransformer;

/// Transformer for a strategy tag
pub fn transformer_for(kind: TransformerKind) -> &'static dyn Transformer {
    match kind {
        TransformerKind::Default => &DEFAULT,
        TransformerKind::Decomposed => &DECOMPOSED,
        TransformerKind::NonDecomposed => &NON_DECOMPOSED,
    }
}

/// Path of `file` relative to the package root, starting at the type directory
///
/// Components resolved outside a type directory are placed under it,
/// keeping whatever lies below `anchor`.
pub(crate) fn package_relative(type_: &MetadataType, file: &Path, anchor: &Path) -> PathBuf {
    if let Some(trimmed) = trim_until(file, &type_.directory_name) {
        return trimmed;
    }
    let below = file.strip_prefix(anchor).unwrap_or(file);
    Path::new(&type_.directory_name).join(below)
}

/// Directory a component's files are made relative to when no type
/// directory appears in their paths
pub(crate) fn anchor_of(component: &SourceComponent) -> PathBuf {
    let base = component
        .content()
        .or(component.xml())
        .and_then(Path::parent)
        .unwrap_or(Path::new(""));
    if component.type_().in_folder {
        base.parent().unwrap_or(Path::new("")).to_path_buf()
    } else {
        base.to_path_buf()
    }
}

/// Prefix a package-relative path with the source-format package root
pub(crate) fn source_output(relative: &Path) -> PathBuf {
    Path::new(DEFAULT_PACKAGE_ROOT).join(relative)
}

/// Metadata-format document path of a composed parent: `objects/Account.object`
pub(crate) fn composed_output(type_: &MetadataType, full_name: &str) -> PathBuf {
    let file = match &type_.suffix {
        Some(suffix) => format!("{}.{}", full_name, suffix),
        None => full_name.to_string(),
    };
    Path::new(&type_.directory_name).join(file)
}

/// Element of a child document as it appears inside its parent
pub(crate) fn as_child_element(child_type: &MetadataType, document: XmlElement) -> XmlElement {
    XmlElement {
        name: child_type.element_name().to_string(),
        attributes: Vec::new(),
        children: document.children,
    }
}

/// Collected children sharing one element name in the composed document
struct ChildGroup {
    id_element: String,
    children: Vec<(String, XmlElement)>,
}

impl ChildGroup {
    /// Whether `element` is an older copy of a collected child
    fn replaces(&self, element: &XmlElement) -> bool {
        element
            .child_text(&self.id_element)
            .is_some_and(|id| self.children.iter().any(|(name, _)| *name == id))
    }
}

/// Build the parent document for a recomposition entry
///
/// Elements of the parent's document that carry the id of a collected child
/// are replaced by that child; everything else is kept in place. Collected
/// children are appended grouped by element name, groups and members both in
/// alphabetical order.
pub(crate) fn compose(state: &RecompositionState) -> MetaformResult<Option<WriteInfo>> {
    let parent = &state.parent;
    let type_ = parent.type_();
    let output = composed_output(type_, parent.full_name());
    if parent.ignore().denies(&output) {
        debug!(output = %output.display(), "composed output ignored");
        return Ok(None);
    }

    let mut root = match parent.parse_xml()? {
        Some(root) => root,
        None => XmlElement::metadata_root(type_.name.as_str()),
    };

    let mut groups: BTreeMap<String, ChildGroup> = BTreeMap::new();
    for child in state.children.values() {
        let child_type = child.type_();
        let Some(document) = child.parse_xml()? else {
            continue;
        };
        groups
            .entry(child_type.element_name().to_string())
            .or_insert_with(|| ChildGroup {
                id_element: child_type
                    .unique_id_element
                    .clone()
                    .unwrap_or_else(|| "fullName".to_string()),
                children: Vec::new(),
            })
            .children
            .push((child.name().to_string(), as_child_element(child_type, document)));
    }

    root.retain_elements(|element| {
        groups
            .get(&element.name)
            .map_or(true, |group| !group.replaces(element))
    });

    for group in groups.into_values() {
        let mut children = group.children;
        children.sort_by(|a, b| a.0.cmp(&b.0));
        for (_, element) in children {
            root.push(element);
        }
    }

    Ok(Some(WriteInfo::bytes(output, root.to_document()?)))
}

/// Flush everything still parked in the context
///
/// Pending recompositions become composed documents, deferred fragments
/// are written where they were parked, merged documents are serialized.
pub fn finalize(ctx: &mut ConvertContext) -> MetaformResult<Vec<WriteInfo>> {
    let mut writes = Vec::new();

    for state in std::mem::take(&mut ctx.recomposition).into_values() {
        if state.emitted {
            continue;
        }
        writes.extend(compose(&state)?);
    }

    for (key, deferred) in std::mem::take(&mut ctx.decomposition) {
        if ctx.claimed.contains(&key) {
            continue;
        }
        debug!(component = %key, target = %deferred.merge_target, "writing deferred fragment");
        writes.push(deferred.write);
    }

    for (destination, document) in std::mem::take(&mut ctx.merged_documents) {
        writes.push(WriteInfo::bytes(destination, document.root.to_document()?));
    }

    Ok(writes)
}
