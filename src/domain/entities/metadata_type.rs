//! MetadataType entity - one entry of the type registry
//!
//! Types are loaded once from registry data and shared as `Arc<MetadataType>`
//! by every component resolved against them. Nothing mutates a type after load.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::Deserialize;

/// Source adapter strategy for a type family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AdapterKind {
    /// The metadata xml is the whole component
    #[default]
    Default,
    /// `Foo.cls` + `Foo.cls-meta.xml`
    MatchingContentFile,
    /// Content is a file or directory sitting next to the xml
    MixedContent,
    /// Content is a directory named after the component, xml inside it
    Bundle,
    /// Children live in their own files under the component directory
    Decomposed,
    /// Children are elements inside the single parent document
    NonDecomposed,
}

impl AdapterKind {
    /// Whether the component owns a directory named after itself
    pub fn owns_folder(self) -> bool {
        matches!(self, AdapterKind::Bundle | AdapterKind::Decomposed)
    }

    /// Whether a directory of this type can itself be a component root
    pub fn resolves_directories(self) -> bool {
        matches!(
            self,
            AdapterKind::Bundle | AdapterKind::Decomposed | AdapterKind::MixedContent
        )
    }
}

/// Transformer strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransformerKind {
    #[default]
    Default,
    Decomposed,
    NonDecomposed,
}

/// Where decomposed children are written relative to the parent directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DecompositionStrategy {
    /// `Account/fields/Name.field-meta.xml`
    #[default]
    FolderPerType,
    /// `Account/Name.fieldTranslation-meta.xml`
    TopLevel,
}

/// Strategy tags attached to a type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Strategies {
    #[serde(default)]
    pub adapter: AdapterKind,
    #[serde(default)]
    pub transformer: TransformerKind,
    #[serde(default)]
    pub decomposition: Option<DecompositionStrategy>,
}

/// Index of a parent type's child types
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ChildrenIndex {
    /// Child types by id
    pub types: BTreeMap<String, Arc<MetadataType>>,
    /// Child suffix → child type id
    #[serde(default)]
    pub suffixes: BTreeMap<String, String>,
    /// Child directory name → child type id
    #[serde(default)]
    pub directories: BTreeMap<String, String>,
}

impl ChildrenIndex {
    /// Child type registered for a file suffix
    pub fn type_by_suffix(&self, suffix: &str) -> Option<&Arc<MetadataType>> {
        self.suffixes.get(suffix).and_then(|id| self.types.get(id))
    }

    /// Child type registered for a directory name
    pub fn type_by_directory(&self, directory: &str) -> Option<&Arc<MetadataType>> {
        self.directories.get(directory).and_then(|id| self.types.get(id))
    }
}

/// A registered metadata type
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataType {
    /// Lowercase identifier, unique in the registry
    pub id: String,
    /// API name (`CustomObject`)
    pub name: String,
    /// Directory holding components of this type (`objects`)
    pub directory_name: String,
    /// File suffix without the dot (`object`)
    #[serde(default)]
    pub suffix: Option<String>,
    /// Older suffix accepted on input and rewritten on output
    #[serde(default)]
    pub legacy_suffix: Option<String>,
    /// Components live one folder level below the type directory
    #[serde(default)]
    pub in_folder: bool,
    /// The type can only be inferred from its directory name
    #[serde(default)]
    pub strict_directory_name: bool,
    /// Id of the folder type holding in-folder components
    #[serde(default)]
    pub folder_type: Option<String>,
    /// Id of the in-folder type this folder type contains
    #[serde(default)]
    pub folder_content_type: Option<String>,
    /// Element name used inside the parent document (`fields`)
    #[serde(default)]
    pub xml_element_name: Option<String>,
    /// Element holding a child's name inside the parent document (`fullName`)
    #[serde(default)]
    pub unique_id_element: Option<String>,
    /// Child kept inside the parent document when decomposing
    #[serde(default)]
    pub unaddressable_without_parent: bool,
    #[serde(default = "default_true")]
    pub is_addressable: bool,
    #[serde(default)]
    pub children: Option<ChildrenIndex>,
    #[serde(default)]
    pub strategies: Strategies,
}

fn default_true() -> bool {
    true
}

impl MetadataType {
    pub fn adapter(&self) -> AdapterKind {
        self.strategies.adapter
    }

    pub fn transformer(&self) -> TransformerKind {
        self.strategies.transformer
    }

    pub fn decomposition(&self) -> DecompositionStrategy {
        self.strategies.decomposition.unwrap_or_default()
    }

    /// Whether `suffix` names this type, directly or through the legacy suffix
    pub fn matches_suffix(&self, suffix: &str) -> bool {
        self.suffix.as_deref() == Some(suffix) || self.legacy_suffix.as_deref() == Some(suffix)
    }

    /// Whether this type has a children index
    pub fn has_children(&self) -> bool {
        self.children.as_ref().is_some_and(|c| !c.types.is_empty())
    }

    /// Element name used for this type when nested in a parent document
    pub fn element_name(&self) -> &str {
        self.xml_element_name.as_deref().unwrap_or(&self.name)
    }

    /// Child type for a suffix, when this type has children
    pub fn child_by_suffix(&self, suffix: &str) -> Option<&Arc<MetadataType>> {
        self.children.as_ref().and_then(|c| c.type_by_suffix(suffix))
    }
}

impl fmt::Display for MetadataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
