//! SourceComponent entity
//!
//! A resolved, typed metadata element. Components are built by source
//! adapters and never mutated afterwards; a child refers to its parent by
//! identity (`ParentRef`), never by owning it.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::metadata_type::MetadataType;
use crate::domain::ports::{IgnoreFilter, TreeContainer};
use crate::domain::services::xml::{parse_document, XmlElement};
use crate::domain::value_objects::source_path::is_metadata_xml;
use crate::domain::value_objects::ComponentKey;
use crate::error::MetaformResult;

/// Non-owning reference from a child to its parent
///
/// Carries enough to rebuild the parent component against the child's tree.
#[derive(Debug, Clone)]
pub struct ParentRef {
    pub type_: Arc<MetadataType>,
    pub full_name: String,
    pub xml: Option<PathBuf>,
    pub content: Option<PathBuf>,
}

impl ParentRef {
    pub fn key(&self) -> ComponentKey {
        ComponentKey::of(&self.type_, self.full_name.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct SourceComponent {
    full_name: String,
    type_: Arc<MetadataType>,
    xml: Option<PathBuf>,
    content: Option<PathBuf>,
    parent: Option<ParentRef>,
    tree: Arc<dyn TreeContainer>,
    ignore: Arc<dyn IgnoreFilter>,
}

impl SourceComponent {
    pub fn new(
        type_: Arc<MetadataType>,
        full_name: impl Into<String>,
        tree: Arc<dyn TreeContainer>,
        ignore: Arc<dyn IgnoreFilter>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            type_,
            xml: None,
            content: None,
            parent: None,
            tree,
            ignore,
        }
    }

    pub fn with_xml(mut self, xml: Option<PathBuf>) -> Self {
        self.xml = xml;
        self
    }

    pub fn with_content(mut self, content: Option<PathBuf>) -> Self {
        self.content = content;
        self
    }

    /// Attach to `parent`; the full name becomes `parent.name`
    pub fn with_parent(mut self, parent: &SourceComponent, name: &str) -> Self {
        self.full_name = format!("{}.{}", parent.full_name, name);
        self.parent = Some(ParentRef {
            type_: parent.type_.clone(),
            full_name: parent.full_name.clone(),
            xml: parent.xml.clone(),
            content: parent.content.clone(),
        });
        self
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn type_(&self) -> &Arc<MetadataType> {
        &self.type_
    }

    pub fn xml(&self) -> Option<&Path> {
        self.xml.as_deref()
    }

    pub fn content(&self) -> Option<&Path> {
        self.content.as_deref()
    }

    pub fn parent(&self) -> Option<&ParentRef> {
        self.parent.as_ref()
    }

    pub fn tree(&self) -> &Arc<dyn TreeContainer> {
        &self.tree
    }

    pub fn ignore(&self) -> &Arc<dyn IgnoreFilter> {
        &self.ignore
    }

    pub fn key(&self) -> ComponentKey {
        ComponentKey::of(&self.type_, self.full_name.as_str())
    }

    /// Name without the parent prefix
    pub fn name(&self) -> &str {
        match &self.parent {
            Some(parent) => self
                .full_name
                .strip_prefix(parent.full_name.as_str())
                .and_then(|rest| rest.strip_prefix('.'))
                .unwrap_or(&self.full_name),
            None => &self.full_name,
        }
    }

    /// Whether this child is stored inside its parent's document
    pub fn is_embedded(&self) -> bool {
        match (&self.parent, &self.xml) {
            (Some(parent), Some(xml)) => parent.xml.as_ref() == Some(xml),
            _ => false,
        }
    }

    /// Rebuild the parent component from the back-reference
    pub fn parent_component(&self) -> Option<SourceComponent> {
        self.parent.as_ref().map(|parent| SourceComponent {
            full_name: parent.full_name.clone(),
            type_: parent.type_.clone(),
            xml: parent.xml.clone(),
            content: parent.content.clone(),
            parent: None,
            tree: self.tree.clone(),
            ignore: self.ignore.clone(),
        })
    }

    /// Payload files of the component, excluding its xml and ignored paths
    pub fn walk_content(&self) -> MetaformResult<Vec<PathBuf>> {
        let Some(content) = &self.content else {
            return Ok(Vec::new());
        };
        if !self.tree.is_directory(content) {
            if self.ignore.denies(content) {
                return Ok(Vec::new());
            }
            return Ok(vec![content.clone()]);
        }
        if self.ignore.denies_dir(content) {
            return Ok(Vec::new());
        }

        let has_children = self.type_.has_children();
        let files = self.tree.walk(content)?;
        Ok(files
            .into_iter()
            .filter(|path| Some(path) != self.xml.as_ref())
            .filter(|path| !(has_children && is_metadata_xml(path)))
            .filter(|path| !self.ignore.denies(path))
            .collect())
    }

    /// Child components, as the type's source adapter finds them
    pub fn get_children(&self) -> MetaformResult<Vec<SourceComponent>> {
        if !self.type_.has_children() {
            return Ok(Vec::new());
        }
        crate::infrastructure::adapters::adapter_for(self.type_.adapter()).get_children(self)
    }

    /// Parse the component's metadata document
    ///
    /// For a child stored inside its parent's document this is the child's
    /// element, located by its unique id.
    pub fn parse_xml(&self) -> MetaformResult<Option<XmlElement>> {
        let Some(xml) = &self.xml else {
            return Ok(None);
        };
        let root = parse_document(&self.tree.read_file(xml)?, xml)?;
        if self.is_embedded() {
            return Ok(self.find_embedded(&root).cloned());
        }
        Ok(Some(root))
    }

    fn find_embedded<'a>(&self, root: &'a XmlElement) -> Option<&'a XmlElement> {
        let id_element = self.type_.unique_id_element.as_deref().unwrap_or("fullName");
        let name = self.name();
        root.children_named(self.type_.element_name())
            .find(|element| element.child_text(id_element).as_deref() == Some(name))
    }
}
