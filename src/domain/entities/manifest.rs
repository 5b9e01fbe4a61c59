//! Package manifest (`package.xml`)

use std::collections::{BTreeMap, BTreeSet};

use super::component::SourceComponent;
use crate::domain::services::xml::XmlElement;
use crate::error::MetaformResult;

pub const MANIFEST_FILE: &str = "package.xml";
pub const DEFAULT_API_VERSION: &str = "62.0";

/// Type name → member names, plus the API version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    types: BTreeMap<String, BTreeSet<String>>,
    version: String,
}

impl Default for Manifest {
    fn default() -> Self {
        Self::new(DEFAULT_API_VERSION)
    }
}

impl Manifest {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            types: BTreeMap::new(),
            version: version.into(),
        }
    }

    /// Manifest listing every addressable component
    pub fn from_components<'a>(
        components: impl IntoIterator<Item = &'a SourceComponent>,
        version: impl Into<String>,
    ) -> Self {
        let mut manifest = Self::new(version);
        for component in components {
            let ty = component.type_();
            if ty.is_addressable && !ty.unaddressable_without_parent {
                manifest.add(&ty.name, component.full_name());
            }
        }
        manifest
    }

    pub fn add(&mut self, type_name: &str, member: &str) {
        self.types
            .entry(type_name.to_string())
            .or_default()
            .insert(member.to_string());
    }

    pub fn members(&self, type_name: &str) -> Option<&BTreeSet<String>> {
        self.types.get(type_name)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn to_xml(&self) -> MetaformResult<Vec<u8>> {
        let mut package = XmlElement::metadata_root("Package");
        for (name, members) in &self.types {
            let mut entry = XmlElement::new("types");
            for member in members {
                entry.push(XmlElement::with_text("members", member.as_str()));
            }
            entry.push(XmlElement::with_text("name", name.as_str()));
            package.push(entry);
        }
        package.push(XmlElement::with_text("version", self.version.as_str()));
        package.to_document()
    }
}
