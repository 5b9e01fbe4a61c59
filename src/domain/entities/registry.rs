//! Registry entity
//!
//! The static catalog of metadata types. Built once from registry data and
//! then only read: lookups by name, suffix and directory drive every
//! resolution decision.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use serde::Deserialize;

use super::metadata_type::MetadataType;
use crate::error::{MetaformError, MetaformResult};

/// Raw registry document, as stored in JSON
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryData {
    pub types: BTreeMap<String, Arc<MetadataType>>,
    /// Suffix → type id. May point at child types and bundle content suffixes.
    #[serde(default)]
    pub suffixes: BTreeMap<String, String>,
    /// Directory name → type id for types only inferable from their directory
    #[serde(default)]
    pub strict_directory_names: BTreeMap<String, String>,
    /// Child type id → parent type id
    #[serde(default)]
    pub child_types: BTreeMap<String, String>,
}

/// Read-only access to the registered metadata types
#[derive(Debug, Clone, Default)]
pub struct MetadataRegistry {
    types: HashMap<String, Arc<MetadataType>>,
    names: HashMap<String, String>,
    suffixes: HashMap<String, String>,
    directories: HashMap<String, String>,
    strict_directories: HashMap<String, String>,
    child_types: HashMap<String, String>,
}

impl MetadataRegistry {
    /// Build and validate a registry from its raw data
    pub fn from_data(data: RegistryData) -> MetaformResult<Self> {
        let mut registry = MetadataRegistry::default();

        for (id, ty) in &data.types {
            if *id != ty.id {
                return Err(registry_error(format!(
                    "type key '{}' does not match its id '{}'",
                    id, ty.id
                )));
            }
            validate_children(ty)?;
            registry.insert(ty.clone(), true);
        }

        for (suffix, id) in data.suffixes {
            if !registry.types.contains_key(&id) {
                return Err(registry_error(format!(
                    "suffix '{}' points at unknown type '{}'",
                    suffix, id
                )));
            }
            registry.suffixes.insert(suffix, id);
        }

        for (dir, id) in data.strict_directory_names {
            if !registry.types.contains_key(&id) {
                return Err(registry_error(format!(
                    "strict directory '{}' points at unknown type '{}'",
                    dir, id
                )));
            }
            registry.strict_directories.insert(dir, id);
        }

        for (child, parent) in data.child_types {
            if !registry.types.contains_key(&child) || !registry.types.contains_key(&parent) {
                return Err(registry_error(format!(
                    "child mapping '{}' -> '{}' references an unknown type",
                    child, parent
                )));
            }
            registry.child_types.insert(child, parent);
        }

        Ok(registry)
    }

    fn insert(&mut self, ty: Arc<MetadataType>, top_level: bool) {
        self.names.insert(ty.name.to_lowercase(), ty.id.clone());
        if let Some(suffix) = &ty.suffix {
            self.suffixes
                .entry(suffix.clone())
                .or_insert_with(|| ty.id.clone());
        }
        if let Some(legacy) = &ty.legacy_suffix {
            self.suffixes
                .entry(legacy.clone())
                .or_insert_with(|| ty.id.clone());
        }
        // Folder types share their directory with the content type; the
        // content type owns the directory lookup.
        if top_level && ty.folder_content_type.is_none() {
            self.directories
                .insert(ty.directory_name.clone(), ty.id.clone());
        }
        if let Some(children) = &ty.children {
            for child in children.types.values() {
                self.child_types.insert(child.id.clone(), ty.id.clone());
                self.insert(child.clone(), false);
            }
        }
        self.types.insert(ty.id.clone(), ty);
    }

    /// Look up a type by API name or id (case-insensitive)
    pub fn type_by_name(&self, name: &str) -> MetaformResult<Arc<MetadataType>> {
        let lower = name.to_lowercase();
        self.types
            .get(&lower)
            .or_else(|| self.names.get(&lower).and_then(|id| self.types.get(id)))
            .cloned()
            .ok_or_else(|| MetaformError::UnknownType {
                name: name.to_string(),
            })
    }

    pub fn type_by_id(&self, id: &str) -> Option<Arc<MetadataType>> {
        self.types.get(id).cloned()
    }

    pub fn type_by_suffix(&self, suffix: &str) -> Option<Arc<MetadataType>> {
        self.suffixes
            .get(suffix)
            .and_then(|id| self.types.get(id))
            .cloned()
    }

    /// Top-level type whose components live in `directory`
    pub fn type_by_directory_name(&self, directory: &str) -> Option<Arc<MetadataType>> {
        self.directories
            .get(directory)
            .and_then(|id| self.types.get(id))
            .cloned()
    }

    /// Type that can only be inferred through this directory name
    pub fn strict_directory_type(&self, directory: &str) -> Option<Arc<MetadataType>> {
        self.strict_directories
            .get(directory)
            .and_then(|id| self.types.get(id))
            .cloned()
    }

    /// Parent of a child type
    pub fn parent_type(&self, child: &MetadataType) -> Option<Arc<MetadataType>> {
        self.child_types
            .get(&child.id)
            .and_then(|id| self.types.get(id))
            .cloned()
    }

    /// Folder type holding components of an in-folder type
    pub fn folder_type_of(&self, ty: &MetadataType) -> Option<Arc<MetadataType>> {
        ty.folder_type.as_deref().and_then(|id| self.type_by_id(id))
    }

    /// All registered types, children included
    pub fn types(&self) -> impl Iterator<Item = &Arc<MetadataType>> {
        self.types.values()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

fn validate_children(ty: &MetadataType) -> MetaformResult<()> {
    let Some(children) = &ty.children else {
        return Ok(());
    };
    let mut seen = HashSet::new();
    for child in children.types.values() {
        if let Some(suffix) = &child.suffix {
            if !seen.insert(suffix.as_str()) {
                return Err(registry_error(format!(
                    "child suffix '{}' is used twice under {}",
                    suffix, ty.name
                )));
            }
        }
    }
    for (suffix, id) in &children.suffixes {
        if !children.types.contains_key(id) {
            return Err(registry_error(format!(
                "{} maps child suffix '{}' to unknown child '{}'",
                ty.name, suffix, id
            )));
        }
    }
    Ok(())
}

fn registry_error(message: String) -> MetaformError {
    MetaformError::Registry { message }
}
