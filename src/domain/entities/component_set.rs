//! ComponentSet and ComponentFilter
//!
//! A set of components keyed by identity. Adding a component whose key is
//! already present keeps the first one: the same logical element is often
//! rediscovered from a second path during resolution.

use std::collections::{BTreeMap, BTreeSet};

use super::component::SourceComponent;
use super::registry::MetadataRegistry;
use crate::domain::value_objects::ComponentKey;
use crate::error::MetaformResult;

#[derive(Debug, Clone, Default)]
pub struct ComponentSet {
    components: BTreeMap<ComponentKey, SourceComponent>,
}

impl ComponentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a component; returns false when its key was already present
    pub fn add(&mut self, component: SourceComponent) -> bool {
        let key = component.key();
        if self.components.contains_key(&key) {
            return false;
        }
        self.components.insert(key, component);
        true
    }

    pub fn has(&self, key: &ComponentKey) -> bool {
        self.components.contains_key(key)
    }

    pub fn get(&self, key: &ComponentKey) -> Option<&SourceComponent> {
        self.components.get(key)
    }

    /// Components ordered by key
    pub fn values(&self) -> impl Iterator<Item = &SourceComponent> {
        self.components.values()
    }

    pub fn keys(&self) -> impl Iterator<Item = &ComponentKey> {
        self.components.keys()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl Extend<SourceComponent> for ComponentSet {
    fn extend<I: IntoIterator<Item = SourceComponent>>(&mut self, iter: I) {
        for component in iter {
            self.add(component);
        }
    }
}

impl FromIterator<SourceComponent> for ComponentSet {
    fn from_iter<I: IntoIterator<Item = SourceComponent>>(iter: I) -> Self {
        let mut set = ComponentSet::new();
        set.extend(iter);
        set
    }
}

impl IntoIterator for ComponentSet {
    type Item = SourceComponent;
    type IntoIter = std::collections::btree_map::IntoValues<ComponentKey, SourceComponent>;

    fn into_iter(self) -> Self::IntoIter {
        self.components.into_values()
    }
}

impl<'a> IntoIterator for &'a ComponentSet {
    type Item = &'a SourceComponent;
    type IntoIter = std::collections::btree_map::Values<'a, ComponentKey, SourceComponent>;

    fn into_iter(self) -> Self::IntoIter {
        self.components.values()
    }
}

/// Allow-list of component keys used to narrow a resolve
///
/// A `*` member admits every component of its type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentFilter {
    keys: BTreeSet<ComponentKey>,
}

impl ComponentFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_set(set: &ComponentSet) -> Self {
        Self {
            keys: set.keys().cloned().collect(),
        }
    }

    /// Build from `(type name, member)` pairs; type names go through the registry
    pub fn from_members<'a>(
        registry: &MetadataRegistry,
        members: impl IntoIterator<Item = (&'a str, &'a str)>,
    ) -> MetaformResult<Self> {
        let mut filter = Self::new();
        for (type_name, member) in members {
            let ty = registry.type_by_name(type_name)?;
            filter.insert(ComponentKey::of(&ty, member));
        }
        Ok(filter)
    }

    pub fn insert(&mut self, key: ComponentKey) {
        self.keys.insert(key);
    }

    pub fn matches(&self, key: &ComponentKey) -> bool {
        self.keys.contains(key) || self.keys.contains(&ComponentKey::wildcard(key.type_id()))
    }

    /// Whether any entry names a component of `type_id`
    pub fn has_type(&self, type_id: &str) -> bool {
        self.keys.iter().any(|key| key.type_id() == type_id)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
