//! Per-conversion transaction state
//!
//! Owned by a single `convert` call and threaded through every transformer
//! invocation. Holds what cannot be written yet: children waiting for their
//! siblings, fragments waiting for the merge set to be reconciled, and
//! merged documents collecting entries from several components.

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use super::component::SourceComponent;
use super::component_set::ComponentSet;
use super::write_info::WriteInfo;
use crate::domain::services::xml::XmlElement;
use crate::domain::value_objects::ComponentKey;

/// Children of one parent collected for recomposition
#[derive(Debug, Clone)]
pub struct RecompositionState {
    /// The parent, as converted or rebuilt from a child's back-reference
    pub parent: SourceComponent,
    /// The parent itself passed through the transformer
    pub parent_seen: bool,
    /// The composed document was already emitted
    pub emitted: bool,
    pub children: ComponentSet,
    /// Children the parent's source tree holds, when known
    pub expected_children: Option<usize>,
}

impl RecompositionState {
    pub fn new(parent: SourceComponent) -> Self {
        Self {
            parent,
            parent_seen: false,
            emitted: false,
            children: ComponentSet::new(),
            expected_children: None,
        }
    }

    /// Parent seen and every expected child contributed
    pub fn is_complete(&self) -> bool {
        self.parent_seen
            && self
                .expected_children
                .is_some_and(|expected| self.children.len() >= expected)
    }
}

/// A decomposed fragment whose owner is decided at the end of the conversion
#[derive(Debug, Clone)]
pub struct DeferredWrite {
    /// Merge target the fragment would land under by default
    pub merge_target: ComponentKey,
    pub write: WriteInfo,
}

/// A local document entries are merged into
#[derive(Debug, Clone)]
pub struct MergedDocument {
    /// Existing root (or a fresh one) with merged entries applied
    pub root: XmlElement,
}

#[derive(Debug, Default)]
pub struct ConvertContext {
    /// Parent key → children collected toward one composed document
    pub recomposition: BTreeMap<ComponentKey, RecompositionState>,
    /// Child key → fragment not found in its merge target
    pub decomposition: BTreeMap<ComponentKey, DeferredWrite>,
    /// Child keys written onto an existing local file
    pub claimed: BTreeSet<ComponentKey>,
    /// Destination → merged document written at finalization
    pub merged_documents: BTreeMap<PathBuf, MergedDocument>,
}

impl ConvertContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recomposition entry for `parent`, created on first use
    pub fn recomposition_for(&mut self, parent: &SourceComponent) -> &mut RecompositionState {
        self.recomposition
            .entry(parent.key())
            .or_insert_with(|| RecompositionState::new(parent.clone()))
    }

    /// Record that a child landed on an existing local file
    pub fn claim(&mut self, key: ComponentKey) {
        self.decomposition.remove(&key);
        self.claimed.insert(key);
    }

    /// Park a fragment unless another merge target already owns it
    pub fn defer(&mut self, key: ComponentKey, deferred: DeferredWrite) {
        if !self.claimed.contains(&key) {
            self.decomposition.entry(key).or_insert(deferred);
        }
    }

    /// Whether anything still waits for finalization
    pub fn has_pending(&self) -> bool {
        self.recomposition.values().any(|state| !state.emitted)
            || !self.decomposition.is_empty()
            || !self.merged_documents.is_empty()
    }
}
