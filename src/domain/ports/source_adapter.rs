//! SourceAdapter port
//!
//! One resolution strategy per type family. An adapter turns a single tree
//! path into the component it belongs to; adapters may be redundant (two
//! paths resolving to the same component), collapsing is the caller's job.

use std::path::Path;
use std::sync::Arc;

use crate::domain::entities::{MetadataRegistry, MetadataType, SourceComponent};
use crate::domain::ports::{IgnoreFilter, TreeContainer};
use crate::error::MetaformResult;

/// Everything an adapter may consult while resolving one path
#[derive(Clone, Copy)]
pub struct AdapterContext<'a> {
    pub tree: &'a Arc<dyn TreeContainer>,
    pub registry: &'a MetadataRegistry,
    pub ignore: &'a Arc<dyn IgnoreFilter>,
}

impl<'a> AdapterContext<'a> {
    pub fn new(
        tree: &'a Arc<dyn TreeContainer>,
        registry: &'a MetadataRegistry,
        ignore: &'a Arc<dyn IgnoreFilter>,
    ) -> Self {
        Self {
            tree,
            registry,
            ignore,
        }
    }

    /// Start a component of `type_` bound to this context's tree and filter
    pub fn component(&self, type_: Arc<MetadataType>, full_name: String) -> SourceComponent {
        SourceComponent::new(type_, full_name, self.tree.clone(), self.ignore.clone())
    }
}

pub trait SourceAdapter: Send + Sync {
    /// Resolve the component `path` belongs to
    ///
    /// `type_` is the type inferred for the path. Returns `None` when the
    /// path is ignored or names nothing resolvable by this strategy.
    fn get_component(
        &self,
        path: &Path,
        type_: &Arc<MetadataType>,
        ctx: &AdapterContext<'_>,
    ) -> MetaformResult<Option<SourceComponent>>;

    /// Child components of a resolved parent
    fn get_children(&self, _component: &SourceComponent) -> MetaformResult<Vec<SourceComponent>> {
        Ok(Vec::new())
    }
}
