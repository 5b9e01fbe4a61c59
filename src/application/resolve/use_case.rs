//! Metadata Resolver
//!
//! Depth-first walk over a tree. Directories are visited before files at
//! the same level, and a directory that is itself a component root is not
//! walked further: its members come from the component, not from the walk.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use super::inference::TypeInference;
use crate::domain::entities::{AdapterKind, ComponentFilter, ComponentSet, MetadataRegistry, SourceComponent};
use crate::domain::ports::{AcceptAll, AdapterContext, IgnoreFilter, TreeContainer};
use crate::domain::value_objects::source_path::is_package_manifest;
use crate::error::{MetaformError, MetaformResult};
use crate::infrastructure::adapters::adapter_for;

pub struct MetadataResolver {
    registry: Arc<MetadataRegistry>,
    tree: Arc<dyn TreeContainer>,
    ignore: Arc<dyn IgnoreFilter>,
}

impl MetadataResolver {
    pub fn new(registry: Arc<MetadataRegistry>, tree: Arc<dyn TreeContainer>) -> Self {
        Self {
            registry,
            tree,
            ignore: Arc::new(AcceptAll),
        }
    }

    pub fn with_ignore(mut self, ignore: Arc<dyn IgnoreFilter>) -> Self {
        self.ignore = ignore;
        self
    }

    pub fn tree(&self) -> &Arc<dyn TreeContainer> {
        &self.tree
    }

    pub fn registry(&self) -> &Arc<MetadataRegistry> {
        &self.registry
    }

    /// Resolve every component under `path`
    ///
    /// With a filter only matching components are kept; a parent that does
    /// not match contributes its matching children instead.
    pub fn resolve(&self, path: &Path, filter: Option<&ComponentFilter>) -> MetaformResult<ComponentSet> {
        if !self.tree.exists(path) {
            return Err(MetaformError::PathNotFound {
                path: path.to_path_buf(),
            });
        }

        let ctx = AdapterContext::new(&self.tree, &self.registry, &self.ignore);
        let mut found = ComponentSet::new();
        if self.tree.is_directory(path) {
            self.resolve_directory(path, &ctx, &mut found)?;
        } else if let Some(component) = self.resolve_file(path, &ctx)? {
            found.add(component);
        }

        let found = drop_covered_children(found);
        let mut set = ComponentSet::new();
        for component in found {
            self.admit(component, filter, &mut set)?;
        }
        debug!(path = %path.display(), components = set.len(), "resolved");
        Ok(set)
    }

    /// Resolve several roots into one set; the first discovery of a component wins
    pub fn resolve_all(
        &self,
        paths: &[PathBuf],
        filter: Option<&ComponentFilter>,
    ) -> MetaformResult<ComponentSet> {
        let mut set = ComponentSet::new();
        for path in paths {
            set.extend(self.resolve(path, filter)?);
        }
        Ok(set)
    }

    fn resolve_directory(
        &self,
        dir: &Path,
        ctx: &AdapterContext<'_>,
        set: &mut ComponentSet,
    ) -> MetaformResult<()> {
        if self.ignore.denies_dir(dir) {
            debug!(path = %dir.display(), "ignored directory");
            return Ok(());
        }

        let inference = TypeInference::new(&self.registry);
        if let Some(type_) = inference.directory_type(dir, self.tree.as_ref()) {
            if let Some(component) = adapter_for(type_.adapter()).get_component(dir, &type_, ctx)? {
                set.add(component);
                return Ok(());
            }
        }

        let (dirs, files): (Vec<PathBuf>, Vec<PathBuf>) = self
            .tree
            .read_directory(dir)?
            .into_iter()
            .map(|name| dir.join(name))
            .partition(|path| self.tree.is_directory(path));

        for child in &dirs {
            self.resolve_directory(child, ctx, set)?;
        }
        for file in &files {
            if let Some(component) = self.resolve_file(file, ctx)? {
                set.add(component);
            }
        }
        Ok(())
    }

    fn resolve_file(&self, path: &Path, ctx: &AdapterContext<'_>) -> MetaformResult<Option<SourceComponent>> {
        if self.ignore.denies(path) {
            debug!(path = %path.display(), "ignored");
            return Ok(None);
        }
        if is_package_manifest(path) {
            debug!(path = %path.display(), "skipping package manifest");
            return Ok(None);
        }

        let type_ = TypeInference::new(&self.registry)
            .file_type(path)
            .ok_or_else(|| MetaformError::TypeInference {
                path: path.to_path_buf(),
            })?;
        adapter_for(type_.adapter()).get_component(path, &type_, ctx)
    }

    /// Apply the allow-filter; decomposed parents are validated on the way
    fn admit(
        &self,
        component: SourceComponent,
        filter: Option<&ComponentFilter>,
        set: &mut ComponentSet,
    ) -> MetaformResult<()> {
        let type_ = component.type_().clone();
        let children = if type_.adapter() == AdapterKind::Decomposed && component.content().is_some() {
            // surfaces unexpected child files as errors
            Some(component.get_children()?)
        } else {
            None
        };

        let Some(filter) = filter else {
            set.add(component);
            return Ok(());
        };
        if filter.matches(&component.key()) {
            set.add(component);
            return Ok(());
        }
        if !type_.has_children() {
            return Ok(());
        }
        let children = match children {
            Some(children) => children,
            None => component.get_children()?,
        };
        set.extend(children.into_iter().filter(|child| filter.matches(&child.key())));
        Ok(())
    }
}

/// Drop children found on their own when their parent was found too
fn drop_covered_children(found: ComponentSet) -> ComponentSet {
    let parents: BTreeSet<_> = found.keys().cloned().collect();
    found
        .into_iter()
        .filter(|component| {
            component
                .parent()
                .map_or(true, |parent| !parents.contains(&parent.key()))
        })
        .collect()
}
