use std::path::PathBuf;

use anyhow::Result;
use metaform::domain::entities::{ComponentFilter, ComponentSet, MetadataRegistry};
use metaform::presentation::output::{render_components, OutputFormat};
use metaform::presentation::{create_resolver, load_ignore, load_registry, MetadataMember};

use super::CommandContext;

pub fn cmd_resolve(ctx: &CommandContext, paths: &[PathBuf], metadata: &[MetadataMember]) -> Result<()> {
    let set = resolve_inputs(ctx, paths, metadata)?;
    print!(
        "{}",
        render_components(&set, OutputFormat::from_json_flag(ctx.json))
    );
    if ctx.json {
        println!();
    }
    Ok(())
}

/// Resolve command-line inputs into one component set
pub(super) fn resolve_inputs(
    ctx: &CommandContext,
    paths: &[PathBuf],
    metadata: &[MetadataMember],
) -> Result<ComponentSet> {
    let registry = load_registry(&ctx.config, &ctx.project_root)?;
    let ignore = load_ignore(&ctx.config, &ctx.project_root)?;
    let filter = build_filter(&registry, metadata)?;

    let resolver = create_resolver(registry, ignore);
    let set = resolver.resolve_all(&ctx.input_paths(paths), filter.as_ref())?;
    Ok(set)
}

pub(super) fn build_filter(
    registry: &MetadataRegistry,
    metadata: &[MetadataMember],
) -> Result<Option<ComponentFilter>> {
    if metadata.is_empty() {
        return Ok(None);
    }
    let filter = ComponentFilter::from_members(registry, metadata.iter().map(MetadataMember::as_pair))?;
    Ok(Some(filter))
}
