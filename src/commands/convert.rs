use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use metaform::application::{CancellationToken, ConvertOptions, ConvertResult, OutputConfig};
use metaform::domain::value_objects::TargetFormat;
use metaform::error::MetaformError;
use metaform::presentation::output::ConvertSummary;
use metaform::presentation::{create_convert_use_case, create_resolver, load_ignore, load_registry, MetadataMember};
use tracing::{info, warn};

use super::resolve::resolve_inputs;
use super::{absolutize, CommandContext};

/// Package name used for archives when none is configured
const DEFAULT_PACKAGE_NAME: &str = "unpackaged";

#[derive(Debug, Clone)]
pub struct ConvertArgs {
    pub paths: Vec<PathBuf>,
    pub to: TargetFormat,
    pub output_dir: Option<PathBuf>,
    pub zip: bool,
    pub package_name: Option<String>,
    pub merge_into: Option<PathBuf>,
    pub metadata: Vec<MetadataMember>,
    pub api_version: Option<String>,
}

pub fn cmd_convert(ctx: &CommandContext, args: ConvertArgs) -> Result<()> {
    let token = CancellationToken::new();
    let handler_token = token.clone();
    if let Err(err) = ctrlc::set_handler(move || handler_token.cancel()) {
        warn!(error = %err, "could not install the interrupt handler");
    }

    let components = resolve_inputs(ctx, &args.paths, &args.metadata)?;
    let output = output_config(ctx, &args)?;
    let api_version = args
        .api_version
        .clone()
        .unwrap_or_else(|| ctx.config.project.api_version.clone());
    let options = ConvertOptions::new(args.to, output)
        .with_api_version(api_version)
        .with_buffer_size(ctx.config.convert.buffer_size);

    if token.is_cancelled() {
        return Err(MetaformError::Cancelled.into());
    }
    info!(components = components.len(), "resolved inputs");

    let use_case = create_convert_use_case(ctx.json, token);
    let result = use_case.execute(&components, &options)?;

    if !ctx.json {
        let summary = ConvertSummary {
            unicode: true,
            verbose: ctx.verbose,
        };
        print!("{}", summary.render(&result, args.to));
    }
    finish(&result)
}

fn finish(result: &ConvertResult) -> Result<()> {
    if result.cancelled {
        return Err(MetaformError::Cancelled.into());
    }
    if !result.failed.is_empty() {
        bail!("{} component(s) failed to convert", result.failed.len());
    }
    Ok(())
}

fn output_config(ctx: &CommandContext, args: &ConvertArgs) -> Result<OutputConfig> {
    if let Some(merge_into) = &args.merge_into {
        if !args.to.is_source() {
            bail!("--merge-into only applies when converting to source format");
        }
        let merge_dir = absolutize(&ctx.cwd, merge_into);
        let registry = load_registry(&ctx.config, &ctx.project_root)?;
        let ignore = load_ignore(&ctx.config, &ctx.project_root)?;
        let merge_with = if merge_dir.exists() {
            create_resolver(registry, ignore).resolve(&merge_dir, None)?
        } else {
            Default::default()
        };
        return Ok(OutputConfig::merge(merge_with, merge_dir));
    }

    let output_dir = match &args.output_dir {
        Some(dir) => absolutize(&ctx.cwd, dir),
        None => ctx.cwd.join(default_output_dir(args.to)),
    };
    let package_name = args
        .package_name
        .clone()
        .or_else(|| ctx.config.convert.package_name.clone());

    if args.zip {
        let name = package_name.as_deref().unwrap_or(DEFAULT_PACKAGE_NAME);
        return Ok(OutputConfig::Zip {
            path: Some(zip_path(&output_dir, name)),
        });
    }
    Ok(OutputConfig::Directory {
        root: output_dir,
        package_name,
    })
}

fn default_output_dir(target: TargetFormat) -> &'static str {
    match target {
        TargetFormat::Source => "source-out",
        TargetFormat::Metadata => "metadata-out",
    }
}

fn zip_path(output_dir: &Path, package_name: &str) -> PathBuf {
    output_dir.join(format!("{}.zip", package_name))
}
