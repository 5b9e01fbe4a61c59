//! Metaform CLI - metadata source/metadata format resolver and converter
//!
//! Usage: metaform <COMMAND>
//!
//! Commands:
//!   resolve  List the components found under one or more paths
//!   convert  Convert components to source or metadata format

mod commands;

use anyhow::Result;
use clap::Parser;
use metaform::presentation::{Cli, Commands};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::commands::{cmd_convert, cmd_resolve, CommandContext, ConvertArgs};

/// Environment variable overriding the log filter
const LOG_ENV: &str = "METAFORM_LOG";

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = CommandContext::load(cli.project_root, cli.json, cli.verbose)?;

    match cli.command {
        Commands::Resolve { paths, metadata } => cmd_resolve(&ctx, &paths, &metadata),
        Commands::Convert {
            paths,
            to,
            output_dir,
            zip,
            package_name,
            merge_into,
            metadata,
            api_version,
        } => cmd_convert(
            &ctx,
            ConvertArgs {
                paths,
                to,
                output_dir,
                zip,
                package_name,
                merge_into,
                metadata,
                api_version,
            },
        ),
    }
}

/// Logs go to stderr; stdout is reserved for command output
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr),
        )
        .init();
}
