//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! Global flags (--json, --verbose, --project-root) are inherited by all subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::value_objects::TargetFormat;

/// A `Type:Name` pair naming components; a bare `Type` means every member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataMember {
    pub type_name: String,
    pub member: String,
}

impl MetadataMember {
    pub fn as_pair(&self) -> (&str, &str) {
        (self.type_name.as_str(), self.member.as_str())
    }
}

fn parse_member(value: &str) -> Result<MetadataMember, String> {
    let (type_name, member) = match value.split_once(':') {
        Some((type_name, member)) => (type_name.trim(), member.trim()),
        None => (value.trim(), "*"),
    };
    if type_name.is_empty() || member.is_empty() {
        return Err(format!("expected Type or Type:Name, got '{}'", value));
    }
    Ok(MetadataMember {
        type_name: type_name.to_string(),
        member: member.to_string(),
    })
}

/// Metaform - metadata source/metadata format resolver and converter
#[derive(Parser, Debug)]
#[command(name = "metaform")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Project root holding metaform.toml and the ignore file
    #[arg(long, global = true, value_name = "DIR")]
    pub project_root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the components found under one or more paths
    Resolve {
        /// Paths to resolve (defaults to the configured package directories)
        paths: Vec<PathBuf>,

        /// Only components matching Type:Name (repeatable, Type alone matches all)
        #[arg(short, long = "metadata", value_name = "TYPE:NAME", value_parser = parse_member)]
        metadata: Vec<MetadataMember>,
    },

    /// Convert components to source or metadata format
    Convert {
        /// Paths to convert (defaults to the configured package directories)
        paths: Vec<PathBuf>,

        /// Format to produce
        #[arg(long = "to", value_enum)]
        to: TargetFormat,

        /// Output directory
        #[arg(short = 'd', long, value_name = "DIR", conflicts_with = "merge_into")]
        output_dir: Option<PathBuf>,

        /// Write a zip archive (to --output-dir/<package>.zip when given)
        #[arg(long, conflicts_with = "merge_into")]
        zip: bool,

        /// Package directory created under the output directory
        #[arg(long)]
        package_name: Option<String>,

        /// Merge into an existing source-format project directory
        #[arg(long, value_name = "DIR")]
        merge_into: Option<PathBuf>,

        /// Only components matching Type:Name (repeatable, Type alone matches all)
        #[arg(short, long = "metadata", value_name = "TYPE:NAME", value_parser = parse_member)]
        metadata: Vec<MetadataMember>,

        /// API version written into package.xml
        #[arg(long)]
        api_version: Option<String>,
    },
}
