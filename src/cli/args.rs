//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::checker::DeclarationSource;

/// Verify @types/node major version matches the Node.js version a project declares.
#[derive(Debug, Parser)]
#[command(name = "check-node-types")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub check: CheckArgs,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the check (default) command.
#[derive(Debug, Clone, clap::Args)]
pub struct CheckArgs {
    /// Path to package.json, or a directory containing one
    #[arg(short, long, value_name = "PATH", default_value = "package.json")]
    pub package: PathBuf,

    /// Where to read the target Node.js version from
    #[arg(
        short,
        long,
        value_enum,
        default_value_t = DeclarationSource::Engines,
        env = "CHECK_NODE_TYPES_SOURCE"
    )]
    pub source: DeclarationSource,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Print detected versions without checking
    #[arg(long)]
    pub print: bool,

    /// Print nothing when the check passes
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Show version details even on success
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

impl Default for CheckArgs {
    fn default() -> Self {
        Self {
            package: PathBuf::from("package.json"),
            source: DeclarationSource::Engines,
            json: false,
            print: false,
            quiet: false,
            verbose: false,
            no_color: false,
        }
    }
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
