//! Command-line interface definition.
//!
//! Defines the complete CLI structure using clap's derive macros: four
//! subcommands (`build`, `graph`, `check`, `expand`) plus global logging
//! flags.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// baler - annotation-driven bundler for module-less JS/CSS trees
#[derive(Parser, Debug)]
#[command(
    name = "baler",
    version,
    about = "Annotation-driven asset bundler",
    long_about = "baler resolves @require-style comment annotations into a dependency\n\
                  graph, partitions it into ordered compile units, and emits compiled\n\
                  files plus the manifests needed to assemble a page."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve, compile and write manifests for every configured entry
    Build(BuildArgs),

    /// Print the dependency-set plan for an entry without writing anything
    Graph(GraphArgs),

    /// Validate the configuration and entry files
    Check(CheckArgs),

    /// Expand a manifest back into page URLs
    Expand(ExpandArgs),
}

#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Config file (defaults to baler.config.json in the working directory)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Entry files, overriding the config's `entry` list
    #[arg(value_name = "ENTRY")]
    pub entry: Vec<PathBuf>,

    /// Output directory, overriding the config's `outDir`
    #[arg(short = 'd', long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Substitute empty stubs for missing files instead of failing
    ///
    /// Best-effort mode for dev builds: one broken reference does not
    /// block everything else.
    #[arg(long)]
    pub mute_missing: bool,
}

#[derive(Args, Debug)]
pub struct GraphArgs {
    /// Entry file to resolve
    #[arg(value_name = "ENTRY")]
    pub entry: PathBuf,

    /// Config file (defaults to baler.config.json in the working directory)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the plan as JSON instead of human-readable text
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Config file (defaults to baler.config.json in the working directory)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ExpandArgs {
    /// Manifest file to expand
    #[arg(value_name = "MANIFEST")]
    pub manifest: PathBuf,

    /// Base path the page URLs are computed relative to
    #[arg(short, long, value_name = "DIR")]
    pub base: PathBuf,

    /// Symbolic remote prefix whose entries pass through unconverted
    #[arg(long, default_value = "@remote", value_name = "SYMBOL")]
    pub remote_symbol: String,
}
