//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level command line
#[derive(Parser, Debug)]
#[command(name = "carreview")]
#[command(about = "Entity-filtered retrieval over Hebrew car-review articles", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to run
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Configuration file (replaces .carreview/config.yaml and local.yaml)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Chunk the raw articles into the chunk list
    Corpus,

    /// Embed the chunk list and write the index artifacts
    Index,

    /// Run corpus building followed by index building
    Ingest,

    /// Retrieve the chunks most relevant to a question
    Query(QueryArgs),

    /// List the vehicle-model entities known to the index
    Entities(EntitiesArgs),
}

/// Arguments of `query`
#[derive(Args, Debug)]
pub struct QueryArgs {
    /// Question text (Hebrew or English)
    pub text: String,

    /// Number of chunks to return (defaults to retrieval.top_k)
    #[arg(short = 'k', long)]
    pub top_k: Option<usize>,

    /// Also print the grounding context block
    #[arg(long)]
    pub context: bool,
}

/// Arguments of `entities`
#[derive(Args, Debug)]
pub struct EntitiesArgs {
    /// Show which entities this query mentions and how it would be routed
    #[arg(short, long)]
    pub query: Option<String>,
}
