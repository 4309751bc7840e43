//! CLI command structure using clap

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tplkit")]
#[command(version, about = "Render comment-marker templates", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a tplkit.toml
    #[arg(long, global = true, env = "TPLKIT_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a template to stdout
    Render(RenderArgs),

    /// Inspect or reset the rendered-template cache
    #[command(subcommand)]
    Cache(CacheCommands),
}

#[derive(Args)]
pub struct RenderArgs {
    /// Template name, without extension
    pub name: String,

    /// Templates folder (default: $DOCUMENT_ROOT/tmpl)
    #[arg(long)]
    pub folder: Option<PathBuf>,

    /// Scalar parameter, repeatable
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub sets: Vec<String>,

    /// `for` block values, comma separated
    #[arg(long = "for", value_name = "NAME=V1,V2,...")]
    pub fors: Vec<String>,

    /// `forEach` block rows as JSON (object or array of objects)
    #[arg(long = "for-each", value_name = "NAME=JSON")]
    pub for_eaches: Vec<String>,

    /// Keep HTML comments in the output
    #[arg(long)]
    pub keep_comments: bool,

    /// Enable the rendered-template cache
    #[arg(long)]
    pub cache: bool,

    /// Hours a cached render stays valid
    #[arg(long, value_name = "HOURS")]
    pub max_store_hours: Option<u64>,

    /// Maximum include directives per scan
    #[arg(long, value_name = "N")]
    pub max_includes: Option<usize>,

    /// Print the template error before the output
    #[arg(long)]
    pub show_errors: bool,

    /// Leave missing includes out silently
    #[arg(long)]
    pub no_warnings: bool,
}

#[derive(Subcommand)]
pub enum CacheCommands {
    /// List cached templates
    List {
        #[arg(long)]
        folder: Option<PathBuf>,

        #[arg(long)]
        json: bool,
    },

    /// Delete the cache index
    Clear {
        #[arg(long)]
        folder: Option<PathBuf>,
    },
}
