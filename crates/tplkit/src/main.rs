mod cli;
mod commands;
mod output;

use clap::Parser;
use cli::{CacheCommands, Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Render(args) => commands::render::run(args, cli.config.as_deref()),
        Commands::Cache(cache_cmd) => match cache_cmd {
            CacheCommands::List { folder, json } => {
                commands::cache::list(folder, json, cli.config.as_deref())
            }
            CacheCommands::Clear { folder } => commands::cache::clear(folder, cli.config.as_deref()),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Logs go to stderr so stdout carries only the rendered template
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
