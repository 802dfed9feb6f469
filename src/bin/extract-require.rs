//! extract-require CLI
//!
//! Reads JavaScript (or TypeScript) source from stdin and writes the module
//! names passed to `require(...)` to stdout as a JSON array.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{Cli, Commands};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries only the payload.
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        None => cli::extract_command(cli.extract).await?,
        Some(Commands::PrintDefaultConfig) => cli::print_default_config()?,
        Some(Commands::ListLanguages) => cli::list_languages(),
    }

    Ok(())
}
