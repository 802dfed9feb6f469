//! CLI argument structures.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Extract require() module references from source text on stdin
#[derive(Parser)]
#[command(name = "extract-require")]
#[command(version = VERSION)]
#[command(about = "Print the modules a script requires, as a JSON array")]
#[command(long_about = "
Reads source text from stdin until end-of-input, finds every require(...) call
whose first argument is a static string, and writes the module names to stdout
as a single JSON array, in the order they appear.

Common Usage:

  # List the dependencies of a script
  extract-require < index.js

  # TypeScript, including `import x = require(...)`
  extract-require --language ts < index.ts

  # Also report dynamic arguments such as require(dir + '/x')
  extract-require --expressions < index.js
")]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub extract: ExtractArgs,

    /// Enable verbose logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print default configuration in YAML format
    #[command(name = "print-default-config")]
    PrintDefaultConfig,

    /// List supported languages and their file extensions
    #[command(name = "list-languages")]
    ListLanguages,
}

/// Options for the extraction run
#[derive(Args, Debug, Clone, Default)]
pub struct ExtractArgs {
    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Grammar to parse the input with (js, ts, tsx and their aliases)
    #[arg(short, long, env = "EXTRACT_REQUIRE_LANGUAGE")]
    pub language: Option<String>,

    /// Identifier treated as the require function
    #[arg(short, long, env = "EXTRACT_REQUIRE_WORD")]
    pub word: Option<String>,

    /// Emit {"strings": [...], "expressions": [...]} instead of a bare array
    #[arg(long)]
    pub expressions: bool,
}
