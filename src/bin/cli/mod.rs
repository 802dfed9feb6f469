//! CLI module organization:
//! - args: argument structures
//! - commands: command execution
//! - config_layer: merging defaults, config files and flags

pub mod args;
pub mod commands;
pub mod config_layer;

pub use args::*;
pub use commands::*;
