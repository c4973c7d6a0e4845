//! CLI layer: argument parsing, menu navigation and command dispatch

pub mod args;
pub mod commands;
pub mod error;
pub mod menu;
pub mod output;

pub use args::Cli;
pub use error::{CliError, CliResult};
