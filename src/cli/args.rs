//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgGroup, Parser, ValueHint};
use clap_complete::Shell;

/// Declare shell commands once in YAML: browse and run them from a terminal menu,
/// or generate aliases and completions
#[derive(Parser, Debug)]
#[command(name = "cmdeck")]
#[command(author, version, about, long_about = None)]
#[command(group(ArgGroup::new("action").multiple(false)))]
pub struct Cli {
    /// Return to the menu after each command
    #[arg(short, long)]
    pub continuous: bool,

    /// Debug output, repeat for more (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub debug: u8,

    /// Primary command definitions (default: commands.yaml)
    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub commands: Option<PathBuf>,

    /// Personal additions and overrides (default: custom.yaml, optional)
    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub custom: Option<PathBuf>,

    /// Ignore the personal command file
    #[arg(long, conflicts_with = "custom")]
    pub no_custom: bool,

    /// Package index naming providers of missing programs (default: packages.yaml, optional)
    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub packages: Option<PathBuf>,

    /// Print the resolved command line instead of running it
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Write the completion script and exit
    #[arg(long, group = "action")]
    pub generate_completion: bool,

    /// Write the alias/function file and exit
    #[arg(long, group = "action")]
    pub generate_aliases: bool,

    /// Write all generated artifacts and exit
    #[arg(long, group = "action")]
    pub generate_all: bool,

    /// Dialect of the generated completion script
    #[arg(long, value_enum, default_value_t = Shell::Bash)]
    pub completion_shell: Shell,

    /// Show all commands as a tree
    #[arg(short, long, group = "action")]
    pub list: bool,

    /// Report programs used by commands that are not on PATH
    #[arg(long, group = "action")]
    pub check_tools: bool,

    /// Show the effective settings
    #[arg(long, group = "action")]
    pub show_config: bool,

    /// Print a settings file template
    #[arg(long, group = "action")]
    pub config_template: bool,

    /// Command to run directly, skipping the menu, followed by values for its
    /// arguments ($1, $2, ...); extra values are appended. Everything after the
    /// command name is passed through verbatim.
    #[arg(
        value_name = "COMMAND",
        conflicts_with = "action",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub invocation: Vec<String>,
}

impl Cli {
    /// Name of the command to run directly, if any.
    pub fn command(&self) -> Option<&str> {
        self.invocation.first().map(String::as_str)
    }

    /// Values supplied after the command name.
    pub fn args(&self) -> &[String] {
        self.invocation.get(1..).unwrap_or(&[])
    }

    /// Whether any artifact generation switch is set.
    pub fn generates(&self) -> bool {
        self.generate_completion || self.generate_aliases || self.generate_all
    }
}
