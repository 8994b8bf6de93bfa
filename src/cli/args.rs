//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `status`: List resource files and the keys missing values per locale
//! - `init`: Initialize ivy configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Status(cmd)) => cmd.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by commands that open a project.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Source locale (overrides config file and APP_LOCALE)
    #[arg(long)]
    pub source_locale: Option<String>,

    /// Lang directory path (overrides config file)
    #[arg(long, env = "IVY_LANG_PATH")]
    pub lang_path: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables
    #[default]
    Table,
    /// The key table as a JSON object
    Json,
}

#[derive(Debug, Args)]
pub struct StatusCommand {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Only list keys that are missing a value in at least one locale
    #[arg(long)]
    pub missing_only: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Exit with status 1 when any key is missing a value
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show resource files and which translation keys are missing values
    Status(StatusCommand),
    /// Initialize a new .ivyrc.json configuration file
    Init,
}
