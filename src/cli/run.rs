use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{CommandResult, init::init, status::status},
};

/// Dispatch to the handler for the parsed command.
pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Status(cmd)) => status(cmd),
        Some(Command::Init) => init(),
        None => anyhow::bail!("No command provided. Use --help to see available commands."),
    }
}
