use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::{CommandResult, init::init, projects::projects, report::report},
};

/// Dispatches to the handler of the parsed command.
pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Report(cmd)) => report(cmd),
        Some(Command::Projects(cmd)) => projects(cmd),
        Some(Command::Init) => init(),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
