use crate::command::{Command, CommandResult, Reply};
use crate::context::TerminalContext;

/// pwd
/// Print the current directory, root first.
pub struct PwdCommand;

const PWD_HELP: &str = "Usage: pwd\nPrint the full name of the current directory.\n\n      --help      display this help and exit";

impl Command for PwdCommand {
    fn execute(&self, _args: &[String], ctx: &mut TerminalContext) -> CommandResult {
        Ok(Reply::plain(ctx.cwd.to_string()))
    }

    fn usage(&self) -> &'static str {
        PWD_HELP
    }

    fn summary(&self) -> &'static str {
        "print the current directory"
    }
}
