use crate::command::{Command, CommandResult};
use crate::context::TerminalContext;
use crate::output::Output;

pub struct ClearCommand;

const CLEAR_HELP: &str = "Usage: clear\nClear the terminal screen.\n\n      --help     display this help and exit";

impl Command for ClearCommand {
    fn execute(&self, _args: &[String], _ctx: &mut TerminalContext) -> CommandResult {
        Ok(Output::ClearTranscript.into())
    }

    fn usage(&self) -> &'static str {
        CLEAR_HELP
    }

    fn summary(&self) -> &'static str {
        "clear the screen"
    }
}
