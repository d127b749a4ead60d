use crate::command::{Command, CommandResult, TakeoverTrigger};
use crate::context::TerminalContext;
use crate::output::{Output, Takeover};

pub struct SnakeCommand;

const SNAKE_HELP: &str = "Usage: snake\nPlay snake. Arrow keys steer, Ctrl+C quits.\n\n      --help     display this help and exit";

impl Command for SnakeCommand {
    fn execute(&self, _args: &[String], _ctx: &mut TerminalContext) -> CommandResult {
        Ok(Output::Takeover(Takeover::Snake).into())
    }

    fn usage(&self) -> &'static str {
        SNAKE_HELP
    }

    fn summary(&self) -> &'static str {
        "play snake"
    }

    fn takeover(&self) -> Option<TakeoverTrigger> {
        Some(TakeoverTrigger { loading: None })
    }
}
