use chrono::Local;

use crate::command::{Command, CommandResult, Reply};
use crate::context::TerminalContext;

pub struct DateCommand;

const DATE_HELP: &str = "Usage: date\nPrint the current local date and time.\n\n      --help     display this help and exit";

impl Command for DateCommand {
    fn execute(&self, _args: &[String], _ctx: &mut TerminalContext) -> CommandResult {
        Ok(Reply::plain(Local::now().format("%a %b %e %H:%M:%S %Y").to_string()))
    }

    fn usage(&self) -> &'static str {
        DATE_HELP
    }

    fn summary(&self) -> &'static str {
        "print the date and time"
    }
}
