use crate::command::{Command, CommandResult, Reply};
use crate::context::TerminalContext;

/// echo [STRING]...
/// Write arguments back, separated by single spaces.
pub struct EchoCommand;

const ECHO_HELP: &str = "Usage: echo [STRING]...\nWrite the STRINGs to the terminal, separated by spaces.\n\n      --help     display this help and exit";

impl Command for EchoCommand {
    fn execute(&self, args: &[String], _ctx: &mut TerminalContext) -> CommandResult {
        Ok(Reply::plain(args.join(" ")))
    }

    fn usage(&self) -> &'static str {
        ECHO_HELP
    }

    fn summary(&self) -> &'static str {
        "print the arguments"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{ctx, run};
    use crate::output::Output;

    #[test]
    fn joins_with_single_spaces() {
        let mut ctx = ctx();
        assert_eq!(run(&EchoCommand, &["hello", "<b>world</b>"], &mut ctx), Output::plain("hello <b>world</b>"));
        // empty plain output shows nothing
        assert_eq!(run(&EchoCommand, &[], &mut ctx), Output::plain(""));
    }
}
