use crate::command::{Command, CommandResult, Reply};
use crate::context::TerminalContext;

pub struct WhoamiCommand;

const WHOAMI_HELP: &str = "Usage: whoami\nPrint the current user name.\n\n      --help     display this help and exit";

impl Command for WhoamiCommand {
    fn execute(&self, _args: &[String], ctx: &mut TerminalContext) -> CommandResult {
        Ok(Reply::plain(ctx.config.user.clone()))
    }

    fn usage(&self) -> &'static str {
        WHOAMI_HELP
    }

    fn summary(&self) -> &'static str {
        "print the user name"
    }
}
