use crate::command::{Command, CommandResult};
use crate::context::TerminalContext;

/// touch FILE...
/// Always refused: the filesystem is read-only.
pub struct TouchCommand;

const TOUCH_HELP: &str = "Usage: touch FILE...\nCreate each FILE. This filesystem is read-only, so it never succeeds.\n\n      --help     display this help and exit";

impl Command for TouchCommand {
    fn execute(&self, args: &[String], _ctx: &mut TerminalContext) -> CommandResult {
        super::permission_denied("touch", "touch", args)
    }

    fn usage(&self) -> &'static str {
        TOUCH_HELP
    }

    fn summary(&self) -> &'static str {
        "create a file (read-only filesystem)"
    }
}
