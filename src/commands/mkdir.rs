use crate::command::{Command, CommandResult};
use crate::context::TerminalContext;

pub struct MkdirCommand;

const MKDIR_HELP: &str = "Usage: mkdir DIRECTORY...\nCreate each DIRECTORY. This filesystem is read-only, so it never succeeds.\n\n      --help     display this help and exit";

impl Command for MkdirCommand {
    fn execute(&self, args: &[String], _ctx: &mut TerminalContext) -> CommandResult {
        super::permission_denied("mkdir", "create directory", args)
    }

    fn usage(&self) -> &'static str {
        MKDIR_HELP
    }

    fn summary(&self) -> &'static str {
        "create a directory (read-only filesystem)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{ctx, run, text};

    #[test]
    fn permission_denied() {
        let mut ctx = ctx();
        assert_eq!(
            text(run(&MkdirCommand, &["-p", "stuff"], &mut ctx)),
            "mkdir: cannot create directory 'stuff': Permission denied"
        );
    }
}
