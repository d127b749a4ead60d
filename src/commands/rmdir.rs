use crate::command::{Command, CommandResult};
use crate::context::TerminalContext;

pub struct RmdirCommand;

const RMDIR_HELP: &str = "Usage: rmdir DIRECTORY...\nRemove each empty DIRECTORY. This filesystem is read-only, so it never succeeds.\n\n      --help     display this help and exit";

impl Command for RmdirCommand {
    fn execute(&self, args: &[String], _ctx: &mut TerminalContext) -> CommandResult {
        super::permission_denied("rmdir", "remove", args)
    }

    fn usage(&self) -> &'static str {
        RMDIR_HELP
    }

    fn summary(&self) -> &'static str {
        "remove a directory (read-only filesystem)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{ctx, run, text};

    #[test]
    fn projects_stays() {
        let mut ctx = ctx();
        assert_eq!(
            text(run(&RmdirCommand, &["projects"], &mut ctx)),
            "rmdir: cannot remove 'projects': Permission denied"
        );
        assert!(ctx.fs.resolve_dir(&ctx.cwd.child("projects")).is_some());
    }
}
