use crate::command::{Command, CommandResult, Reply};
use crate::context::TerminalContext;
use crate::path;

pub struct CdCommand;

const CD_HELP: &str = "Usage: cd [DIRECTORY]\nChange the current directory to DIRECTORY.\nWith no DIRECTORY, go back to ~.\n\n      --help     display this help and exit";

impl Command for CdCommand {
    fn execute(&self, args: &[String], ctx: &mut TerminalContext) -> CommandResult {
        let target = match args {
            [] => {
                ctx.cwd.reset();
                return Ok(Reply::silent());
            }
            [one] => one,
            _ => return Err("cd: too many arguments".to_string()),
        };

        // resolve against a copy; cwd only changes on success
        let next = path::resolve(&ctx.fs, &ctx.cwd, target).map_err(|e| format!("cd: {}", e))?;
        ctx.cwd = next;
        Ok(Reply::silent())
    }

    fn usage(&self) -> &'static str {
        CD_HELP
    }

    fn summary(&self) -> &'static str {
        "change the current directory"
    }

    fn completes_paths(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{ctx, run, text};
    use crate::output::Output;

    #[test]
    fn into_and_back_out() {
        let mut ctx = ctx();
        let start = ctx.cwd.clone();
        assert_eq!(run(&CdCommand, &["projects"], &mut ctx), Output::Silent);
        assert_eq!(ctx.cwd.to_string(), "~/projects");
        run(&CdCommand, &[".."], &mut ctx);
        assert_eq!(ctx.cwd, start);
    }

    #[test]
    fn no_argument_goes_home() {
        let mut ctx = ctx();
        run(&CdCommand, &["projects/archive"], &mut ctx);
        run(&CdCommand, &[], &mut ctx);
        assert!(ctx.cwd.is_root());
    }

    #[test]
    fn failure_leaves_cwd_alone() {
        let mut ctx = ctx();
        run(&CdCommand, &["projects"], &mut ctx);
        let before = ctx.cwd.clone();
        let out = text(run(&CdCommand, &["archive/../nowhere"], &mut ctx));
        assert_eq!(out, "cd: archive/../nowhere: No such file or directory");
        assert_eq!(ctx.cwd, before);

        let out = text(run(&CdCommand, &["README.md"], &mut ctx));
        assert_eq!(out, "cd: README.md: Not a directory");
        assert_eq!(ctx.cwd, before);
    }
}
