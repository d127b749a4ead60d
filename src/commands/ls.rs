use crate::command::{Command, CommandResult, Reply};
use crate::context::TerminalContext;
use crate::path::{self, PathError};

pub struct LsCommand;

const LS_HELP: &str = "Usage: ls [OPTION]... [DIRECTORY]\nList the contents of DIRECTORY (the current directory by default).\n\n  -a             do not ignore entries starting with .\n      --help     display this help and exit";

fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

impl Command for LsCommand {
    fn execute(&self, args: &[String], ctx: &mut TerminalContext) -> CommandResult {
        let mut show_all = false;
        let mut target: Option<&str> = None;

        for arg in args {
            if arg.starts_with('-') && arg.len() > 1 {
                for c in arg.chars().skip(1) {
                    match c {
                        'a' => show_all = true,
                        other => return Err(format!("ls: invalid option -- '{}'", other)),
                    }
                }
            } else if target.is_none() {
                target = Some(arg);
            } else {
                return Err("ls: too many arguments".to_string());
            }
        }

        let dir_path = match target {
            None => ctx.cwd.clone(),
            Some(arg) => path::resolve(&ctx.fs, &ctx.cwd, arg).map_err(|e| match e {
                PathError::NotFound(_) => format!("ls: cannot access '{}': No such file or directory", arg),
                PathError::NotADirectory(_) => format!("ls: cannot access '{}': Not a directory", arg),
            })?,
        };

        let dir = match ctx.fs.resolve_dir(&dir_path) {
            Some(dir) => dir,
            None => return Err(format!("ls: cannot access '{}': Not a directory", dir_path.current())),
        };

        let names: Vec<&str> = dir.names().filter(|n| show_all || !is_hidden(n)).collect();
        if names.is_empty() {
            return Ok(Reply::plain("Directory is empty"));
        }
        Ok(Reply::plain(names.join("  ")))
    }

    fn usage(&self) -> &'static str {
        LS_HELP
    }

    fn summary(&self) -> &'static str {
        "list directory contents"
    }

    fn completes_paths(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{ctx, run, text};

    #[test]
    fn hides_dotfiles_by_default() {
        let mut ctx = ctx();
        let out = text(run(&LsCommand, &[], &mut ctx));
        assert_eq!(out, "projects  about-me.txt  socials.txt  help.txt");
    }

    #[test]
    fn dash_a_shows_everything() {
        let mut ctx = ctx();
        let out = text(run(&LsCommand, &["-a"], &mut ctx));
        assert!(out.ends_with("help.txt  .secret.txt"));
    }

    #[test]
    fn lists_another_directory_without_moving() {
        let mut ctx = ctx();
        let out = text(run(&LsCommand, &["projects/archive"], &mut ctx));
        assert_eq!(out, "old-site.txt");
        assert!(ctx.cwd.is_root());
    }

    #[test]
    fn bad_targets() {
        let mut ctx = ctx();
        assert_eq!(
            text(run(&LsCommand, &["nope"], &mut ctx)),
            "ls: cannot access 'nope': No such file or directory"
        );
        assert_eq!(
            text(run(&LsCommand, &["about-me.txt"], &mut ctx)),
            "ls: cannot access 'about-me.txt': Not a directory"
        );
        assert_eq!(text(run(&LsCommand, &["-l"], &mut ctx)), "ls: invalid option -- 'l'");
    }
}
