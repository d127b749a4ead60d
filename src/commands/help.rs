use crate::command::{Command, CommandResult, Reply};
use crate::context::TerminalContext;

/// help [COMMAND]
/// List every registered command, or show one command's usage.
pub struct HelpCommand;

const HELP_USAGE: &str = "Usage: help [COMMAND]\nDisplay help information about available commands.\n\n  COMMAND        show help for specific command\n      --help     display this help and exit";

impl Command for HelpCommand {
    fn execute(&self, args: &[String], ctx: &mut TerminalContext) -> CommandResult {
        let registry = match ctx.get_command_registry() {
            Some(registry) => registry,
            None => return Err("help: unable to access command registry".to_string()),
        };

        if let Some(cmd_name) = args.first() {
            return match registry.get(cmd_name) {
                Some(cmd) => Ok(Reply::plain(cmd.usage())),
                None => Err(format!("help: no help topics match '{}'", cmd_name)),
            };
        }

        let names = registry.get_command_names();
        let width = names.iter().map(String::len).max().unwrap_or(0);
        let mut output = String::from("Available commands:\n\n");
        for name in &names {
            if let Some(cmd) = registry.get(name) {
                output.push_str(&format!("  {:<width$}  {}\n", name, cmd.summary(), width = width));
            }
        }
        output.push_str("\nUse 'help COMMAND' to get help for a specific command.\n");
        output.push_str("Every command also accepts --help.");
        Ok(Reply::plain(output))
    }

    fn usage(&self) -> &'static str {
        HELP_USAGE
    }

    fn summary(&self) -> &'static str {
        "show this list, or help for one command"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{ctx, run, text};
    use std::rc::Rc;

    #[test]
    fn lists_every_command() {
        let mut ctx = ctx();
        let out = text(run(&HelpCommand, &[], &mut ctx));
        assert!(out.starts_with("Available commands:"));
        let registry = Rc::clone(ctx.get_command_registry().unwrap());
        for name in registry.get_command_names() {
            assert!(out.contains(&format!("  {}", name)), "{} missing", name);
        }
    }

    #[test]
    fn single_command_usage() {
        let mut ctx = ctx();
        assert!(text(run(&HelpCommand, &["cd"], &mut ctx)).starts_with("Usage: cd"));
        assert_eq!(text(run(&HelpCommand, &["sudo"], &mut ctx)), "help: no help topics match 'sudo'");
    }

    #[test]
    fn without_registry() {
        use crate::config::TerminalConfig;
        use crate::context::TerminalContext;
        let mut bare = TerminalContext::new(Rc::new(crate::content::portfolio()), TerminalConfig::default());
        assert_eq!(text(run(&HelpCommand, &[], &mut bare)), "help: unable to access command registry");
    }
}
