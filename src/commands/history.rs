use crate::command::{Command, CommandResult, Reply};
use crate::context::TerminalContext;

pub struct HistoryCommand;

const HISTORY_HELP: &str = "Usage: history [-c]\nShow previously entered commands, oldest first.\n\n  -c             clear the history\n      --help     display this help and exit";

impl Command for HistoryCommand {
    fn execute(&self, args: &[String], ctx: &mut TerminalContext) -> CommandResult {
        if args.is_empty() {
            // the log is newest first; number it the way a shell does
            let lines: Vec<String> = ctx
                .history
                .iter()
                .rev()
                .enumerate()
                .map(|(i, cmd)| format!("{:4}  {}", i + 1, cmd))
                .collect();
            Ok(Reply::plain(lines.join("\n")))
        } else if args.len() == 1 && args[0] == "-c" {
            ctx.history.clear();
            Ok(Reply::plain("History cleared"))
        } else {
            Err("history: usage: history [-c]".to_string())
        }
    }

    fn usage(&self) -> &'static str {
        HISTORY_HELP
    }

    fn summary(&self) -> &'static str {
        "show or clear command history"
    }

    fn options(&self) -> &'static [&'static str] {
        &["-c"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{ctx, run, text};

    #[test]
    fn numbered_oldest_first() {
        let mut ctx = ctx();
        ctx.history.record("ls");
        ctx.history.record("cd projects");
        assert_eq!(text(run(&HistoryCommand, &[], &mut ctx)), "   1  ls\n   2  cd projects");
    }

    #[test]
    fn dash_c_clears() {
        let mut ctx = ctx();
        ctx.history.record("ls");
        assert_eq!(text(run(&HistoryCommand, &["-c"], &mut ctx)), "History cleared");
        assert!(ctx.history.is_empty());
        assert_eq!(text(run(&HistoryCommand, &["-x"], &mut ctx)), "history: usage: history [-c]");
    }
}
