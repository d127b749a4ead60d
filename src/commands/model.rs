use crate::command::{Command, CommandResult, Reply};
use crate::context::TerminalContext;

/// model [show|hide|toggle]
/// Show or hide the 3D model behind the terminal.
pub struct ModelCommand;

const MODEL_HELP: &str = "Usage: model [show|hide|toggle]\nShow or hide the 3D model behind the terminal. With no argument, toggle it.\n\n      --help     display this help and exit";

impl Command for ModelCommand {
    fn execute(&self, args: &[String], ctx: &mut TerminalContext) -> CommandResult {
        let visible = match args.first().map(String::as_str) {
            None | Some("toggle") => !ctx.viewer_visible,
            Some("show") => true,
            Some("hide") => false,
            Some(other) => return Err(format!("model: invalid argument '{}'", other)),
        };
        ctx.viewer_visible = visible;
        Ok(Reply::plain(if visible { "3D model shown" } else { "3D model hidden" }))
    }

    fn usage(&self) -> &'static str {
        MODEL_HELP
    }

    fn summary(&self) -> &'static str {
        "show or hide the 3D model"
    }

    fn options(&self) -> &'static [&'static str] {
        &["show", "hide", "toggle"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{ctx, run, text};

    #[test]
    fn visibility_flag() {
        let mut ctx = ctx();
        assert!(ctx.viewer_visible);
        assert_eq!(text(run(&ModelCommand, &["hide"], &mut ctx)), "3D model hidden");
        assert!(!ctx.viewer_visible);
        run(&ModelCommand, &[], &mut ctx);
        assert!(ctx.viewer_visible);
        run(&ModelCommand, &["show"], &mut ctx);
        assert!(ctx.viewer_visible);
        assert_eq!(text(run(&ModelCommand, &["spin"], &mut ctx)), "model: invalid argument 'spin'");
    }
}
