use crate::command::{Command, CommandResult, Reply};
use crate::context::{Theme, TerminalContext};

pub struct ThemeCommand;

const THEME_HELP: &str = "Usage: theme dark|light\nSwitch the terminal colors.\n\n  dark           green text on black\n  light          black text on white\n      --help     display this help and exit";

impl Command for ThemeCommand {
    fn execute(&self, args: &[String], ctx: &mut TerminalContext) -> CommandResult {
        let name = match args.first() {
            Some(name) => name,
            None => {
                return Ok(Reply::plain(format!(
                    "Current theme: {}\nUsage: theme {}",
                    ctx.theme.name(),
                    Theme::NAMES.join("|")
                )))
            }
        };
        match Theme::from_name(name) {
            Some(theme) => {
                ctx.theme = theme;
                Ok(Reply::plain(format!("Theme changed to {}", theme.name())))
            }
            None => Err(format!("theme: unknown theme '{}' (choose {})", name, Theme::NAMES.join(" or "))),
        }
    }

    fn usage(&self) -> &'static str {
        THEME_HELP
    }

    fn summary(&self) -> &'static str {
        "switch between the dark and light theme"
    }

    fn options(&self) -> &'static [&'static str] {
        Theme::NAMES
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{ctx, run, text};

    #[test]
    fn switches_theme_field() {
        let mut ctx = ctx();
        assert_eq!(text(run(&ThemeCommand, &["light"], &mut ctx)), "Theme changed to light");
        assert_eq!(ctx.theme, Theme::Light);
        assert_eq!(ctx.theme.palette().background, "white");
    }

    #[test]
    fn unknown_theme_keeps_current() {
        let mut ctx = ctx();
        let out = text(run(&ThemeCommand, &["purple"], &mut ctx));
        assert_eq!(out, "theme: unknown theme 'purple' (choose dark or light)");
        assert_eq!(ctx.theme, Theme::Dark);
    }

    #[test]
    fn no_argument_reports_current() {
        let mut ctx = ctx();
        assert!(text(run(&ThemeCommand, &[], &mut ctx)).starts_with("Current theme: dark"));
    }
}
