use chrono::{Duration, Local};

use crate::command::{Command, CommandResult, Reply};
use crate::context::TerminalContext;

pub struct NeofetchCommand;

const NEOFETCH_HELP: &str = "Usage: neofetch\nShow information about this terminal.\n\n      --help     display this help and exit";

const LOGO: &[&str] = &[
    r"    .--.     ",
    r"   |o_o |    ",
    r"   |:_/ |    ",
    r"  //   \ \   ",
    r" (|     | )  ",
    r"/'\_   _/`\  ",
    r"\___)=(___/  ",
];

/// "2 days, 3 hours, 14 mins" - zero units are left out, minutes always shown.
pub(crate) fn format_uptime(up: Duration) -> String {
    let total_mins = up.num_minutes().max(0);
    let (days, hours, mins) = (total_mins / 1440, (total_mins / 60) % 24, total_mins % 60);
    let plural = |n: i64, unit: &str| format!("{} {}{}", n, unit, if n == 1 { "" } else { "s" });
    let mut parts = Vec::new();
    if days > 0 {
        parts.push(plural(days, "day"));
    }
    if hours > 0 {
        parts.push(plural(hours, "hour"));
    }
    parts.push(plural(mins, "min"));
    parts.join(", ")
}

fn escape_art(line: &str) -> String {
    crate::output::escape_html(line).replace(' ', "&nbsp;")
}

impl Command for NeofetchCommand {
    fn execute(&self, _args: &[String], ctx: &mut TerminalContext) -> CommandResult {
        let title = format!("{}@{}", ctx.config.user, ctx.config.host);
        let commands = ctx.get_command_registry().map(|r| r.get_command_names().len()).unwrap_or(0);
        let info = vec![
            title.clone(),
            "-".repeat(title.len()),
            format!("OS: {} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
            "Host: the browser you're reading this in".to_string(),
            format!("Uptime: {}", format_uptime(Local::now() - ctx.started_at)),
            format!("Shell: {} commands", commands),
            format!("Theme: {}", ctx.theme.name()),
            format!("History: {} entries", ctx.history.len()),
        ];

        let rows = LOGO.len().max(info.len());
        let lines: Vec<String> = (0..rows)
            .map(|i| {
                let art = LOGO.get(i).copied().unwrap_or("             ");
                let text = info.get(i).map(|s| crate::output::escape_html(s)).unwrap_or_default();
                format!("{}&nbsp;&nbsp;{}", escape_art(art), text)
            })
            .collect();
        Ok(Reply::html(format!("<pre>{}</pre>", lines.join("<br />"))))
    }

    fn usage(&self) -> &'static str {
        NEOFETCH_HELP
    }

    fn summary(&self) -> &'static str {
        "show system information"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{ctx, run};
    use crate::output::Output;

    #[test]
    fn uptime_formatting() {
        assert_eq!(format_uptime(Duration::seconds(30)), "0 mins");
        assert_eq!(format_uptime(Duration::minutes(61)), "1 hour, 1 min");
        assert_eq!(format_uptime(Duration::minutes(2 * 1440 + 14)), "2 days, 14 mins");
    }

    #[test]
    fn renders_html_card() {
        let mut ctx = ctx();
        match run(&NeofetchCommand, &[], &mut ctx) {
            Output::Html(markup) => {
                assert!(markup.starts_with("<pre>"));
                assert!(markup.contains("user@portfolio.dev"));
                assert!(markup.contains("Theme: dark"));
            }
            other => panic!("expected html, got {:?}", other),
        }
    }
}
