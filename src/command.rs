use std::collections::HashMap;
use std::fmt;

use futures::future::LocalBoxFuture;

use crate::context::TerminalContext;
use crate::output::Output;

/// What a handler hands back: an output right away, or a computation the
/// host has to await (network lookups, asset fetches).
pub enum Reply {
    Ready(Output),
    Pending(LocalBoxFuture<'static, Output>),
}

impl Reply {
    pub fn plain(text: impl Into<String>) -> Self {
        Reply::Ready(Output::plain(text))
    }

    pub fn html(markup: impl Into<String>) -> Self {
        Reply::Ready(Output::html(markup))
    }

    pub fn silent() -> Self {
        Reply::Ready(Output::Silent)
    }
}

impl From<Output> for Reply {
    fn from(output: Output) -> Self {
        Reply::Ready(output)
    }
}

impl fmt::Debug for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Ready(output) => f.debug_tuple("Ready").field(output).finish(),
            Reply::Pending(_) => f.write_str("Pending(..)"),
        }
    }
}

/// `Err` is a user-facing message ("cat: x: No such file or directory");
/// the dispatcher shows it as plain output.
pub type CommandResult = Result<Reply, String>;

/// Declares that a command switches the screen into a takeover mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TakeoverTrigger {
    /// label for the animated loading indicator; `None` starts the mode
    /// as soon as the output arrives
    pub loading: Option<&'static str>,
}

/// Handler contract: `execute` runs synchronously against the context and
/// may return a pending computation for anything slow. `--help` never
/// reaches `execute`; the dispatcher answers it with `usage`.
pub trait Command {
    fn execute(&self, args: &[String], ctx: &mut TerminalContext) -> CommandResult;

    fn usage(&self) -> &'static str;

    /// one line for the `help` listing
    fn summary(&self) -> &'static str;

    fn takeover(&self) -> Option<TakeoverTrigger> {
        None
    }

    /// completes its last argument against the current directory
    fn completes_paths(&self) -> bool {
        false
    }

    /// fixed argument values offered by autocomplete
    fn options(&self) -> &'static [&'static str] {
        &[]
    }
}

pub struct CommandRegistry {
    commands: HashMap<String, Box<dyn Command + Send + Sync>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self { commands: HashMap::new() }
    }

    pub fn register_command(&mut self, name: &str, cmd: Box<dyn Command + Send + Sync>) {
        self.commands.insert(name.to_string(), cmd);
    }

    pub fn get(&self, name: &str) -> Option<&(dyn Command + Send + Sync)> {
        self.commands.get(name).map(|cmd| cmd.as_ref())
    }

    pub fn get_command_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.commands.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn default_commands() -> Self {
        use crate::commands::*;

        let mut reg = Self::new();
        reg.register_command("help", Box::new(help::HelpCommand));
        reg.register_command("ls", Box::new(ls::LsCommand));
        reg.register_command("cd", Box::new(cd::CdCommand));
        reg.register_command("cat", Box::new(cat::CatCommand));
        reg.register_command("pwd", Box::new(pwd::PwdCommand));
        reg.register_command("clear", Box::new(clear::ClearCommand));
        reg.register_command("echo", Box::new(echo::EchoCommand));
        reg.register_command("date", Box::new(date::DateCommand));
        reg.register_command("whoami", Box::new(whoami::WhoamiCommand));
        reg.register_command("history", Box::new(history::HistoryCommand));
        reg.register_command("theme", Box::new(theme::ThemeCommand));
        reg.register_command("model", Box::new(model::ModelCommand));
        reg.register_command("neofetch", Box::new(neofetch::NeofetchCommand));
        reg.register_command("crypto", Box::new(crypto::CryptoCommand));
        reg.register_command("snake", Box::new(snake::SnakeCommand));
        reg.register_command("starwars", Box::new(starwars::StarwarsCommand));
        reg.register_command("touch", Box::new(touch::TouchCommand));
        reg.register_command("mkdir", Box::new(mkdir::MkdirCommand));
        reg.register_command("rmdir", Box::new(rmdir::RmdirCommand));
        reg
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::default_commands()
    }
}

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub name: String,
    pub args: Vec<String>,
}

/// Whitespace split, no quoting. `None` for blank input.
pub fn parse(input: &str) -> Option<Invocation> {
    let mut parts = input.split_whitespace();
    let name = parts.next()?.to_string();
    let args = parts.map(str::to_string).collect();
    Some(Invocation { name, args })
}

/// Result of dispatching one line.
#[derive(Debug)]
pub struct Dispatched {
    pub reply: Reply,
    pub trigger: Option<TakeoverTrigger>,
}

pub fn not_found(name: &str) -> String {
    format!("Command not found: {}. Type 'help' for a list of available commands.", name)
}

pub fn run_command(input: &str, ctx: &mut TerminalContext, registry: &CommandRegistry) -> Option<Dispatched> {
    let Invocation { name, args } = parse(input)?;

    let command = match registry.get(&name) {
        Some(cmd) => cmd,
        None => {
            tracing::debug!(command = %name, "unknown command");
            return Some(Dispatched { reply: Reply::plain(not_found(&name)), trigger: None });
        }
    };

    if args.iter().any(|a| a == "--help") {
        return Some(Dispatched { reply: Reply::plain(command.usage()), trigger: None });
    }

    tracing::debug!(command = %name, args = args.len(), "dispatch");
    let reply = match command.execute(&args, ctx) {
        Ok(reply) => reply,
        Err(msg) => Reply::plain(msg),
    };
    Some(Dispatched { reply, trigger: command.takeover() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TerminalConfig;
    use crate::content;
    use std::rc::Rc;

    fn ctx() -> TerminalContext {
        TerminalContext::new(Rc::new(content::portfolio()), TerminalConfig::default())
    }

    fn ready(d: Option<Dispatched>) -> Output {
        match d.expect("dispatched").reply {
            Reply::Ready(out) => out,
            Reply::Pending(_) => panic!("expected a ready reply"),
        }
    }

    #[test]
    fn parse_splits_on_whitespace() {
        let inv = parse("  cd   projects  ").unwrap();
        assert_eq!(inv.name, "cd");
        assert_eq!(inv.args, vec!["projects"]);
        assert!(parse("   ").is_none());
    }

    #[test]
    fn blank_input_dispatches_nothing() {
        let registry = CommandRegistry::default_commands();
        assert!(run_command("", &mut ctx(), &registry).is_none());
    }

    #[test]
    fn unknown_command_points_at_help() {
        let registry = CommandRegistry::default_commands();
        let out = ready(run_command("sudo rm -rf /", &mut ctx(), &registry));
        assert_eq!(
            out,
            Output::plain("Command not found: sudo. Type 'help' for a list of available commands.")
        );
    }

    #[test]
    fn help_flag_short_circuits_every_command() {
        let registry = CommandRegistry::default_commands();
        for name in registry.get_command_names() {
            let mut ctx = ctx();
            let before = ctx.cwd.clone();
            let out = ready(run_command(&format!("{} nowhere --help", name), &mut ctx, &registry));
            let usage = registry.get(&name).unwrap().usage();
            assert_eq!(out, Output::plain(usage), "{}", name);
            assert_eq!(ctx.cwd, before);
        }
    }

    #[test]
    fn handler_errors_become_plain_output() {
        let registry = CommandRegistry::default_commands();
        let out = ready(run_command("cat", &mut ctx(), &registry));
        assert_eq!(out, Output::plain("cat: missing file operand"));
    }

    #[test]
    fn takeover_is_declared_on_the_command() {
        let registry = CommandRegistry::default_commands();
        let d = run_command("snake", &mut ctx(), &registry).unwrap();
        assert_eq!(d.trigger, Some(TakeoverTrigger { loading: None }));
        let d = run_command("ls", &mut ctx(), &registry).unwrap();
        assert_eq!(d.trigger, None);
    }
}
