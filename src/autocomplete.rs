use std::collections::HashMap;

use crate::command::CommandRegistry;
use crate::path::PathStack;
use crate::vfs::VirtualFileSystem;

/// What a completion request did to the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// no match; input stays as it is
    None,
    /// single match; the new input line
    Replaced(String),
    /// several matches; input stays, the host may list these
    Candidates(Vec<String>),
}

#[derive(Debug, Clone, PartialEq)]
enum ArgSource {
    Paths,
    Options(Vec<String>),
}

/// Built once from the registry at session start.
#[derive(Debug, Clone, Default)]
pub struct Autocomplete {
    commands: Vec<String>,
    args: HashMap<String, ArgSource>,
}

impl Autocomplete {
    pub fn from_registry(registry: &CommandRegistry) -> Self {
        let commands = registry.get_command_names();
        let mut args = HashMap::new();
        for name in &commands {
            let Some(cmd) = registry.get(name) else { continue };
            if cmd.completes_paths() {
                args.insert(name.clone(), ArgSource::Paths);
            } else if !cmd.options().is_empty() {
                let opts = cmd.options().iter().map(|o| o.to_string()).collect();
                args.insert(name.clone(), ArgSource::Options(opts));
            }
        }
        Self { commands, args }
    }

    pub fn command_names(&self) -> &[String] {
        &self.commands
    }

    pub fn complete(&self, input: &str, fs: &VirtualFileSystem, cwd: &PathStack) -> Completion {
        let mut tokens: Vec<&str> = input.split(' ').collect();
        let last = match tokens.pop() {
            Some(last) => last,
            None => return Completion::None,
        };
        let first = tokens.iter().copied().find(|t| !t.is_empty());
        // blank line: nothing to complete
        if first.is_none() && last.is_empty() {
            return Completion::None;
        }

        let pool: Vec<String> = match first {
            None => self.commands.clone(),
            Some(cmd) => match self.args.get(cmd) {
                Some(ArgSource::Options(opts)) => opts.clone(),
                Some(ArgSource::Paths) => match fs.resolve_dir(cwd) {
                    Some(dir) => dir.names().map(str::to_string).collect(),
                    None => Vec::new(),
                },
                None => Vec::new(),
            },
        };
        let mut matches: Vec<String> = pool.into_iter().filter(|c| c.starts_with(last)).collect();
        match matches.len() {
            0 => Completion::None,
            1 => {
                let prefix_len = input.len() - last.len();
                let mut line = input[..prefix_len].to_string();
                line.push_str(&matches.remove(0));
                Completion::Replaced(line)
            }
            _ => Completion::Candidates(matches),
        }
    }
}
