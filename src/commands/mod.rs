pub mod cat;
pub mod cd;
pub mod clear;
pub mod crypto;
pub mod date;
pub mod echo;
pub mod help;
pub mod history;
pub mod ls;
pub mod mkdir;
pub mod model;
pub mod neofetch;
pub mod pwd;
pub mod rmdir;
pub mod snake;
pub mod starwars;
pub mod theme;
pub mod touch;
pub mod whoami;

/// The tree is read-only; every write command answers the same way.
pub(crate) fn permission_denied(cmd: &str, verb: &str, args: &[String]) -> Result<crate::command::Reply, String> {
    let targets: Vec<&String> = args.iter().filter(|a| !a.starts_with('-')).collect();
    if targets.is_empty() {
        return Err(format!("{}: missing operand", cmd));
    }
    let lines: Vec<String> = targets
        .iter()
        .map(|t| format!("{}: cannot {} '{}': Permission denied", cmd, verb, t))
        .collect();
    Err(lines.join("\n"))
}
