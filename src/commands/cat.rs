use crate::command::{Command, CommandResult, Reply};
use crate::context::TerminalContext;
use crate::path::{self, PathError};
use crate::vfs::VfsNode;

pub struct CatCommand;

const CAT_HELP: &str = "Usage: cat FILE\nPrint the contents of FILE.\n\n      --help     display this help and exit";

impl Command for CatCommand {
    fn execute(&self, args: &[String], ctx: &mut TerminalContext) -> CommandResult {
        let arg = match args.first() {
            Some(arg) => arg,
            None => return Err("cat: missing file operand".to_string()),
        };

        let (dir_part, name) = path::split_target(arg);
        let dir = match dir_part {
            Some(dir) => path::resolve(&ctx.fs, &ctx.cwd, dir).map_err(|e| match e {
                PathError::NotFound(_) => format!("cat: {}: No such file or directory", arg),
                PathError::NotADirectory(_) => format!("cat: {}: Not a directory", arg),
            })?,
            None => ctx.cwd.clone(),
        };

        // `cat .` / `cat ..` / `cat ~`
        if name.is_empty() || name == "." || name == ".." || (dir_part.is_none() && name == crate::vfs::ROOT) {
            return Err(format!("cat: {}: Is a directory", arg));
        }

        match ctx.fs.resolve_contents(&dir.child(name)) {
            Some(VfsNode::File(file)) if file.html => Ok(Reply::html(file.body.clone())),
            Some(VfsNode::File(file)) => Ok(Reply::plain(file.body.clone())),
            Some(VfsNode::Directory(_)) => Err(format!("cat: {}: Is a directory", arg)),
            None => Err(format!("cat: {}: No such file or directory", arg)),
        }
    }

    fn usage(&self) -> &'static str {
        CAT_HELP
    }

    fn summary(&self) -> &'static str {
        "print a file"
    }

    fn completes_paths(&self) -> bool {
        true
    }
}
