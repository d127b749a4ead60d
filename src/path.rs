use std::fmt;

use thiserror::Error;

use crate::vfs::{VfsNode, VirtualFileSystem, ROOT};

/// Directory names from the root down to the current location.
/// Never empty - the root segment can't be popped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathStack(Vec<String>);

impl PathStack {
    pub fn root() -> Self {
        PathStack(vec![ROOT.to_string()])
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// last segment, used for the prompt
    pub fn current(&self) -> &str {
        self.0.last().map(String::as_str).unwrap_or(ROOT)
    }

    pub fn is_root(&self) -> bool {
        self.0.len() == 1
    }

    pub fn child(&self, name: &str) -> Self {
        let mut next = self.clone();
        next.0.push(name.to_string());
        next
    }

    /// `..` - a no-op at the root
    pub fn pop(&mut self) {
        if !self.is_root() {
            self.0.pop();
        }
    }

    pub fn reset(&mut self) {
        self.0.truncate(1);
    }
}

impl Default for PathStack {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for PathStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("/"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("{0}: No such file or directory")]
    NotFound(String),
    #[error("{0}: Not a directory")]
    NotADirectory(String),
}

/// Resolve a `/`-separated directory argument against `from`.
///
/// Empty segments are skipped, `.` stays put, `..` climbs (never above the
/// root) and a leading `~` restarts from the root. Every other segment must
/// name a directory. Errors always carry the argument exactly as typed;
/// `from` is never touched, the caller commits the returned stack.
pub fn resolve(fs: &VirtualFileSystem, from: &PathStack, arg: &str) -> Result<PathStack, PathError> {
    let mut next = from.clone();
    for (i, segment) in arg.split('/').filter(|s| !s.is_empty()).enumerate() {
        match segment {
            "." => {}
            ".." => next.pop(),
            ROOT if i == 0 => next.reset(),
            name => {
                let candidate = next.child(name);
                match fs.resolve_contents(&candidate) {
                    Some(VfsNode::Directory(_)) => next = candidate,
                    Some(VfsNode::File(_)) => return Err(PathError::NotADirectory(arg.to_string())),
                    None => return Err(PathError::NotFound(arg.to_string())),
                }
            }
        }
    }
    Ok(next)
}

/// Split `dir/part/name` into the directory to resolve and the final name.
/// A bare name has no directory part.
pub fn split_target(arg: &str) -> (Option<&str>, &str) {
    let trimmed = arg.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(idx) => (Some(&trimmed[..idx + 1]), &trimmed[idx + 1..]),
        None => (None, trimmed),
    }
}
