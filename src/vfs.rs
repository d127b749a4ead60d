use crate::path::PathStack;

/// name the root directory is addressed by
pub const ROOT: &str = "~";

#[derive(Debug, Clone, PartialEq)]
pub struct TextFile {
    pub body: String,
    /// body is markup meant to be rendered (links, line breaks), not escaped
    pub html: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum VfsNode {
    File(TextFile),
    Directory(Directory),
}

impl VfsNode {
    pub fn is_dir(&self) -> bool {
        matches!(self, VfsNode::Directory(_))
    }

    pub fn as_dir(&self) -> Option<&Directory> {
        match self {
            VfsNode::Directory(dir) => Some(dir),
            VfsNode::File(_) => None,
        }
    }
}

/// Directory entries keep the order they were authored in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Directory {
    entries: Vec<(String, VfsNode)>,
}

impl Directory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, name: &str, body: &str) -> Self {
        self.with(name, VfsNode::File(TextFile { body: body.to_string(), html: false }))
    }

    pub fn with_html(self, name: &str, body: &str) -> Self {
        self.with(name, VfsNode::File(TextFile { body: body.to_string(), html: true }))
    }

    pub fn with_dir(self, name: &str, dir: Directory) -> Self {
        self.with(name, VfsNode::Directory(dir))
    }

    // names are unique - a second entry with the same name replaces the first in place
    fn with(mut self, name: &str, node: VfsNode) -> Self {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = node,
            None => self.entries.push((name.to_string(), node)),
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&VfsNode> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, node)| node)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &VfsNode)> {
        self.entries.iter().map(|(n, node)| (n.as_str(), node))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Static, read-only tree. Built once and shared by every command;
/// there are deliberately no mutating operations.
#[derive(Debug, Clone)]
pub struct VirtualFileSystem {
    root: VfsNode,
}

impl VirtualFileSystem {
    pub fn new(root: Directory) -> Self {
        Self { root: VfsNode::Directory(root) }
    }

    pub fn root(&self) -> &VfsNode {
        &self.root
    }

    /// Walk `path` from the root. `None` means the path does not name
    /// anything (missing segment, or a segment below a file).
    pub fn resolve_contents(&self, path: &PathStack) -> Option<&VfsNode> {
        let mut segments = path.segments().iter();
        if segments.next().map(String::as_str) != Some(ROOT) {
            return None;
        }
        let mut node = &self.root;
        for segment in segments {
            match node {
                VfsNode::Directory(dir) => node = dir.get(segment)?,
                VfsNode::File(_) => return None,
            }
        }
        Some(node)
    }

    pub fn resolve_dir(&self, path: &PathStack) -> Option<&Directory> {
        self.resolve_contents(path).and_then(VfsNode::as_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> VirtualFileSystem {
        VirtualFileSystem::new(
            Directory::new()
                .with_dir("projects", Directory::new().with_file("a.txt", "alpha"))
                .with_file("readme.txt", "hello"),
        )
    }

    #[test]
    fn root_resolves_to_itself() {
        let fs = sample();
        let node = fs.resolve_contents(&PathStack::root()).unwrap();
        assert_eq!(node, fs.root());
    }

    #[test]
    fn nested_lookup() {
        let fs = sample();
        let path = PathStack::root().child("projects");
        let dir = fs.resolve_dir(&path).unwrap();
        assert_eq!(dir.names().collect::<Vec<_>>(), vec!["a.txt"]);
    }

    #[test]
    fn walking_through_a_file_fails() {
        let fs = sample();
        let path = PathStack::root().child("readme.txt").child("nope");
        assert!(fs.resolve_contents(&path).is_none());
    }

    #[test]
    fn missing_segment_fails() {
        let fs = sample();
        assert!(fs.resolve_contents(&PathStack::root().child("ghost")).is_none());
    }

    #[test]
    fn duplicate_names_replace_in_place() {
        let dir = Directory::new()
            .with_file("x", "1")
            .with_file("y", "2")
            .with_file("x", "3");
        assert_eq!(dir.names().collect::<Vec<_>>(), vec!["x", "y"]);
        assert_eq!(
            dir.get("x"),
            Some(&VfsNode::File(TextFile { body: "3".to_string(), html: false }))
        );
    }
}
