//! The authored portfolio tree and the fixed strings shown around it.

use crate::vfs::{Directory, VirtualFileSystem};

/// First entry of the transcript for someone who has never visited.
pub const WELCOME: &str = "Welcome! This is an interactive terminal.\nType 'help' for a list of commands, or 'cat about-me.txt' to get started.";

const README: &str = "A selection of projects I've built over the last few years. \
Most of them are web apps and developer tools, a couple are hackathon entries. \
Each file has a short description and links to the live site and the code.";

const LEDGER: &str = "Ledger is a membership and attendance tracker for student clubs, with on-chain voting for club decisions.\
<br /><a target=\"blank\" href=\"https://ledger.example.org\">Check it out</a>\
<br /><a target=\"blank\" href=\"https://github.com/example/ledger\">Check out the code</a>";

const RANK_RUSH: &str = "A higher-or-lower guessing game built on film review scores.\
<br /><a target=\"blank\" href=\"https://rankrush.example.org\">Check it out</a>\
<br /><a target=\"blank\" href=\"https://github.com/example/rank-rush\">Check out the code</a>";

const THIS_WEBSITE: &str = "The fourth version of this site. The terminal is a small interpreter compiled to WebAssembly, \
with a read-only filesystem, command history and tab completion.";

const OLD_SITE: &str = "The first version of this site: a single static page and a lot of inline styles.";

const ABOUT_ME: &str = "Hi, I'm Sam Doe. I study Computer Science and Economics and spend most of my free time \
building things for the web. I run a campus developer club and like working on projects that other people \
actually use. If you want to build something together, get in touch (cat socials.txt).";

const SOCIALS: &str = "Twitter: <a target=\"blank\" href=\"https://x.com/example\">@example</a>\
<br />Github: <a target=\"blank\" href=\"https://github.com/example\">example</a>";

const HELP_TXT: &str = "Start with 'help' to see every command. 'ls' lists files, 'cd' moves around, \
'cat' prints a file. Tab completes, the arrow keys walk through history.";

const SECRET: &str = "&nbsp;&nbsp;&nbsp;___<br />&nbsp;&nbsp;/&nbsp;&nbsp;&nbsp;\\<br />&nbsp;|&nbsp;o&nbsp;o&nbsp;|<br />&nbsp;|&nbsp;&nbsp;&gt;&nbsp;&nbsp;|<br />&nbsp;&nbsp;\\___/<br />you found the hidden file";

pub fn portfolio() -> VirtualFileSystem {
    let projects = Directory::new()
        .with_file("README.md", README)
        .with_html("ledger.txt", LEDGER)
        .with_html("rank-rush.txt", RANK_RUSH)
        .with_file("this-website.txt", THIS_WEBSITE)
        .with_dir("archive", Directory::new().with_file("old-site.txt", OLD_SITE));

    VirtualFileSystem::new(
        Directory::new()
            .with_dir("projects", projects)
            .with_file("about-me.txt", ABOUT_ME)
            .with_html("socials.txt", SOCIALS)
            .with_file("help.txt", HELP_TXT)
            .with_html(".secret.txt", SECRET),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::PathStack;
    use crate::vfs::VfsNode;

    #[test]
    fn root_layout() {
        let fs = portfolio();
        let root = fs.resolve_dir(&PathStack::root()).unwrap();
        assert_eq!(
            root.names().collect::<Vec<_>>(),
            vec!["projects", "about-me.txt", "socials.txt", "help.txt", ".secret.txt"]
        );
    }

    #[test]
    fn authored_files_resolve_to_their_bodies() {
        let fs = portfolio();
        let path = PathStack::root().child("projects").child("archive").child("old-site.txt");
        match fs.resolve_contents(&path) {
            Some(VfsNode::File(file)) => assert_eq!(file.body, OLD_SITE),
            other => panic!("unexpected node {:?}", other),
        }
    }
}
