// portfolio terminal: a fake shell over a read-only filesystem,
// built natively for tests and to wasm for the browser widget
pub mod assets;
pub mod autocomplete;
pub mod command;
pub mod commands;
pub mod config;
pub mod content;
pub mod context;
pub mod error;
pub mod history;
pub mod market;
pub mod movie;
pub mod output;
pub mod path;
pub mod session;
pub mod storage;
pub mod takeover;
pub mod vfs;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use command::{Command, CommandRegistry, CommandResult, Reply, TakeoverTrigger};
pub use config::TerminalConfig;
pub use context::{TerminalContext, Theme};
pub use output::{Output, OutputEntry, Takeover};
pub use session::{Session, SessionView, Submission};
