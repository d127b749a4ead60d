//! One terminal session: the context commands run against, the visible
//! transcript, history browsing, completion and takeover state.
//!
//! The session never waits on anything itself. A command that needs a
//! collaborator comes back as [`Submission::Pending`]; the host drives the
//! future and hands the result to [`Session::resolve`]. Timers work the
//! same way: the host sleeps and calls [`Session::tick`] or
//! [`Session::advance_frame`] with the epoch it started under.

use std::rc::Rc;

use futures::future::LocalBoxFuture;
use serde::Serialize;

use crate::autocomplete::{Autocomplete, Completion};
use crate::command::{self, CommandRegistry, Reply, TakeoverTrigger};
use crate::content::WELCOME;
use crate::context::{Palette, TerminalContext, Theme};
use crate::history::HistoryCursor;
use crate::output::{self, Output, OutputEntry, Presentation};
use crate::storage::{self, Storage};
use crate::takeover::{ActiveTakeover, TakeoverMachine, TakeoverState, Transition};

pub struct PendingCommand {
    pub ticket: u64,
    pub future: LocalBoxFuture<'static, Output>,
}

impl std::fmt::Debug for PendingCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingCommand").field("ticket", &self.ticket).finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub enum Submission {
    /// blank line, nothing happened
    Ignored,
    /// a command is still pending or a takeover mode owns the screen
    Busy,
    Completed,
    Pending(PendingCommand),
}

pub struct Session {
    ctx: TerminalContext,
    registry: Rc<CommandRegistry>,
    transcript: Vec<OutputEntry>,
    cursor: HistoryCursor,
    autocomplete: Autocomplete,
    takeover: TakeoverMachine,
    storage: Box<dyn Storage>,
    pending: Option<u64>,
    next_ticket: u64,
}

impl Session {
    pub fn new(ctx: TerminalContext, storage: Box<dyn Storage>) -> Self {
        Self::with_registry(ctx, Rc::new(CommandRegistry::default_commands()), storage)
    }

    pub fn with_registry(mut ctx: TerminalContext, registry: Rc<CommandRegistry>, mut storage: Box<dyn Storage>) -> Self {
        let cfg = &ctx.config;
        ctx.history = storage::load_history(storage.as_ref(), &cfg.history_key, cfg.history_capacity);

        let mut transcript = Vec::new();
        if !storage::has_visited(storage.as_ref(), &cfg.visited_key) {
            transcript.push(OutputEntry::Plain(WELCOME.to_string()));
            storage::mark_visited(storage.as_mut(), &cfg.visited_key);
        }

        let takeover = TakeoverMachine::new(cfg.frame_tick_ms);
        ctx.set_command_registry(Rc::clone(&registry));
        tracing::debug!(history = ctx.history.len(), commands = registry.get_command_names().len(), "session started");

        Self {
            autocomplete: Autocomplete::from_registry(&registry),
            ctx,
            registry,
            transcript,
            cursor: HistoryCursor::default(),
            takeover,
            storage,
            pending: None,
            next_ticket: 0,
        }
    }

    /// Run one input line. The echo goes into the transcript before the
    /// command runs, so it always precedes the command's own result.
    pub fn submit(&mut self, input: &str) -> Submission {
        if self.is_busy() {
            return Submission::Busy;
        }
        let line = input.trim();
        if line.is_empty() {
            return Submission::Ignored;
        }

        self.transcript.push(OutputEntry::Echo { prompt: self.ctx.prompt(), input: line.to_string() });
        self.ctx.history.record(line);
        self.cursor.reset();

        let dispatched = command::run_command(line, &mut self.ctx, &self.registry);
        self.persist_history();
        let dispatched = match dispatched {
            Some(d) => d,
            None => return Submission::Completed,
        };

        if let Some(TakeoverTrigger { loading: Some(label) }) = dispatched.trigger {
            let cfg = &self.ctx.config;
            if cfg.loading_delay_ms > 0 {
                self.takeover.start_loading(label, cfg.loading_delay_ms, cfg.loading_tick_ms);
            }
        }

        match dispatched.reply {
            Reply::Ready(out) => {
                self.present(out);
                Submission::Completed
            }
            Reply::Pending(future) => {
                let ticket = self.next_ticket;
                self.next_ticket += 1;
                self.pending = Some(ticket);
                Submission::Pending(PendingCommand { ticket, future })
            }
        }
    }

    /// Deliver a pending command's result. Returns false (and drops the
    /// output) when the ticket is no longer the outstanding one.
    pub fn resolve(&mut self, ticket: u64, output: Output) -> bool {
        if self.pending != Some(ticket) {
            tracing::debug!(ticket, "dropping stale command result");
            return false;
        }
        self.pending = None;
        self.present(output);
        true
    }

    fn present(&mut self, output: Output) {
        match output::present(output) {
            Presentation::EnterTakeover(takeover) => {
                if self.takeover.deliver(takeover) == Transition::Entered {
                    self.transcript.clear();
                }
            }
            other => {
                // anything but a takeover ends a loading phase early
                self.takeover.abort_loading();
                match other {
                    Presentation::Append(entry) => self.transcript.push(entry),
                    Presentation::Clear => self.transcript.clear(),
                    _ => {}
                }
            }
        }
    }

    fn persist_history(&mut self) {
        let key = self.ctx.config.history_key.clone();
        storage::save_history(self.storage.as_mut(), &key, &self.ctx.history);
    }

    /// Loading-indicator timer. Entering the takeover clears the transcript.
    pub fn tick(&mut self, epoch: u64, elapsed_ms: u32) -> Transition {
        let t = self.takeover.tick(epoch, elapsed_ms);
        if t == Transition::Entered {
            self.transcript.clear();
        }
        t
    }

    pub fn advance_frame(&mut self, epoch: u64) -> Transition {
        self.takeover.advance_frame(epoch)
    }

    /// The exit gesture (Ctrl+C). Leaving a loading phase also drops the
    /// result of the command that started it.
    pub fn exit_takeover(&mut self) -> Transition {
        if matches!(self.takeover.state(), TakeoverState::Loading(_)) {
            self.pending = None;
        }
        self.takeover.exit()
    }

    pub fn history_older(&mut self) -> Option<String> {
        self.cursor.older(&self.ctx.history).map(str::to_string)
    }

    pub fn history_newer(&mut self) -> Option<String> {
        self.cursor.newer(&self.ctx.history).map(str::to_string)
    }

    pub fn complete(&self, input: &str) -> Completion {
        self.autocomplete.complete(input, &self.ctx.fs, &self.ctx.cwd)
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some() || !self.takeover.is_normal()
    }

    pub fn prompt(&self) -> String {
        self.ctx.prompt()
    }

    pub fn transcript(&self) -> &[OutputEntry] {
        &self.transcript
    }

    pub fn theme(&self) -> Theme {
        self.ctx.theme
    }

    pub fn viewer_visible(&self) -> bool {
        self.ctx.viewer_visible
    }

    pub fn takeover(&self) -> &TakeoverMachine {
        &self.takeover
    }

    pub fn epoch(&self) -> u64 {
        self.takeover.epoch()
    }

    pub fn context(&self) -> &TerminalContext {
        &self.ctx
    }

    pub fn history_cursor(&self) -> HistoryCursor {
        self.cursor
    }

    pub fn mode(&self) -> Mode {
        match self.takeover.state() {
            TakeoverState::Normal => Mode::Normal,
            TakeoverState::Loading(_) => Mode::Loading,
            TakeoverState::Active(ActiveTakeover::Snake) => Mode::Snake,
            TakeoverState::Active(ActiveTakeover::Movie(_)) => Mode::Movie,
        }
    }

    /// Everything the display surface needs to draw the current state.
    pub fn view(&self) -> SessionView {
        let mode = self.mode();
        let frame = self.takeover.current_frame().map(|f| f.lines.clone());
        SessionView {
            prompt: self.prompt(),
            entries: self.transcript.iter().map(OutputEntry::to_html).collect(),
            theme: self.ctx.theme,
            palette: self.ctx.theme.palette(),
            viewer_visible: self.ctx.viewer_visible,
            mode,
            indicator: self.takeover.indicator(),
            frame,
            busy: self.is_busy(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Normal,
    Loading,
    Snake,
    Movie,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub prompt: String,
    /// transcript entries, already escaped or sanitized
    pub entries: Vec<String>,
    pub theme: Theme,
    pub palette: Palette,
    pub viewer_visible: bool,
    pub mode: Mode,
    pub indicator: Option<String>,
    pub frame: Option<Vec<String>>,
    pub busy: bool,
}
