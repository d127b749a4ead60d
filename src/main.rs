use std::io::{self, Write};
use std::rc::Rc;
use std::thread;
use std::time::Duration;

use futures::executor::block_on;
use portfolio_terminal::assets::DirAssets;
use portfolio_terminal::session::{Mode, PendingCommand, Session, Submission};
use portfolio_terminal::storage::MemoryStorage;
use portfolio_terminal::takeover::Transition;
use portfolio_terminal::{content, TerminalConfig, TerminalContext};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn load_config() -> TerminalConfig {
    let path = match std::env::args().nth(1) {
        Some(path) => path,
        None => return TerminalConfig::default(),
    };
    let parsed = std::fs::read_to_string(&path)
        .map_err(|e| e.to_string())
        .and_then(|json| TerminalConfig::from_json(&json).map_err(|e| e.to_string()));
    match parsed {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::warn!("ignoring config {}: {}", path, e);
            TerminalConfig::default()
        }
    }
}

/// Print whatever was appended since `shown`.
fn flush_transcript(session: &Session, shown: &mut usize) {
    let entries = session.transcript();
    if entries.len() < *shown {
        // cleared
        print!("\x1b[2J\x1b[H");
        *shown = 0;
    }
    for entry in &entries[*shown..] {
        let text = entry.to_text();
        if !text.is_empty() {
            println!("{}", text);
        }
    }
    *shown = entries.len();
}

/// Drive loading and takeover modes to completion; there is no key
/// handling here, so snake is left straight away and movies play to the end.
fn run_takeover(session: &mut Session) {
    loop {
        let epoch = session.epoch();
        match session.mode() {
            Mode::Normal => return,
            Mode::Loading => {
                let tick = session.context().config.loading_tick_ms.max(1);
                if let Some(indicator) = session.takeover().indicator() {
                    print!("\r{}   ", indicator);
                    let _ = io::stdout().flush();
                }
                thread::sleep(Duration::from_millis(tick as u64));
                if session.tick(epoch, tick) == Transition::Entered {
                    println!();
                }
            }
            Mode::Snake => {
                println!("snake needs a browser; exiting");
                session.exit_takeover();
            }
            Mode::Movie => {
                let delay = session.takeover().frame_delay_ms().unwrap_or(0);
                if let Some(frame) = session.takeover().current_frame() {
                    print!("\x1b[2J\x1b[H{}", frame.lines.join("\n"));
                    let _ = io::stdout().flush();
                }
                thread::sleep(Duration::from_millis(delay as u64));
                session.advance_frame(epoch);
            }
        }
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let ctx = TerminalContext::new(Rc::new(content::portfolio()), load_config())
        .with_assets(Rc::new(DirAssets::new("assets")));
    let mut session = Session::new(ctx, Box::new(MemoryStorage::new()));
    let mut shown = 0;

    let stdin = io::stdin();
    loop {
        flush_transcript(&session, &mut shown);
        print!("{} ", session.prompt());
        if io::stdout().flush().is_err() {
            break;
        }
        let mut input = String::new();
        match stdin.read_line(&mut input) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        if input.trim() == "exit" {
            break;
        }

        // echo is already on screen from the terminal itself
        let before = session.transcript().len();
        let submission = session.submit(&input);
        if session.transcript().len() > before {
            shown += 1;
        }
        if let Submission::Pending(PendingCommand { ticket, future }) = submission {
            let output = block_on(future);
            session.resolve(ticket, output);
        }
        run_takeover(&mut session);
    }
}
