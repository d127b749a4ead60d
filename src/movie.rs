//! ASCII movie script parsing and playback.
//!
//! A script is plain text: a line holding only a number starts a frame and
//! gives its duration in ticks, the next [`FRAME_HEIGHT`] lines are the
//! frame body. Anything between frames that isn't a duration marker
//! (blank lines, stray text) is skipped.

pub const FRAME_HEIGHT: usize = 14;

#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub ticks: u32,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Movie {
    frames: Vec<Frame>,
}

impl Movie {
    pub fn parse(script: &str) -> Self {
        let mut frames = Vec::new();
        let mut lines = script.lines();
        while let Some(line) = lines.next() {
            let ticks = match line.trim().parse::<u32>() {
                Ok(t) => t.max(1),
                Err(_) => continue,
            };
            let mut body: Vec<String> = lines.by_ref().take(FRAME_HEIGHT).map(str::to_string).collect();
            // short trailing frame
            body.resize(FRAME_HEIGHT, String::new());
            frames.push(Frame { ticks, lines: body });
        }
        Movie { frames }
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Steps through a movie one frame at a time. The host owns the actual
/// timer and asks for the delay before each advance.
#[derive(Debug, Clone, PartialEq)]
pub struct MoviePlayer {
    movie: Movie,
    index: usize,
    tick_ms: u32,
}

impl MoviePlayer {
    pub fn new(movie: Movie, tick_ms: u32) -> Self {
        Self { movie, index: 0, tick_ms }
    }

    pub fn current(&self) -> Option<&Frame> {
        self.movie.frames.get(self.index)
    }

    /// how long the current frame stays up
    pub fn delay_ms(&self) -> Option<u32> {
        self.current().map(|f| f.ticks.saturating_mul(self.tick_ms))
    }

    /// Move to the next frame; `None` once the movie is over.
    pub fn advance(&mut self) -> Option<&Frame> {
        if self.index < self.movie.frames.len() {
            self.index += 1;
        }
        self.current()
    }

    pub fn position(&self) -> usize {
        self.index
    }

    pub fn is_finished(&self) -> bool {
        self.index >= self.movie.frames.len()
    }
}
