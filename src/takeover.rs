use crate::movie::{Frame, MoviePlayer};
use crate::output::Takeover;

/// Loading phase shown before a takeover mode starts.
#[derive(Debug, Clone, PartialEq)]
pub struct Loading {
    label: String,
    elapsed_ms: u32,
    total_ms: u32,
    tick_ms: u32,
    payload: Option<Takeover>,
}

impl Loading {
    /// label with 0-3 animated dots
    pub fn indicator(&self) -> String {
        let step = if self.tick_ms == 0 { 0 } else { self.elapsed_ms / self.tick_ms };
        format!("{}{}", self.label, ".".repeat((step % 4) as usize))
    }

    fn ready(&self) -> bool {
        self.payload.is_some() && self.elapsed_ms >= self.total_ms
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ActiveTakeover {
    Snake,
    Movie(MoviePlayer),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum TakeoverState {
    #[default]
    Normal,
    Loading(Loading),
    Active(ActiveTakeover),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// nothing changed (or the tick belonged to an older mode)
    Stale,
    Waiting,
    Entered,
    Exited,
}

/// Normal -> Loading -> Active -> Normal.
///
/// Every transition bumps `epoch`. Timers started by the host carry the
/// epoch they were started under; once it moves on their ticks are
/// ignored, so a late callback can't advance a mode that already ended.
#[derive(Debug, Clone, PartialEq)]
pub struct TakeoverMachine {
    state: TakeoverState,
    epoch: u64,
    frame_tick_ms: u32,
}

impl TakeoverMachine {
    pub fn new(frame_tick_ms: u32) -> Self {
        Self { state: TakeoverState::Normal, epoch: 0, frame_tick_ms }
    }

    pub fn state(&self) -> &TakeoverState {
        &self.state
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn is_normal(&self) -> bool {
        matches!(self.state, TakeoverState::Normal)
    }

    pub fn indicator(&self) -> Option<String> {
        match &self.state {
            TakeoverState::Loading(loading) => Some(loading.indicator()),
            _ => None,
        }
    }

    pub fn current_frame(&self) -> Option<&Frame> {
        match &self.state {
            TakeoverState::Active(ActiveTakeover::Movie(player)) => player.current(),
            _ => None,
        }
    }

    pub fn frame_delay_ms(&self) -> Option<u32> {
        match &self.state {
            TakeoverState::Active(ActiveTakeover::Movie(player)) => player.delay_ms(),
            _ => None,
        }
    }

    pub fn start_loading(&mut self, label: &str, total_ms: u32, tick_ms: u32) {
        self.state = TakeoverState::Loading(Loading {
            label: label.to_string(),
            elapsed_ms: 0,
            total_ms,
            tick_ms,
            payload: None,
        });
        self.bump();
        tracing::debug!(epoch = self.epoch, label, "takeover loading");
    }

    /// Hand over the payload. Enters right away from Normal; from Loading it
    /// waits until the delay has also run out.
    pub fn deliver(&mut self, takeover: Takeover) -> Transition {
        match &mut self.state {
            TakeoverState::Loading(loading) => {
                loading.payload = Some(takeover);
                self.try_enter()
            }
            _ => {
                self.enter(takeover);
                Transition::Entered
            }
        }
    }

    /// The command behind a loading phase came back without a payload.
    pub fn abort_loading(&mut self) -> Transition {
        if matches!(self.state, TakeoverState::Loading(_)) {
            self.exit()
        } else {
            Transition::Stale
        }
    }

    pub fn tick(&mut self, epoch: u64, elapsed_ms: u32) -> Transition {
        if epoch != self.epoch {
            return Transition::Stale;
        }
        match &mut self.state {
            TakeoverState::Loading(loading) => {
                loading.elapsed_ms = loading.elapsed_ms.saturating_add(elapsed_ms);
                self.try_enter()
            }
            _ => Transition::Stale,
        }
    }

    /// Show the next movie frame. Finishing the movie exits the mode.
    pub fn advance_frame(&mut self, epoch: u64) -> Transition {
        if epoch != self.epoch {
            return Transition::Stale;
        }
        match &mut self.state {
            TakeoverState::Active(ActiveTakeover::Movie(player)) => {
                if player.advance().is_some() {
                    Transition::Waiting
                } else {
                    self.exit()
                }
            }
            _ => Transition::Stale,
        }
    }

    /// The exit gesture. Valid from Loading as well as Active.
    pub fn exit(&mut self) -> Transition {
        if self.is_normal() {
            return Transition::Stale;
        }
        self.state = TakeoverState::Normal;
        self.bump();
        tracing::debug!(epoch = self.epoch, "takeover exited");
        Transition::Exited
    }

    fn try_enter(&mut self) -> Transition {
        let ready = matches!(&self.state, TakeoverState::Loading(l) if l.ready());
        if !ready {
            return Transition::Waiting;
        }
        let previous = std::mem::take(&mut self.state);
        if let TakeoverState::Loading(Loading { payload: Some(takeover), .. }) = previous {
            self.enter(takeover);
        }
        Transition::Entered
    }

    fn enter(&mut self, takeover: Takeover) {
        self.state = TakeoverState::Active(match takeover {
            Takeover::Snake => ActiveTakeover::Snake,
            Takeover::Movie(movie) => ActiveTakeover::Movie(MoviePlayer::new(movie, self.frame_tick_ms)),
        });
        self.bump();
        tracing::debug!(epoch = self.epoch, "takeover active");
    }

    fn bump(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movie::{Movie, FRAME_HEIGHT};

    fn movie(frames: usize) -> Movie {
        let script: String = (0..frames)
            .map(|i| format!("{}\n{}", i + 1, "row\n".repeat(FRAME_HEIGHT)))
            .collect();
        Movie::parse(&script)
    }

    #[test]
    fn snake_goes_straight_in() {
        let mut m = TakeoverMachine::new(10);
        assert_eq!(m.deliver(Takeover::Snake), Transition::Entered);
        assert_eq!(m.state(), &TakeoverState::Active(ActiveTakeover::Snake));
        assert_eq!(m.exit(), Transition::Exited);
        assert!(m.is_normal());
    }

    #[test]
    fn loading_waits_for_delay_and_payload() {
        let mut m = TakeoverMachine::new(10);
        m.start_loading("Loading", 1000, 250);
        let epoch = m.epoch();
        assert_eq!(m.tick(epoch, 500), Transition::Waiting);
        assert_eq!(m.indicator().as_deref(), Some("Loading.."));
        assert_eq!(m.deliver(Takeover::Movie(movie(2))), Transition::Waiting);
        assert_eq!(m.tick(epoch, 500), Transition::Entered);
        assert!(matches!(m.state(), TakeoverState::Active(ActiveTakeover::Movie(_))));
    }

    #[test]
    fn payload_after_delay_enters_immediately() {
        let mut m = TakeoverMachine::new(10);
        m.start_loading("Loading", 100, 50);
        let epoch = m.epoch();
        assert_eq!(m.tick(epoch, 100), Transition::Waiting);
        assert_eq!(m.deliver(Takeover::Snake), Transition::Entered);
    }

    #[test]
    fn stale_ticks_are_ignored_after_exit() {
        let mut m = TakeoverMachine::new(10);
        m.start_loading("Loading", 100, 50);
        let epoch = m.epoch();
        m.exit();
        assert_eq!(m.tick(epoch, 1000), Transition::Stale);
        assert!(m.is_normal());
    }

    #[test]
    fn frames_advance_until_movie_ends() {
        let mut m = TakeoverMachine::new(10);
        m.deliver(Takeover::Movie(movie(2)));
        let epoch = m.epoch();
        assert_eq!(m.frame_delay_ms(), Some(10));
        assert_eq!(m.advance_frame(epoch), Transition::Waiting);
        assert_eq!(m.frame_delay_ms(), Some(20));
        assert_eq!(m.advance_frame(epoch), Transition::Exited);
        assert!(m.is_normal());
        // the old timer firing once more changes nothing
        assert_eq!(m.advance_frame(epoch), Transition::Stale);
    }

    #[test]
    fn abort_loading_returns_to_normal() {
        let mut m = TakeoverMachine::new(10);
        m.start_loading("Loading", 100, 50);
        assert_eq!(m.abort_loading(), Transition::Exited);
        assert!(m.is_normal());
        assert_eq!(m.abort_loading(), Transition::Stale);
    }
}
