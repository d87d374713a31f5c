use crate::engine::{Change, SessionToken};
use crossterm::event::Event as CrosstermEvent;

/// Which half of a draw a timer belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// End of the spin: decide the number.
    Resolve,
    /// End of the pause between auto draws: start the next spin.
    Continue,
}

#[derive(Debug)]
pub enum AppEvent {
    /// Terminal input event
    Terminal(CrosstermEvent),

    /// A scheduled draw timer fired
    DrawTimer { kind: TimerKind, token: SessionToken },

    /// Engine state changed
    EngineChanged(Change),

    /// A draw finished with this number
    Resolved(i64),

    /// Tick for UI refresh
    Tick,
}
