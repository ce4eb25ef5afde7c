//! Link state machine
//!
//! Transitions are a pure function of the current state and an event. The
//! [`StateTracker`] adds what the recovery logic needs on top: time spent in
//! the current state and how many times in a row it was re-entered.

use super::events::LinkEvent;

/// Link states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// No usable link; also the state after any failure
    Off,
    /// Describe probe sent, waiting for the device to answer
    Resetting,
    /// Description header seen, waiting for the identifier
    Identifying,
    /// Idle, frames may be sent
    Ready,
    /// Frame sent, waiting for the acknowledgement
    Writing,
}

impl State {
    /// Check if the device is attached and identified
    pub fn is_connected(&self) -> bool {
        matches!(self, State::Ready | State::Writing)
    }

    /// Check if a new frame may be sent
    pub fn accepts_frames(&self) -> bool {
        matches!(self, State::Ready)
    }

    /// Next state for an event, `None` if the event does not apply
    ///
    /// `Some(self)` is a deliberate re-entry and counts as a retry.
    pub fn transition(self, event: LinkEvent) -> Option<Self> {
        use LinkEvent::*;
        use State::*;

        match (self, event) {
            (Off, Opened) => Some(Ready),

            // The device may re-announce itself at any time
            (_, DescriptionHeader) => Some(Identifying),
            (Identifying, Identified) => Some(Ready),

            (Ready | Writing, FrameSent) => Some(Writing),
            (Writing, Acknowledged) => Some(Ready),

            (Resetting | Identifying | Writing, Probed) => Some(Resetting),

            (Off, Disconnect) => None,
            (_, Disconnect | LinkFault | RetriesExhausted) => Some(Off),

            _ => None,
        }
    }
}

/// Current state plus entry timer and retry counter
#[derive(Debug, Clone)]
pub struct StateTracker {
    state: State,
    elapsed_ms: u32,
    retries: u8,
}

impl Default for StateTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl StateTracker {
    pub fn new() -> Self {
        Self {
            state: State::Off,
            elapsed_ms: 0,
            retries: 0,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Time since the state was last entered
    pub fn elapsed_ms(&self) -> u32 {
        self.elapsed_ms
    }

    /// Consecutive re-entries of the current state
    pub fn retries(&self) -> u8 {
        self.retries
    }

    /// Advance the state timer
    pub fn tick(&mut self, delta_ms: u32) {
        self.elapsed_ms = self.elapsed_ms.saturating_add(delta_ms);
    }

    /// Enter a state, counting a retry if it is the current one
    pub fn enter(&mut self, state: State) {
        if state == self.state {
            self.retries = self.retries.saturating_add(1);
        } else {
            self.retries = 0;
            self.state = state;
        }
        self.elapsed_ms = 0;
    }

    /// Apply an event; returns the state entered, if any
    pub fn apply(&mut self, event: LinkEvent) -> Option<State> {
        let next = self.state.transition(event)?;
        self.enter(next);
        Some(next)
    }
}
