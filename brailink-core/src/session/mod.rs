//! Connection session
//!
//! The link state machine and the [`Session`] that drives it. Transitions
//! are pure; timing and retries live in [`StateTracker`].

pub mod events;
pub mod state;

mod link;
#[cfg(test)]
mod testing;

pub use events::LinkEvent;
pub use link::Session;
pub use state::{State, StateTracker};
