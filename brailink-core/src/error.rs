//! Driver errors
//!
//! Only `open` and the cell setters return errors. Faults detected while
//! polling are logged and drive the session to `Off` instead.

/// Errors surfaced to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The transport reported a failure
    Transport(E),
    /// The device accepted fewer bytes than were written
    TruncatedWrite { written: usize, expected: usize },
    /// No valid description reply within the configured attempts
    NoResponse,
    /// The device identified itself with an identifier not in the registry
    UnknownModel(u8),
    /// Cell slice length does not match the display geometry
    CellCount { expected: usize, actual: usize },
}
