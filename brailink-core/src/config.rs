//! Session configuration
//!
//! Supplied by the host when opening a session. Defaults match the timing
//! the displays were designed around.

use brailink_hal::SerialConfig;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Timing and retry parameters for one session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SessionConfig {
    /// Serial line settings applied before each handshake attempt
    pub serial: SerialConfig,
    /// Handshake attempts made by `open` before giving up
    pub open_attempts: u8,
    /// How long to wait for a description reply (ms)
    pub identify_wait_ms: u32,
    /// Timed read bound for each byte read (ms)
    pub read_timeout_ms: u32,
    /// Window in which a byte following 0x06 cancels the disconnect (ms)
    pub disconnect_grace_ms: u32,
    /// Re-probe interval while resetting (ms)
    pub resetting_timeout_ms: u32,
    /// Stall limit while waiting for the identifier (ms)
    pub identifying_timeout_ms: u32,
    /// Acknowledgement limit after a frame was sent (ms)
    pub writing_timeout_ms: u32,
    /// Same-state retries tolerated before giving up
    pub max_retries: u8,
    /// Polls before a held chord first repeats
    pub repeat_delay: u8,
    /// Polls between subsequent repeats
    pub repeat_interval: u8,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            serial: SerialConfig::default(),
            open_attempts: 3,
            identify_wait_ms: 1000,
            read_timeout_ms: 100,
            disconnect_grace_ms: 10,
            resetting_timeout_ms: 3000,
            identifying_timeout_ms: 1000,
            writing_timeout_ms: 1000,
            max_retries: 3,
            repeat_delay: 10,
            repeat_interval: 3,
        }
    }
}
