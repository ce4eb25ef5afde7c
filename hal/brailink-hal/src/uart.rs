//! Serial link abstractions
//!
//! Timed, blocking primitives. Every call is bounded by a timeout so the
//! session's poll never blocks indefinitely.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Byte-stream transport to a braille display
pub trait SerialPort {
    /// Error type for transport operations
    type Error;

    /// (Re)apply line settings and discard pending input
    fn reset(&mut self, config: &SerialConfig) -> Result<(), Self::Error>;

    /// Read up to `buf.len()` bytes, waiting at most `timeout_ms` for the
    /// first byte.
    ///
    /// Returns the number of bytes read; `Ok(0)` means nothing arrived.
    fn read_timed(&mut self, buf: &mut [u8], timeout_ms: u32) -> Result<usize, Self::Error>;

    /// Write `data`, returning how many bytes the device accepted
    fn write_all(&mut self, data: &[u8]) -> Result<usize, Self::Error>;

    /// Wait up to `timeout_ms` for input to become readable
    fn await_readable(&mut self, timeout_ms: u32) -> bool;

    /// Read a single byte, `Ok(None)` on timeout
    fn read_byte(&mut self, timeout_ms: u32) -> Result<Option<u8>, Self::Error> {
        let mut buf = [0u8; 1];
        match self.read_timed(&mut buf, timeout_ms)? {
            0 => Ok(None),
            _ => Ok(Some(buf[0])),
        }
    }
}

/// Serial line configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SerialConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Number of data bits (typically 8)
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Number of stop bits
    pub stop_bits: StopBits,
}

impl Default for SerialConfig {
    /// 19200 baud, 8 data bits, odd parity, one stop bit
    fn default() -> Self {
        Self {
            baudrate: 19200,
            data_bits: DataBits::Eight,
            parity: Parity::Odd,
            stop_bits: StopBits::One,
        }
    }
}

/// Number of data bits per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DataBits {
    Seven,
    Eight,
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StopBits {
    One,
    Two,
}
