//! Cell update frames
//!
//! Frame format:
//! - START (0-2 bytes): model-specific header, normally 0x01
//! - STATUS (0-4 bytes): status cells, device dot order
//! - MAIN (1-80 bytes): main cells, device dot order
//! - END (0-2 bytes): model-specific trailer
//!
//! There is no length field or checksum; the device knows its own geometry.

use heapless::Vec;

/// Largest main cell count of any supported display
pub const MAX_MAIN_CELLS: usize = 80;

/// Largest status cell count of any supported display
pub const MAX_STATUS_CELLS: usize = 4;

/// Longest start, end or stop sequence
pub const MAX_ENVELOPE_SIZE: usize = 2;

/// Maximum complete frame size
pub const MAX_FRAME_SIZE: usize = MAX_ENVELOPE_SIZE + MAX_STATUS_CELLS + MAX_MAIN_CELLS + MAX_ENVELOPE_SIZE;

/// Errors that can occur while building a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Envelope and cells exceed the frame capacity
    BufferTooSmall,
}

/// Model-specific bytes wrapped around cell data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Envelope {
    /// Sent before the status cells
    pub start: &'static [u8],
    /// Sent after the main cells
    pub end: &'static [u8],
}

/// One complete cell update, ready for the wire
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    bytes: Vec<u8, MAX_FRAME_SIZE>,
}

impl Frame {
    /// Concatenate envelope start, status cells, main cells and envelope end
    ///
    /// Cells must already be in device dot order.
    pub fn build(envelope: &Envelope, status: &[u8], main: &[u8]) -> Result<Self, FrameError> {
        let mut bytes = Vec::new();
        for part in [envelope.start, status, main, envelope.end] {
            bytes
                .extend_from_slice(part)
                .map_err(|_| FrameError::BufferTooSmall)?;
        }
        Ok(Self { bytes })
    }

    /// Encoded frame bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
