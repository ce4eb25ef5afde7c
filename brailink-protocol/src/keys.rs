//! Key byte classification
//!
//! Every key transition arrives as one byte. The high bit marks a release;
//! the remaining code selects a routing key, a status key or a front key
//! depending on which range it falls in. The routing and status ranges
//! depend on the connected model's geometry.

use crate::wire::{FRONT_KEY_LIMIT, KEY_RELEASE, KEY_ROUTING, KEY_STATUS};

/// Which physical key a byte refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyCode {
    /// Routing key above a main cell
    Routing(u8),
    /// Key beside a status cell
    Status(u8),
    /// Front panel key, identified by its bit position
    Front(u8),
}

/// A decoded key transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyByte {
    pub code: KeyCode,
    pub released: bool,
}

impl KeyByte {
    /// Classify a raw byte for a display with the given geometry
    ///
    /// Ranges are checked routing first, then status, then front keys.
    /// Returns `None` for bytes outside every range.
    pub fn classify(byte: u8, columns: u8, status_cells: u8) -> Option<Self> {
        let released = byte & KEY_RELEASE != 0;
        let base = byte & !KEY_RELEASE;

        let code = if in_range(base, KEY_ROUTING, columns) {
            KeyCode::Routing(base - KEY_ROUTING)
        } else if in_range(base, KEY_STATUS, status_cells) {
            KeyCode::Status(base - KEY_STATUS)
        } else if base < FRONT_KEY_LIMIT {
            KeyCode::Front(base)
        } else {
            return None;
        };

        Some(Self { code, released })
    }
}

fn in_range(code: u8, first: u8, count: u8) -> bool {
    code >= first && u16::from(code) < u16::from(first) + u16::from(count)
}

/// Single-bit mask for a front key bit position
#[inline]
pub const fn front_mask(bit: u8) -> u32 {
    1 << (bit as u32 & 0x1F)
}
