//! Model registry
//!
//! The device family is closed: a display whose identifier is missing from
//! [`MODELS`] cannot be driven. Support for new hardware is added here, not
//! guessed at runtime.

use brailink_protocol::wire::{BOOKWORM_BRAILLE_END, BOOKWORM_STOP, BRAILLE_START};
use brailink_protocol::Envelope;

use crate::keys::Keyset;

/// How a model's key bytes are interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ByteDecoder {
    /// One byte per key transition, chords resolved through a keyset
    KeyBits(Keyset),
    /// Four buttons combined into one byte value per transition
    Bookworm,
}

/// Static description of one display model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModelDescriptor {
    pub name: &'static str,
    /// Byte reported after the description header
    pub identifier: u8,
    /// Number of main cells
    pub columns: u8,
    /// Number of status cells
    pub status_cells: u8,
    /// Host help page for this model's key layout
    pub help_page: u8,
    pub decoder: ByteDecoder,
    /// Sent before cell data
    pub braille_start: &'static [u8],
    /// Sent after cell data
    pub braille_end: &'static [u8],
    /// Sent once when the session closes
    pub stop: &'static [u8],
}

impl ModelDescriptor {
    /// Keyset used for chords, if the model decodes key bits
    pub fn keyset(&self) -> Option<Keyset> {
        match self.decoder {
            ByteDecoder::KeyBits(keyset) => Some(keyset),
            ByteDecoder::Bookworm => None,
        }
    }

    /// Frame envelope for cell updates
    pub fn envelope(&self) -> Envelope {
        Envelope {
            start: self.braille_start,
            end: self.braille_end,
        }
    }
}

const fn key_bits(
    name: &'static str,
    identifier: u8,
    columns: u8,
    status_cells: u8,
    help_page: u8,
    keyset: Keyset,
) -> ModelDescriptor {
    ModelDescriptor {
        name,
        identifier,
        columns,
        status_cells,
        help_page,
        decoder: ByteDecoder::KeyBits(keyset),
        braille_start: &BRAILLE_START,
        braille_end: &[],
        stop: &[],
    }
}

/// Every supported display
pub static MODELS: [ModelDescriptor; 8] = [
    key_bits("Modular 20+4", 0x80, 20, 4, 0, Keyset::Modular),
    key_bits("Modular 40+4", 0x89, 40, 4, 0, Keyset::Modular),
    key_bits("Modular 80+4", 0x88, 80, 4, 0, Keyset::Modular),
    key_bits("Braille Wave", 0x05, 40, 0, 0, Keyset::BrailleWave),
    ModelDescriptor {
        name: "Bookworm",
        identifier: 0x90,
        columns: 8,
        status_cells: 0,
        help_page: 1,
        decoder: ByteDecoder::Bookworm,
        braille_start: &BRAILLE_START,
        braille_end: &BOOKWORM_BRAILLE_END,
        stop: &BOOKWORM_STOP,
    },
    key_bits("Braillino", 0x72, 20, 0, 2, Keyset::BrailleStar),
    key_bits("Braille Star 40", 0x74, 40, 0, 2, Keyset::BrailleStar),
    key_bits("Braille Star 80", 0x78, 80, 0, 2, Keyset::BrailleStar),
];

/// Look up a model by the identifier it reports
pub fn resolve(identifier: u8) -> Option<&'static ModelDescriptor> {
    MODELS.iter().find(|model| model.identifier == identifier)
}
