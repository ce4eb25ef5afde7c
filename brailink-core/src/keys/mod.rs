//! Key decoding
//!
//! Turns raw key-transition bytes into logical commands. Front keys
//! accumulate into a chord that is interpreted once, when the first key of
//! the chord is released. Routing and status keys act immediately on press,
//! combined with whatever front keys are held at that moment.

pub mod bookworm;
pub mod modular;
pub mod star;

use brailink_protocol::keys::front_mask;
use brailink_protocol::{KeyByte, KeyCode};

use crate::command::Command;
use crate::model::{ByteDecoder, ModelDescriptor};

/// A set of keys pressed together
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyChord {
    /// Front key bitmask
    pub front: u32,
    /// Routing key column, if one was pressed
    pub column: Option<u8>,
    /// Status key index, if one was pressed
    pub status: Option<u8>,
}

impl KeyChord {
    pub const EMPTY: Self = Self {
        front: 0,
        column: None,
        status: None,
    };

    /// Chord of front keys only
    pub const fn front(front: u32) -> Self {
        Self {
            front,
            column: None,
            status: None,
        }
    }

    /// Front keys held together with a routing key
    pub const fn routing(front: u32, column: u8) -> Self {
        Self {
            front,
            column: Some(column),
            status: None,
        }
    }

    /// Front keys held together with a status key
    pub const fn status(front: u32, index: u8) -> Self {
        Self {
            front,
            column: None,
            status: Some(index),
        }
    }

    /// Only front keys held, no routing or status event in progress
    pub fn is_front_only(&self) -> bool {
        self.front != 0 && self.column.is_none() && self.status.is_none()
    }
}

/// Whether front keys issue commands or type dots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputMode {
    #[default]
    Commands,
    /// Front keys are a braille keyboard
    Dots,
}

/// What the host is currently doing with the commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputContext {
    #[default]
    Normal,
    /// Preferences menu is open
    Menu,
}

/// Chord interpretation strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Keyset {
    Modular,
    BrailleWave,
    BrailleStar,
}

impl Keyset {
    /// Interpret an exact chord
    ///
    /// Unmapped chords yield `None`. Chords that switch the input mode also
    /// yield `None`, after updating `mode`.
    pub fn resolve(self, chord: &KeyChord, mode: &mut InputMode) -> Option<Command> {
        match self {
            Keyset::Modular | Keyset::BrailleWave => modular::resolve(chord, mode),
            Keyset::BrailleStar => star::resolve(chord, mode),
        }
    }
}

/// Result of feeding one byte to the decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Decoded {
    /// The byte produced a command
    Command(Command),
    /// The byte was a key event but produced nothing
    Absorbed,
    /// The byte is not a key event for this model
    Unrecognized,
}

/// Per-session key accumulation state
#[derive(Debug, Clone, Default)]
pub struct KeyDecoder {
    /// Keys currently held
    current: KeyChord,
    /// Chord snapshot awaiting interpretation at first release
    pressed: KeyChord,
    mode: InputMode,
}

impl KeyDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget held and committed keys
    pub fn clear(&mut self) {
        self.current = KeyChord::EMPTY;
        self.pressed = KeyChord::EMPTY;
    }

    pub fn input_mode(&self) -> InputMode {
        self.mode
    }

    /// Keys currently held
    pub fn held(&self) -> &KeyChord {
        &self.current
    }

    /// Feed one byte received while the link is ready
    pub fn decode(&mut self, model: &ModelDescriptor, context: InputContext, byte: u8) -> Decoded {
        match model.decoder {
            ByteDecoder::KeyBits(keyset) => self.decode_key_bits(model, keyset, byte),
            ByteDecoder::Bookworm => match bookworm::resolve(byte, context) {
                Some(command) => Decoded::Command(command),
                None => Decoded::Unrecognized,
            },
        }
    }

    fn decode_key_bits(&mut self, model: &ModelDescriptor, keyset: Keyset, byte: u8) -> Decoded {
        self.current.column = None;
        self.current.status = None;

        let Some(key) = KeyByte::classify(byte, model.columns, model.status_cells) else {
            return Decoded::Unrecognized;
        };

        match key.code {
            KeyCode::Routing(_) | KeyCode::Status(_) if key.released => Decoded::Absorbed,
            KeyCode::Routing(column) => {
                self.current.column = Some(column);
                self.resolve_immediate(keyset)
            }
            KeyCode::Status(index) => {
                self.current.status = Some(index);
                self.resolve_immediate(keyset)
            }
            KeyCode::Front(bit) if key.released => {
                self.current.front &= !front_mask(bit);
                let committed = core::mem::take(&mut self.pressed);
                if committed.front != 0 {
                    if let Some(command) = keyset.resolve(&committed, &mut self.mode) {
                        return Decoded::Command(command);
                    }
                }
                Decoded::Absorbed
            }
            KeyCode::Front(bit) => {
                self.current.front |= front_mask(bit);
                self.pressed = self.current;
                Decoded::Command(Command::Noop)
            }
        }
    }

    /// Routing and status presses are always consumed
    fn resolve_immediate(&mut self, keyset: Keyset) -> Decoded {
        self.pressed = KeyChord::EMPTY;
        let command = keyset
            .resolve(&self.current, &mut self.mode)
            .unwrap_or(Command::Noop);
        Decoded::Command(command)
    }

    /// Re-resolve the held chord for autorepeat
    ///
    /// Only front-only chords repeat. A repeated chord is not interpreted
    /// again on release.
    pub fn repeat(&mut self, model: &ModelDescriptor) -> Option<Command> {
        let keyset = model.keyset()?;
        if !self.current.is_front_only() {
            return None;
        }
        let command = keyset.resolve(&self.current, &mut self.mode)?;
        self.pressed = KeyChord::EMPTY;
        Some(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::ColumnAction;
    use crate::model;
    use brailink_protocol::wire::KEY_RELEASE;
    use proptest::prelude::*;

    fn modular() -> &'static ModelDescriptor {
        model::resolve(0x89).unwrap()
    }

    fn feed(decoder: &mut KeyDecoder, bytes: &[u8]) -> heapless::Vec<Decoded, 16> {
        bytes
            .iter()
            .map(|&b| decoder.decode(modular(), InputContext::Normal, b))
            .collect()
    }

    #[test]
    fn test_single_key_press_release() {
        let mut decoder = KeyDecoder::new();
        // B1 is bit 3
        let out = feed(&mut decoder, &[0x03, 0x03 | KEY_RELEASE]);
        assert_eq!(out[0], Decoded::Command(Command::Noop));
        assert_eq!(out[1], Decoded::Command(Command::Home));
    }

    #[test]
    fn test_chord_interpreted_once() {
        let mut decoder = KeyDecoder::new();
        // B1 + Up, released one after the other
        let out = feed(&mut decoder, &[0x03, 0x04, 0x84, 0x83]);
        assert_eq!(out[0], Decoded::Command(Command::Noop));
        assert_eq!(out[1], Decoded::Command(Command::Noop));
        assert_eq!(out[2], Decoded::Command(Command::LineBegin));
        assert_eq!(out[3], Decoded::Absorbed);
        assert_eq!(decoder.held(), &KeyChord::EMPTY);
    }

    #[test]
    fn test_unmapped_chord_absorbed() {
        let mut decoder = KeyDecoder::new();
        // B4 + B5 + B6 has no meaning
        let out = feed(&mut decoder, &[0x0F, 0x13, 0x17, 0x97, 0x93, 0x8F]);
        assert_eq!(out[3], Decoded::Absorbed);
        assert_eq!(out[4], Decoded::Absorbed);
        assert_eq!(out[5], Decoded::Absorbed);
    }

    #[test]
    fn test_routing_press_combines_with_held_front() {
        let mut decoder = KeyDecoder::new();
        // Hold B1, press routing key 5
        let out = feed(&mut decoder, &[0x03, 0x25, 0xA5, 0x83]);
        assert_eq!(
            out[1],
            Decoded::Command(Command::at(ColumnAction::SetLeft, 5))
        );
        assert_eq!(out[2], Decoded::Absorbed);
        // The B1 chord was consumed by the routing key
        assert_eq!(out[3], Decoded::Absorbed);
    }

    #[test]
    fn test_unmapped_routing_combo_is_noop() {
        let mut decoder = KeyDecoder::new();
        // B1 + B2 + routing has no meaning but is still consumed
        let out = feed(&mut decoder, &[0x03, 0x07, 0x22]);
        assert_eq!(out[2], Decoded::Command(Command::Noop));
    }

    #[test]
    fn test_status_key() {
        let mut decoder = KeyDecoder::new();
        let out = feed(&mut decoder, &[0x72, 0xF2]);
        assert_eq!(out[0], Decoded::Command(Command::Info));
        assert_eq!(out[1], Decoded::Absorbed);
    }

    #[test]
    fn test_unrecognized_byte() {
        let mut decoder = KeyDecoder::new();
        // 0x50 is past the 40 routing keys and below the status range
        assert_eq!(feed(&mut decoder, &[0x50])[0], Decoded::Unrecognized);
        // Status keys do not exist on the Braille Wave
        let wave = model::resolve(0x05).unwrap();
        assert_eq!(
            decoder.decode(wave, InputContext::Normal, 0x70),
            Decoded::Unrecognized
        );
    }

    #[test]
    fn test_dots_mode_toggle() {
        let mut decoder = KeyDecoder::new();
        // B1 + B8 + Down enters dots mode
        feed(&mut decoder, &[0x03, 0x1F, 0x08, 0x88, 0x9F, 0x83]);
        assert_eq!(decoder.input_mode(), InputMode::Dots);

        // B4 alone is dot 1
        let out = feed(&mut decoder, &[0x0F, 0x8F]);
        assert_eq!(out[1], Decoded::Command(Command::dots(0x01)));

        // B1 + B8 + Up leaves it
        feed(&mut decoder, &[0x03, 0x1F, 0x04, 0x84, 0x9F, 0x83]);
        assert_eq!(decoder.input_mode(), InputMode::Commands);
        let out = feed(&mut decoder, &[0x0F, 0x8F]);
        assert_eq!(out[1], Decoded::Command(Command::LineUp));
    }

    #[test]
    fn test_repeat_held_front_chord() {
        let mut decoder = KeyDecoder::new();
        feed(&mut decoder, &[0x04]);
        assert_eq!(decoder.repeat(modular()), Some(Command::FullWindowLeft));
        assert_eq!(decoder.repeat(modular()), Some(Command::FullWindowLeft));
        // Release after a repeat does not fire again
        assert_eq!(feed(&mut decoder, &[0x84])[0], Decoded::Absorbed);
        assert_eq!(decoder.repeat(modular()), None);
    }

    #[test]
    fn test_no_repeat_after_routing_event() {
        let mut decoder = KeyDecoder::new();
        feed(&mut decoder, &[0x03, 0x25]);
        assert_eq!(decoder.repeat(modular()), None);
    }

    #[test]
    fn test_bookworm_bytes() {
        let bookworm = model::resolve(0x90).unwrap();
        let mut decoder = KeyDecoder::new();
        assert_eq!(
            decoder.decode(bookworm, InputContext::Normal, 0x01),
            Decoded::Command(Command::FullWindowLeft)
        );
        assert_eq!(
            decoder.decode(bookworm, InputContext::Menu, 0x02),
            Decoded::Command(Command::PrefLoad)
        );
        assert_eq!(
            decoder.decode(bookworm, InputContext::Normal, 0x40),
            Decoded::Unrecognized
        );
        assert_eq!(decoder.repeat(bookworm), None);
    }

    proptest! {
        #[test]
        fn test_single_front_key_matches_table(bit in 0u8..0x20) {
            let mut decoder = KeyDecoder::new();
            let press = decoder.decode(modular(), InputContext::Normal, bit);
            let release = decoder.decode(modular(), InputContext::Normal, bit | KEY_RELEASE);

            prop_assert_eq!(press, Decoded::Command(Command::Noop));
            let expected = modular::FRONT
                .iter()
                .find(|(mask, _)| *mask == front_mask(bit))
                .map(|(_, command)| *command);
            match expected {
                Some(command) => prop_assert_eq!(release, Decoded::Command(command)),
                None => prop_assert_eq!(release, Decoded::Absorbed),
            }
            prop_assert_eq!(decoder.held(), &KeyChord::EMPTY);
        }
    }
}
