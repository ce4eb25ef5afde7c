//! Braille Star keyset (Braillino, Braille Star 40/80)
//!
//! Two three-position rockers and two space bars. Chords made only of the
//! braille keys and space bars fall back to the Modular keyset, with the
//! left space acting as Up and the right space as Down.

use brailink_protocol::keys::front_mask as key;

use super::modular::{self, B1, B2, B3, B4, B5, B6, B7, B8, DOWN, UP};
use super::{InputMode, KeyChord};
use crate::command::{ColumnAction, Command, Key};

pub const SPACE_LEFT: u32 = key(0x10);
pub const SPACE_RIGHT: u32 = key(0x18);
pub const LEFT_TOP: u32 = key(0x0C);
pub const LEFT_BOTTOM: u32 = key(0x14);
pub const LEFT_MIDDLE: u32 = LEFT_TOP | LEFT_BOTTOM;
pub const RIGHT_TOP: u32 = UP;
pub const RIGHT_BOTTOM: u32 = DOWN;
pub const RIGHT_MIDDLE: u32 = RIGHT_TOP | RIGHT_BOTTOM;

/// Keys shared with the Modular layout
const MODULAR_KEYS: u32 = B1 | B2 | B3 | B4 | B5 | B6 | B7 | B8 | SPACE_LEFT | SPACE_RIGHT;

/// Rocker positions held with a routing key
pub const ROUTING: &[(u32, ColumnAction)] = &[
    (LEFT_TOP, ColumnAction::CutBegin),
    (LEFT_BOTTOM, ColumnAction::CutAppend),
    (RIGHT_TOP, ColumnAction::CutLine),
    (RIGHT_MIDDLE, ColumnAction::SwitchVt),
    (RIGHT_BOTTOM, ColumnAction::CutRectangle),
];

/// Rocker-only chords
pub const FRONT: &[(u32, Command)] = &[
    (LEFT_TOP, Command::PassKey(Key::CursorUp)),
    (RIGHT_TOP, Command::LineUp),
    (LEFT_BOTTOM, Command::PassKey(Key::CursorDown)),
    (RIGHT_BOTTOM, Command::LineDown),
    (LEFT_MIDDLE, Command::FullWindowLeft),
    (RIGHT_MIDDLE, Command::FullWindowRight),
    (LEFT_MIDDLE | RIGHT_MIDDLE, Command::Home),
    (RIGHT_MIDDLE | LEFT_TOP, Command::TopLeft),
    (RIGHT_MIDDLE | LEFT_BOTTOM, Command::BottomLeft),
    (LEFT_MIDDLE | RIGHT_TOP, Command::Top),
    (LEFT_MIDDLE | RIGHT_BOTTOM, Command::Bottom),
    (LEFT_TOP | RIGHT_TOP, Command::PrevDiffLine),
    (LEFT_TOP | RIGHT_BOTTOM, Command::NextDiffLine),
    (LEFT_BOTTOM | RIGHT_TOP, Command::AttrUp),
    (LEFT_BOTTOM | RIGHT_BOTTOM, Command::AttrDown),
];

pub fn resolve(chord: &KeyChord, mode: &mut InputMode) -> Option<Command> {
    if let Some(column) = chord.column {
        if chord.front == LEFT_MIDDLE {
            return Some(Command::PassKey(Key::Function(column)));
        }
        let action = ROUTING
            .iter()
            .find(|(mask, _)| *mask == chord.front)
            .map(|&(_, action)| action);
        if let Some(action) = action {
            return Some(Command::at(action, column));
        }
    } else if chord.status.is_none() {
        let command = FRONT
            .iter()
            .find(|(mask, _)| *mask == chord.front)
            .map(|&(_, command)| command);
        if command.is_some() {
            return command;
        }
    }

    if chord.front & !MODULAR_KEYS == 0 {
        return modular::resolve(&as_modular(chord), mode);
    }
    None
}

/// Map the space bars onto the Modular rocker
fn as_modular(chord: &KeyChord) -> KeyChord {
    let mut mapped = *chord;
    if mapped.front & SPACE_LEFT != 0 {
        mapped.front = (mapped.front & !SPACE_LEFT) | UP;
    }
    if mapped.front & SPACE_RIGHT != 0 {
        mapped.front = (mapped.front & !SPACE_RIGHT) | DOWN;
    }
    mapped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commands(chord: KeyChord) -> Option<Command> {
        resolve(&chord, &mut InputMode::Commands)
    }

    #[test]
    fn test_rockers() {
        assert_eq!(
            commands(KeyChord::front(LEFT_TOP)),
            Some(Command::PassKey(Key::CursorUp))
        );
        assert_eq!(commands(KeyChord::front(RIGHT_BOTTOM)), Some(Command::LineDown));
        assert_eq!(
            commands(KeyChord::front(LEFT_MIDDLE | RIGHT_MIDDLE)),
            Some(Command::Home)
        );
    }

    #[test]
    fn test_routing_with_rockers() {
        assert_eq!(
            commands(KeyChord::routing(LEFT_MIDDLE, 4)),
            Some(Command::PassKey(Key::Function(4)))
        );
        assert_eq!(
            commands(KeyChord::routing(RIGHT_MIDDLE, 2)),
            Some(Command::at(ColumnAction::SwitchVt, 2))
        );
    }

    #[test]
    fn test_plain_routing_falls_back_to_modular() {
        assert_eq!(
            commands(KeyChord::routing(0, 9)),
            Some(Command::at(ColumnAction::Route, 9))
        );
        assert_eq!(
            commands(KeyChord::routing(B7, 9)),
            Some(Command::at(ColumnAction::SetMark, 9))
        );
    }

    #[test]
    fn test_space_bars_act_as_modular_rocker() {
        assert_eq!(commands(KeyChord::front(B1 | SPACE_LEFT)), Some(Command::LineBegin));
        assert_eq!(commands(KeyChord::front(B1 | SPACE_RIGHT)), Some(Command::LineEnd));
        assert_eq!(commands(KeyChord::front(B4)), Some(Command::LineUp));
    }

    #[test]
    fn test_dots_mode_through_fallback() {
        let mut mode = InputMode::Commands;
        assert_eq!(
            resolve(&KeyChord::front(B1 | B8 | SPACE_RIGHT), &mut mode),
            None
        );
        assert_eq!(mode, InputMode::Dots);
        assert_eq!(
            resolve(&KeyChord::front(B4 | SPACE_LEFT), &mut mode),
            Some(Command::PassDots {
                dots: 0x01,
                control: true,
                meta: false
            })
        );
    }

    #[test]
    fn test_rocker_mixed_with_braille_key_unmapped() {
        assert_eq!(commands(KeyChord::front(LEFT_TOP | B1)), None);
    }
}
