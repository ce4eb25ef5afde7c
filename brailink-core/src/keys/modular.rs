//! Modular keyset (Modular 20/40/80, Braille Wave)
//!
//! Eight front keys B1..B8 above the cells plus an Up/Down rocker. In dots
//! mode B1..B8 form a braille keyboard laid out 7 3 2 1 | 4 5 6 8.

use brailink_protocol::keys::front_mask as key;

use super::{InputMode, KeyChord};
use crate::command::{ColumnAction, Command, Key};

pub const B1: u32 = key(0x03);
pub const B2: u32 = key(0x07);
pub const B3: u32 = key(0x0B);
pub const B4: u32 = key(0x0F);
pub const B5: u32 = key(0x13);
pub const B6: u32 = key(0x17);
pub const B7: u32 = key(0x1B);
pub const B8: u32 = key(0x1F);
pub const UP: u32 = key(0x04);
pub const DOWN: u32 = key(0x08);

/// All eight braille keys
pub const DOTS: u32 = B1 | B2 | B3 | B4 | B5 | B6 | B7 | B8;

/// Chord that leaves dots mode
pub const COMMANDS_MODE: u32 = B1 | B8 | UP;

/// Chord that enters dots mode
pub const DOTS_MODE: u32 = B1 | B8 | DOWN;

/// Braille key to host dot bit
const DOT_KEYS: [(u32, u8); 8] = [
    (B1, 0x40),
    (B2, 0x04),
    (B3, 0x02),
    (B4, 0x01),
    (B5, 0x08),
    (B6, 0x10),
    (B7, 0x20),
    (B8, 0x80),
];

/// Front keys held with a routing key
pub const ROUTING: &[(u32, ColumnAction)] = &[
    (0, ColumnAction::Route),
    (B1, ColumnAction::SetLeft),
    (B2, ColumnAction::DescribeChar),
    (B3, ColumnAction::CutAppend),
    (B4, ColumnAction::CutBegin),
    (UP, ColumnAction::PrevIndent),
    (DOWN, ColumnAction::NextIndent),
    (B5, ColumnAction::CutRectangle),
    (B6, ColumnAction::CutLine),
    (B7, ColumnAction::SetMark),
    (B8, ColumnAction::GotoMark),
];

/// Status keys, by index
pub const STATUS: [Command; 4] = [
    Command::Help,
    Command::PrefMenu,
    Command::Info,
    Command::Freeze,
];

/// Front-only chords
pub const FRONT: &[(u32, Command)] = &[
    (UP, Command::FullWindowLeft),
    (DOWN, Command::FullWindowRight),
    (B1, Command::Home),
    (B1 | UP, Command::LineBegin),
    (B1 | DOWN, Command::LineEnd),
    (B2, Command::TopLeft),
    (B2 | UP, Command::Top),
    (B2 | DOWN, Command::Bottom),
    (B3, Command::Back),
    (B3 | UP, Command::HalfWindowLeft),
    (B3 | DOWN, Command::HalfWindowRight),
    (B6 | UP, Command::CharLeft),
    (B6 | DOWN, Command::CharRight),
    (B4, Command::LineUp),
    (B5, Command::LineDown),
    (B1 | B4, Command::PrevParagraph),
    (B1 | B5, Command::NextParagraph),
    (B2 | B4, Command::PrevPrompt),
    (B2 | B5, Command::NextPrompt),
    (B3 | B4, Command::PrevSearch),
    (B3 | B5, Command::NextSearch),
    (B6 | B4, Command::AttrUp),
    (B6 | B5, Command::AttrDown),
    (B7 | B4, Command::WindowUp),
    (B7 | B5, Command::WindowDown),
    (B8 | B4, Command::PrevDiffLine),
    (B8 | B5, Command::NextDiffLine),
    (B8, Command::Help),
    (B8 | B1, Command::CursorTracking),
    (B8 | B2, Command::CursorVisible),
    (B8 | B3, Command::AttrVisible),
    (B8 | B6, Command::SixDots),
    (B8 | B7, Command::Tunes),
    (B7, Command::Freeze),
    (B7 | B1, Command::PrefMenu),
    (B7 | B2, Command::PrefLoad),
    (B7 | B3, Command::PrefSave),
    (B7 | B6, Command::Info),
    (B6, Command::DisplayMode),
    (B6 | B1, Command::SkipIdenticalLines),
    (B6 | B2, Command::SkipBlankWindows),
    (B6 | B3, Command::SlidingWindow),
    (B2 | B3 | UP, Command::Mute),
    (B2 | B3 | DOWN, Command::SayLine),
    (UP | DOWN, Command::Paste),
];

pub fn resolve(chord: &KeyChord, mode: &mut InputMode) -> Option<Command> {
    if let Some(column) = chord.column {
        return ROUTING
            .iter()
            .find(|(mask, _)| *mask == chord.front)
            .map(|&(_, action)| Command::at(action, column));
    }

    if let Some(index) = chord.status {
        return STATUS.get(index as usize).copied();
    }

    match chord.front {
        COMMANDS_MODE => {
            *mode = InputMode::Commands;
            debug!("Input mode: commands");
            return None;
        }
        DOTS_MODE => {
            *mode = InputMode::Dots;
            debug!("Input mode: dots");
            return None;
        }
        _ => {}
    }

    if *mode == InputMode::Dots {
        if let Some(command) = type_dots(chord.front) {
            return Some(command);
        }
    }

    lookup_front(chord.front)
}

fn lookup_front(front: u32) -> Option<Command> {
    FRONT
        .iter()
        .find(|(mask, _)| *mask == front)
        .map(|&(_, command)| command)
}

/// Braille keyboard input: dots with Up as control and Down as meta
fn type_dots(front: u32) -> Option<Command> {
    if front & DOTS != 0 {
        let modifiers = front & !DOTS;
        if modifiers & !(UP | DOWN) == 0 {
            let dots = DOT_KEYS
                .iter()
                .filter(|(key, _)| front & key != 0)
                .fold(0u8, |acc, (_, dot)| acc | dot);
            return Some(Command::PassDots {
                dots,
                control: modifiers & UP != 0,
                meta: modifiers & DOWN != 0,
            });
        }
    }

    match front {
        UP => Some(Command::dots(0)),
        DOWN => Some(Command::PassKey(Key::Return)),
        _ => None,
    }
}
