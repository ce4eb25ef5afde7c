//! Bookworm byte strategy
//!
//! The Bookworm has four buttons. Each transition reports the combination
//! currently held as one byte, so no chord tracking is needed: the byte
//! value maps straight to a command.

use super::InputContext;
use crate::command::{ColumnAction, Command};

pub const BACKWARD: u8 = 0x01;
pub const ESCAPE: u8 = 0x02;
pub const ENTER: u8 = 0x04;
pub const FORWARD: u8 = 0x08;

/// Bindings while the preferences menu is open
pub const MENU: &[(u8, Command)] = &[
    (BACKWARD, Command::FullWindowLeft),
    (FORWARD, Command::FullWindowRight),
    (ESCAPE, Command::PrefLoad),
    (ESCAPE | BACKWARD, Command::MenuPrevSetting),
    (ESCAPE | FORWARD, Command::MenuNextSetting),
    (ENTER, Command::PrefMenu),
    (ENTER | BACKWARD, Command::MenuPrevItem),
    (ENTER | FORWARD, Command::MenuNextItem),
    (ESCAPE | ENTER, Command::PrefSave),
    (ESCAPE | ENTER | BACKWARD, Command::MenuFirstItem),
    (ESCAPE | ENTER | FORWARD, Command::MenuLastItem),
    (BACKWARD | FORWARD, Command::Noop),
    (BACKWARD | FORWARD | ESCAPE, Command::Noop),
    (BACKWARD | FORWARD | ENTER, Command::Noop),
];

/// Bindings everywhere else
pub const NORMAL: &[(u8, Command)] = &[
    (BACKWARD, Command::FullWindowLeft),
    (FORWARD, Command::FullWindowRight),
    (ESCAPE, Command::CursorTracking),
    (ESCAPE | BACKWARD, Command::Back),
    (ESCAPE | FORWARD, Command::DisplayMode),
    (ENTER, Command::at(ColumnAction::Route, 0)),
    (ENTER | BACKWARD, Command::LineUp),
    (ENTER | FORWARD, Command::LineDown),
    (ESCAPE | ENTER, Command::PrefMenu),
    (ESCAPE | ENTER | BACKWARD, Command::LineBegin),
    (ESCAPE | ENTER | FORWARD, Command::LineEnd),
    (BACKWARD | FORWARD, Command::Help),
    (BACKWARD | FORWARD | ESCAPE, Command::CursorSize),
    (BACKWARD | FORWARD | ENTER, Command::Freeze),
];

pub fn resolve(byte: u8, context: InputContext) -> Option<Command> {
    let table = match context {
        InputContext::Menu => MENU,
        InputContext::Normal => NORMAL,
    };
    table
        .iter()
        .find(|(value, _)| *value == byte)
        .map(|&(_, command)| command)
}
