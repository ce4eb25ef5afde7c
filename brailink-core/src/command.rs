//! Logical commands emitted to the host
//!
//! The host decides what each command does (move the window, toggle a
//! preference, type a character). The driver only produces them.

/// A logical command decoded from the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Key activity with no action yet (chord still being pressed)
    Noop,

    // Window and cursor navigation
    FullWindowLeft,
    FullWindowRight,
    HalfWindowLeft,
    HalfWindowRight,
    CharLeft,
    CharRight,
    LineUp,
    LineDown,
    LineBegin,
    LineEnd,
    Top,
    Bottom,
    TopLeft,
    BottomLeft,
    Home,
    Back,
    PrevParagraph,
    NextParagraph,
    PrevPrompt,
    NextPrompt,
    PrevSearch,
    NextSearch,
    AttrUp,
    AttrDown,
    WindowUp,
    WindowDown,
    PrevDiffLine,
    NextDiffLine,

    // Feature toggles
    CursorTracking,
    CursorVisible,
    CursorSize,
    AttrVisible,
    SixDots,
    Tunes,
    Freeze,
    DisplayMode,
    SkipIdenticalLines,
    SkipBlankWindows,
    SlidingWindow,

    // Help, preferences and menu navigation
    Help,
    Info,
    PrefMenu,
    PrefLoad,
    PrefSave,
    MenuPrevItem,
    MenuNextItem,
    MenuFirstItem,
    MenuLastItem,
    MenuPrevSetting,
    MenuNextSetting,

    // Speech and clipboard
    Mute,
    SayLine,
    Paste,

    /// Action applied at a display column
    Column { action: ColumnAction, column: u8 },
    /// Type a raw dot pattern (host dot numbering)
    PassDots { dots: u8, control: bool, meta: bool },
    /// Type a non-character key
    PassKey(Key),
}

/// Command families that take a display column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ColumnAction {
    Route,
    SetLeft,
    DescribeChar,
    CutBegin,
    CutAppend,
    CutRectangle,
    CutLine,
    PrevIndent,
    NextIndent,
    SetMark,
    GotoMark,
    SwitchVt,
}

/// Keys passed through as if typed on a keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Key {
    Return,
    CursorUp,
    CursorDown,
    /// Function key, zero-based
    Function(u8),
}

impl Command {
    /// Build a column command
    pub const fn at(action: ColumnAction, column: u8) -> Self {
        Command::Column { action, column }
    }

    /// Dot pattern without modifiers
    pub const fn dots(dots: u8) -> Self {
        Command::PassDots {
            dots,
            control: false,
            meta: false,
        }
    }

    /// Check if this command carries no action
    pub fn is_noop(&self) -> bool {
        matches!(self, Command::Noop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_constructor() {
        assert_eq!(
            Command::at(ColumnAction::Route, 7),
            Command::Column {
                action: ColumnAction::Route,
                column: 7
            }
        );
    }

    #[test]
    fn test_noop() {
        assert!(Command::Noop.is_noop());
        assert!(!Command::Home.is_noop());
        assert!(!Command::dots(0).is_noop());
    }
}
