//! Logical buttons of the emulated handheld and the per-frame pad struct.

use std::fmt;

/// Number of logical buttons the binding tables hold an entry for.
pub const NB_KEYS: usize = 15;

/// Named button of the emulated device.
///
/// The discriminant is the button's index into every binding table and into
/// the logical state bit vector, so the order here is part of the stored
/// configuration format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LogicalButton {
    A = 0,
    B = 1,
    Select = 2,
    Start = 3,
    Right = 4,
    Left = 5,
    Up = 6,
    Down = 7,
    R = 8,
    L = 9,
    X = 10,
    Y = 11,
    Debug = 12,
    Boost = 13,
    Lid = 14,
}

impl LogicalButton {
    pub const ALL: [LogicalButton; NB_KEYS] = [
        LogicalButton::A,
        LogicalButton::B,
        LogicalButton::Select,
        LogicalButton::Start,
        LogicalButton::Right,
        LogicalButton::Left,
        LogicalButton::Up,
        LogicalButton::Down,
        LogicalButton::R,
        LogicalButton::L,
        LogicalButton::X,
        LogicalButton::Y,
        LogicalButton::Debug,
        LogicalButton::Boost,
        LogicalButton::Lid,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Bit of this button in a logical state mask.
    pub const fn mask(self) -> u16 {
        1 << (self as u16)
    }

    pub const fn name(self) -> &'static str {
        match self {
            LogicalButton::A => "A",
            LogicalButton::B => "B",
            LogicalButton::Select => "Select",
            LogicalButton::Start => "Start",
            LogicalButton::Right => "Right",
            LogicalButton::Left => "Left",
            LogicalButton::Up => "Up",
            LogicalButton::Down => "Down",
            LogicalButton::R => "R",
            LogicalButton::L => "L",
            LogicalButton::X => "X",
            LogicalButton::Y => "Y",
            LogicalButton::Debug => "Debug",
            LogicalButton::Boost => "Boost",
            LogicalButton::Lid => "Lid",
        }
    }

    /// Case-insensitive lookup by display name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|button| button.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for LogicalButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Button struct handed to the emulated core once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PadButtons {
    pub a: bool,
    pub b: bool,
    pub select: bool,
    pub start: bool,
    pub right: bool,
    pub left: bool,
    pub up: bool,
    pub down: bool,
    pub r: bool,
    pub l: bool,
    pub x: bool,
    pub y: bool,
    pub debug: bool,
    pub boost: bool,
    pub lid: bool,
}

impl PadButtons {
    pub fn from_mask(mask: u16) -> Self {
        let mut pad = PadButtons::default();
        for button in LogicalButton::ALL {
            pad.set(button, mask & button.mask() != 0);
        }
        pad
    }

    pub fn to_mask(&self) -> u16 {
        LogicalButton::ALL
            .iter()
            .filter(|&&button| self.get(button))
            .fold(0, |mask, button| mask | button.mask())
    }

    pub fn get(&self, button: LogicalButton) -> bool {
        match button {
            LogicalButton::A => self.a,
            LogicalButton::B => self.b,
            LogicalButton::Select => self.select,
            LogicalButton::Start => self.start,
            LogicalButton::Right => self.right,
            LogicalButton::Left => self.left,
            LogicalButton::Up => self.up,
            LogicalButton::Down => self.down,
            LogicalButton::R => self.r,
            LogicalButton::L => self.l,
            LogicalButton::X => self.x,
            LogicalButton::Y => self.y,
            LogicalButton::Debug => self.debug,
            LogicalButton::Boost => self.boost,
            LogicalButton::Lid => self.lid,
        }
    }

    pub fn set(&mut self, button: LogicalButton, pressed: bool) {
        let field = match button {
            LogicalButton::A => &mut self.a,
            LogicalButton::B => &mut self.b,
            LogicalButton::Select => &mut self.select,
            LogicalButton::Start => &mut self.start,
            LogicalButton::Right => &mut self.right,
            LogicalButton::Left => &mut self.left,
            LogicalButton::Up => &mut self.up,
            LogicalButton::Down => &mut self.down,
            LogicalButton::R => &mut self.r,
            LogicalButton::L => &mut self.l,
            LogicalButton::X => &mut self.x,
            LogicalButton::Y => &mut self.y,
            LogicalButton::Debug => &mut self.debug,
            LogicalButton::Boost => &mut self.boost,
            LogicalButton::Lid => &mut self.lid,
        };
        *field = pressed;
    }
}
