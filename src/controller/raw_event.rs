//! Host event vocabulary consumed by the input subsystem
//!
//! Backends translate whatever their windowing/joystick library reports into
//! these variants. Joystick events carry the host's instance id, never a slot;
//! the device registry resolves slots.

use crate::frontend::keysym::Keysym;

/// Host-assigned joystick identifier, stable for one physical connection.
pub type InstanceId = u32;

pub const HAT_CENTERED: u8 = 0x00;
pub const HAT_UP: u8 = 0x01;
pub const HAT_RIGHT: u8 = 0x02;
pub const HAT_DOWN: u8 = 0x04;
pub const HAT_LEFT: u8 = 0x08;

/// Keyboard modifier bits reported with key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyModifiers(pub u16);

impl KeyModifiers {
    pub const NONE: KeyModifiers = KeyModifiers(0);
    pub const LSHIFT: KeyModifiers = KeyModifiers(0x0001);
    pub const RSHIFT: KeyModifiers = KeyModifiers(0x0002);
    pub const LALT: KeyModifiers = KeyModifiers(0x0100);
    pub const RALT: KeyModifiers = KeyModifiers(0x0200);

    pub const fn with(self, other: KeyModifiers) -> Self {
        KeyModifiers(self.0 | other.0)
    }

    pub const fn alt(self) -> bool {
        self.0 & (Self::LALT.0 | Self::RALT.0) != 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    Other(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    Resized { width: i32, height: i32 },
    FocusGained,
    FocusLost,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawEvent {
    KeyDown { sym: Keysym, modifiers: KeyModifiers },
    KeyUp { sym: Keysym, modifiers: KeyModifiers },
    JoyAxis { which: InstanceId, axis: u8, value: i16 },
    /// `value` is a bitmask of the `HAT_*` constants
    JoyHat { which: InstanceId, hat: u8, value: u8 },
    JoyButtonDown { which: InstanceId, button: u8 },
    JoyButtonUp { which: InstanceId, button: u8 },
    /// `index` is the host's device index, which doubles as the slot
    JoyDeviceAdded { index: usize },
    JoyDeviceRemoved { which: InstanceId },
    MouseButtonDown { button: MouseButton, x: i32, y: i32 },
    MouseButtonUp { button: MouseButton, x: i32, y: i32 },
    MouseMotion { x: i32, y: i32 },
    Window(WindowEvent),
    Quit,
}

impl RawEvent {
    pub fn key_down(sym: Keysym) -> Self {
        RawEvent::KeyDown {
            sym,
            modifiers: KeyModifiers::NONE,
        }
    }

    pub fn key_up(sym: Keysym) -> Self {
        RawEvent::KeyUp {
            sym,
            modifiers: KeyModifiers::NONE,
        }
    }
}
