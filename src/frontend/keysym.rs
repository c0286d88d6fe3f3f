//! Host key symbols (SDL2 keycode space) used by the default layout and hotkeys

pub type Keysym = u32;

const SCANCODE_MASK: u32 = 1 << 30;

const fn from_scancode(scancode: u32) -> Keysym {
    scancode | SCANCODE_MASK
}

pub const BACKSPACE: Keysym = 0x08;
pub const RETURN: Keysym = 0x0D;
pub const ESCAPE: Keysym = 0x1B;
pub const SPACE: Keysym = 0x20;

pub const A: Keysym = b'a' as Keysym;
pub const M: Keysym = b'm' as Keysym;
pub const O: Keysym = b'o' as Keysym;
pub const P: Keysym = b'p' as Keysym;
pub const Q: Keysym = b'q' as Keysym;
pub const S: Keysym = b's' as Keysym;
pub const W: Keysym = b'w' as Keysym;
pub const X: Keysym = b'x' as Keysym;
pub const Z: Keysym = b'z' as Keysym;

pub const F1: Keysym = from_scancode(58);
pub const F10: Keysym = from_scancode(67);

pub const RIGHT: Keysym = from_scancode(79);
pub const LEFT: Keysym = from_scancode(80);
pub const DOWN: Keysym = from_scancode(81);
pub const UP: Keysym = from_scancode(82);

pub const LSHIFT: Keysym = from_scancode(225);
pub const RSHIFT: Keysym = from_scancode(229);

/// Savestate slot (1..=10) addressed by a function key.
pub fn function_key_slot(sym: Keysym) -> Option<u8> {
    (F1..=F10).contains(&sym).then(|| (sym - F1 + 1) as u8)
}
