//! Encoding of physical input sources into 32-bit codes
//!
//! Joystick codes use a packed 16-bit layout:
//!
//! ```text
//!  15    12 11     8 7              0
//! ┌────────┬────────┬────────────────┐
//! │ device │ class  │    sub-code    │
//! └────────┴────────┴────────────────┘
//!   slot     0 axis   axis:   (index & 127) << 1 | positive
//!   0..15    1 hat    hat:    (index & 63) << 2 | direction
//!            2 button button: index & 255
//! ```
//!
//! Keyboard codes are host key symbols and live in their own binding table,
//! so the two spaces never collide.

use std::fmt;

/// Number of joystick slots a code can address (4-bit device field).
pub const MAX_JOYSTICKS: usize = 16;

/// Value stored by configs written with 16-bit joystick tables.
pub const LEGACY_UNBOUND: u32 = 0xFFFF;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoyClass {
    Axis = 0,
    Hat = 1,
    Button = 2,
}

/// Direction of a hat switch as encoded in the low two bits of a hat code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HatDirection {
    Right = 0,
    Left = 1,
    Up = 2,
    Down = 3,
}

impl HatDirection {
    /// Order in which hat directions are tested against a hat bitmask.
    pub const SCAN_ORDER: [HatDirection; 4] = [
        HatDirection::Up,
        HatDirection::Right,
        HatDirection::Down,
        HatDirection::Left,
    ];

    /// Bit of this direction in the host hat value.
    pub const fn host_mask(self) -> u8 {
        match self {
            HatDirection::Up => 0x01,
            HatDirection::Right => 0x02,
            HatDirection::Down => 0x04,
            HatDirection::Left => 0x08,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PhysicalCode(u32);

impl PhysicalCode {
    /// Sentinel for "nothing bound"; never produced by the normalizer.
    pub const UNBOUND: PhysicalCode = PhysicalCode(u32::MAX);

    pub const fn from_raw(raw: u32) -> Self {
        PhysicalCode(raw)
    }

    /// Reads a joystick code from a stored config, mapping the 16-bit
    /// sentinel onto [`PhysicalCode::UNBOUND`].
    pub const fn from_stored_joy(raw: u32) -> Self {
        if raw == LEGACY_UNBOUND {
            Self::UNBOUND
        } else {
            PhysicalCode(raw)
        }
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    pub const fn key(sym: u32) -> Self {
        PhysicalCode(sym)
    }

    pub fn axis(slot: usize, axis: u8, positive: bool) -> Self {
        let sub = (u32::from(axis) & 127) << 1 | u32::from(positive);
        Self::joy(slot, JoyClass::Axis, sub)
    }

    pub fn hat(slot: usize, hat: u8, direction: HatDirection) -> Self {
        let sub = (u32::from(hat) & 63) << 2 | direction as u32;
        Self::joy(slot, JoyClass::Hat, sub)
    }

    pub fn button(slot: usize, button: u8) -> Self {
        Self::joy(slot, JoyClass::Button, u32::from(button))
    }

    fn joy(slot: usize, class: JoyClass, sub: u32) -> Self {
        debug_assert!(slot < MAX_JOYSTICKS, "joystick slot {slot} does not fit in a code");
        PhysicalCode(((slot as u32) & 15) << 12 | (class as u32) << 8 | (sub & 0xFF))
    }

    pub const fn is_bound(self) -> bool {
        self.0 != Self::UNBOUND.0
    }

    /// Code of the same axis with the opposite sign.
    pub const fn opposite_axis(self) -> Self {
        PhysicalCode(self.0 ^ 1)
    }

    pub const fn device_slot(self) -> usize {
        ((self.0 >> 12) & 15) as usize
    }

    pub fn class(self) -> Option<JoyClass> {
        if !self.is_bound() || self.0 > 0xFFFF {
            return None;
        }
        match (self.0 >> 8) & 15 {
            0 => Some(JoyClass::Axis),
            1 => Some(JoyClass::Hat),
            2 => Some(JoyClass::Button),
            _ => None,
        }
    }
}

impl Default for PhysicalCode {
    fn default() -> Self {
        Self::UNBOUND
    }
}

impl fmt::Display for PhysicalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_bound() {
            write!(f, "{:#06x}", self.0)
        } else {
            f.write_str("unbound")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_codes_pack_sign_into_low_bit() {
        let negative = PhysicalCode::axis(1, 3, false);
        let positive = PhysicalCode::axis(1, 3, true);
        assert_eq!(negative.raw(), 0x1006);
        assert_eq!(positive.raw(), 0x1007);
        assert_eq!(negative.opposite_axis(), positive);
        assert_eq!(positive.class(), Some(JoyClass::Axis));
    }

    #[test]
    fn hat_codes_use_direction_offsets() {
        assert_eq!(PhysicalCode::hat(0, 0, HatDirection::Right).raw(), 0x0100);
        assert_eq!(PhysicalCode::hat(0, 0, HatDirection::Left).raw(), 0x0101);
        assert_eq!(PhysicalCode::hat(0, 0, HatDirection::Up).raw(), 0x0102);
        assert_eq!(PhysicalCode::hat(0, 1, HatDirection::Down).raw(), 0x0107);
    }

    #[test]
    fn button_codes_carry_device_slot() {
        let code = PhysicalCode::button(15, 200);
        assert_eq!(code.raw(), 0xF2C8);
        assert_eq!(code.device_slot(), 15);
        assert_eq!(code.class(), Some(JoyClass::Button));
    }

    #[test]
    fn legacy_sentinel_reads_as_unbound() {
        assert_eq!(PhysicalCode::from_stored_joy(0xFFFF), PhysicalCode::UNBOUND);
        assert_eq!(PhysicalCode::from_stored_joy(0x0102).raw(), 0x0102);
        assert!(!PhysicalCode::default().is_bound());
        assert_eq!(PhysicalCode::UNBOUND.class(), None);
    }
}
