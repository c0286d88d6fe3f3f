//! Binding tables: physical code → logical button
//!
//! One table per input source. Each logical button holds exactly one code per
//! table; lookup is a linear scan, which is fine for fifteen entries.

use crate::frontend::keysym;
use crate::mapping::logical_button::{LogicalButton, NB_KEYS};
use crate::mapping::physical_code::PhysicalCode;
use tracing::debug;

/// Which binding table a code is resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Keyboard,
    Joypad,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingTable {
    codes: [PhysicalCode; NB_KEYS],
}

impl Default for BindingTable {
    fn default() -> Self {
        Self::unbound()
    }
}

impl BindingTable {
    pub fn unbound() -> Self {
        Self {
            codes: [PhysicalCode::UNBOUND; NB_KEYS],
        }
    }

    pub fn from_codes(codes: [PhysicalCode; NB_KEYS]) -> Self {
        Self { codes }
    }

    /// Binds `physical` to `logical`.
    ///
    /// Any other button of this table that held the same code is unbound, so
    /// the most recent bind always wins a lookup.
    pub fn bind(&mut self, logical: LogicalButton, physical: PhysicalCode) {
        if physical.is_bound() {
            for (index, code) in self.codes.iter_mut().enumerate() {
                if index != logical.index() && *code == physical {
                    debug!(
                        "Unbinding {:?} from {} before rebinding",
                        LogicalButton::from_index(index),
                        physical
                    );
                    *code = PhysicalCode::UNBOUND;
                }
            }
        }
        self.codes[logical.index()] = physical;
    }

    pub fn lookup(&self, physical: PhysicalCode) -> Option<LogicalButton> {
        if !physical.is_bound() {
            return None;
        }
        self.codes
            .iter()
            .position(|&code| code == physical)
            .and_then(LogicalButton::from_index)
    }

    pub fn code_for(&self, logical: LogicalButton) -> PhysicalCode {
        self.codes[logical.index()]
    }

    pub fn set_all(&mut self, codes: [PhysicalCode; NB_KEYS]) {
        self.codes = codes;
    }

    pub fn codes(&self) -> &[PhysicalCode; NB_KEYS] {
        &self.codes
    }
}

/// Default keyboard layout, in [`LogicalButton`] order.
pub fn default_keyboard_codes() -> [PhysicalCode; NB_KEYS] {
    [
        PhysicalCode::key(keysym::X),         // A
        PhysicalCode::key(keysym::Z),         // B
        PhysicalCode::key(keysym::RSHIFT),    // Select
        PhysicalCode::key(keysym::RETURN),    // Start
        PhysicalCode::key(keysym::RIGHT),     // Right
        PhysicalCode::key(keysym::LEFT),      // Left
        PhysicalCode::key(keysym::UP),        // Up
        PhysicalCode::key(keysym::DOWN),      // Down
        PhysicalCode::key(keysym::W),         // R
        PhysicalCode::key(keysym::Q),         // L
        PhysicalCode::key(keysym::S),         // X
        PhysicalCode::key(keysym::A),         // Y
        PhysicalCode::key(keysym::P),         // Debug
        PhysicalCode::key(keysym::O),         // Boost
        PhysicalCode::key(keysym::BACKSPACE), // Lid
    ]
}

/// Keyboard and joypad tables together.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Bindings {
    pub keyboard: BindingTable,
    pub joypad: BindingTable,
}

impl Bindings {
    pub fn with_defaults() -> Self {
        let mut bindings = Self::default();
        bindings.load_defaults(&default_keyboard_codes());
        bindings
    }

    /// Replaces the keyboard table with `keyboard` and clears every joypad binding.
    pub fn load_defaults(&mut self, keyboard: &[PhysicalCode; NB_KEYS]) {
        self.keyboard.set_all(*keyboard);
        self.joypad = BindingTable::unbound();
    }

    pub fn table(&self, source: InputSource) -> &BindingTable {
        match source {
            InputSource::Keyboard => &self.keyboard,
            InputSource::Joypad => &self.joypad,
        }
    }

    pub fn table_mut(&mut self, source: InputSource) -> &mut BindingTable {
        match source {
            InputSource::Keyboard => &mut self.keyboard,
            InputSource::Joypad => &mut self.joypad,
        }
    }

    pub fn bind(&mut self, source: InputSource, logical: LogicalButton, physical: PhysicalCode) {
        self.table_mut(source).bind(logical, physical);
    }

    pub fn lookup(&self, source: InputSource, physical: PhysicalCode) -> Option<LogicalButton> {
        self.table(source).lookup(physical)
    }
}
