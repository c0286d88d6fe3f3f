//! Antipodal direction arbitration
//!
//! The emulated d-pad cannot report Up+Down or Left+Right at once. When the
//! host asserts both, the direction that has been held for fewer ticks wins.
//! Ties are resolved against Up (and Left).

use crate::mapping::logical_button::PadButtons;

/// Consecutive ticks each raw direction has been held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldTime {
    pub up: u32,
    pub down: u32,
    pub left: u32,
    pub right: u32,
}

#[derive(Debug, Clone, Default)]
pub struct AntipodalArbiter {
    held: HeldTime,
    allow_simultaneous_opposites: bool,
}

impl AntipodalArbiter {
    pub fn new(allow_simultaneous_opposites: bool) -> Self {
        Self {
            held: HeldTime::default(),
            allow_simultaneous_opposites,
        }
    }

    /// Counters are kept as-is when toggling in either direction.
    pub fn set_allow_simultaneous_opposites(&mut self, allow: bool) {
        self.allow_simultaneous_opposites = allow;
    }

    pub fn allows_simultaneous_opposites(&self) -> bool {
        self.allow_simultaneous_opposites
    }

    pub fn held_time(&self) -> HeldTime {
        self.held
    }

    /// Advances the held-time counters from the raw, pre-arbitration pad.
    pub fn observe(&mut self, raw: &PadButtons) {
        if self.allow_simultaneous_opposites {
            return;
        }

        bump(&mut self.held.up, raw.up);
        bump(&mut self.held.down, raw.down);
        bump(&mut self.held.left, raw.left);
        bump(&mut self.held.right, raw.right);
    }

    pub fn restrict(&self, pad: &mut PadButtons) {
        if self.allow_simultaneous_opposites {
            return;
        }

        if pad.up && pad.down {
            if self.held.up < self.held.down {
                pad.down = false;
            } else {
                pad.up = false;
            }
        }
        if pad.left && pad.right {
            if self.held.left < self.held.right {
                pad.right = false;
            } else {
                pad.left = false;
            }
        }
    }
}

fn bump(counter: &mut u32, pressed: bool) {
    if pressed {
        *counter = counter.saturating_add(1);
    } else {
        *counter = 0;
    }
}
