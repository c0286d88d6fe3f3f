use crate::mapping::logical_button::{LogicalButton, PadButtons};

/// Transition carried by a normalized input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Asserted,
    Cleared,
}

impl Edge {
    pub fn from_pressed(pressed: bool) -> Self {
        if pressed {
            Edge::Asserted
        } else {
            Edge::Cleared
        }
    }
}

/// Pressed set of logical buttons for the current frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogicalState {
    bits: u16,
}

impl LogicalState {
    pub fn apply(&mut self, logical: LogicalButton, edge: Edge) {
        match edge {
            Edge::Asserted => self.bits |= logical.mask(),
            Edge::Cleared => self.bits &= !logical.mask(),
        }
    }

    pub fn is_pressed(&self, logical: LogicalButton) -> bool {
        self.bits & logical.mask() != 0
    }

    pub fn bits(&self) -> u16 {
        self.bits
    }

    pub fn clear(&mut self) {
        self.bits = 0;
    }

    pub fn to_pad(&self) -> PadButtons {
        PadButtons::from_mask(self.bits)
    }
}
