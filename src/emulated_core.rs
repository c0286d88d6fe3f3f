//! Seam to the emulated console
//!
//! Each tick the subsystem latches the raw pad, then opens an input frame and
//! edits the processed pad in place before closing it.

use crate::mapping::PadButtons;

pub trait EmulatedCore {
    /// Raw pad, before direction arbitration.
    fn set_pad(&mut self, pad: &PadButtons);

    fn begin_input_frame(&mut self);

    /// Pad of the frame opened by [`begin_input_frame`](Self::begin_input_frame).
    fn processing_pad(&mut self) -> &mut PadButtons;

    fn end_input_frame(&mut self);
}

/// Core stand-in that records what it was handed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LatchedCore {
    pub raw: PadButtons,
    pub processed: PadButtons,
    pub frames: u64,
    pending: PadButtons,
}

impl LatchedCore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EmulatedCore for LatchedCore {
    fn set_pad(&mut self, pad: &PadButtons) {
        self.raw = *pad;
    }

    fn begin_input_frame(&mut self) {
        self.pending = self.raw;
    }

    fn processing_pad(&mut self) -> &mut PadButtons {
        &mut self.pending
    }

    fn end_input_frame(&mut self) {
        self.processed = self.pending;
        self.frames += 1;
    }
}
