//! Mouse → lower-screen touch coordinates

use crate::controller::raw_event::MouseButton;
use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

pub const SCREEN_WIDTH: i32 = 256;
pub const SCREEN_HEIGHT: i32 = 192;

/// Arrangement of the two screens inside the host window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScreenLayout {
    /// Touch screen below the main screen.
    #[default]
    Vertical,
    /// Touch screen right of the main screen.
    Horizontal,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TouchState {
    pub x: u16,
    pub y: u16,
    pub down: bool,
    pub click: bool,
}

#[derive(Debug, Clone)]
pub struct TouchScreen {
    layout: ScreenLayout,
    ratio: f32,
    state: TouchState,
}

impl TouchScreen {
    pub fn new(layout: ScreenLayout, ratio: f32) -> Self {
        let ratio = if ratio.is_finite() && ratio > 0.0 {
            ratio
        } else {
            warn!("Invalid screen size ratio {}, using 1.0", ratio);
            1.0
        };

        Self {
            layout,
            ratio,
            state: TouchState::default(),
        }
    }

    pub fn layout(&self) -> ScreenLayout {
        self.layout
    }

    pub fn state(&self) -> TouchState {
        self.state
    }

    /// Moves the pen when the pointer is over the touch screen. Returns
    /// whether the position changed.
    pub fn mouse_motion(&mut self, x: i32, y: i32) -> bool {
        let scaled_x = (x as f32 / self.ratio) as i32;
        let scaled_y = (y as f32 / self.ratio) as i32;

        let (x, y) = match self.layout {
            ScreenLayout::Vertical if scaled_y >= SCREEN_HEIGHT => (scaled_x, scaled_y - SCREEN_HEIGHT),
            ScreenLayout::Horizontal if scaled_x >= SCREEN_WIDTH => (scaled_x - SCREEN_WIDTH, scaled_y),
            _ => {
                trace!("Pointer at ({}, {}) is outside the touch screen", x, y);
                return false;
            }
        };

        self.state.x = x.clamp(0, SCREEN_WIDTH - 1) as u16;
        self.state.y = y.clamp(0, SCREEN_HEIGHT) as u16;
        true
    }

    pub fn mouse_down(&mut self, button: MouseButton) {
        if button == MouseButton::Left && !self.state.down {
            self.state.down = true;
        }
    }

    pub fn mouse_up(&mut self) {
        if self.state.down {
            self.state.click = true;
            self.state.down = false;
        }
    }

    /// Returns and clears the pending click.
    pub fn take_click(&mut self) -> bool {
        std::mem::take(&mut self.state.click)
    }
}

impl Default for TouchScreen {
    fn default() -> Self {
        Self::new(ScreenLayout::default(), 1.0)
    }
}
