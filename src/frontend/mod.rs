//! Window-level concerns that sit next to the pad pipeline
//!
//! - [`keysym`] - Host key symbols
//! - [`hotkeys`] - Savestate, quit and window hotkeys as [`HostCommand`]s
//! - [`touch`] - Mouse to touch screen forwarding

pub mod hotkeys;
pub mod keysym;
pub mod touch;

pub use hotkeys::{HostCommand, HotkeyState};
pub use touch::{ScreenLayout, TouchScreen, TouchState};
