//! Input binding and direction arbitration for a dual-screen handheld emulator frontend
//!
//! ```text
//! InputBackend ──► normalizer ──► Bindings ──► LogicalState ──► AntipodalArbiter ──► EmulatedCore
//!      ├──► DeviceRegistry (hot-plug)
//!      ├──► HotkeyState ──► HostCommand
//!      └──► TouchScreen
//! ```
//!
//! [`InputSubsystem`] owns all of it and is the only entry point the host
//! frontend needs.

pub mod controller;
pub mod emulated_core;
pub mod frontend;
pub mod mapping;
pub mod persistence;
pub mod subsystem;

pub use emulated_core::{EmulatedCore, LatchedCore};
pub use subsystem::{Capturing, InputSubsystem, Polling, TickReport};
