//! Bindings, logical button state and direction arbitration.
//!
//! ```text
//! (PhysicalCode, Edge) ──► BindingTable ──► LogicalState ──► AntipodalArbiter ──► PadButtons
//! ```

pub mod arbiter;
pub mod binding_table;
pub mod logical_button;
pub mod logical_state;
pub mod physical_code;

pub use arbiter::{AntipodalArbiter, HeldTime};
pub use binding_table::{default_keyboard_codes, BindingTable, Bindings, InputSource};
pub use logical_button::{LogicalButton, PadButtons, NB_KEYS};
pub use logical_state::{Edge, LogicalState};
pub use physical_code::{HatDirection, JoyClass, PhysicalCode, MAX_JOYSTICKS};
