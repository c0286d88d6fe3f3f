//! Host input plumbing for joysticks and keyboard
//!
//! ```text
//! InputBackend ──► RawEvent ──► DeviceRegistry ──► normalizer ──► (PhysicalCode, Edge)
//!  (gilrs/script)                (slot lookup)
//! ```
//!
//! - [`backend`] - Backend traits implemented by [`gilrs_backend`] and [`scripted_backend`]
//! - [`device_registry`] - Joystick slots and hot-plug handling
//! - [`normalizer`] - Dead zone, hat decomposition and code construction
//! - [`capture`] - Learning a joystick binding from the next press

pub mod backend;
pub mod capture;
pub mod device_registry;
pub mod gilrs_backend;
pub mod normalizer;
pub mod raw_event;
pub mod scripted_backend;

pub use backend::{BackendError, InputBackend, JoystickHandle};
pub use capture::capture_joy_key;
pub use device_registry::{DeviceRegistry, RegistryError, ScanReport};
pub use gilrs_backend::GilrsBackend;
pub use normalizer::{capture_code, normalize, NormalizedInput};
pub use raw_event::{InstanceId, KeyModifiers, MouseButton, RawEvent, WindowEvent};
pub use scripted_backend::{ScriptedBackend, ScriptedJoystick};
