//! Abstract host input source
//!
//! The subsystem never owns the host event queue. A backend hands out events
//! one at a time and opens joysticks on request; everything else happens in
//! the subsystem.

use crate::controller::raw_event::{InstanceId, RawEvent};
use std::time::Duration;

/// Opened joystick. Dropping the handle releases the device.
pub trait JoystickHandle {
    fn instance_id(&self) -> InstanceId;

    fn name(&self) -> &str;
}

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("Failed to initialize input backend: {0}")]
    InitializationError(String),

    #[error("Failed to open joystick {index}: {reason}")]
    OpenFailed { index: usize, reason: String },
}

pub trait InputBackend {
    /// Next pending event, without blocking.
    fn poll_event(&mut self) -> Option<RawEvent>;

    /// Waits up to `timeout` for the next event.
    fn wait_event(&mut self, timeout: Duration) -> Option<RawEvent>;

    /// Number of joysticks the host currently knows about.
    fn joystick_count(&self) -> usize;

    fn open_joystick(&mut self, index: usize) -> Result<Box<dyn JoystickHandle>, BackendError>;
}
