//! In-memory backend fed from a script of events
//!
//! Used for replaying recorded input and by the test suite. Device indices
//! are assigned in the order devices are added and are never reused.

use crate::controller::backend::{BackendError, InputBackend, JoystickHandle};
use crate::controller::raw_event::{InstanceId, RawEvent};
use std::collections::VecDeque;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptedJoystick {
    instance_id: InstanceId,
    name: String,
}

impl ScriptedJoystick {
    pub fn new(instance_id: InstanceId, name: &str) -> Self {
        Self {
            instance_id,
            name: name.to_string(),
        }
    }
}

impl JoystickHandle for ScriptedJoystick {
    fn instance_id(&self) -> InstanceId {
        self.instance_id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone)]
enum ScriptedDevice {
    Ready(ScriptedJoystick),
    Broken(String),
}

#[derive(Debug, Default)]
pub struct ScriptedBackend {
    events: VecDeque<RawEvent>,
    devices: Vec<Option<ScriptedDevice>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a device that is present before the first scan.
    pub fn add_device(&mut self, joystick: ScriptedJoystick) -> usize {
        self.devices.push(Some(ScriptedDevice::Ready(joystick)));
        self.devices.len() - 1
    }

    /// Registers a device whose open always fails.
    pub fn add_broken_device(&mut self, name: &str) -> usize {
        self.devices
            .push(Some(ScriptedDevice::Broken(format!("{} does not respond", name))));
        self.devices.len() - 1
    }

    /// Connects a device at runtime and queues the matching hot-plug event.
    pub fn plug(&mut self, joystick: ScriptedJoystick) -> usize {
        let index = self.add_device(joystick);
        self.events.push_back(RawEvent::JoyDeviceAdded { index });
        index
    }

    pub fn unplug(&mut self, instance_id: InstanceId) {
        for device in self.devices.iter_mut() {
            if matches!(device, Some(ScriptedDevice::Ready(j)) if j.instance_id == instance_id) {
                *device = None;
            }
        }
        self.events
            .push_back(RawEvent::JoyDeviceRemoved { which: instance_id });
    }

    pub fn push(&mut self, event: RawEvent) {
        self.events.push_back(event);
    }

    pub fn extend<I: IntoIterator<Item = RawEvent>>(&mut self, events: I) {
        self.events.extend(events);
    }

    pub fn pending(&self) -> usize {
        self.events.len()
    }
}

impl InputBackend for ScriptedBackend {
    fn poll_event(&mut self) -> Option<RawEvent> {
        self.events.pop_front()
    }

    fn wait_event(&mut self, timeout: Duration) -> Option<RawEvent> {
        let event = self.events.pop_front();
        if event.is_none() {
            std::thread::sleep(timeout.min(Duration::from_millis(1)));
        }
        event
    }

    fn joystick_count(&self) -> usize {
        self.devices.len()
    }

    fn open_joystick(&mut self, index: usize) -> Result<Box<dyn JoystickHandle>, BackendError> {
        match self.devices.get(index) {
            Some(Some(ScriptedDevice::Ready(joystick))) => {
                debug!("Opening scripted joystick {}", index);
                Ok(Box::new(joystick.clone()))
            }
            Some(Some(ScriptedDevice::Broken(reason))) => Err(BackendError::OpenFailed {
                index,
                reason: reason.clone(),
            }),
            _ => Err(BackendError::OpenFailed {
                index,
                reason: "no such device".to_string(),
            }),
        }
    }
}
