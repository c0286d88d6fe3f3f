//! Gamepad backend on top of gilrs
//!
//! gilrs reports d-pads either as four buttons or as two axes depending on
//! the platform mapping. Both forms are folded into hat 0 so that bindings
//! learned on one platform keep working on another.

use crate::controller::backend::{BackendError, InputBackend, JoystickHandle};
use crate::controller::raw_event::{InstanceId, RawEvent, HAT_DOWN, HAT_LEFT, HAT_RIGHT, HAT_UP};
use gilrs::{Axis, Button, Event, EventType, GamepadId, Gilrs};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

/// Deflection at which a d-pad axis counts as pressed.
const DPAD_AXIS_THRESHOLD: f32 = 0.5;

pub struct GilrsJoystick {
    instance_id: InstanceId,
    name: String,
}

impl JoystickHandle for GilrsJoystick {
    fn instance_id(&self) -> InstanceId {
        self.instance_id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

pub struct GilrsBackend {
    gilrs: Gilrs,
    // current d-pad bitmask per gamepad
    hats: HashMap<GamepadId, u8>,
}

impl GilrsBackend {
    pub fn new() -> Result<Self, BackendError> {
        info!("Initializing gilrs controller interface");
        let gilrs = match Gilrs::new() {
            Ok(g) => {
                info!("Successfully initialized gilrs");
                g
            }
            Err(e) => {
                error!("Failed to initialize gilrs: {}", e);
                return Err(BackendError::InitializationError(e.to_string()));
            }
        };

        Ok(Self {
            gilrs,
            hats: HashMap::new(),
        })
    }

    fn convert(&mut self, id: GamepadId, event: EventType) -> Option<RawEvent> {
        match event {
            EventType::ButtonPressed(button, _) => self.convert_button(id, button, true),
            EventType::ButtonReleased(button, _) => self.convert_button(id, button, false),
            EventType::AxisChanged(axis, value, _) => self.convert_axis(id, axis, value),
            EventType::Connected => {
                info!("Controller connected event detected");
                Some(RawEvent::JoyDeviceAdded {
                    index: usize::from(id),
                })
            }
            EventType::Disconnected => {
                info!("Controller disconnected event detected");
                self.hats.remove(&id);
                Some(RawEvent::JoyDeviceRemoved {
                    which: instance_of(id),
                })
            }
            _ => {
                debug!("Unhandled gilrs event: {:?}", event);
                None
            }
        }
    }

    fn convert_button(&mut self, id: GamepadId, button: Button, pressed: bool) -> Option<RawEvent> {
        if let Some(bit) = dpad_bit(button) {
            let hat = self.hats.entry(id).or_default();
            if pressed {
                *hat |= bit;
            } else {
                *hat &= !bit;
            }
            return Some(RawEvent::JoyHat {
                which: instance_of(id),
                hat: 0,
                value: *hat,
            });
        }

        let which = instance_of(id);
        let Some(button) = button_index(button) else {
            debug!("Ignoring unsupported button: {:?}", button);
            return None;
        };
        Some(if pressed {
            RawEvent::JoyButtonDown { which, button }
        } else {
            RawEvent::JoyButtonUp { which, button }
        })
    }

    fn convert_axis(&mut self, id: GamepadId, axis: Axis, value: f32) -> Option<RawEvent> {
        let which = instance_of(id);
        let (negative, positive) = match axis {
            Axis::DPadX => (HAT_LEFT, HAT_RIGHT),
            Axis::DPadY => (HAT_DOWN, HAT_UP),
            _ => {
                let Some(index) = axis_index(axis) else {
                    debug!("Ignoring unsupported axis: {:?}", axis);
                    return None;
                };
                return Some(RawEvent::JoyAxis {
                    which,
                    axis: index,
                    value: scale_axis(value),
                });
            }
        };

        let hat = self.hats.entry(id).or_default();
        *hat &= !(negative | positive);
        if value > DPAD_AXIS_THRESHOLD {
            *hat |= positive;
        } else if value < -DPAD_AXIS_THRESHOLD {
            *hat |= negative;
        }
        Some(RawEvent::JoyHat {
            which,
            hat: 0,
            value: *hat,
        })
    }
}

impl InputBackend for GilrsBackend {
    fn poll_event(&mut self) -> Option<RawEvent> {
        while let Some(Event { id, event, .. }) = self.gilrs.next_event() {
            if let Some(raw) = self.convert(id, event) {
                return Some(raw);
            }
        }
        None
    }

    fn wait_event(&mut self, timeout: Duration) -> Option<RawEvent> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Some(event) = self.poll_event() {
                return Some(event);
            }
            if Instant::now() >= deadline {
                return None;
            }
            std::thread::sleep(Duration::from_millis(1));
        }
    }

    fn joystick_count(&self) -> usize {
        self.gilrs.gamepads().count()
    }

    fn open_joystick(&mut self, index: usize) -> Result<Box<dyn JoystickHandle>, BackendError> {
        let (id, gamepad) = self
            .gilrs
            .gamepads()
            .find(|(id, _)| usize::from(*id) == index)
            .ok_or_else(|| BackendError::OpenFailed {
                index,
                reason: "gamepad is not connected".to_string(),
            })?;

        Ok(Box::new(GilrsJoystick {
            instance_id: instance_of(id),
            name: gamepad.name().to_string(),
        }))
    }
}

fn instance_of(id: GamepadId) -> InstanceId {
    usize::from(id) as InstanceId
}

fn scale_axis(value: f32) -> i16 {
    (value.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16
}

fn dpad_bit(button: Button) -> Option<u8> {
    match button {
        Button::DPadUp => Some(HAT_UP),
        Button::DPadRight => Some(HAT_RIGHT),
        Button::DPadDown => Some(HAT_DOWN),
        Button::DPadLeft => Some(HAT_LEFT),
        _ => None,
    }
}

fn button_index(button: Button) -> Option<u8> {
    match button {
        Button::South => Some(0),
        Button::East => Some(1),
        Button::West => Some(2),
        Button::North => Some(3),
        Button::LeftTrigger => Some(4),
        Button::RightTrigger => Some(5),
        Button::Select => Some(6),
        Button::Start => Some(7),
        Button::Mode => Some(8),
        Button::LeftThumb => Some(9),
        Button::RightThumb => Some(10),
        Button::LeftTrigger2 => Some(11),
        Button::RightTrigger2 => Some(12),
        Button::C => Some(13),
        Button::Z => Some(14),
        _ => None,
    }
}

fn axis_index(axis: Axis) -> Option<u8> {
    match axis {
        Axis::LeftStickX => Some(0),
        Axis::LeftStickY => Some(1),
        Axis::LeftZ => Some(2),
        Axis::RightStickX => Some(3),
        Axis::RightStickY => Some(4),
        Axis::RightZ => Some(5),
        _ => None,
    }
}
