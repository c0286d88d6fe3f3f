//! Blocking capture of the next joystick input, for rebinding
//!
//! Capture waits on the backend in short slices so that a cancelled token or
//! an expired deadline is noticed promptly even when no events arrive.

use crate::controller::backend::InputBackend;
use crate::controller::device_registry::DeviceRegistry;
use crate::controller::normalizer::capture_code;
use crate::mapping::PhysicalCode;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

const WAIT_SLICE: Duration = Duration::from_millis(50);

/// Waits for the first qualifying joystick input and returns its code.
///
/// Hot-plug events that arrive meanwhile update `registry`, so a pad
/// connected during capture can be used right away. Returns
/// [`PhysicalCode::UNBOUND`] on timeout or cancellation.
pub fn capture_joy_key(
    backend: &mut dyn InputBackend,
    registry: &mut DeviceRegistry,
    timeout: Duration,
    cancel: &CancellationToken,
) -> PhysicalCode {
    let deadline = Instant::now() + timeout;
    info!("Waiting up to {:?} for a joystick input", timeout);

    loop {
        if cancel.is_cancelled() {
            info!("Joystick capture cancelled");
            return PhysicalCode::UNBOUND;
        }

        let now = Instant::now();
        if now >= deadline {
            info!("Joystick capture timed out");
            return PhysicalCode::UNBOUND;
        }

        let Some(event) = backend.wait_event((deadline - now).min(WAIT_SLICE)) else {
            continue;
        };

        if registry.handle_device_event(backend, &event) {
            continue;
        }

        match capture_code(&event, registry) {
            Some(code) => {
                info!("Captured joystick input {}", code);
                return code;
            }
            None => debug!("Ignoring {:?} while capturing", event),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::raw_event::{RawEvent, HAT_UP};
    use crate::controller::scripted_backend::{ScriptedBackend, ScriptedJoystick};
    use crate::mapping::HatDirection;

    #[test]
    fn returns_first_qualifying_event() {
        let mut backend = ScriptedBackend::new();
        let mut registry = DeviceRegistry::new();
        registry
            .attach(0, Box::new(ScriptedJoystick::new(11, "pad")))
            .expect("free slot");
        backend.extend([
            RawEvent::JoyButtonUp { which: 11, button: 3 },
            RawEvent::JoyAxis { which: 11, axis: 0, value: 500 },
            RawEvent::JoyHat { which: 11, hat: 0, value: HAT_UP },
            RawEvent::JoyButtonDown { which: 11, button: 2 },
        ]);

        let code = capture_joy_key(
            &mut backend,
            &mut registry,
            Duration::from_secs(1),
            &CancellationToken::new(),
        );
        assert_eq!(code, PhysicalCode::hat(0, 0, HatDirection::Up));
        assert_eq!(backend.pending(), 1);
    }

    #[test]
    fn pad_plugged_during_capture_is_usable() {
        let mut backend = ScriptedBackend::new();
        let mut registry = DeviceRegistry::new();
        let index = backend.plug(ScriptedJoystick::new(30, "late"));
        backend.push(RawEvent::JoyButtonDown { which: 30, button: 1 });

        let code = capture_joy_key(
            &mut backend,
            &mut registry,
            Duration::from_secs(1),
            &CancellationToken::new(),
        );
        assert_eq!(code, PhysicalCode::button(index, 1));
    }

    #[test]
    fn cancellation_yields_unbound() {
        let mut backend = ScriptedBackend::new();
        let mut registry = DeviceRegistry::new();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let code = capture_joy_key(&mut backend, &mut registry, Duration::from_secs(5), &cancel);
        assert_eq!(code, PhysicalCode::UNBOUND);
    }

    #[test]
    fn timeout_yields_unbound() {
        let mut backend = ScriptedBackend::new();
        let mut registry = DeviceRegistry::new();
        let code = capture_joy_key(
            &mut backend,
            &mut registry,
            Duration::from_millis(5),
            &CancellationToken::new(),
        );
        assert_eq!(code, PhysicalCode::UNBOUND);
    }
}
