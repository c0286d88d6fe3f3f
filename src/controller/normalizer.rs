//! Raw host events → `(PhysicalCode, Edge)` pairs
//!
//! Every joystick event is resolved to a registry slot first. Events from an
//! instance the registry does not know are dropped; they would otherwise need
//! a device index outside the 4-bit code field.

use crate::controller::device_registry::DeviceRegistry;
use crate::controller::raw_event::{InstanceId, RawEvent, HAT_CENTERED};
use crate::mapping::{Edge, HatDirection, InputSource, PhysicalCode};
use tracing::{debug, trace};

/// Right shift that leaves a non-zero value only for axis magnitudes of
/// at least half the positive range.
const AXIS_DEAD_ZONE_SHIFT: u32 = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizedInput {
    pub source: InputSource,
    pub code: PhysicalCode,
    pub edge: Edge,
}

impl NormalizedInput {
    fn joy(code: PhysicalCode, edge: Edge) -> Self {
        Self {
            source: InputSource::Joypad,
            code,
            edge,
        }
    }
}

pub fn axis_beyond_dead_zone(value: i16) -> bool {
    i32::from(value).unsigned_abs() >> AXIS_DEAD_ZONE_SHIFT != 0
}

/// Normalizes one event. Device, mouse and window events yield nothing.
pub fn normalize(event: &RawEvent, registry: &DeviceRegistry) -> Vec<NormalizedInput> {
    match *event {
        RawEvent::KeyDown { sym, .. } => vec![NormalizedInput {
            source: InputSource::Keyboard,
            code: PhysicalCode::key(sym),
            edge: Edge::Asserted,
        }],
        RawEvent::KeyUp { sym, .. } => vec![NormalizedInput {
            source: InputSource::Keyboard,
            code: PhysicalCode::key(sym),
            edge: Edge::Cleared,
        }],
        RawEvent::JoyAxis { which, axis, value } => {
            let Some(slot) = resolve_slot(registry, which) else {
                return Vec::new();
            };
            let negative = PhysicalCode::axis(slot, axis, false);
            if axis_beyond_dead_zone(value) {
                let active = PhysicalCode::axis(slot, axis, value > 0);
                vec![
                    NormalizedInput::joy(active, Edge::Asserted),
                    NormalizedInput::joy(active.opposite_axis(), Edge::Cleared),
                ]
            } else {
                // axis back at rest releases both directions
                vec![
                    NormalizedInput::joy(negative, Edge::Cleared),
                    NormalizedInput::joy(negative.opposite_axis(), Edge::Cleared),
                ]
            }
        }
        RawEvent::JoyHat { which, hat, value } => {
            let Some(slot) = resolve_slot(registry, which) else {
                return Vec::new();
            };
            HatDirection::SCAN_ORDER
                .iter()
                .map(|&direction| {
                    NormalizedInput::joy(
                        PhysicalCode::hat(slot, hat, direction),
                        Edge::from_pressed(value & direction.host_mask() != 0),
                    )
                })
                .collect()
        }
        RawEvent::JoyButtonDown { which, button } => resolve_slot(registry, which)
            .map(|slot| NormalizedInput::joy(PhysicalCode::button(slot, button), Edge::Asserted))
            .into_iter()
            .collect(),
        RawEvent::JoyButtonUp { which, button } => resolve_slot(registry, which)
            .map(|slot| NormalizedInput::joy(PhysicalCode::button(slot, button), Edge::Cleared))
            .into_iter()
            .collect(),
        RawEvent::JoyDeviceAdded { .. }
        | RawEvent::JoyDeviceRemoved { .. }
        | RawEvent::MouseButtonDown { .. }
        | RawEvent::MouseButtonUp { .. }
        | RawEvent::MouseMotion { .. }
        | RawEvent::Window(_)
        | RawEvent::Quit => Vec::new(),
    }
}

/// Code learned from an event while capturing a new joystick binding.
///
/// Only presses qualify: a button going down, an axis leaving the dead zone,
/// or a hat leaving the center. A diagonal hat yields its first direction in
/// Up, Right, Down, Left order.
pub fn capture_code(event: &RawEvent, registry: &DeviceRegistry) -> Option<PhysicalCode> {
    match *event {
        RawEvent::JoyButtonDown { which, button } => {
            let slot = resolve_slot(registry, which)?;
            debug!("Device: {}; Button: {}", slot, button);
            Some(PhysicalCode::button(slot, button))
        }
        RawEvent::JoyAxis { which, axis, value } if axis_beyond_dead_zone(value) => {
            let slot = resolve_slot(registry, which)?;
            debug!(
                "Device: {}; Axis: {} ({})",
                slot,
                axis,
                if value > 0 { '+' } else { '-' }
            );
            Some(PhysicalCode::axis(slot, axis, value > 0))
        }
        RawEvent::JoyHat { which, hat, value } if value != HAT_CENTERED => {
            let slot = resolve_slot(registry, which)?;
            let direction = HatDirection::SCAN_ORDER
                .into_iter()
                .find(|direction| value & direction.host_mask() != 0)?;
            debug!("Device: {}; Hat: {} ({:?})", slot, hat, direction);
            Some(PhysicalCode::hat(slot, hat, direction))
        }
        _ => None,
    }
}

fn resolve_slot(registry: &DeviceRegistry, which: InstanceId) -> Option<usize> {
    let slot = registry.slot_of(which);
    if slot.is_none() {
        trace!("Dropping event from unregistered joystick instance {}", which);
    }
    slot
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::raw_event::{HAT_DOWN, HAT_LEFT, HAT_RIGHT, HAT_UP};
    use crate::controller::scripted_backend::ScriptedJoystick;

    fn registry_with(slot: usize, instance: u32) -> DeviceRegistry {
        let mut registry = DeviceRegistry::new();
        registry
            .attach(slot, Box::new(ScriptedJoystick::new(instance, "pad")))
            .expect("free slot");
        registry
    }

    fn asserted(inputs: &[NormalizedInput]) -> Vec<PhysicalCode> {
        inputs
            .iter()
            .filter(|input| input.edge == Edge::Asserted)
            .map(|input| input.code)
            .collect()
    }

    #[test]
    fn axis_threshold_is_inclusive() {
        let registry = registry_with(0, 5);
        let at = normalize(&RawEvent::JoyAxis { which: 5, axis: 1, value: 1 << 14 }, &registry);
        assert_eq!(
            at,
            vec![
                NormalizedInput::joy(PhysicalCode::axis(0, 1, true), Edge::Asserted),
                NormalizedInput::joy(PhysicalCode::axis(0, 1, false), Edge::Cleared),
            ]
        );

        let below = normalize(
            &RawEvent::JoyAxis { which: 5, axis: 1, value: (1 << 14) - 1 },
            &registry,
        );
        assert!(asserted(&below).is_empty());
        assert_eq!(below.len(), 2);
        assert!(below.iter().any(|i| i.code == PhysicalCode::axis(0, 1, true)));
        assert!(below.iter().any(|i| i.code == PhysicalCode::axis(0, 1, false)));
    }

    #[test]
    fn negative_axis_threshold_is_inclusive() {
        let registry = registry_with(0, 5);
        let at = normalize(&RawEvent::JoyAxis { which: 5, axis: 1, value: -(1 << 14) }, &registry);
        assert_eq!(
            at,
            vec![
                NormalizedInput::joy(PhysicalCode::axis(0, 1, false), Edge::Asserted),
                NormalizedInput::joy(PhysicalCode::axis(0, 1, true), Edge::Cleared),
            ]
        );

        let inside = normalize(
            &RawEvent::JoyAxis { which: 5, axis: 1, value: -(1 << 14) + 1 },
            &registry,
        );
        assert!(asserted(&inside).is_empty());
        assert_eq!(inside.len(), 2);
        assert!(inside.iter().all(|i| i.edge == Edge::Cleared));
        assert!(!axis_beyond_dead_zone(-(1 << 14) + 1));
        assert!(axis_beyond_dead_zone(-(1 << 14)));
    }

    #[test]
    fn negative_axis_asserts_even_code() {
        let registry = registry_with(2, 9);
        let inputs = normalize(
            &RawEvent::JoyAxis { which: 9, axis: 0, value: i16::MIN },
            &registry,
        );
        assert_eq!(asserted(&inputs), vec![PhysicalCode::from_raw(0x2000)]);
        assert_eq!(inputs[1].code, PhysicalCode::from_raw(0x2001));
        assert_eq!(inputs[1].edge, Edge::Cleared);
    }

    #[test]
    fn diagonal_hat_asserts_two_codes() {
        let registry = registry_with(0, 1);
        let inputs = normalize(
            &RawEvent::JoyHat { which: 1, hat: 0, value: HAT_UP | HAT_LEFT },
            &registry,
        );
        assert_eq!(inputs.len(), 4);
        assert_eq!(
            asserted(&inputs),
            vec![
                PhysicalCode::hat(0, 0, HatDirection::Up),
                PhysicalCode::hat(0, 0, HatDirection::Left),
            ]
        );
    }

    #[test]
    fn buttons_map_to_one_pair() {
        let registry = registry_with(1, 3);
        let down = normalize(&RawEvent::JoyButtonDown { which: 3, button: 7 }, &registry);
        let up = normalize(&RawEvent::JoyButtonUp { which: 3, button: 7 }, &registry);
        assert_eq!(down, vec![NormalizedInput::joy(PhysicalCode::from_raw(0x1207), Edge::Asserted)]);
        assert_eq!(up, vec![NormalizedInput::joy(PhysicalCode::from_raw(0x1207), Edge::Cleared)]);
    }

    #[test]
    fn unknown_instance_is_dropped() {
        let registry = DeviceRegistry::new();
        assert!(normalize(&RawEvent::JoyButtonDown { which: 77, button: 0 }, &registry).is_empty());
        assert!(normalize(&RawEvent::JoyHat { which: 77, hat: 0, value: HAT_UP }, &registry).is_empty());
        assert!(normalize(&RawEvent::JoyAxis { which: 77, axis: 0, value: i16::MAX }, &registry).is_empty());
    }

    #[test]
    fn keys_and_non_input_events() {
        let registry = DeviceRegistry::new();
        let inputs = normalize(&RawEvent::key_down(0x61), &registry);
        assert_eq!(inputs[0].source, InputSource::Keyboard);
        assert_eq!(inputs[0].code, PhysicalCode::key(0x61));
        assert!(normalize(&RawEvent::MouseMotion { x: 1, y: 2 }, &registry).is_empty());
        assert!(normalize(&RawEvent::JoyDeviceAdded { index: 0 }, &registry).is_empty());
    }

    #[test]
    fn capture_ignores_releases_and_rest_positions() {
        let registry = registry_with(0, 4);
        assert_eq!(capture_code(&RawEvent::JoyButtonUp { which: 4, button: 1 }, &registry), None);
        assert_eq!(
            capture_code(&RawEvent::JoyAxis { which: 4, axis: 0, value: 100 }, &registry),
            None
        );
        assert_eq!(
            capture_code(&RawEvent::JoyHat { which: 4, hat: 0, value: HAT_CENTERED }, &registry),
            None
        );
    }

    #[test]
    fn capture_prefers_first_hat_direction() {
        let registry = registry_with(0, 4);
        let code = capture_code(
            &RawEvent::JoyHat { which: 4, hat: 1, value: HAT_RIGHT | HAT_DOWN },
            &registry,
        );
        assert_eq!(code, Some(PhysicalCode::hat(0, 1, HatDirection::Right)));

        let axis = capture_code(&RawEvent::JoyAxis { which: 4, axis: 2, value: 20_000 }, &registry);
        assert_eq!(axis, Some(PhysicalCode::axis(0, 2, true)));
    }
}
