//! Joystick slot registry
//!
//! Slots are the 4-bit device index embedded in every joystick
//! [`PhysicalCode`](crate::mapping::PhysicalCode). A slot stays assigned for as
//! long as the physical connection lasts; hot-plug events fill and clear them.

use crate::controller::backend::{InputBackend, JoystickHandle};
use crate::controller::raw_event::{InstanceId, RawEvent};
use crate::mapping::MAX_JOYSTICKS;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("Joystick slot {slot} exceeds the maximum supported index {max}", max = MAX_JOYSTICKS - 1)]
    SlotOutOfRange { slot: usize },

    #[error("Joystick slot {slot} is already occupied")]
    SlotOccupied { slot: usize },

    #[error("Failed to open joystick {slot}: {reason}")]
    OpenFailed { slot: usize, reason: String },
}

/// Outcome of an initial device scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    pub opened: usize,
    pub failed: Vec<usize>,
}

impl ScanReport {
    pub fn all_good(&self) -> bool {
        self.failed.is_empty()
    }
}

struct DeviceEntry {
    handle: Box<dyn JoystickHandle>,
    instance_id: InstanceId,
}

pub struct DeviceRegistry {
    slots: [Option<DeviceEntry>; MAX_JOYSTICKS],
}

impl Default for DeviceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| None),
        }
    }

    pub fn attach(
        &mut self,
        slot: usize,
        handle: Box<dyn JoystickHandle>,
    ) -> Result<InstanceId, RegistryError> {
        let Some(entry) = self.slots.get_mut(slot) else {
            warn!(
                "Refusing to attach {} to slot {}, last slot is {}",
                handle.name(),
                slot,
                MAX_JOYSTICKS - 1
            );
            return Err(RegistryError::SlotOutOfRange { slot });
        };

        if entry.is_some() {
            warn!("Refusing to attach {} to occupied slot {}", handle.name(), slot);
            return Err(RegistryError::SlotOccupied { slot });
        }

        let instance_id = handle.instance_id();
        info!("Joystick {} attached to slot {}", handle.name(), slot);
        *entry = Some(DeviceEntry {
            handle,
            instance_id,
        });
        Ok(instance_id)
    }

    /// Opens the host device at `slot` and attaches it.
    pub fn open(
        &mut self,
        backend: &mut dyn InputBackend,
        slot: usize,
    ) -> Result<InstanceId, RegistryError> {
        match self.slots.get(slot) {
            None => return Err(RegistryError::SlotOutOfRange { slot }),
            Some(Some(_)) => return Err(RegistryError::SlotOccupied { slot }),
            Some(None) => {}
        }

        let handle = backend
            .open_joystick(slot)
            .map_err(|e| RegistryError::OpenFailed {
                slot,
                reason: e.to_string(),
            })?;
        self.attach(slot, handle)
    }

    /// Opens every joystick the backend reports, up to [`MAX_JOYSTICKS`].
    /// A device that fails to open is reported and skipped.
    pub fn scan(&mut self, backend: &mut dyn InputBackend) -> ScanReport {
        let mut report = ScanReport::default();
        let available = backend.joystick_count().min(MAX_JOYSTICKS);
        if available > 0 {
            info!("Found {} joysticks", available);
        }

        for slot in 0..available {
            match self.open(backend, slot) {
                Ok(_) => report.opened += 1,
                Err(e) => {
                    warn!("{}", e);
                    report.failed.push(slot);
                }
            }
        }
        report
    }

    /// Releases the device with `instance_id`. Returns the slot it occupied.
    pub fn detach(&mut self, instance_id: InstanceId) -> Option<usize> {
        let slot = self.slot_of(instance_id)?;
        if let Some(entry) = self.slots[slot].take() {
            info!("Joystick {} ({}) disconnected", slot, entry.handle.name());
        }
        Some(slot)
    }

    pub fn slot_of(&self, instance_id: InstanceId) -> Option<usize> {
        self.slots.iter().position(|entry| {
            entry
                .as_ref()
                .is_some_and(|entry| entry.instance_id == instance_id)
        })
    }

    pub fn count(&self) -> usize {
        self.slots.iter().filter(|entry| entry.is_some()).count()
    }

    pub fn name(&self, slot: usize) -> Option<&str> {
        self.slots
            .get(slot)?
            .as_ref()
            .map(|entry| entry.handle.name())
    }

    /// Releases every device.
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            if let Some(entry) = slot.take() {
                debug!("Closing joystick {}", entry.handle.name());
            }
        }
    }

    /// Applies a hot-plug event. Returns `false` for every other event kind.
    pub fn handle_device_event(&mut self, backend: &mut dyn InputBackend, event: &RawEvent) -> bool {
        match *event {
            RawEvent::JoyDeviceAdded { index } => {
                if index >= MAX_JOYSTICKS {
                    info!(
                        "Joystick {} connected to the system, but maximum supported joystick index is {}, ignoring",
                        index,
                        MAX_JOYSTICKS - 1
                    );
                } else if self.slots[index].is_some() {
                    // already opened by the initial scan
                    debug!("Joystick {} already open", index);
                } else if let Err(e) = self.open(backend, index) {
                    warn!("{}", e);
                }
                true
            }
            RawEvent::JoyDeviceRemoved { which } => {
                if self.detach(which).is_none() {
                    debug!("Removal of unknown joystick instance {}", which);
                }
                true
            }
            _ => false,
        }
    }
}
