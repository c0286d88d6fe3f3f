//! Input subsystem: the context object that owns every input table
//!
//! Lifecycle:
//!
//! ```text
//! create ──► Polling ──begin_capture──► Capturing
//!              ▲  │                        │
//!              │  └──destroy               │
//!              └──────finish_capture───────┘
//! ```
//!
//! Per-tick polling and joystick capture both consume backend events, so the
//! two states never coexist.

use crate::controller::backend::InputBackend;
use crate::controller::capture;
use crate::controller::device_registry::{DeviceRegistry, ScanReport};
use crate::controller::normalizer::normalize;
use crate::controller::raw_event::RawEvent;
use crate::emulated_core::EmulatedCore;
use crate::frontend::hotkeys::{HostCommand, HotkeyState};
use crate::frontend::touch::TouchScreen;
use crate::mapping::{
    AntipodalArbiter, Bindings, InputSource, LogicalButton, LogicalState, PadButtons, PhysicalCode,
};
use crate::persistence::{FrontendSettings, PadbindConfig};
use statum::{machine, state};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

#[state]
#[derive(Debug, Clone)]
pub enum SubsystemState {
    Polling,   // Per-tick event processing
    Capturing, // Waiting for one joystick input to rebind
}

#[machine]
pub struct InputSubsystem<S: SubsystemState> {
    settings: FrontendSettings,
    bindings: Bindings,
    logical: LogicalState,
    arbiter: AntipodalArbiter,
    registry: DeviceRegistry,
    hotkeys: HotkeyState,
    touch: TouchScreen,
}

/// Result of one [`InputSubsystem::process_tick`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Events drained from the backend.
    pub events: usize,
    pub commands: Vec<HostCommand>,
    /// Pad handed to the core after arbitration.
    pub pad: PadButtons,
}

impl TickReport {
    pub fn quit_requested(&self) -> bool {
        self.commands.contains(&HostCommand::Quit)
    }
}

impl<S: SubsystemState> InputSubsystem<S> {
    pub fn settings(&self) -> &FrontendSettings {
        &self.settings
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    pub fn bindings_mut(&mut self) -> &mut Bindings {
        &mut self.bindings
    }

    pub fn logical_state(&self) -> LogicalState {
        self.logical
    }

    pub fn arbiter(&self) -> &AntipodalArbiter {
        &self.arbiter
    }

    pub fn set_allow_simultaneous_opposites(&mut self, allow: bool) {
        info!("Simultaneous opposite directions allowed: {}", allow);
        self.settings.allow_simultaneous_opposites = allow;
        self.arbiter.set_allow_simultaneous_opposites(allow);
    }

    pub fn registry(&self) -> &DeviceRegistry {
        &self.registry
    }

    pub fn touch(&self) -> &TouchScreen {
        &self.touch
    }

    pub fn touch_mut(&mut self) -> &mut TouchScreen {
        &mut self.touch
    }

    pub fn hotkeys(&self) -> &HotkeyState {
        &self.hotkeys
    }

    pub fn focused(&self) -> bool {
        self.hotkeys.focused()
    }

    /// Snapshot of the current bindings and settings for the config store.
    pub fn to_config(&self) -> PadbindConfig {
        PadbindConfig::from_bindings(&self.bindings, self.settings.clone())
    }
}

impl InputSubsystem<Polling> {
    pub fn create(settings: FrontendSettings, bindings: Bindings) -> Self {
        info!("Creating input subsystem");
        let arbiter = AntipodalArbiter::new(settings.allow_simultaneous_opposites);
        let touch = TouchScreen::new(settings.layout, settings.screen_size_ratio);

        Self::new(
            settings,
            bindings,
            LogicalState::default(),
            arbiter,
            DeviceRegistry::new(),
            HotkeyState::new(),
            touch,
        )
    }

    /// Opens the joysticks already connected. Skipped entirely when joystick
    /// support is disabled in the settings.
    pub fn init_joysticks(&mut self, backend: &mut dyn InputBackend) -> ScanReport {
        if self.settings.no_joystick {
            info!("Joystick support disabled, skipping initialization");
            return ScanReport::default();
        }

        let report = self.registry.scan(backend);
        if !report.all_good() {
            warn!("Failed to open joysticks {:?}", report.failed);
        }
        info!("{} joysticks ready", report.opened);
        report
    }

    /// Drains every pending backend event, then latches the pad into `core`.
    pub fn process_tick(
        &mut self,
        backend: &mut dyn InputBackend,
        core: &mut dyn EmulatedCore,
    ) -> TickReport {
        let mut report = TickReport::default();
        while let Some(event) = backend.poll_event() {
            report.events += 1;
            self.dispatch(backend, &event, &mut report.commands);
        }

        let raw = self.logical.to_pad();
        self.arbiter.observe(&raw);
        core.set_pad(&raw);
        core.begin_input_frame();
        self.arbiter.restrict(core.processing_pad());
        report.pad = *core.processing_pad();
        core.end_input_frame();

        report
    }

    pub fn begin_capture(self) -> InputSubsystem<Capturing> {
        info!("Entering joystick capture mode");
        self.transition()
    }

    /// Releases every joystick.
    pub fn destroy(mut self) {
        self.registry.clear();
        info!("Input subsystem destroyed");
    }

    fn dispatch(
        &mut self,
        backend: &mut dyn InputBackend,
        event: &RawEvent,
        commands: &mut Vec<HostCommand>,
    ) {
        match *event {
            RawEvent::KeyDown { sym, modifiers } => {
                if self.hotkeys.key_down(sym, modifiers, commands) {
                    self.apply_inputs(event);
                }
            }
            RawEvent::KeyUp { sym, .. } => {
                self.hotkeys
                    .key_up(sym, self.settings.fake_mic_hotkey, commands);
                self.apply_inputs(event);
            }
            RawEvent::JoyAxis { .. }
            | RawEvent::JoyHat { .. }
            | RawEvent::JoyButtonDown { .. }
            | RawEvent::JoyButtonUp { .. } => self.apply_inputs(event),
            RawEvent::JoyDeviceAdded { .. } | RawEvent::JoyDeviceRemoved { .. } => {
                if self.settings.no_joystick {
                    debug!("Ignoring {:?} with joystick support disabled", event);
                } else {
                    self.registry.handle_device_event(backend, event);
                }
            }
            RawEvent::MouseButtonDown { button, .. } => self.touch.mouse_down(button),
            RawEvent::MouseButtonUp { .. } => self.touch.mouse_up(),
            RawEvent::MouseMotion { x, y } => {
                self.touch.mouse_motion(x, y);
            }
            RawEvent::Window(ref window) => {
                self.hotkeys
                    .window_event(window, self.settings.auto_pause, commands)
            }
            RawEvent::Quit => {
                info!("Quit requested by host");
                commands.push(HostCommand::Quit);
            }
        }
    }

    fn apply_inputs(&mut self, event: &RawEvent) {
        for input in normalize(event, &self.registry) {
            if let Some(logical) = self.bindings.lookup(input.source, input.code) {
                debug!("{} {:?} ({:?} {})", logical, input.edge, input.source, input.code);
                self.logical.apply(logical, input.edge);
            }
        }
    }
}

impl InputSubsystem<Capturing> {
    /// Blocks until a joystick input arrives, the configured timeout expires
    /// or `cancel` fires. With `no_joystick` set nothing is captured.
    pub fn capture_joy_key(
        &mut self,
        backend: &mut dyn InputBackend,
        cancel: &CancellationToken,
    ) -> PhysicalCode {
        if self.settings.no_joystick {
            warn!("Joystick support is disabled, nothing to capture");
            return PhysicalCode::UNBOUND;
        }
        let timeout = Duration::from_millis(self.settings.capture_timeout_ms);
        capture::capture_joy_key(backend, &mut self.registry, timeout, cancel)
    }

    /// Captures a joystick input and binds it to `logical`. Returns the code
    /// bound to `logical` afterwards, which is unchanged when nothing was
    /// captured.
    pub fn capture_and_bind(
        &mut self,
        logical: LogicalButton,
        backend: &mut dyn InputBackend,
        cancel: &CancellationToken,
    ) -> PhysicalCode {
        info!("Press a joystick input for {}", logical);
        let code = self.capture_joy_key(backend, cancel);
        if code.is_bound() {
            info!("Binding {} to {}", logical, code);
            self.bindings.bind(InputSource::Joypad, logical, code);
        } else {
            warn!("No joystick input captured for {}", logical);
        }
        self.bindings.joypad.code_for(logical)
    }

    /// Returns to polling. Releases seen during capture were not applied, so
    /// every logical button starts released.
    pub fn finish_capture(mut self) -> InputSubsystem<Polling> {
        self.logical.clear();
        info!("Leaving joystick capture mode");
        self.transition()
    }
}
