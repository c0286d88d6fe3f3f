//! Frontend hotkeys: savestates, quit, fullscreen, auto-pause, fake mic
//!
//! Hotkeys never reach the emulated pad on key down, with the exception of
//! the shift keys, which double as bindable keys. Every key up is still
//! forwarded so that a bound key can never get stuck.

use crate::controller::raw_event::{KeyModifiers, WindowEvent};
use crate::frontend::keysym::{self, Keysym};
use tracing::info;

const LSHIFT_BIT: u8 = 0b01;
const RSHIFT_BIT: u8 = 0b10;

/// Request for the host frontend, produced while processing a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCommand {
    Quit,
    ToggleFullscreen,
    LoadState(u8),
    SaveState(u8),
    Pause,
    Resume,
    Resized { width: i32, height: i32 },
    FakeMic(bool),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotkeyState {
    shift_pressed: u8,
    fake_mic: bool,
    focused: bool,
}

impl Default for HotkeyState {
    fn default() -> Self {
        Self {
            shift_pressed: 0,
            fake_mic: false,
            focused: true,
        }
    }
}

impl HotkeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shift_held(&self) -> bool {
        self.shift_pressed != 0
    }

    pub fn fake_mic(&self) -> bool {
        self.fake_mic
    }

    pub fn focused(&self) -> bool {
        self.focused
    }

    /// Handles a key press. Returns `false` when the key was consumed by a
    /// hotkey and must not be forwarded to the binding table.
    pub fn key_down(
        &mut self,
        sym: Keysym,
        modifiers: KeyModifiers,
        commands: &mut Vec<HostCommand>,
    ) -> bool {
        if sym == keysym::RETURN && modifiers.alt() {
            info!("Toggling fullscreen");
            commands.push(HostCommand::ToggleFullscreen);
            return false;
        }

        match sym {
            keysym::LSHIFT => self.shift_pressed |= LSHIFT_BIT,
            keysym::RSHIFT => self.shift_pressed |= RSHIFT_BIT,
            _ => {}
        }
        true
    }

    /// Handles a key release. The release itself is always forwarded by the
    /// caller.
    pub fn key_up(&mut self, sym: Keysym, fake_mic_hotkey: bool, commands: &mut Vec<HostCommand>) {
        match sym {
            keysym::ESCAPE => {
                info!("Quit requested from keyboard");
                commands.push(HostCommand::Quit);
            }
            keysym::M if fake_mic_hotkey => {
                self.fake_mic = !self.fake_mic;
                if self.fake_mic {
                    info!("Fake mic enabled");
                } else {
                    info!("Fake mic disabled");
                }
                commands.push(HostCommand::FakeMic(self.fake_mic));
            }
            keysym::LSHIFT => self.shift_pressed &= !LSHIFT_BIT,
            keysym::RSHIFT => self.shift_pressed &= !RSHIFT_BIT,
            _ => {
                if let Some(slot) = keysym::function_key_slot(sym) {
                    if self.shift_held() {
                        info!("Saving state to slot {}", slot);
                        commands.push(HostCommand::SaveState(slot));
                    } else {
                        info!("Loading state from slot {}", slot);
                        commands.push(HostCommand::LoadState(slot));
                    }
                }
            }
        }
    }

    pub fn window_event(
        &mut self,
        event: &WindowEvent,
        auto_pause: bool,
        commands: &mut Vec<HostCommand>,
    ) {
        match *event {
            WindowEvent::Resized { width, height } => {
                commands.push(HostCommand::Resized { width, height });
            }
            WindowEvent::FocusGained => {
                self.focused = true;
                if auto_pause {
                    info!("Auto pause disabled");
                    commands.push(HostCommand::Resume);
                }
            }
            WindowEvent::FocusLost => {
                self.focused = false;
                if auto_pause {
                    info!("Auto pause enabled");
                    commands.push(HostCommand::Pause);
                }
            }
            WindowEvent::Other => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alt_return_toggles_fullscreen_and_is_consumed() {
        let mut hotkeys = HotkeyState::new();
        let mut commands = Vec::new();

        assert!(!hotkeys.key_down(keysym::RETURN, KeyModifiers::LALT, &mut commands));
        assert_eq!(commands, vec![HostCommand::ToggleFullscreen]);

        commands.clear();
        assert!(hotkeys.key_down(keysym::RETURN, KeyModifiers::NONE, &mut commands));
        assert!(commands.is_empty());
    }

    #[test]
    fn function_keys_load_or_save_with_shift() {
        let mut hotkeys = HotkeyState::new();
        let mut commands = Vec::new();

        hotkeys.key_up(keysym::F1 + 2, false, &mut commands);
        assert!(hotkeys.key_down(keysym::RSHIFT, KeyModifiers::NONE, &mut commands));
        hotkeys.key_up(keysym::F1 + 2, false, &mut commands);
        hotkeys.key_up(keysym::RSHIFT, false, &mut commands);
        hotkeys.key_up(keysym::F10, false, &mut commands);

        assert_eq!(
            commands,
            vec![
                HostCommand::LoadState(3),
                HostCommand::SaveState(3),
                HostCommand::LoadState(10),
            ]
        );
    }

    #[test]
    fn both_shift_keys_must_be_released() {
        let mut hotkeys = HotkeyState::new();
        let mut commands = Vec::new();
        hotkeys.key_down(keysym::LSHIFT, KeyModifiers::NONE, &mut commands);
        hotkeys.key_down(keysym::RSHIFT, KeyModifiers::LSHIFT, &mut commands);
        hotkeys.key_up(keysym::LSHIFT, false, &mut commands);
        assert!(hotkeys.shift_held());
        hotkeys.key_up(keysym::RSHIFT, false, &mut commands);
        assert!(!hotkeys.shift_held());
    }

    #[test]
    fn fake_mic_needs_the_hotkey_enabled() {
        let mut hotkeys = HotkeyState::new();
        let mut commands = Vec::new();

        hotkeys.key_up(keysym::M, false, &mut commands);
        assert!(commands.is_empty());

        hotkeys.key_up(keysym::M, true, &mut commands);
        hotkeys.key_up(keysym::M, true, &mut commands);
        assert_eq!(commands, vec![HostCommand::FakeMic(true), HostCommand::FakeMic(false)]);
    }

    #[test]
    fn focus_changes_pause_only_with_auto_pause() {
        let mut hotkeys = HotkeyState::new();
        let mut commands = Vec::new();

        hotkeys.window_event(&WindowEvent::FocusLost, false, &mut commands);
        assert!(commands.is_empty());
        assert!(!hotkeys.focused());

        hotkeys.window_event(&WindowEvent::FocusGained, true, &mut commands);
        hotkeys.window_event(&WindowEvent::FocusLost, true, &mut commands);
        hotkeys.window_event(&WindowEvent::Resized { width: 512, height: 768 }, true, &mut commands);
        assert_eq!(
            commands,
            vec![
                HostCommand::Resume,
                HostCommand::Pause,
                HostCommand::Resized { width: 512, height: 768 },
            ]
        );
    }

    #[test]
    fn escape_quits() {
        let mut hotkeys = HotkeyState::new();
        let mut commands = Vec::new();
        hotkeys.key_up(keysym::ESCAPE, false, &mut commands);
        assert_eq!(commands, vec![HostCommand::Quit]);
    }
}
