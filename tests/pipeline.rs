use padbind::controller::raw_event::{KeyModifiers, MouseButton, HAT_CENTERED, HAT_UP};
use padbind::controller::{RawEvent, ScriptedBackend, ScriptedJoystick};
use padbind::frontend::{keysym, HostCommand, ScreenLayout};
use padbind::mapping::{
    Bindings, HatDirection, InputSource, LogicalButton, PadButtons, PhysicalCode,
};
use padbind::persistence::FrontendSettings;
use padbind::{InputSubsystem, LatchedCore, Polling};

fn subsystem_with(settings: FrontendSettings) -> InputSubsystem<Polling> {
    InputSubsystem::create(settings, Bindings::with_defaults())
}

#[test]
fn held_hat_up_loses_to_newer_down() {
    let mut subsystem = subsystem_with(FrontendSettings::default());
    let mut backend = ScriptedBackend::new();
    let mut core = LatchedCore::new();

    backend.add_device(ScriptedJoystick::new(100, "pad"));
    assert!(subsystem.init_joysticks(&mut backend).all_good());

    let hat_up = PhysicalCode::from_raw(0x0102);
    assert_eq!(hat_up, PhysicalCode::hat(0, 0, HatDirection::Up));
    let button_0 = PhysicalCode::button(0, 0);
    subsystem
        .bindings_mut()
        .bind(InputSource::Joypad, LogicalButton::Up, hat_up);
    subsystem
        .bindings_mut()
        .bind(InputSource::Joypad, LogicalButton::Down, button_0);

    backend.push(RawEvent::JoyHat {
        which: 100,
        hat: 0,
        value: HAT_UP,
    });
    for _ in 0..3 {
        let report = subsystem.process_tick(&mut backend, &mut core);
        assert!(report.pad.up && !report.pad.down);
    }
    assert_eq!(subsystem.arbiter().held_time().up, 3);

    backend.push(RawEvent::JoyButtonDown {
        which: 100,
        button: 0,
    });
    let report = subsystem.process_tick(&mut backend, &mut core);
    let held = subsystem.arbiter().held_time();
    assert_eq!((held.up, held.down), (4, 1));
    assert!(core.raw.up && core.raw.down);
    assert!(!report.pad.up);
    assert!(report.pad.down);

    backend.push(RawEvent::JoyHat {
        which: 100,
        hat: 0,
        value: HAT_CENTERED,
    });
    let report = subsystem.process_tick(&mut backend, &mut core);
    assert!(!report.pad.up && report.pad.down);
    assert_eq!(subsystem.arbiter().held_time().up, 0);
}

#[test]
fn hot_plugged_pad_resolves_within_the_same_batch() {
    let mut subsystem = subsystem_with(FrontendSettings::default());
    let mut backend = ScriptedBackend::new();
    let mut core = LatchedCore::new();

    backend.add_device(ScriptedJoystick::new(1, "first"));
    backend.add_device(ScriptedJoystick::new(2, "second"));
    subsystem.init_joysticks(&mut backend);
    subsystem.bindings_mut().bind(
        InputSource::Joypad,
        LogicalButton::A,
        PhysicalCode::button(2, 1),
    );

    let index = backend.plug(ScriptedJoystick::new(3, "late"));
    assert_eq!(index, 2);
    backend.push(RawEvent::JoyButtonDown {
        which: 3,
        button: 1,
    });
    let report = subsystem.process_tick(&mut backend, &mut core);
    assert_eq!(subsystem.registry().slot_of(3), Some(2));
    assert!(report.pad.a);

    backend.push(RawEvent::JoyButtonUp {
        which: 3,
        button: 1,
    });
    backend.unplug(3);
    backend.push(RawEvent::JoyButtonDown {
        which: 3,
        button: 1,
    });
    let report = subsystem.process_tick(&mut backend, &mut core);
    assert_eq!(subsystem.registry().slot_of(3), None);
    assert!(!report.pad.a);
}

#[test]
fn allowing_opposites_keeps_both_and_freezes_counters() {
    let settings = FrontendSettings {
        allow_simultaneous_opposites: true,
        ..FrontendSettings::default()
    };
    let mut subsystem = subsystem_with(settings);
    let mut backend = ScriptedBackend::new();
    let mut core = LatchedCore::new();

    backend.extend([
        RawEvent::key_down(keysym::LEFT),
        RawEvent::key_down(keysym::RIGHT),
    ]);
    let report = subsystem.process_tick(&mut backend, &mut core);
    assert!(report.pad.left && report.pad.right);
    assert_eq!(subsystem.arbiter().held_time().left, 0);

    // counters start from where they stopped once arbitration is back on
    subsystem.set_allow_simultaneous_opposites(false);
    let report = subsystem.process_tick(&mut backend, &mut core);
    assert!(!report.pad.left && report.pad.right);
}

#[test]
fn shift_f3_saves_and_f3_loads() {
    let mut subsystem = subsystem_with(FrontendSettings::default());
    let mut backend = ScriptedBackend::new();
    let mut core = LatchedCore::new();
    let f3 = keysym::F1 + 2;

    backend.extend([
        RawEvent::key_down(keysym::LSHIFT),
        RawEvent::KeyDown {
            sym: f3,
            modifiers: KeyModifiers::LSHIFT,
        },
        RawEvent::KeyUp {
            sym: f3,
            modifiers: KeyModifiers::LSHIFT,
        },
        RawEvent::key_up(keysym::LSHIFT),
        RawEvent::key_up(f3),
    ]);
    let report = subsystem.process_tick(&mut backend, &mut core);
    assert_eq!(
        report.commands,
        vec![HostCommand::SaveState(3), HostCommand::LoadState(3)]
    );
    assert_eq!(report.pad, PadButtons::default());
}

#[test]
fn mouse_maps_into_the_touch_screen() {
    let settings = FrontendSettings {
        layout: ScreenLayout::Horizontal,
        screen_size_ratio: 2.0,
        ..FrontendSettings::default()
    };
    let mut subsystem = subsystem_with(settings);
    let mut backend = ScriptedBackend::new();
    let mut core = LatchedCore::new();

    backend.extend([
        RawEvent::MouseButtonDown {
            button: MouseButton::Left,
            x: 600,
            y: 100,
        },
        RawEvent::MouseMotion { x: 600, y: 100 },
    ]);
    subsystem.process_tick(&mut backend, &mut core);
    let touch = subsystem.touch().state();
    assert!(touch.down);
    assert_eq!((touch.x, touch.y), (44, 50));

    // the main screen does not move the pen
    backend.push(RawEvent::MouseMotion { x: 10, y: 10 });
    backend.push(RawEvent::MouseButtonUp {
        button: MouseButton::Left,
        x: 10,
        y: 10,
    });
    subsystem.process_tick(&mut backend, &mut core);
    assert_eq!(subsystem.touch().state().x, 44);
    assert!(subsystem.touch_mut().take_click());
}

#[test]
fn default_keyboard_layout_covers_every_button() {
    let subsystem = subsystem_with(FrontendSettings::default());
    let bindings = subsystem.bindings();
    for button in LogicalButton::ALL {
        let code = bindings.keyboard.code_for(button);
        assert!(code.is_bound(), "{} has no key", button);
        assert_eq!(bindings.lookup(InputSource::Keyboard, code), Some(button));
        assert!(!bindings.joypad.code_for(button).is_bound());
    }
    assert_eq!(
        bindings.keyboard.code_for(LogicalButton::Start),
        PhysicalCode::key(keysym::RETURN)
    );
}
