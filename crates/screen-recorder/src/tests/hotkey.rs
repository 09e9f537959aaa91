use crate::{AppCommand, hotkey_handler::HotkeyBindings};

use global_hotkey::HotKeyState;

fn bindings() -> HotkeyBindings {
    HotkeyBindings::from_hotkeys(&HotkeyBindings::hotkeys())
}

/// WHAT: Each hotkey maps to its own command on press
/// WHY: Record, pause and region selection must be reachable without the tray
#[test]
fn given_pressed_hotkeys_when_mapping_then_matching_commands() {
    // Given: The default bindings
    let bindings = bindings();

    // When/Then: Every binding yields its command
    assert!(matches!(
        bindings.command_for(bindings.toggle_recording, HotKeyState::Pressed),
        Some(AppCommand::ToggleRecording)
    ));
    assert!(matches!(
        bindings.command_for(bindings.toggle_pause, HotKeyState::Pressed),
        Some(AppCommand::TogglePause)
    ));
    assert!(matches!(
        bindings.command_for(bindings.select_region, HotKeyState::Pressed),
        Some(AppCommand::SelectRegion)
    ));
}

/// WHAT: Key releases produce no command
/// WHY: A single keystroke must not toggle twice
#[test]
fn given_released_hotkey_when_mapping_then_none() {
    // Given: The default bindings
    let bindings = bindings();

    // When: The record hotkey is released
    let command = bindings.command_for(bindings.toggle_recording, HotKeyState::Released);

    // Then: Nothing happens
    assert!(command.is_none());
}

/// WHAT: Unknown hotkey ids are ignored
/// WHY: Other applications' registrations must not trigger recording
#[test]
fn given_unknown_id_when_mapping_then_none() {
    // Given: An id that none of the bindings use
    let bindings = bindings();
    let unknown = bindings
        .toggle_recording
        .wrapping_add(bindings.toggle_pause)
        .wrapping_add(bindings.select_region)
        .wrapping_add(1);

    // When/Then: No command
    assert!(bindings.command_for(unknown, HotKeyState::Pressed).is_none());
}

/// WHAT: The three hotkeys have distinct ids
/// WHY: Colliding ids would make one binding shadow another
#[test]
fn given_default_hotkeys_when_building_bindings_then_ids_distinct() {
    // Given/When: The default bindings
    let bindings = bindings();

    // Then: All ids differ
    assert_ne!(bindings.toggle_recording, bindings.toggle_pause);
    assert_ne!(bindings.toggle_recording, bindings.select_region);
    assert_ne!(bindings.toggle_pause, bindings.select_region);
}
