use crate::{AppCommand, MenuIds, MenuState, TrayIconState};

use screen_recorder_core::{AudioSelection, SessionPhase};
use tray_icon::menu::MenuId;

fn menu_ids() -> MenuIds {
    MenuIds {
        record: MenuId::new("record"),
        select_region: MenuId::new("select_region"),
        stop: MenuId::new("stop"),
        pause: MenuId::new("pause"),
        resume: MenuId::new("resume"),
        microphone: MenuId::new("microphone"),
        system: MenuId::new("system"),
        open_folder: MenuId::new("open_folder"),
        exit: MenuId::new("exit"),
    }
}

/// WHAT: Idle enables starting and audio toggles only
/// WHY: Stop/Pause/Resume have nothing to act on between sessions
#[test]
fn given_idle_phase_when_building_menu_then_only_start_actions_enabled() {
    // Given/When: The idle menu
    let menu = MenuState::for_phase(SessionPhase::Idle, AudioSelection::NONE);

    // Then: Start actions on, session actions off
    assert!(menu.record && menu.select_region && menu.audio_toggles);
    assert!(!menu.stop && !menu.pause && !menu.resume);
    assert_eq!(menu.icon, TrayIconState::Idle);
}

/// WHAT: Recording enables Stop and Pause
/// WHY: A second session cannot start while one is running
#[test]
fn given_recording_phase_when_building_menu_then_stop_and_pause_enabled() {
    // Given/When: The recording menu
    let menu = MenuState::for_phase(SessionPhase::Recording, AudioSelection::NONE);

    // Then: Stop and Pause on, everything else off
    assert!(menu.stop && menu.pause);
    assert!(!menu.resume && !menu.record && !menu.select_region && !menu.audio_toggles);
    assert_eq!(menu.icon, TrayIconState::Recording);
}

/// WHAT: Paused enables Stop and Resume
/// WHY: Pause and Resume are mutually exclusive
#[test]
fn given_paused_phase_when_building_menu_then_stop_and_resume_enabled() {
    // Given/When: The paused menu
    let menu = MenuState::for_phase(SessionPhase::Paused, AudioSelection::NONE);

    // Then: Resume replaces Pause
    assert!(menu.stop && menu.resume);
    assert!(!menu.pause && !menu.record);
    assert_eq!(menu.icon, TrayIconState::Paused);
}

/// WHAT: Selecting a region and stopping disable everything
/// WHY: No action is valid until the overlay or finalizer completes
#[test]
fn given_transient_phases_when_building_menu_then_actions_disabled() {
    for (phase, icon) in [
        (SessionPhase::SelectingRegion, TrayIconState::Idle),
        (SessionPhase::Stopping, TrayIconState::Processing),
    ] {
        // Given/When: The menu for a transient phase
        let menu = MenuState::for_phase(phase, AudioSelection::NONE);

        // Then: Nothing can be started, paused or resumed
        assert!(!menu.record && !menu.select_region && !menu.pause && !menu.resume);
        assert!(!menu.audio_toggles);
        assert_eq!(menu.icon, icon);
    }
}

/// WHAT: Audio check marks follow the selection in every phase
/// WHY: The tray shows which sources the next or current session uses
#[test]
fn given_audio_selection_when_building_menu_then_checks_mirror_it() {
    // Given: Microphone on, system audio off
    let audio = AudioSelection {
        microphone: true,
        system: false,
    };

    // When: Building menus for idle and recording
    let idle = MenuState::for_phase(SessionPhase::Idle, audio);
    let recording = MenuState::for_phase(SessionPhase::Recording, audio);

    // Then: Checks match the selection
    assert!(idle.microphone && !idle.system);
    assert!(recording.microphone && !recording.system);
}

/// WHAT: Every menu id maps to its command
/// WHY: The tray menu is the main control surface
#[test]
fn given_menu_ids_when_clicked_then_matching_commands() {
    // Given: A set of menu ids
    let ids = menu_ids();

    // When/Then: Each id yields its command
    assert!(matches!(ids.command_for(&ids.record), Some(AppCommand::RecordFullScreen)));
    assert!(matches!(ids.command_for(&ids.select_region), Some(AppCommand::SelectRegion)));
    assert!(matches!(ids.command_for(&ids.stop), Some(AppCommand::Stop)));
    assert!(matches!(ids.command_for(&ids.pause), Some(AppCommand::Pause)));
    assert!(matches!(ids.command_for(&ids.resume), Some(AppCommand::Resume)));
    assert!(matches!(ids.command_for(&ids.microphone), Some(AppCommand::ToggleMicrophone)));
    assert!(matches!(ids.command_for(&ids.system), Some(AppCommand::ToggleSystemAudio)));
    assert!(matches!(
        ids.command_for(&ids.open_folder),
        Some(AppCommand::OpenRecordingsFolder)
    ));
    assert!(matches!(ids.command_for(&ids.exit), Some(AppCommand::Shutdown)));
}

/// WHAT: Clicks on unknown ids are ignored
/// WHY: The elapsed label and separators have ids too
#[test]
fn given_unknown_menu_id_when_clicked_then_none() {
    // Given: Ids and a foreign id
    let ids = menu_ids();

    // When/Then: No command
    assert!(ids.command_for(&MenuId::new("elapsed")).is_none());
}
