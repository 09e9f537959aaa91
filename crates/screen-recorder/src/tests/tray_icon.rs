use crate::{TrayIconState, tray_manager::icon_pixels};

const SIZE: usize = 32;

fn pixel(rgba: &[u8], x: usize, y: usize) -> [u8; 4] {
    let i = (y * SIZE + x) * 4;
    [rgba[i], rgba[i + 1], rgba[i + 2], rgba[i + 3]]
}

/// WHAT: Icons are 32x32 RGBA with a transparent corner and a filled centre
/// WHY: tray-icon rejects buffers that do not match the declared size
#[test]
fn given_each_state_when_drawing_icon_then_size_and_shape_correct() {
    for state in [
        TrayIconState::Idle,
        TrayIconState::Recording,
        TrayIconState::Paused,
        TrayIconState::Processing,
    ] {
        // Given/When: The icon for the state
        let rgba = icon_pixels(state);

        // Then: Right size, transparent corner, state colour in the middle
        assert_eq!(rgba.len(), SIZE * SIZE * 4);
        assert_eq!(pixel(&rgba, 0, 0), [0, 0, 0, 0]);
        assert_eq!(pixel(&rgba, 15, 16), state.color());
    }
}

/// WHAT: The paused icon has bars cut out of the disc
/// WHY: Paused must be distinguishable from recording without colour
#[test]
fn given_paused_state_when_drawing_icon_then_bars_are_transparent() {
    // Given/When: Paused and recording icons
    let paused = icon_pixels(TrayIconState::Paused);
    let recording = icon_pixels(TrayIconState::Recording);

    // Then: A point on the right bar is cut out only when paused
    assert_eq!(pixel(&paused, 20, 16), [0, 0, 0, 0]);
    assert_eq!(pixel(&recording, 20, 16), TrayIconState::Recording.color());
}

/// WHAT: Each state has its own colour and tooltip
/// WHY: The tray icon is the only always-visible status indicator
#[test]
fn given_states_when_comparing_then_colours_and_tooltips_differ() {
    let states = [
        TrayIconState::Idle,
        TrayIconState::Recording,
        TrayIconState::Paused,
        TrayIconState::Processing,
    ];
    for (i, a) in states.iter().enumerate() {
        for b in &states[i + 1..] {
            assert_ne!(a.color(), b.color());
            assert_ne!(a.tooltip(), b.tooltip());
        }
    }
}
