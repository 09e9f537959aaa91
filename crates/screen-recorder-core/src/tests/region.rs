use crate::{
    RecorderError,
    region::{CaptureArea, DragTracker, Region, ScreenPoint},
};

fn monitor() -> Region {
    Region::new(0, 0, 1920, 1080).unwrap()
}

/// WHAT: Dragging in any direction yields the same rectangle
/// WHY: Users drag up-left as often as down-right
#[test]
fn given_reverse_drag_when_releasing_then_normalized_region() {
    // Given: A press at the bottom-right corner
    let mut tracker = DragTracker::new();
    tracker.press(ScreenPoint::new(300, 200));
    tracker.drag(ScreenPoint::new(150, 120));
    assert!(tracker.is_dragging());

    // When: Releasing at the top-left corner
    let region = tracker.release(ScreenPoint::new(100, 100)).unwrap().unwrap();

    // Then: Origin is the top-left point and size is positive
    assert_eq!(region, Region::new(100, 100, 200, 100).unwrap());
    assert!(!tracker.is_dragging());
}

/// WHAT: Odd selections are rounded down to even dimensions
/// WHY: The encoder's 4:2:0 output rejects odd sizes
#[test]
fn given_odd_drag_when_releasing_then_even_dimensions() {
    let mut tracker = DragTracker::new();
    tracker.press(ScreenPoint::new(0, 0));

    let region = tracker.release(ScreenPoint::new(101, 51)).unwrap().unwrap();

    assert_eq!((region.width, region.height), (100, 50));
}

/// WHAT: A click without movement is rejected
/// WHY: Zero-area regions cannot be recorded
#[test]
fn given_click_without_drag_when_releasing_then_empty_region_error() {
    let mut tracker = DragTracker::new();
    tracker.press(ScreenPoint::new(40, 40));

    let result = tracker.release(ScreenPoint::new(40, 40)).unwrap();

    assert!(matches!(result, Err(RecorderError::EmptyRegion { .. })));
}

/// WHAT: Release without a press does nothing
/// WHY: A stray mouse-up from before the overlay opened must be ignored
#[test]
fn given_no_press_when_releasing_then_none() {
    let mut tracker = DragTracker::new();

    assert!(tracker.release(ScreenPoint::new(10, 10)).is_none());
    assert!(tracker.current().is_none());
}

/// WHAT: Cancelling forgets the gesture
/// WHY: Escape in the overlay abandons the selection
#[test]
fn given_active_drag_when_cancelled_then_no_region() {
    let mut tracker = DragTracker::new();
    tracker.press(ScreenPoint::new(0, 0));
    tracker.drag(ScreenPoint::new(50, 50));

    tracker.cancel();

    assert!(!tracker.is_dragging());
    assert!(tracker.release(ScreenPoint::new(60, 60)).is_none());
}

/// WHAT: Full-screen capture resolves to the even-aligned monitor
/// WHY: Some displays have odd pixel sizes
#[test]
fn given_odd_monitor_when_resolving_full_screen_then_even_bounds() {
    let bounds = Region::new(0, 0, 1367, 769).unwrap();

    let region = CaptureArea::FullScreen.resolve(&bounds).unwrap();

    assert_eq!(region, Region::new(0, 0, 1366, 768).unwrap());
}

/// WHAT: A region hanging off the screen is clipped to it
/// WHY: The grabber can only return pixels that exist
#[test]
fn given_region_past_edge_when_resolving_then_clamped_to_monitor() {
    let area = CaptureArea::Region(Region::new(1800, 1000, 400, 300).unwrap());

    let region = area.resolve(&monitor()).unwrap();

    assert_eq!(region, Region::new(1800, 1000, 120, 80).unwrap());
}

/// WHAT: A region entirely off-screen is rejected
/// WHY: Recording it would produce no pixels at all
#[test]
fn given_region_outside_monitor_when_resolving_then_error() {
    let area = CaptureArea::Region(Region::new(-500, -500, 100, 100).unwrap());

    assert!(matches!(
        area.resolve(&monitor()),
        Err(RecorderError::EmptyRegion { .. })
    ));
}

/// WHAT: Offsets are reported relative to a non-origin monitor
/// WHY: Secondary monitors have negative or shifted origins
#[test]
fn given_shifted_monitor_when_relating_region_then_offset_from_origin() {
    let bounds = Region::new(-1920, 0, 1920, 1080).unwrap();
    let region = Region::new(-1820, 50, 100, 100).unwrap();

    assert_eq!(region.relative_to(&bounds), (100, 50));
    assert!(bounds.contains(ScreenPoint::new(-1, 0)));
    assert!(!bounds.contains(ScreenPoint::new(0, 0)));
}
