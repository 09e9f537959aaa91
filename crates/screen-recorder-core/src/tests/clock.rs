use crate::clock::{SessionClock, format_hms};

use std::time::{Duration, Instant};

const SECOND: Duration = Duration::from_secs(1);

/// WHAT: Elapsed time excludes paused intervals
/// WHY: The status label must show recorded time, not wall time
#[test]
fn given_pause_and_resume_when_measuring_then_pause_excluded() {
    // Given: A clock started at t0, paused from t0+10s to t0+25s
    let t0 = Instant::now();
    let mut clock = SessionClock::start(t0);
    clock.pause(t0 + 10 * SECOND);
    clock.resume(t0 + 25 * SECOND);

    // When: Measuring at t0+40s
    let elapsed = clock.elapsed_at(t0 + 40 * SECOND);

    // Then: Only the 25 running seconds count
    assert_eq!(elapsed, 25 * SECOND);
}

/// WHAT: The clock is frozen while paused
/// WHY: The label must not advance during a pause
#[test]
fn given_paused_clock_when_time_passes_then_elapsed_frozen() {
    let t0 = Instant::now();
    let mut clock = SessionClock::start(t0);
    clock.pause(t0 + 5 * SECOND);

    assert!(clock.is_paused());
    assert_eq!(clock.elapsed_at(t0 + 6 * SECOND), 5 * SECOND);
    assert_eq!(clock.elapsed_at(t0 + 60 * SECOND), 5 * SECOND);
}

/// WHAT: Repeated pause and resume calls have no extra effect
/// WHY: Hotkey repeat can deliver the same command twice
#[test]
fn given_double_pause_and_resume_when_measuring_then_counted_once() {
    let t0 = Instant::now();
    let mut clock = SessionClock::start(t0);
    clock.pause(t0 + 2 * SECOND);
    clock.pause(t0 + 4 * SECOND);
    clock.resume(t0 + 6 * SECOND);
    clock.resume(t0 + 8 * SECOND);

    assert!(!clock.is_paused());
    assert_eq!(clock.paused_total(t0 + 10 * SECOND), 4 * SECOND);
    assert_eq!(clock.elapsed_at(t0 + 10 * SECOND), 6 * SECOND);
}

/// WHAT: Durations render as zero-padded HH:MM:SS
/// WHY: Matches the label format shown in the tray
#[test]
fn given_durations_when_formatting_then_hh_mm_ss() {
    assert_eq!(format_hms(Duration::ZERO), "00:00:00");
    assert_eq!(format_hms(Duration::from_millis(59_999)), "00:00:59");
    assert_eq!(format_hms(Duration::from_secs(3_661)), "01:01:01");
    assert_eq!(format_hms(Duration::from_secs(100 * 3600)), "100:00:00");
}
