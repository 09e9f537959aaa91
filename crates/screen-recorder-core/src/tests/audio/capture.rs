use crate::{
    audio::{
        AudioSelection, AudioSource, capture::ChunkForwarder, device::is_loopback_name, spool_path,
    },
    session::{PreviewSlot, SessionControl},
};

use std::{
    path::Path,
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicU64, Ordering},
    },
};

fn forwarder(depth: usize) -> (ChunkForwarder, crossbeam_channel::Receiver<Vec<f32>>) {
    let (chunks, received) = crossbeam_channel::bounded(depth);
    let forwarder = ChunkForwarder {
        chunks,
        control: Arc::new(SessionControl::new(Arc::new(PreviewSlot::new(false)))),
        shutdown: Arc::new(AtomicBool::new(false)),
        dropped: Arc::new(AtomicU64::new(0)),
    };
    (forwarder, received)
}

/// WHAT: Device buffers are dropped while the session is paused
/// WHY: Audio recorded during a pause would drift ahead of the video
#[test]
fn given_paused_session_when_device_delivers_audio_then_nothing_spooled() {
    // Given: A forwarder for a session that is paused
    let (forwarder, received) = forwarder(4);
    forwarder.control.pause();

    // When: The device delivers a buffer
    forwarder.forward(&[0.5f32; 8]);

    // Then: Nothing reaches the spool and nothing counts as dropped
    assert!(received.try_recv().is_err());
    assert_eq!(forwarder.dropped.load(Ordering::Relaxed), 0);

    // And: Buffers flow again after resuming
    forwarder.control.resume();
    forwarder.forward(&[i16::MAX; 4]);
    let chunk = received.try_recv().unwrap();
    assert_eq!(chunk.len(), 4);
    assert!(chunk.iter().all(|s| (*s - 1.0).abs() < 1e-3));
}

/// WHAT: A full queue loses the buffer and counts it
/// WHY: The device thread must never block on a slow disk
#[test]
fn given_full_queue_when_device_delivers_audio_then_chunk_counted_as_dropped() {
    let (forwarder, _received) = forwarder(1);

    forwarder.forward(&[0.1f32; 2]);
    forwarder.forward(&[0.2f32; 2]);

    assert_eq!(forwarder.dropped.load(Ordering::Relaxed), 1);
}

/// WHAT: Nothing is queued once shutdown is signalled
/// WHY: A late callback must not write after the spool closed
#[test]
fn given_shutdown_when_device_delivers_audio_then_ignored() {
    let (forwarder, received) = forwarder(4);
    forwarder.shutdown.store(true, Ordering::Release);

    forwarder.forward(&[0.3f32; 2]);

    assert!(received.try_recv().is_err());
}

/// WHAT: Output channel count follows the selected sources
/// WHY: Mic alone is mono; anything with system audio is stereo
#[test]
fn given_each_selection_when_asking_output_channels_then_layout_matches_policy() {
    // Given: Every combination of sources
    let cases = [
        (AudioSelection::NONE, 0),
        (AudioSelection { microphone: true, system: false }, 1),
        (AudioSelection { microphone: false, system: true }, 2),
        (AudioSelection { microphone: true, system: true }, 2),
    ];

    for (selection, expected) in cases {
        // When: Asking for the intermediate layout
        let channels = selection.output_channels();

        // Then: Mono only for microphone-only sessions
        assert_eq!(channels, expected, "selection {:?}", selection);
        assert_eq!(selection.is_empty(), expected == 0);
    }
}

/// WHAT: Sources are listed in a stable order
/// WHY: Spool files and mix order must not depend on toggle order
#[test]
fn given_both_sources_when_listing_then_microphone_comes_first() {
    // Given: Both sources requested
    let selection = AudioSelection {
        microphone: true,
        system: true,
    };

    // When: Listing sources
    let sources = selection.sources();

    // Then: Microphone precedes system
    assert_eq!(sources, vec![AudioSource::Microphone, AudioSource::System]);
}

/// WHAT: Loopback device names are recognised across platforms
/// WHY: System audio has no portable API; it is found by device name
#[test]
fn given_common_loopback_names_when_checking_then_detected() {
    // Given: Names used by Windows, PulseAudio and macOS loopback drivers
    let names = [
        "Stereo Mix (Realtek High Definition Audio)",
        "Monitor of Built-in Audio Analog Stereo",
        "alsa_output.pci-0000_00_1f.3.analog-stereo.monitor",
        "BlackHole 2ch",
    ];

    // Then: All are loopback inputs
    for name in names {
        assert!(is_loopback_name(name), "{name} should be loopback");
    }
}

/// WHAT: Ordinary microphones are not mistaken for loopback inputs
/// WHY: Picking a mic as "system audio" would record the room twice
#[test]
fn given_microphone_names_when_checking_then_not_loopback() {
    for name in ["USB Microphone", "Built-in Microphone", "Headset (Jabra)"] {
        assert!(!is_loopback_name(name), "{name} should not be loopback");
    }
}

/// WHAT: Spool files are named per source inside the intermediate dir
/// WHY: Two sources recorded at once must never share a file
#[test]
fn given_intermediate_dir_when_building_spool_paths_then_names_are_distinct() {
    let dir = Path::new("work");

    let mic = spool_path(dir, AudioSource::Microphone);
    let system = spool_path(dir, AudioSource::System);

    assert_eq!(mic, dir.join("output_temp_mic.raw.wav"));
    assert_eq!(system, dir.join("output_temp_system.raw.wav"));
}
