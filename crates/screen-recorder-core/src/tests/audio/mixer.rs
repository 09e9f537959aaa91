use crate::audio::mixer::{mix_tracks, remix, to_i16};

/// WHAT: Stereo down-mix averages both channels
/// WHY: A stereo microphone in a mono session must keep its level
#[test]
fn given_stereo_frames_when_remixing_to_mono_then_channels_averaged() {
    // Given: Two stereo frames
    let stereo = [0.2, 0.4, -1.0, 1.0];

    // When: Down-mixing to mono
    let mono = remix(&stereo, 2, 1);

    // Then: Each frame is the mean of its channels
    assert_eq!(mono.len(), 2);
    assert!((mono[0] - 0.3).abs() < 1e-6);
    assert!(mono[1].abs() < 1e-6);
}

/// WHAT: Mono up-mix duplicates into both channels
/// WHY: The microphone is mixed into both sides of a stereo session
#[test]
fn given_mono_frames_when_remixing_to_stereo_then_duplicated() {
    let stereo = remix(&[0.1, -0.5], 1, 2);

    assert_eq!(stereo, vec![0.1, 0.1, -0.5, -0.5]);
}

/// WHAT: A trailing partial frame is dropped
/// WHY: A torn frame would shift every following sample to the wrong channel
#[test]
fn given_partial_trailing_frame_when_remixing_then_ignored() {
    let mono = remix(&[0.5, 0.5, 0.9], 2, 1);

    assert_eq!(mono.len(), 1);
}

/// WHAT: Multichannel sources keep their front pair for stereo
/// WHY: 5.1 loopback devices exist; the front pair is what users hear
#[test]
fn given_four_channel_frame_when_remixing_to_stereo_then_first_two_kept() {
    let stereo = remix(&[0.1, 0.2, 0.3, 0.4], 4, 2);

    assert_eq!(stereo, vec![0.1, 0.2]);
}

/// WHAT: Mixing pads the shorter track with silence and clips the sum
/// WHY: Sources start and stop at slightly different times
#[test]
fn given_tracks_of_different_length_when_mixing_then_padded_and_clamped() {
    // Given: A loud long track and a short one
    let long = vec![0.8, 0.8, 0.8];
    let short = vec![0.5];

    // When: Mixing
    let mixed = mix_tracks(&[long, short]);

    // Then: Length of the longest, overlap clipped, tail untouched
    assert_eq!(mixed.len(), 3);
    assert!((mixed[0] - 1.0).abs() < f32::EPSILON);
    assert!((mixed[1] - 0.8).abs() < f32::EPSILON);
}

/// WHAT: Mixing nothing yields nothing
/// WHY: No captured audio must produce no audio track, not silence
#[test]
fn given_no_tracks_when_mixing_then_empty() {
    assert!(mix_tracks(&[]).is_empty());
}

/// WHAT: Float samples quantize to the full 16-bit range
/// WHY: The intermediate WAV is 16-bit PCM
#[test]
fn given_float_samples_when_quantizing_then_full_scale_and_clamped() {
    assert_eq!(to_i16(0.0), 0);
    assert_eq!(to_i16(1.0), i16::MAX);
    assert_eq!(to_i16(-1.0), -i16::MAX);
    assert_eq!(to_i16(3.0), i16::MAX);
}
