use crate::audio::Resampler;

// Test constants
const INPUT_SAMPLE_RATE: u32 = 48000;
const OUTPUT_SAMPLE_RATE: u32 = 44100;
const ONE_SECOND_INPUT_FRAMES: usize = INPUT_SAMPLE_RATE as usize;
const ONE_SECOND_OUTPUT_FRAMES: usize = OUTPUT_SAMPLE_RATE as usize;
// Output length is the input length times the ratio, give or take rounding.
const LENGTH_TOLERANCE: u64 = 2;
const TEST_SIGNAL_AMPLITUDE: f32 = 0.5;
const TONE_INPUT_FRAMES: usize = 4800;
const TONE_FREQUENCY_FACTOR: f32 = 0.1;
const TONE_OUTPUT_FRAMES: usize = 4410;
const TONE_LENGTH_TOLERANCE: u64 = 2;
const MAX_AMPLITUDE: f32 = 1.5;

/// WHAT: Resampler converts 48kHz mono to 44.1kHz correctly
/// WHY: Device audio must match the intermediate track rate before mixing
#[test]
fn given_48khz_audio_when_resampling_to_44khz_then_output_length_approximately_correct() {
    // Given: Mono resampler configured for 48kHz -> 44.1kHz
    let mut resampler = Resampler::new(INPUT_SAMPLE_RATE, OUTPUT_SAMPLE_RATE, 1).unwrap();
    let input = vec![TEST_SIGNAL_AMPLITUDE; ONE_SECOND_INPUT_FRAMES];

    // When: Resampling audio data
    let output = resampler.resample(&input).unwrap();

    // Then: Output is approximately 1 second at 44.1kHz
    assert!(
        (output.len() as i64 - ONE_SECOND_OUTPUT_FRAMES as i64).unsigned_abs() < LENGTH_TOLERANCE,
        "Expected ~{} samples, got {}",
        ONE_SECOND_OUTPUT_FRAMES,
        output.len()
    );
    assert!(output.iter().all(|&s| s.is_finite())); // No NaN/Inf
}

/// WHAT: Stereo input keeps its interleaved layout
/// WHY: System audio is mixed as stereo; a misaligned frame would swap channels
#[test]
fn given_stereo_audio_when_resampling_then_output_is_whole_stereo_frames() {
    // Given: Stereo resampler and one second of interleaved silence
    let mut resampler = Resampler::new(INPUT_SAMPLE_RATE, OUTPUT_SAMPLE_RATE, 2).unwrap();
    let input = vec![0.0f32; ONE_SECOND_INPUT_FRAMES * 2];

    // When: Resampling
    let output = resampler.resample(&input).unwrap();

    // Then: Output holds whole frames, about one second of them
    assert_eq!(output.len() % 2, 0);
    let frames = output.len() / 2;
    assert!(
        (frames as i64 - ONE_SECOND_OUTPUT_FRAMES as i64).unsigned_abs() < LENGTH_TOLERANCE,
        "Expected ~{} frames, got {}",
        ONE_SECOND_OUTPUT_FRAMES,
        frames
    );
}

/// WHAT: Empty samples return empty output
/// WHY: Edge case handling for zero-length input
#[test]
fn given_empty_samples_when_resampling_then_empty_output() {
    // Given: Resampler and empty input
    let mut resampler = Resampler::new(INPUT_SAMPLE_RATE, OUTPUT_SAMPLE_RATE, 1).unwrap();
    let empty: Vec<f32> = vec![];

    // When: Resampling empty data
    let output = resampler.resample(&empty).unwrap();

    // Then: Output is also empty
    assert!(output.is_empty());
}

/// WHAT: Resampling preserves signal characteristics
/// WHY: Validates that audio quality is maintained through resampling
#[test]
fn given_tone_signal_when_resampling_then_output_preserves_characteristics() {
    // Given: Resampler and a simple tone signal
    let mut resampler = Resampler::new(INPUT_SAMPLE_RATE, OUTPUT_SAMPLE_RATE, 1).unwrap();
    let input: Vec<f32> = (0..TONE_INPUT_FRAMES)
        .map(|i| (i as f32 * TONE_FREQUENCY_FACTOR).sin())
        .collect();

    // When: Resampling the signal
    let output = resampler.resample(&input).unwrap();

    // Then: Output has expected length and all samples are finite
    assert!(
        (output.len() as i64 - TONE_OUTPUT_FRAMES as i64).unsigned_abs() < TONE_LENGTH_TOLERANCE,
        "Expected ~{} samples, got {}",
        TONE_OUTPUT_FRAMES,
        output.len()
    );
    assert!(
        output
            .iter()
            .all(|&s| s.is_finite() && s.abs() <= MAX_AMPLITUDE)
    );
}

/// WHAT: A short burst stays at the same point in time after resampling
/// WHY: Start-up delay left in the output would push audio behind the video
#[test]
fn given_burst_mid_clip_when_resampling_then_burst_not_delayed() {
    // Given: One second of silence with a 10ms burst starting at 0.5s
    let mut resampler = Resampler::new(INPUT_SAMPLE_RATE, OUTPUT_SAMPLE_RATE, 1).unwrap();
    let mut input = vec![0.0f32; ONE_SECOND_INPUT_FRAMES];
    input[24_000..24_480].fill(TEST_SIGNAL_AMPLITUDE);

    // When: Resampling
    let output = resampler.resample(&input).unwrap();

    // Then: The loudest output sample falls inside the burst's time span
    let loudest = output
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.abs().total_cmp(&b.1.abs()))
        .map(|(i, _)| i)
        .unwrap();
    assert!(
        (22_050 - 32..=22_491 + 32).contains(&loudest),
        "burst landed at frame {}",
        loudest
    );

    // And: The tail of the clip is still present
    assert!(
        (output.len() as i64 - ONE_SECOND_OUTPUT_FRAMES as i64).unsigned_abs() < LENGTH_TOLERANCE
    );
}
