use crate::audio::{
    AudioCapture, AudioSelection, AudioSource, SourceRecording, write_intermediate_audio,
};

use std::path::{Path, PathBuf};

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use tempfile::TempDir;

const NATIVE_RATE: u32 = 44_100;

fn write_spool(dir: &Path, source: AudioSource, rate: u32, channels: u16, samples: &[f32]) -> SourceRecording {
    let path: PathBuf = dir.join(format!("{}.raw.wav", source.tag()));
    let spec = WavSpec {
        channels,
        sample_rate: rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    };
    let mut writer = WavWriter::create(&path, spec).unwrap();
    for sample in samples {
        writer.write_sample(*sample).unwrap();
    }
    writer.finalize().unwrap();

    SourceRecording {
        source,
        path,
        sample_rate: rate,
        channels,
        samples: samples.len() as u64,
        dropped_chunks: 0,
    }
}

/// WHAT: A microphone-only session produces a mono 16-bit WAV
/// WHY: Mic alone is recorded as one channel at the intermediate rate
#[test]
fn given_mic_only_when_writing_intermediate_then_mono_16bit_track() {
    // Given: A stereo microphone spool of 100 frames
    let dir = TempDir::new().unwrap();
    let mic = write_spool(dir.path(), AudioSource::Microphone, NATIVE_RATE, 2, &[0.25; 200]);
    let capture = AudioCapture { recordings: vec![mic] };
    let out = dir.path().join("output_temp.wav");

    // When: Writing the intermediate audio
    let track = write_intermediate_audio(
        &capture,
        AudioSelection { microphone: true, system: false },
        &out,
    )
    .unwrap()
    .unwrap();

    // Then: Mono, 44.1kHz, 16-bit, one sample per frame
    let reader = WavReader::open(&out).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.sample_rate, 44_100);
    assert_eq!(spec.bits_per_sample, 16);
    assert_eq!(track.channels, 1);
    assert_eq!(track.frames, 100);
    assert_eq!(reader.len(), 100);
}

/// WHAT: Mic plus system audio is mixed into one stereo track
/// WHY: Both sources must land in the same file, mic heard on both sides
#[test]
fn given_mic_and_system_when_writing_intermediate_then_stereo_mix_of_both() {
    // Given: Mono mic (10 frames) and stereo system audio (20 frames)
    let dir = TempDir::new().unwrap();
    let mic = write_spool(dir.path(), AudioSource::Microphone, NATIVE_RATE, 1, &[0.25; 10]);
    let system = write_spool(dir.path(), AudioSource::System, NATIVE_RATE, 2, &[0.5; 40]);
    let capture = AudioCapture {
        recordings: vec![mic, system],
    };
    let out = dir.path().join("output_temp.wav");

    // When: Writing the intermediate audio
    let track = write_intermediate_audio(
        &capture,
        AudioSelection { microphone: true, system: true },
        &out,
    )
    .unwrap()
    .unwrap();

    // Then: Stereo, as long as the longer source, overlap summed
    assert_eq!(track.channels, 2);
    assert_eq!(track.frames, 20);
    let samples: Vec<i16> = WavReader::open(&out)
        .unwrap()
        .into_samples::<i16>()
        .map(Result::unwrap)
        .collect();
    assert_eq!(samples.len(), 40);
    assert!(samples[0] > samples[39], "overlap should be louder than the tail");
    assert_eq!(samples[0], samples[1], "mic lands on both channels");
}

/// WHAT: No captured audio yields no track and no file
/// WHY: The muxer must then produce a video without an audio stream
#[test]
fn given_empty_capture_when_writing_intermediate_then_none() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("output_temp.wav");

    let track = write_intermediate_audio(
        &AudioCapture::default(),
        AudioSelection { microphone: true, system: false },
        &out,
    )
    .unwrap();

    assert!(track.is_none());
    assert!(!out.exists());
}

/// WHAT: Only the selected sources are mixed
/// WHY: A capture holding an unselected source must not leak it into the file
#[test]
fn given_unselected_source_in_capture_when_writing_intermediate_then_only_selected_mixed() {
    // Given: A short mic spool and a longer system spool
    let dir = TempDir::new().unwrap();
    let mic = write_spool(dir.path(), AudioSource::Microphone, NATIVE_RATE, 1, &[0.25; 10]);
    let system = write_spool(dir.path(), AudioSource::System, NATIVE_RATE, 1, &[0.5; 40]);
    let capture = AudioCapture {
        recordings: vec![system, mic],
    };
    let out = dir.path().join("output_temp.wav");
    assert!(capture.recording(AudioSource::System).is_some());

    // When: Writing with the microphone selected alone
    let track = write_intermediate_audio(
        &capture,
        AudioSelection { microphone: true, system: false },
        &out,
    )
    .unwrap()
    .unwrap();

    // Then: The length and level are the microphone's
    assert_eq!(track.frames, 10);
    let samples: Vec<i16> = WavReader::open(&out)
        .unwrap()
        .into_samples::<i16>()
        .map(|s| s.unwrap())
        .collect();
    assert!(samples.iter().all(|s| (i32::from(*s) - 8192).abs() < 16));
}

/// WHAT: Nothing is written when no audio was requested
/// WHY: Video-only sessions skip the audio step entirely
#[test]
fn given_no_selection_when_writing_intermediate_then_none() {
    let dir = TempDir::new().unwrap();
    let mic = write_spool(dir.path(), AudioSource::Microphone, NATIVE_RATE, 1, &[0.1; 10]);
    let out = dir.path().join("output_temp.wav");

    let track = write_intermediate_audio(
        &AudioCapture { recordings: vec![mic] },
        AudioSelection::NONE,
        &out,
    )
    .unwrap();

    assert!(track.is_none());
    assert!(!out.exists());
}

/// WHAT: Device audio at another rate is converted to 44.1kHz
/// WHY: Devices commonly run at 48kHz
#[test]
fn given_48khz_spool_when_writing_intermediate_then_track_is_44khz() {
    let dir = TempDir::new().unwrap();
    let mic = write_spool(dir.path(), AudioSource::Microphone, 48_000, 1, &[0.1; 48_000]);
    let out = dir.path().join("output_temp.wav");

    let track = write_intermediate_audio(
        &AudioCapture { recordings: vec![mic] },
        AudioSelection { microphone: true, system: false },
        &out,
    )
    .unwrap()
    .unwrap();

    assert_eq!(track.sample_rate, 44_100);
    assert_eq!(WavReader::open(&out).unwrap().spec().sample_rate, 44_100);
    assert!((44_099..=44_101).contains(&track.frames), "{}", track.frames);
}
