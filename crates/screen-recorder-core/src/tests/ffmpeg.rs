use crate::ffmpeg::{
    EncoderSettings, Ffmpeg, MuxJob, mux_args, parse_compact_streams, raw_writer_args,
};

use std::{ffi::OsString, path::{Path, PathBuf}};

fn strings(args: Vec<OsString>) -> Vec<String> {
    args.into_iter()
        .map(|a| a.to_string_lossy().into_owned())
        .collect()
}

fn value_after<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn job(audio: Option<&str>) -> MuxJob {
    MuxJob {
        video: PathBuf::from("output_temp.avi"),
        audio: audio.map(PathBuf::from),
        output: PathBuf::from("output.mp4"),
        settings: EncoderSettings::default(),
    }
}

/// WHAT: The raw writer reads bgr24 frames of the region size from stdin
/// WHY: A size mismatch would garble every frame
#[test]
fn given_region_when_building_writer_args_then_rawvideo_input_matches() {
    let args = strings(raw_writer_args(Path::new("output_temp.avi"), 1280, 720, 20));

    assert_eq!(value_after(&args, "-f"), Some("rawvideo"));
    assert_eq!(value_after(&args, "-pix_fmt"), Some("bgr24"));
    assert_eq!(value_after(&args, "-video_size"), Some("1280x720"));
    assert_eq!(value_after(&args, "-framerate"), Some("20"));
    assert_eq!(value_after(&args, "-i"), Some("-"));
    assert_eq!(value_after(&args, "-vtag"), Some("XVID"));
    assert_eq!(args.last().map(String::as_str), Some("output_temp.avi"));
}

/// WHAT: Mux with audio maps both inputs and trims to the shorter
/// WHY: Audio and video lengths differ slightly at stop
#[test]
fn given_audio_when_building_mux_args_then_aac_and_shortest() {
    let args = strings(mux_args(&job(Some("output_temp.wav"))));

    assert_eq!(args.iter().filter(|a| *a == "-i").count(), 2);
    assert_eq!(value_after(&args, "-c:v"), Some("libx264"));
    assert_eq!(value_after(&args, "-c:a"), Some("aac"));
    assert_eq!(value_after(&args, "-b:a"), Some("192k"));
    assert_eq!(value_after(&args, "-crf"), Some("23"));
    assert!(args.contains(&"-shortest".to_string()));
    assert!(args.contains(&"yuv420p".to_string()));
    assert_eq!(args.last().map(String::as_str), Some("output.mp4"));
}

/// WHAT: Mux without audio disables the audio stream
/// WHY: Sessions without captured audio produce a silent-free file
#[test]
fn given_no_audio_when_building_mux_args_then_an() {
    let args = strings(mux_args(&job(None)));

    assert_eq!(args.iter().filter(|a| *a == "-i").count(), 1);
    assert!(args.contains(&"-an".to_string()));
    assert!(!args.contains(&"-shortest".to_string()));
}

/// WHAT: Codec-specific options are only passed to x264/x265
/// WHY: Other encoders reject -crf and -preset
#[test]
fn given_other_codec_when_building_mux_args_then_no_crf() {
    let mut job = job(None);
    job.settings.codec = "mpeg4".to_string();

    let args = strings(mux_args(&job));

    assert_eq!(value_after(&args, "-c:v"), Some("mpeg4"));
    assert!(!args.contains(&"-crf".to_string()));
    assert!(!args.contains(&"-preset".to_string()));
}

/// WHAT: ffprobe compact output parses into streams
/// WHY: Integration checks read dimensions and channel counts from it
#[test]
fn given_compact_output_when_parsing_then_streams_extracted() {
    let stdout = "codec_name=h264|codec_type=video|width=1280|height=720\n\
                  codec_name=aac|codec_type=audio|channels=2\n\n";

    let streams = parse_compact_streams(stdout);

    assert_eq!(streams.len(), 2);
    assert_eq!(streams[0].codec_name, "h264");
    assert_eq!((streams[0].width, streams[0].height), (Some(1280), Some(720)));
    assert_eq!(streams[1].codec_type, "audio");
    assert_eq!(streams[1].channels, Some(2));
}

/// WHAT: ffprobe is looked up next to a configured ffmpeg path
/// WHY: Portable installs ship both binaries in one folder
#[test]
fn given_ffmpeg_path_when_locating_ffprobe_then_sibling() {
    let name = if cfg!(windows) { "ffprobe.exe" } else { "ffprobe" };

    assert_eq!(
        Ffmpeg::new(Path::new("tools").join("ffmpeg")).ffprobe(),
        Path::new("tools").join(name)
    );
    assert_eq!(Ffmpeg::default().ffprobe(), PathBuf::from(name));
}

/// WHAT: A missing executable is reported as FfmpegNotFound
/// WHY: The app tells the user to install ffmpeg instead of a generic IO error
#[test]
fn given_missing_binary_when_checking_version_then_not_found() {
    let result = Ffmpeg::new("screen-recorder-missing-ffmpeg").version();

    assert!(matches!(
        result,
        Err(crate::RecorderError::FfmpegNotFound { .. })
    ));
}

/// WHAT: The installed ffmpeg reports its version
/// WHY: Smoke test for the external encoder
#[test]
#[ignore = "requires ffmpeg on PATH"]
fn given_installed_ffmpeg_when_checking_version_then_banner() {
    let version = Ffmpeg::default().version().unwrap();

    assert!(version.starts_with("ffmpeg version"));
}
