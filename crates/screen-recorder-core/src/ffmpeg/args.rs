use crate::ffmpeg::{EncoderSettings, MuxJob};

use std::{ffi::OsString, path::Path};

fn push_all(args: &mut Vec<OsString>, items: &[&str]) {
    args.extend(items.iter().map(OsString::from));
}

/// Arguments for an ffmpeg process that reads packed BGR24 frames on stdin
/// and writes the intermediate MPEG-4 (XVID-tagged) AVI.
pub(crate) fn raw_writer_args(output: &Path, width: u32, height: u32, fps: u32) -> Vec<OsString> {
    let mut args = Vec::with_capacity(24);
    push_all(&mut args, &["-hide_banner", "-nostats", "-loglevel", "error", "-y"]);
    push_all(&mut args, &["-f", "rawvideo", "-pix_fmt", "bgr24"]);
    args.push("-video_size".into());
    args.push(format!("{width}x{height}").into());
    args.push("-framerate".into());
    args.push(fps.max(1).to_string().into());
    push_all(&mut args, &["-i", "-"]);
    push_all(&mut args, &["-c:v", "mpeg4", "-vtag", "XVID", "-q:v", "3"]);
    args.push(output.as_os_str().to_owned());
    args
}

/// Arguments for the final encode: video plus optional audio into MP4.
pub(crate) fn mux_args(job: &MuxJob) -> Vec<OsString> {
    let EncoderSettings {
        codec,
        crf,
        preset,
        audio_bitrate,
    } = &job.settings;

    let mut args = Vec::with_capacity(32);
    push_all(&mut args, &["-hide_banner", "-nostats", "-loglevel", "error", "-y"]);
    args.push("-i".into());
    args.push(job.video.as_os_str().to_owned());
    if let Some(audio) = &job.audio {
        args.push("-i".into());
        args.push(audio.as_os_str().to_owned());
    }

    push_all(&mut args, &["-map", "0:v:0"]);
    push_all(&mut args, &["-c:v", codec.as_str(), "-pix_fmt", "yuv420p"]);
    if codec == "libx264" || codec == "libx265" {
        push_all(&mut args, &["-preset", preset.as_str()]);
        args.push("-crf".into());
        args.push(crf.to_string().into());
    }

    if job.audio.is_some() {
        push_all(&mut args, &["-map", "1:a:0", "-c:a", "aac", "-b:a", audio_bitrate.as_str()]);
        args.push("-shortest".into());
    } else {
        args.push("-an".into());
    }

    push_all(&mut args, &["-movflags", "+faststart"]);
    args.push(job.output.as_os_str().to_owned());
    args
}
