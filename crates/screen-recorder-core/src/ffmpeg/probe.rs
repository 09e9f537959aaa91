use crate::{CoreResult, RecorderError};

use std::{panic::Location, path::Path, process::Command};

use error_location::ErrorLocation;

/// One stream reported by ffprobe.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbedStream {
    /// `video`, `audio`, ...
    pub codec_type: String,
    /// Codec short name, e.g. `h264`.
    pub codec_name: String,
    /// Video width.
    pub width: Option<u32>,
    /// Video height.
    pub height: Option<u32>,
    /// Audio channel count.
    pub channels: Option<u16>,
}

/// List the streams of `media` using the `ffprobe` binary at `ffprobe`.
#[track_caller]
pub fn probe_streams(ffprobe: &Path, media: &Path) -> CoreResult<Vec<ProbedStream>> {
    let output = Command::new(ffprobe)
        .args(["-v", "error", "-show_entries"])
        .arg("stream=codec_type,codec_name,width,height,channels")
        .args(["-of", "compact=p=0"])
        .arg(media)
        .output()
        .map_err(|e| RecorderError::FfmpegNotFound {
            path: ffprobe.to_path_buf(),
            reason: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;

    if !output.status.success() {
        return Err(RecorderError::EncoderError {
            reason: format!(
                "ffprobe failed on {:?}: {}",
                media,
                String::from_utf8_lossy(&output.stderr)
            ),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    Ok(parse_compact_streams(&String::from_utf8_lossy(&output.stdout)))
}

/// Parse `key=value|key=value` lines as printed by `-of compact=p=0`.
pub(crate) fn parse_compact_streams(stdout: &str) -> Vec<ProbedStream> {
    stdout
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let mut stream = ProbedStream::default();
            for (key, value) in line.split('|').filter_map(|kv| kv.split_once('=')) {
                let value = value.trim();
                match key.trim() {
                    "codec_type" => stream.codec_type = value.to_string(),
                    "codec_name" => stream.codec_name = value.to_string(),
                    "width" => stream.width = value.parse().ok(),
                    "height" => stream.height = value.parse().ok(),
                    "channels" => stream.channels = value.parse().ok(),
                    _ => {}
                }
            }
            stream
        })
        .collect()
}
