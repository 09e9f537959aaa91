mod audio_config;
mod capture_config;
#[allow(clippy::module_inception)]
mod config;
mod ffmpeg_config;
mod output_config;

pub(crate) use {
    audio_config::AudioConfig, capture_config::CaptureConfig, config::Config,
    ffmpeg_config::FfmpegConfig, output_config::OutputConfig,
};

pub(crate) const DEFAULT_PREVIEW: bool = true;
pub(crate) const MIN_FPS: u32 = 1;
pub(crate) const MAX_FPS: u32 = 60;
pub(crate) const MAX_CRF: u8 = 51;

/// Video codecs that ffmpeg can put in an MP4 container.
pub(crate) const SUPPORTED_CODECS: &[&str] = &[
    "libx264",
    "libx265",
    "mpeg4",
    "h264_nvenc",
    "hevc_nvenc",
    "h264_qsv",
    "h264_videotoolbox",
];

pub(crate) fn default_fps() -> u32 {
    screen_recorder_core::DEFAULT_FPS
}

pub(crate) fn default_preview() -> bool {
    DEFAULT_PREVIEW
}
