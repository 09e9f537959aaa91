//! Configuration management for screen-recorder.
//!
//! Handles loading and saving TOML configuration files with cross-platform
//! paths, validation on load, and atomic write operations.

use crate::{
    AppError, AppResult,
    config::{
        AudioConfig, CaptureConfig, FfmpegConfig, MAX_CRF, MAX_FPS, MIN_FPS, OutputConfig,
        SUPPORTED_CODECS,
    },
};

use std::{
    fs,
    io::Write,
    panic::Location,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use error_location::ErrorLocation;
use screen_recorder_core::{
    AudioDevices, AudioSelection, CaptureArea, EncoderSettings, Ffmpeg, OutputTarget,
    SessionOptions,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Main configuration struct.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Screen capture settings.
    #[serde(default)]
    pub capture: CaptureConfig,
    /// Audio source settings.
    #[serde(default)]
    pub audio: AudioConfig,
    /// Output delivery settings.
    #[serde(default)]
    pub output: OutputConfig,
    /// External encoder settings.
    #[serde(default)]
    pub ffmpeg: FfmpegConfig,
}

impl Config {
    /// Load configuration from the platform config directory, creating
    /// the default file if none exists.
    #[track_caller]
    #[instrument]
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load and validate configuration from `config_path`.
    #[track_caller]
    pub fn load_from(config_path: &Path) -> AppResult<Self> {
        if !config_path.exists() {
            info!(config_path = ?config_path, "No config found, creating default");
            let config = Config::default();
            config.save_to(config_path)?;
            return Ok(config);
        }

        let contents = fs::read_to_string(config_path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to read config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to parse config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        config.validate()?;

        info!(config_path = ?config_path, "Configuration loaded");

        Ok(config)
    }

    /// Reject values the recorder cannot work with.
    #[track_caller]
    pub fn validate(&self) -> AppResult<()> {
        if !(MIN_FPS..=MAX_FPS).contains(&self.capture.fps) {
            return Err(AppError::ConfigError {
                reason: format!(
                    "capture.fps must be between {} and {}, got {}",
                    MIN_FPS, MAX_FPS, self.capture.fps
                ),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if !SUPPORTED_CODECS.contains(&self.ffmpeg.codec.as_str()) {
            return Err(AppError::ConfigError {
                reason: format!(
                    "ffmpeg.codec '{}' is not supported; use one of {}",
                    self.ffmpeg.codec,
                    SUPPORTED_CODECS.join(", ")
                ),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if self.ffmpeg.crf > MAX_CRF {
            return Err(AppError::ConfigError {
                reason: format!("ffmpeg.crf must be at most {}, got {}", MAX_CRF, self.ffmpeg.crf),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }

    /// Save configuration to the platform config directory.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn save(&self) -> AppResult<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to `config_path` using atomic write pattern.
    ///
    /// Writes to a temporary file first, then renames to prevent corruption
    /// if the process crashes during the write.
    #[track_caller]
    pub fn save_to(&self, config_path: &Path) -> AppResult<()> {
        let contents = toml::to_string_pretty(self).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to serialize config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Atomic write: write to temp file then rename
        let temp_path = config_path.with_extension("toml.tmp");

        let mut temp_file = fs::File::create(&temp_path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to create temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        temp_file
            .write_all(contents.as_bytes())
            .map_err(|e| AppError::ConfigError {
                reason: format!("Failed to write temp config file: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        temp_file.sync_all().map_err(|e| AppError::ConfigError {
            reason: format!("Failed to sync temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        fs::rename(&temp_path, config_path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to rename temp config to final: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(config_path = ?config_path, "Configuration saved (atomic write)");

        Ok(())
    }

    /// Audio sources enabled by default.
    pub fn audio_selection(&self) -> AudioSelection {
        AudioSelection {
            microphone: self.audio.microphone,
            system: self.audio.system,
        }
    }

    /// Encoder executable to use.
    pub fn ffmpeg(&self) -> Ffmpeg {
        self.ffmpeg
            .binary
            .clone()
            .map(Ffmpeg::new)
            .unwrap_or_default()
    }

    /// Options for a session recording `area` with `audio`.
    pub fn session_options(&self, area: CaptureArea, audio: AudioSelection) -> SessionOptions {
        SessionOptions {
            area,
            audio,
            devices: AudioDevices {
                microphone: self.audio.microphone_device.clone(),
                system: self.audio.system_device.clone(),
            },
            fps: self.capture.fps,
            intermediate_dir: self
                .capture
                .intermediate_dir
                .clone()
                .unwrap_or_else(|| PathBuf::from(".")),
            encoder: EncoderSettings {
                codec: self.ffmpeg.codec.clone(),
                crf: self.ffmpeg.crf,
                preset: self.ffmpeg.preset.clone(),
                audio_bitrate: self.ffmpeg.audio_bitrate.clone(),
            },
            output: self.output_target(),
        }
    }

    /// Where finished recordings go.
    pub fn output_target(&self) -> OutputTarget {
        OutputTarget {
            directory: self.output.directory.clone(),
            file_name_template: self.output.file_name_template.clone(),
        }
    }

    /// Directory for rolling log files.
    #[track_caller]
    pub fn log_dir() -> AppResult<PathBuf> {
        Ok(Self::project_dirs()?.data_dir().join("logs"))
    }

    #[track_caller]
    fn config_path() -> AppResult<PathBuf> {
        let proj_dirs = Self::project_dirs()?;
        let config_dir = proj_dirs.config_dir();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
            debug!(config_dir = ?config_dir, "Created config directory");
        }

        Ok(config_dir.join("config.toml"))
    }

    #[track_caller]
    fn project_dirs() -> AppResult<ProjectDirs> {
        ProjectDirs::from("com", "screen-recorder", "Screen-Recorder").ok_or_else(|| {
            AppError::ConfigError {
                reason: "Failed to get project directories".to_string(),
                location: ErrorLocation::from(Location::caller()),
            }
        })
    }
}
