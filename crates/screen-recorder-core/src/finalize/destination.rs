use crate::CoreResult;

use std::{
    fmt::Write,
    fs,
    path::{Path, PathBuf},
};

use chrono::{DateTime, TimeZone};
use directories::UserDirs;
use tracing::{debug, warn};

/// File name used when no template is configured.
pub const DEFAULT_FILE_NAME_TEMPLATE: &str = "Recording_%Y-%m-%d_%H-%M-%S";

const FINAL_EXTENSION: &str = "mp4";

/// The user's Videos directory, or `~/Videos` when the platform has none.
pub fn default_destination_dir() -> PathBuf {
    match UserDirs::new() {
        Some(dirs) => dirs
            .video_dir()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| dirs.home_dir().join("Videos")),
        None => PathBuf::from("Videos"),
    }
}

/// Render `template` (strftime syntax) at `now` into a safe `.mp4` name.
///
/// Invalid or empty templates fall back to [`DEFAULT_FILE_NAME_TEMPLATE`].
pub fn output_file_name<Tz>(template: Option<&str>, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let rendered = template
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .and_then(|t| render(t, now))
        .map(|name| sanitize(&name))
        .filter(|name| !name.is_empty());

    let mut name = match rendered {
        Some(name) => name,
        None => render(DEFAULT_FILE_NAME_TEMPLATE, now)
            .map(|name| sanitize(&name))
            .unwrap_or_else(|| "Recording".to_string()),
    };

    let has_extension = Path::new(&name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(FINAL_EXTENSION));
    if !has_extension {
        name.push('.');
        name.push_str(FINAL_EXTENSION);
    }
    name
}

fn render<Tz>(template: &str, now: &DateTime<Tz>) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let mut out = String::new();
    // Unknown specifiers surface as a fmt error rather than a panic here.
    write!(out, "{}", now.format(template)).ok()?;
    Some(out)
}

fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect::<String>()
        .trim()
        .trim_matches('.')
        .to_string()
}

/// `dir/file_name`, or `dir/stem (n).ext` for the first free `n`.
pub fn unique_path(dir: &Path, file_name: &str) -> PathBuf {
    let candidate = dir.join(file_name);
    if !candidate.exists() {
        return candidate;
    }

    let file = Path::new(file_name);
    let stem = file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = file.extension().map(|e| e.to_string_lossy().into_owned());

    (1u32..)
        .map(|n| match &ext {
            Some(ext) => dir.join(format!("{stem} ({n}).{ext}")),
            None => dir.join(format!("{stem} ({n})")),
        })
        .find(|path| !path.exists())
        .unwrap_or(candidate)
}

/// Move `from` to `to`, copying across filesystems when rename fails.
pub fn move_file(from: &Path, to: &Path) -> CoreResult<()> {
    if let Err(e) = fs::rename(from, to) {
        debug!(error = %e, "Rename failed, falling back to copy");
        fs::copy(from, to)?;
        if let Err(e) = fs::remove_file(from) {
            warn!(?from, error = %e, "Copied output but could not remove the original");
        }
    }
    Ok(())
}
