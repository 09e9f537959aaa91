use crate::config::Config;

use tracing::{info, warn};
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset.
pub(crate) const DEFAULT_LOG_FILTER: &str = "screen_recorder=debug,screen_recorder_core=debug";

/// Log file name prefix; the appender adds the date.
const LOG_FILE_PREFIX: &str = "screen-recorder.log";

/// Install stdout and daily-rolling file logging.
///
/// The returned guard flushes the file writer on drop and must live until
/// exit. Without a log directory only stdout logging is set up.
pub(crate) fn init_tracing() -> Option<WorkerGuard> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let stdout = fmt::layer().with_target(true);

    let appender = Config::log_dir().map_err(|e| e.to_string()).and_then(|dir| {
        RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix(LOG_FILE_PREFIX)
            .build(&dir)
            .map(|appender| (dir, appender))
            .map_err(|e| e.to_string())
    });

    match appender {
        Ok((dir, appender)) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(stdout)
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .init();
            info!(log_dir = ?dir, "File logging enabled");
            Some(guard)
        }
        Err(reason) => {
            tracing_subscriber::registry().with(filter).with(stdout).init();
            warn!(%reason, "No log file, logging to stdout only");
            None
        }
    }
}
