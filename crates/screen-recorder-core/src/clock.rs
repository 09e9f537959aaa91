//! Elapsed recording time with pause accounting.

use std::time::{Duration, Instant};

/// Wall clock for a recording session that excludes paused intervals.
#[derive(Debug, Clone, Copy)]
pub struct SessionClock {
    started_at: Instant,
    paused_at: Option<Instant>,
    paused_total: Duration,
}

impl SessionClock {
    /// Start the clock at `now`.
    pub fn start(now: Instant) -> Self {
        Self {
            started_at: now,
            paused_at: None,
            paused_total: Duration::ZERO,
        }
    }

    /// Freeze the clock. Pausing an already paused clock has no effect.
    pub fn pause(&mut self, now: Instant) {
        if self.paused_at.is_none() {
            self.paused_at = Some(now);
        }
    }

    /// Unfreeze the clock, adding the paused interval to the total.
    pub fn resume(&mut self, now: Instant) {
        if let Some(paused_at) = self.paused_at.take() {
            self.paused_total += now.saturating_duration_since(paused_at);
        }
    }

    /// Whether the clock is currently frozen.
    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    /// Total time spent paused, including an in-progress pause.
    pub fn paused_total(&self, now: Instant) -> Duration {
        self.paused_total
            + self
                .paused_at
                .map(|paused_at| now.saturating_duration_since(paused_at))
                .unwrap_or_default()
    }

    /// Recorded time: `now - start - paused`.
    pub fn elapsed_at(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.started_at)
            .saturating_sub(self.paused_total(now))
    }

    /// Recorded time as of the current instant.
    pub fn elapsed(&self) -> Duration {
        self.elapsed_at(Instant::now())
    }
}

/// Render a duration as `HH:MM:SS`, truncating sub-second parts.
pub fn format_hms(duration: Duration) -> String {
    let total = duration.as_secs();
    let (hours, rest) = (total / 3600, total % 3600);
    let (minutes, seconds) = (rest / 60, rest % 60);
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}
