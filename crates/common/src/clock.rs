//! Clock and timing utilities for recording sessions.
//!
//! Every recording session is anchored to a monotonic clock epoch captured
//! the moment recording starts. The elapsed time read from this clock is the
//! source of truth for the session duration; the media duration reported by
//! the output sink is only checked against it for drift.

use std::time::{Duration, Instant};

/// A recording clock that provides monotonic elapsed time relative to a
/// fixed epoch (the moment recording started).
#[derive(Debug, Clone)]
pub struct RecordingClock {
    /// The instant recording started.
    epoch: Instant,

    /// Wall-clock time at epoch (ISO 8601 string).
    epoch_wall: String,
}

impl RecordingClock {
    /// Create a new recording clock anchored to now.
    pub fn start() -> Self {
        Self {
            epoch: Instant::now(),
            epoch_wall: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Time elapsed since recording started.
    pub fn elapsed(&self) -> Duration {
        self.epoch.elapsed()
    }

    /// Seconds elapsed since recording started.
    pub fn elapsed_secs(&self) -> f64 {
        self.epoch.elapsed().as_secs_f64()
    }

    /// Wall-clock time at recording start.
    pub fn epoch_wall(&self) -> &str {
        &self.epoch_wall
    }

    /// The underlying epoch instant.
    pub fn epoch(&self) -> Instant {
        self.epoch
    }
}

/// Render a duration the way a recording-length label shows it (`H:MM:SS`).
pub fn format_hms(duration: Duration) -> String {
    let total = duration.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("{hours}:{minutes:02}:{seconds:02}")
}

/// Difference between the clock-measured session duration and the media
/// duration the sink reported at close.
#[derive(Debug, Clone, Copy)]
pub struct DurationDrift {
    /// Clock-measured duration (reference).
    pub clock: Duration,
    /// Sink-reported media duration.
    pub sink: Duration,
}

impl DurationDrift {
    /// Absolute drift in milliseconds.
    pub fn drift_ms(&self) -> f64 {
        let clock_ms = self.clock.as_secs_f64() * 1000.0;
        let sink_ms = self.sink.as_secs_f64() * 1000.0;
        (clock_ms - sink_ms).abs()
    }

    /// Whether the drift exceeds the given threshold.
    pub fn exceeds_threshold_ms(&self, threshold_ms: f64) -> bool {
        self.drift_ms() > threshold_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_elapsed() {
        let clock = RecordingClock::start();
        // Should be very small but non-negative
        assert!(clock.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_format_hms() {
        assert_eq!(format_hms(Duration::from_secs(0)), "0:00:00");
        assert_eq!(format_hms(Duration::from_secs(61)), "0:01:01");
        assert_eq!(format_hms(Duration::from_secs(3723)), "1:02:03");
    }

    #[test]
    fn test_duration_drift() {
        let drift = DurationDrift {
            clock: Duration::from_millis(10_050),
            sink: Duration::from_millis(10_000),
        };
        assert!((drift.drift_ms() - 50.0).abs() < 1e-9);
        assert!(drift.exceeds_threshold_ms(10.0));
        assert!(!drift.exceeds_threshold_ms(100.0));
    }
}
