//! Session status snapshots for observers.
//!
//! UI surfaces (duration label, level meter, volume slider) subscribe to
//! state changes instead of holding references into the coordinator. The
//! coordinator publishes an immutable snapshot after every mutation on a
//! `tokio::sync::watch` channel.

use std::time::{Duration, Instant};

use movcap_capture_core::DeviceInfo;
use tokio::sync::watch;

use crate::session::SessionState;

/// Immutable snapshot of the coordinator's observable state.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionStatus {
    /// Current lifecycle state.
    pub state: SessionState,

    /// Monitor playback volume, [0.0, 1.0].
    pub volume: f32,

    /// Selected video device, if any.
    pub selected_video: Option<DeviceInfo>,

    /// Selected audio device, if any.
    pub selected_audio: Option<DeviceInfo>,

    /// When the active recording started. `None` while idle.
    pub started: Option<Instant>,
}

impl SessionStatus {
    /// Elapsed recording time for display; zero while idle.
    pub fn elapsed(&self) -> Duration {
        self.started.map(|t| t.elapsed()).unwrap_or_default()
    }
}

impl Default for SessionStatus {
    fn default() -> Self {
        Self {
            state: SessionState::Idle,
            volume: 0.0,
            selected_video: None,
            selected_audio: None,
            started: None,
        }
    }
}

/// Publisher side of the status channel, owned by the coordinator.
#[derive(Debug)]
pub(crate) struct StatusPublisher {
    tx: watch::Sender<SessionStatus>,
}

impl StatusPublisher {
    pub(crate) fn new(initial: SessionStatus) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Publish a new snapshot. Lossy on purpose: observers that lag only see
    /// the latest state.
    pub(crate) fn publish(&self, status: SessionStatus) {
        // send() fails only when every receiver is gone, which is fine.
        let _ = self.tx.send(status);
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<SessionStatus> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_status_is_idle_with_zero_elapsed() {
        let status = SessionStatus::default();
        assert_eq!(status.state, SessionState::Idle);
        assert_eq!(status.elapsed(), Duration::ZERO);
    }

    #[test]
    fn test_subscribers_see_latest_snapshot() {
        let publisher = StatusPublisher::new(SessionStatus::default());
        let rx = publisher.subscribe();

        publisher.publish(SessionStatus {
            volume: 0.25,
            ..SessionStatus::default()
        });
        publisher.publish(SessionStatus {
            volume: 0.75,
            ..SessionStatus::default()
        });

        assert!((rx.borrow().volume - 0.75).abs() < 1e-6);
    }
}
