//! Recording session coordination.

use std::path::{Path, PathBuf};
use std::time::Duration;

use movcap_capture_core::{
    CaptureSink, DeviceEvent, DeviceId, DeviceInfo, DeviceProvider, MediaKind, SinkError,
    SinkHandle,
};
use movcap_common::clock::{DurationDrift, RecordingClock};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::watch;

use crate::status::{SessionStatus, StatusPublisher};

/// Sink-vs-clock duration drift worth logging about.
const DRIFT_LOG_THRESHOLD_MS: f64 = 500.0;

/// Lifecycle state of a recording session.
///
/// Exactly two states; `Recording` implies an open sink handle by
/// construction (both live in the same internal `ActiveRecording`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No recording in progress.
    Idle,
    /// Recording in progress.
    Recording,
}

/// Errors from the recording lifecycle operations.
#[derive(Debug, thiserror::Error)]
pub enum RecordingError {
    #[error("No capture device selected")]
    NoDeviceSelected,

    #[error("A recording is already in progress")]
    AlreadyRecording,

    #[error("No recording in progress")]
    NotRecording,

    #[error("Capture device disconnected: {device}")]
    DeviceDisconnected { device: DeviceId },

    #[error(transparent)]
    Sink(#[from] SinkError),
}

/// Everything tied to one open recording.
#[derive(Debug)]
struct ActiveRecording {
    handle: SinkHandle,
    clock: RecordingClock,
    destination: PathBuf,
    video: Option<DeviceId>,
    audio: Option<DeviceId>,
}

/// The recording session coordinator.
///
/// Owns the device selection, the two-state recording lifecycle, and the
/// monitor volume. All methods are `&mut self` and intended to be driven
/// from one logical control task; the coordinator spawns no background work
/// of its own.
pub struct RecordingSession {
    provider: Box<dyn DeviceProvider>,
    sink: Box<dyn CaptureSink>,
    state: SessionState,
    selected_video: Option<DeviceInfo>,
    selected_audio: Option<DeviceInfo>,
    volume: f32,
    active: Option<ActiveRecording>,
    status: StatusPublisher,
}

impl RecordingSession {
    /// Create an idle coordinator over a device provider and output sink.
    pub fn new(provider: Box<dyn DeviceProvider>, sink: Box<dyn CaptureSink>) -> Self {
        Self {
            provider,
            sink,
            state: SessionState::Idle,
            selected_video: None,
            selected_audio: None,
            volume: 0.0,
            active: None,
            status: StatusPublisher::new(SessionStatus::default()),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Current monitor volume.
    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Selected video device, if any.
    pub fn selected_video(&self) -> Option<&DeviceInfo> {
        self.selected_video.as_ref()
    }

    /// Selected audio device, if any.
    pub fn selected_audio(&self) -> Option<&DeviceInfo> {
        self.selected_audio.as_ref()
    }

    /// Elapsed time of the active recording; zero while idle.
    pub fn elapsed(&self) -> Duration {
        self.active
            .as_ref()
            .map(|a| a.clock.elapsed())
            .unwrap_or_default()
    }

    /// Subscribe to status snapshots. One snapshot is published after every
    /// state-changing operation.
    pub fn subscribe(&self) -> watch::Receiver<SessionStatus> {
        self.status.subscribe()
    }

    /// Take the provider's device-change channel so the caller can feed
    /// events back in via [`handle_device_event`](Self::handle_device_event).
    pub fn take_device_events(&mut self) -> Option<UnboundedReceiver<DeviceEvent>> {
        self.provider.events()
    }

    /// Fresh snapshot of available video devices.
    pub fn video_devices(&self) -> movcap_common::MovcapResult<Vec<DeviceInfo>> {
        self.provider.enumerate(MediaKind::Video)
    }

    /// Fresh snapshot of available audio devices.
    pub fn audio_devices(&self) -> movcap_common::MovcapResult<Vec<DeviceInfo>> {
        self.provider.enumerate(MediaKind::Audio)
    }

    /// Select a video device by id.
    ///
    /// Silent no-op when the id is not in the current video snapshot; never
    /// starts or stops recording.
    pub fn select_video_device(&mut self, id: &DeviceId) {
        match self.find_listed(MediaKind::Video, id) {
            Some(device) => {
                tracing::info!(device = %device.id, name = %device.name, "Selected video device");
                self.selected_video = Some(device);
                self.publish_status();
            }
            None => {
                tracing::warn!(device = %id, "Ignoring selection of unlisted video device");
            }
        }
    }

    /// Select an audio device by id. Same no-op rules as video selection.
    pub fn select_audio_device(&mut self, id: &DeviceId) {
        match self.find_listed(MediaKind::Audio, id) {
            Some(device) => {
                tracing::info!(device = %device.id, name = %device.name, "Selected audio device");
                self.selected_audio = Some(device);
                self.publish_status();
            }
            None => {
                tracing::warn!(device = %id, "Ignoring selection of unlisted audio device");
            }
        }
    }

    /// Whether at least one selected device is still present in its kind's
    /// current snapshot. Recording can only start while this holds.
    pub fn has_recording_device(&self) -> bool {
        self.present_selection(MediaKind::Video).is_some()
            || self.present_selection(MediaKind::Audio).is_some()
    }

    /// Start recording to `destination`.
    ///
    /// Opens the sink against the currently-present selected devices and
    /// transitions idle → recording. A running session is left completely
    /// untouched by a failed re-start.
    pub fn start_recording(&mut self, destination: &Path) -> Result<(), RecordingError> {
        if self.state == SessionState::Recording {
            return Err(RecordingError::AlreadyRecording);
        }

        let video = self.present_selection(MediaKind::Video);
        let audio = self.present_selection(MediaKind::Audio);
        if video.is_none() && audio.is_none() {
            return Err(RecordingError::NoDeviceSelected);
        }

        tracing::info!(
            destination = %destination.display(),
            video = video.as_ref().map(|d| d.name.as_str()),
            audio = audio.as_ref().map(|d| d.name.as_str()),
            "Starting recording"
        );

        let handle = self.sink.open(video.as_ref(), audio.as_ref(), destination)?;

        let clock = RecordingClock::start();
        tracing::debug!(epoch_wall = %clock.epoch_wall(), "Recording clock started");

        self.active = Some(ActiveRecording {
            handle,
            clock,
            destination: destination.to_path_buf(),
            video: video.map(|d| d.id),
            audio: audio.map(|d| d.id),
        });
        self.state = SessionState::Recording;
        self.sink.set_monitor_volume(self.volume);
        self.publish_status();

        Ok(())
    }

    /// Stop recording and finalize the output file.
    ///
    /// Returns the clock-measured session duration. The session transitions
    /// to idle even when the sink fails to finalize; the failure is surfaced
    /// as [`RecordingError::Sink`].
    pub fn stop_recording(&mut self) -> Result<Duration, RecordingError> {
        let Some(active) = self.active.take() else {
            return Err(RecordingError::NotRecording);
        };

        let elapsed = active.clock.elapsed();
        self.state = SessionState::Idle;

        let close_result = self.sink.close(active.handle);
        self.publish_status();

        match close_result {
            Ok(sink_duration) => {
                self.log_duration_drift(elapsed, sink_duration);
                tracing::info!(
                    destination = %active.destination.display(),
                    duration_secs = elapsed.as_secs_f64(),
                    "Recording stopped"
                );
                Ok(elapsed)
            }
            Err(e) => {
                tracing::error!(
                    destination = %active.destination.display(),
                    error = %e,
                    "Sink failed to finalize recording"
                );
                Err(RecordingError::Sink(e))
            }
        }
    }

    /// Set the monitor volume, clamped to [0.0, 1.0].
    ///
    /// Returns the value actually applied. Non-finite input is ignored and
    /// the current volume is returned unchanged.
    pub fn set_volume(&mut self, volume: f32) -> f32 {
        if !volume.is_finite() {
            tracing::warn!(volume, "Ignoring non-finite volume");
            return self.volume;
        }
        let clamped = volume.clamp(0.0, 1.0);
        self.volume = clamped;
        self.sink.set_monitor_volume(clamped);
        self.publish_status();
        clamped
    }

    /// Nudge the volume by `delta` in the given direction.
    pub fn volume_step(&mut self, direction: VolumeDirection, delta: f32) -> f32 {
        let delta = delta.abs();
        let target = match direction {
            VolumeDirection::Up => self.volume + delta,
            VolumeDirection::Down => self.volume - delta,
        };
        self.set_volume(target)
    }

    /// React to a device plug/unplug notification.
    ///
    /// While idle, a removed device that matches a selection clears that
    /// selection silently. While recording, removal of an active device
    /// forces the session back to idle (sink closed best-effort) and
    /// surfaces [`RecordingError::DeviceDisconnected`].
    pub fn handle_device_event(&mut self, event: DeviceEvent) -> Result<(), RecordingError> {
        match event {
            DeviceEvent::Added(device) => {
                // Snapshots are uncached, so a new device needs no bookkeeping.
                tracing::debug!(device = %device.id, name = %device.name, "Device added");
                Ok(())
            }
            DeviceEvent::Removed(id) => self.handle_device_removed(id),
        }
    }

    fn handle_device_removed(&mut self, id: DeviceId) -> Result<(), RecordingError> {
        if let Some(active) = self.active.take() {
            let hit = active.video.as_ref() == Some(&id) || active.audio.as_ref() == Some(&id);
            if hit {
                tracing::error!(device = %id, "Active capture device disconnected; stopping recording");
                self.state = SessionState::Idle;
                if let Err(e) = self.sink.close(active.handle) {
                    tracing::warn!(error = %e, "Sink close failed after device disconnect");
                }
                self.clear_selection_matching(&id);
                self.publish_status();
                return Err(RecordingError::DeviceDisconnected { device: id });
            }
            self.active = Some(active);
        }

        if self.clear_selection_matching(&id) {
            tracing::info!(device = %id, "Selected device unplugged while idle; selection cleared");
            self.publish_status();
        }
        Ok(())
    }

    // Internal helpers

    /// Clear any selection referring to `id`. Returns whether one was cleared.
    fn clear_selection_matching(&mut self, id: &DeviceId) -> bool {
        let mut cleared = false;
        if self.selected_video.as_ref().is_some_and(|d| &d.id == id) {
            self.selected_video = None;
            cleared = true;
        }
        if self.selected_audio.as_ref().is_some_and(|d| &d.id == id) {
            self.selected_audio = None;
            cleared = true;
        }
        cleared
    }

    /// The selected device of `kind`, only if it is still listed.
    ///
    /// Enumeration failures are treated as "not present": selection checks
    /// never error out, per the silent no-op rule.
    fn present_selection(&self, kind: MediaKind) -> Option<DeviceInfo> {
        let selected = match kind {
            MediaKind::Video => self.selected_video.as_ref()?,
            MediaKind::Audio => self.selected_audio.as_ref()?,
        };
        self.find_listed(kind, &selected.id)
    }

    /// Look up a device id in a fresh snapshot of `kind`.
    fn find_listed(&self, kind: MediaKind, id: &DeviceId) -> Option<DeviceInfo> {
        match self.provider.enumerate(kind) {
            Ok(devices) => devices.into_iter().find(|d| &d.id == id),
            Err(e) => {
                tracing::warn!(kind = kind.as_str(), error = %e, "Device enumeration failed");
                None
            }
        }
    }

    fn publish_status(&self) {
        self.status.publish(SessionStatus {
            state: self.state,
            volume: self.volume,
            selected_video: self.selected_video.clone(),
            selected_audio: self.selected_audio.clone(),
            started: self.active.as_ref().map(|a| a.clock.epoch()),
        });
    }

    fn log_duration_drift(&self, clock: Duration, sink: Duration) {
        let drift = DurationDrift { clock, sink };
        if drift.exceeds_threshold_ms(DRIFT_LOG_THRESHOLD_MS) {
            tracing::warn!(
                clock_secs = clock.as_secs_f64(),
                sink_secs = sink.as_secs_f64(),
                drift_ms = drift.drift_ms(),
                "Sink media duration drifts from session clock"
            );
        }
    }
}

/// Direction for [`RecordingSession::volume_step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeDirection {
    Up,
    Down,
}

#[cfg(test)]
mod tests {
    use super::*;
    use movcap_common::error::MovcapError;
    use proptest::prelude::*;
    use std::sync::{Arc, Mutex};

    /// Shared device lists the test can mutate after the session owns the
    /// provider.
    #[derive(Clone, Default)]
    struct MockProvider {
        video: Arc<Mutex<Vec<DeviceInfo>>>,
        audio: Arc<Mutex<Vec<DeviceInfo>>>,
        fail: Arc<Mutex<bool>>,
    }

    impl DeviceProvider for MockProvider {
        fn enumerate(&self, kind: MediaKind) -> movcap_common::MovcapResult<Vec<DeviceInfo>> {
            if *self.fail.lock().unwrap() {
                return Err(MovcapError::device("mock enumeration failure"));
            }
            let list = match kind {
                MediaKind::Video => &self.video,
                MediaKind::Audio => &self.audio,
            };
            Ok(list.lock().unwrap().clone())
        }

        fn events(&mut self) -> Option<UnboundedReceiver<DeviceEvent>> {
            None
        }
    }

    #[derive(Debug, Default)]
    struct SinkLog {
        opens: u64,
        closes: u64,
        volumes: Vec<f32>,
        fail_open: bool,
        fail_close: bool,
        close_duration: Duration,
    }

    #[derive(Clone, Default)]
    struct MockSink {
        log: Arc<Mutex<SinkLog>>,
    }

    impl CaptureSink for MockSink {
        fn open(
            &mut self,
            _video: Option<&DeviceInfo>,
            _audio: Option<&DeviceInfo>,
            _destination: &Path,
        ) -> Result<SinkHandle, SinkError> {
            let mut log = self.log.lock().unwrap();
            if log.fail_open {
                return Err(SinkError::open("mock open failure"));
            }
            log.opens += 1;
            Ok(SinkHandle(log.opens))
        }

        fn close(&mut self, _handle: SinkHandle) -> Result<Duration, SinkError> {
            let mut log = self.log.lock().unwrap();
            log.closes += 1;
            if log.fail_close {
                return Err(SinkError::close("mock close failure"));
            }
            Ok(log.close_duration)
        }

        fn set_monitor_volume(&mut self, volume: f32) {
            self.log.lock().unwrap().volumes.push(volume);
        }
    }

    fn camera() -> DeviceInfo {
        DeviceInfo {
            id: DeviceId::new("/dev/video0"),
            name: "Integrated Camera".to_string(),
            kind: MediaKind::Video,
        }
    }

    fn mic() -> DeviceInfo {
        DeviceInfo {
            id: DeviceId::new("alsa:hw:1"),
            name: "USB Microphone".to_string(),
            kind: MediaKind::Audio,
        }
    }

    fn session_with(
        video: Vec<DeviceInfo>,
        audio: Vec<DeviceInfo>,
    ) -> (RecordingSession, MockProvider, MockSink) {
        let provider = MockProvider {
            video: Arc::new(Mutex::new(video)),
            audio: Arc::new(Mutex::new(audio)),
            fail: Arc::new(Mutex::new(false)),
        };
        let sink = MockSink::default();
        let session = RecordingSession::new(Box::new(provider.clone()), Box::new(sink.clone()));
        (session, provider, sink)
    }

    fn dest() -> PathBuf {
        std::env::temp_dir().join("movcap_test.mkv")
    }

    #[test]
    fn test_fresh_session_has_no_recording_device() {
        let (session, _provider, _sink) = session_with(vec![camera()], vec![mic()]);
        assert!(!session.has_recording_device());
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn test_select_unlisted_device_is_a_no_op() {
        let (mut session, _provider, _sink) = session_with(vec![camera()], vec![]);
        session.select_video_device(&DeviceId::new("/dev/video9"));
        assert!(session.selected_video().is_none());

        // Wrong kind is unlisted too
        session.select_audio_device(&camera().id);
        assert!(session.selected_audio().is_none());
    }

    #[test]
    fn test_selection_survives_but_presence_tracks_unplug() {
        let (mut session, provider, _sink) = session_with(vec![camera()], vec![]);
        session.select_video_device(&camera().id);
        assert!(session.has_recording_device());

        provider.video.lock().unwrap().clear();
        assert!(!session.has_recording_device());
    }

    #[test]
    fn test_enumeration_failure_counts_as_absent() {
        let (mut session, provider, _sink) = session_with(vec![camera()], vec![]);
        session.select_video_device(&camera().id);
        *provider.fail.lock().unwrap() = true;
        assert!(!session.has_recording_device());
    }

    #[test]
    fn test_start_without_selection_fails() {
        let (mut session, _provider, sink) = session_with(vec![camera()], vec![mic()]);
        let err = session.start_recording(&dest()).unwrap_err();
        assert!(matches!(err, RecordingError::NoDeviceSelected));
        assert_eq!(sink.log.lock().unwrap().opens, 0);
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn test_record_scenario_end_to_end() {
        let (mut session, _provider, sink) = session_with(vec![camera()], vec![mic()]);

        session.select_video_device(&camera().id);
        assert!(session.has_recording_device());

        session.start_recording(&dest()).unwrap();
        assert_eq!(session.state(), SessionState::Recording);

        let wall = std::time::Instant::now();
        std::thread::sleep(Duration::from_millis(10));
        let duration = session.stop_recording().unwrap();

        assert!(duration >= Duration::from_millis(10));
        assert!(duration <= wall.elapsed() + Duration::from_millis(50));
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(sink.log.lock().unwrap().closes, 1);
    }

    #[test]
    fn test_start_while_recording_keeps_session_untouched() {
        let (mut session, _provider, sink) = session_with(vec![camera()], vec![mic()]);
        session.select_video_device(&camera().id);
        session.start_recording(&dest()).unwrap();

        let started = session.subscribe().borrow().started;
        std::thread::sleep(Duration::from_millis(5));

        let err = session.start_recording(&dest()).unwrap_err();
        assert!(matches!(err, RecordingError::AlreadyRecording));
        assert_eq!(session.state(), SessionState::Recording);
        assert_eq!(session.subscribe().borrow().started, started);
        assert_eq!(sink.log.lock().unwrap().opens, 1);
    }

    #[test]
    fn test_stop_while_idle_mutates_nothing() {
        let (mut session, _provider, sink) = session_with(vec![camera()], vec![mic()]);
        session.select_video_device(&camera().id);
        session.set_volume(0.4);
        let opens_before = sink.log.lock().unwrap().opens;

        let err = session.stop_recording().unwrap_err();
        assert!(matches!(err, RecordingError::NotRecording));
        assert!((session.volume() - 0.4).abs() < 1e-6);
        assert_eq!(session.selected_video(), Some(&camera()));
        assert_eq!(sink.log.lock().unwrap().opens, opens_before);
        assert_eq!(sink.log.lock().unwrap().closes, 0);
    }

    #[test]
    fn test_sink_open_failure_leaves_session_idle() {
        let (mut session, _provider, sink) = session_with(vec![camera()], vec![]);
        session.select_video_device(&camera().id);
        sink.log.lock().unwrap().fail_open = true;

        let err = session.start_recording(&dest()).unwrap_err();
        assert!(matches!(err, RecordingError::Sink(SinkError::Open { .. })));
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn test_sink_close_failure_still_transitions_to_idle() {
        let (mut session, _provider, sink) = session_with(vec![camera()], vec![]);
        session.select_video_device(&camera().id);
        session.start_recording(&dest()).unwrap();
        sink.log.lock().unwrap().fail_close = true;

        let err = session.stop_recording().unwrap_err();
        assert!(matches!(err, RecordingError::Sink(SinkError::Close { .. })));
        assert_eq!(session.state(), SessionState::Idle);
        assert!(matches!(
            session.stop_recording().unwrap_err(),
            RecordingError::NotRecording
        ));
    }

    #[test]
    fn test_set_volume_clamps_and_applies() {
        let (mut session, _provider, sink) = session_with(vec![], vec![]);
        assert_eq!(session.set_volume(1.5), 1.0);
        assert_eq!(session.set_volume(-0.3), 0.0);
        assert_eq!(session.set_volume(0.6), 0.6);
        assert_eq!(session.set_volume(0.6), 0.6);
        assert!((session.volume() - 0.6).abs() < 1e-6);
        assert_eq!(sink.log.lock().unwrap().volumes, vec![1.0, 0.0, 0.6, 0.6]);
    }

    #[test]
    fn test_non_finite_volume_is_ignored() {
        let (mut session, _provider, _sink) = session_with(vec![], vec![]);
        session.set_volume(0.3);
        assert_eq!(session.set_volume(f32::NAN), 0.3);
        assert_eq!(session.set_volume(f32::INFINITY), 0.3);
    }

    #[test]
    fn test_volume_step_wraps_set_volume() {
        let (mut session, _provider, _sink) = session_with(vec![], vec![]);
        session.set_volume(0.5);
        assert!((session.volume_step(VolumeDirection::Up, 0.2) - 0.7).abs() < 1e-6);
        assert!((session.volume_step(VolumeDirection::Down, 0.2) - 0.5).abs() < 1e-6);
        // Negative deltas behave like their magnitude
        assert!((session.volume_step(VolumeDirection::Up, -0.2) - 0.7).abs() < 1e-6);
        // Steps clamp at the bounds
        assert_eq!(session.volume_step(VolumeDirection::Up, 1.0), 1.0);
        assert_eq!(session.volume_step(VolumeDirection::Down, 5.0), 0.0);
    }

    #[test]
    fn test_unplug_while_idle_clears_selection() {
        let (mut session, _provider, _sink) = session_with(vec![camera()], vec![mic()]);
        session.select_video_device(&camera().id);
        session.select_audio_device(&mic().id);

        session
            .handle_device_event(DeviceEvent::Removed(camera().id))
            .unwrap();
        assert!(session.selected_video().is_none());
        assert_eq!(session.selected_audio(), Some(&mic()));
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn test_unplug_of_unrelated_device_is_ignored() {
        let (mut session, _provider, _sink) = session_with(vec![camera()], vec![mic()]);
        session.select_audio_device(&mic().id);
        session
            .handle_device_event(DeviceEvent::Removed(DeviceId::new("/dev/video7")))
            .unwrap();
        assert_eq!(session.selected_audio(), Some(&mic()));
    }

    #[test]
    fn test_unplug_mid_recording_forces_idle() {
        let (mut session, _provider, sink) = session_with(vec![camera()], vec![mic()]);
        session.select_video_device(&camera().id);
        session.select_audio_device(&mic().id);
        session.start_recording(&dest()).unwrap();

        let err = session
            .handle_device_event(DeviceEvent::Removed(camera().id))
            .unwrap_err();
        assert!(matches!(
            err,
            RecordingError::DeviceDisconnected { ref device } if device == &camera().id
        ));
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(sink.log.lock().unwrap().closes, 1);
        assert!(session.selected_video().is_none());
        // The untouched selection survives
        assert_eq!(session.selected_audio(), Some(&mic()));
    }

    #[test]
    fn test_added_event_needs_no_action() {
        let (mut session, _provider, _sink) = session_with(vec![], vec![]);
        session
            .handle_device_event(DeviceEvent::Added(camera()))
            .unwrap();
        assert!(session.selected_video().is_none());
    }

    #[test]
    fn test_status_snapshots_track_lifecycle() {
        let (mut session, _provider, _sink) = session_with(vec![camera()], vec![]);
        let rx = session.subscribe();

        session.select_video_device(&camera().id);
        assert_eq!(rx.borrow().selected_video, Some(camera()));

        session.start_recording(&dest()).unwrap();
        assert_eq!(rx.borrow().state, SessionState::Recording);
        assert!(rx.borrow().started.is_some());

        session.stop_recording().unwrap();
        assert_eq!(rx.borrow().state, SessionState::Idle);
        assert!(rx.borrow().started.is_none());
    }

    proptest! {
        #[test]
        fn prop_set_volume_returns_clamp(v in -10.0f32..10.0) {
            let (mut session, _provider, _sink) = session_with(vec![], vec![]);
            let applied = session.set_volume(v);
            prop_assert_eq!(applied, v.clamp(0.0, 1.0));
            prop_assert_eq!(session.volume(), applied);
        }
    }
}
