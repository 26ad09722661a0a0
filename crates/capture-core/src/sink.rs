//! Capture output sink contract.
//!
//! The sink owns the encoder pipeline and the movie file format; the
//! coordinator only opens it against a device selection and later closes it.

use std::path::Path;
use std::time::Duration;

use crate::device::DeviceInfo;

/// Opaque handle to an open recording, returned by [`CaptureSink::open`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SinkHandle(pub u64);

/// Errors produced by a capture output sink.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("Failed to open capture sink: {message}")]
    Open { message: String },

    #[error("Failed to finalize capture sink: {message}")]
    Close { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SinkError {
    pub fn open(msg: impl Into<String>) -> Self {
        Self::Open {
            message: msg.into(),
        }
    }

    pub fn close(msg: impl Into<String>) -> Self {
        Self::Close {
            message: msg.into(),
        }
    }
}

/// Encodes and writes a movie file from live device input.
pub trait CaptureSink: Send {
    /// Open the sink against the selected devices and destination path.
    ///
    /// At least one of `video`/`audio` is always present; the coordinator
    /// enforces that before calling.
    fn open(
        &mut self,
        video: Option<&DeviceInfo>,
        audio: Option<&DeviceInfo>,
        destination: &Path,
    ) -> Result<SinkHandle, SinkError>;

    /// Finalize the recording and return the media duration the sink wrote.
    fn close(&mut self, handle: SinkHandle) -> Result<Duration, SinkError>;

    /// Apply a monitor playback volume in [0.0, 1.0].
    ///
    /// A no-op while no recording is open; the coordinator re-applies the
    /// current volume after every successful open.
    fn set_monitor_volume(&mut self, volume: f32);
}
