//! GStreamer backend for movcap.
//!
//! Implements the `movcap-capture-core` contracts on top of GStreamer:
//! [`GstDeviceProvider`] wraps a `GstDeviceMonitor` for camera/microphone
//! enumeration and hotplug events, and [`GstCaptureSink`] builds the
//! record-to-Matroska pipeline for a device selection.

pub mod monitor;
pub mod sink;

pub use monitor::GstDeviceProvider;
pub use sink::GstCaptureSink;

use movcap_common::error::{MovcapError, MovcapResult};

/// Initialize GStreamer. Safe to call more than once.
pub(crate) fn ensure_gst_init() -> MovcapResult<()> {
    gstreamer::init()
        .map_err(|e| MovcapError::platform(format!("Failed to initialize GStreamer: {e}")))
}
