//! Device enumeration and hotplug notifications via `GstDeviceMonitor`.

use gst::prelude::*;
use gstreamer as gst;

use movcap_capture_core::{DeviceEvent, DeviceId, DeviceInfo, DeviceProvider, MediaKind};
use movcap_common::error::{MovcapError, MovcapResult};
use tokio::sync::mpsc::{self, UnboundedReceiver};

use crate::ensure_gst_init;

const VIDEO_CLASS: &str = "Video/Source";
const AUDIO_CLASS: &str = "Audio/Source";

/// Device provider backed by a running `GstDeviceMonitor`.
///
/// The monitor is started at construction and posts hotplug messages on its
/// bus; a sync handler forwards them to the `events()` channel so no GLib
/// main loop is required.
pub struct GstDeviceProvider {
    monitor: gst::DeviceMonitor,
    events: Option<UnboundedReceiver<DeviceEvent>>,
}

impl GstDeviceProvider {
    /// Create and start a monitor filtered to video/audio capture sources.
    pub fn new() -> MovcapResult<Self> {
        ensure_gst_init()?;

        let monitor = gst::DeviceMonitor::new();
        monitor.add_filter(Some(VIDEO_CLASS), None);
        monitor.add_filter(Some(AUDIO_CLASS), None);

        let (tx, rx) = mpsc::unbounded_channel();
        let bus = monitor.bus();
        bus.set_sync_handler(move |_bus, message| {
            match message.view() {
                gst::MessageView::DeviceAdded(added) => {
                    let device = describe_device(&added.device());
                    tracing::debug!(device = %device.id, name = %device.name, "Device added");
                    let _ = tx.send(DeviceEvent::Added(device));
                }
                gst::MessageView::DeviceRemoved(removed) => {
                    let id = device_id(&removed.device());
                    tracing::debug!(device = %id, "Device removed");
                    let _ = tx.send(DeviceEvent::Removed(id));
                }
                _ => {}
            }
            gst::BusSyncReply::Drop
        });

        monitor
            .start()
            .map_err(|e| MovcapError::platform(format!("Failed to start device monitor: {e}")))?;

        Ok(Self {
            monitor,
            events: Some(rx),
        })
    }
}

impl DeviceProvider for GstDeviceProvider {
    fn enumerate(&self, kind: MediaKind) -> MovcapResult<Vec<DeviceInfo>> {
        let class = match kind {
            MediaKind::Video => VIDEO_CLASS,
            MediaKind::Audio => AUDIO_CLASS,
        };
        Ok(self
            .monitor
            .devices()
            .iter()
            .filter(|d| d.has_classes(class))
            .map(describe_device)
            .collect())
    }

    fn events(&mut self) -> Option<UnboundedReceiver<DeviceEvent>> {
        self.events.take()
    }
}

impl Drop for GstDeviceProvider {
    fn drop(&mut self) {
        self.monitor.stop();
    }
}

/// Map a `gst::Device` to an immutable snapshot.
fn describe_device(device: &gst::Device) -> DeviceInfo {
    let kind = if device.has_classes(VIDEO_CLASS) {
        MediaKind::Video
    } else {
        MediaKind::Audio
    };
    DeviceInfo {
        id: device_id(device),
        name: device.display_name().to_string(),
        kind,
    }
}

/// Stable identifier for a `gst::Device`.
///
/// Prefers the v4l2 device node, then the PipeWire node name, then ALSA's
/// device id; the display name is the last resort for backends that expose
/// no structured properties.
fn device_id(device: &gst::Device) -> DeviceId {
    let from_props = device.properties().and_then(|props| {
        ["device.path", "node.name", "device.id"]
            .iter()
            .find_map(|key| props.get::<String>(*key).ok())
    });
    DeviceId::new(from_props.unwrap_or_else(|| device.display_name().to_string()))
}
