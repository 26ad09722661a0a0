//! Device provider contract.

use movcap_common::error::MovcapResult;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::device::{DeviceEvent, DeviceInfo, MediaKind};

/// Source of capture-device snapshots and plug/unplug notifications.
///
/// Implementations wrap an OS-level device monitor. Enumeration returns a
/// fresh snapshot every call; callers must not assume a device from an older
/// snapshot still exists.
pub trait DeviceProvider: Send {
    /// Enumerate the devices of one media kind currently available.
    fn enumerate(&self, kind: MediaKind) -> MovcapResult<Vec<DeviceInfo>>;

    /// Channel of device-change notifications.
    ///
    /// May only be taken once; subsequent calls return `None`.
    fn events(&mut self) -> Option<UnboundedReceiver<DeviceEvent>>;
}
