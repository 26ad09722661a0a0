//! Capture device model.
//!
//! Devices are described by immutable snapshot values. A provider hands out
//! fresh `Vec<DeviceInfo>` snapshots on every enumeration; nothing in movcap
//! holds a live, shared device list that could be mutated behind a reader's
//! back.

use serde::{Deserialize, Serialize};

/// Media kind a capture device produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Video,
    Audio,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Video => "video",
            MediaKind::Audio => "audio",
        }
    }
}

/// Stable, backend-assigned device identifier.
///
/// Opaque to the coordinator; only compared for equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceId(pub String);

impl DeviceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DeviceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Snapshot of one capture device at enumeration time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// Backend-assigned identifier.
    pub id: DeviceId,

    /// Human-readable display name.
    pub name: String,

    /// Whether this is a video or audio source.
    pub kind: MediaKind,
}

/// A change in the set of available devices, delivered by the provider's
/// notification channel.
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceEvent {
    /// A device became available.
    Added(DeviceInfo),
    /// A device disappeared (unplugged, claimed by another process, ...).
    Removed(DeviceId),
}
