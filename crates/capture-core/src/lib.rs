//! movcap capture contracts.
//!
//! This crate contains the device data model and the two trait seams the
//! recording coordinator composes with — the device provider and the capture
//! output sink — without coupling to a concrete media backend.

pub mod device;
pub mod provider;
pub mod sink;

pub use device::{DeviceEvent, DeviceId, DeviceInfo, MediaKind};
pub use provider::DeviceProvider;
pub use sink::{CaptureSink, SinkError, SinkHandle};
