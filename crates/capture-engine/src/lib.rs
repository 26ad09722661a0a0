//! movcap Capture Engine
//!
//! The recording session coordinator: tracks available capture devices, the
//! current device selection, recording state, and monitor volume, and drives
//! the capture output sink through start/stop. Device enumeration and the
//! encoder pipeline live behind the `movcap-capture-core` trait seams.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────┐
//! │              RecordingSession                   │
//! │  ┌───────────────┐       ┌──────────────────┐  │
//! │  │ DeviceProvider│       │   CaptureSink    │  │
//! │  │ (snapshots +  │       │ (open/close the  │  │
//! │  │  plug events) │       │   movie file)    │  │
//! │  └───────┬───────┘       └────────┬─────────┘  │
//! │          │                        │             │
//! │          ▼                        ▼             │
//! │   selection / state        destination file     │
//! │          │                                      │
//! │          ▼                                      │
//! │   watch channel ──► observers (duration label,  │
//! │                     volume slider, meters)      │
//! └────────────────────────────────────────────────┘
//! ```

pub mod session;
pub mod status;

pub use session::*;
pub use status::*;
