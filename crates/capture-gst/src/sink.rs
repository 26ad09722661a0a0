//! GStreamer capture sink: builds and drives the recording pipeline.

use std::path::Path;
use std::time::Duration;

use gst::prelude::*;
use gstreamer as gst;

use movcap_capture_core::{CaptureSink, DeviceInfo, MediaKind, SinkError, SinkHandle};

use crate::ensure_gst_init;

/// Recording frame rate for the video branch.
const VIDEO_FPS: u32 = 30;

/// How long to wait for state changes and EOS propagation.
const PIPELINE_WAIT_SECS: u64 = 10;

/// Capture sink that encodes the selected devices into a Matroska file.
///
/// One recording at a time: `open` builds a parse-launch pipeline with an
/// x264 video branch and/or an AAC audio branch into `matroskamux`, plus an
/// audio monitor branch through a named `volume` element.
pub struct GstCaptureSink {
    sample_rate: u32,
    pipeline: Option<gst::Pipeline>,
    next_handle: u64,
    monitor_volume: f32,
}

impl GstCaptureSink {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            pipeline: None,
            next_handle: 1,
            monitor_volume: 0.0,
        }
    }

    fn apply_monitor_volume(&self) {
        if let Some(ref pipeline) = self.pipeline {
            if let Some(volume) = pipeline.by_name("monitor-volume") {
                volume.set_property("volume", self.monitor_volume as f64);
            }
        }
    }
}

impl CaptureSink for GstCaptureSink {
    fn open(
        &mut self,
        video: Option<&DeviceInfo>,
        audio: Option<&DeviceInfo>,
        destination: &Path,
    ) -> Result<SinkHandle, SinkError> {
        if self.pipeline.is_some() {
            return Err(SinkError::open("A recording pipeline is already open"));
        }
        ensure_gst_init().map_err(|e| SinkError::open(e.to_string()))?;

        let launch = build_record_launch(video, audio, destination, self.sample_rate)?;
        tracing::debug!(%launch, "Building recording pipeline");

        let element = gst::parse::launch(&launch)
            .map_err(|e| SinkError::open(format!("Failed to build pipeline: {e}")))?;
        let pipeline = element
            .dynamic_cast::<gst::Pipeline>()
            .map_err(|_| SinkError::open("Launch string did not produce a pipeline"))?;

        pipeline
            .set_state(gst::State::Playing)
            .map_err(|e| SinkError::open(format!("Failed to start pipeline: {e:?}")))?;

        // GStreamer state changes are async; without this wait the pipeline
        // may not have opened the capture sources yet when we return.
        let wait_result = pipeline.state(gst::ClockTime::from_seconds(PIPELINE_WAIT_SECS));
        match wait_result {
            (Ok(_), gst::State::Playing, _) => {}
            (Ok(_), state, _) => {
                tracing::warn!(?state, "Pipeline did not reach Playing state within timeout");
            }
            (Err(e), _, _) => {
                let _ = pipeline.set_state(gst::State::Null);
                return Err(SinkError::open(format!(
                    "Pipeline failed to reach Playing state: {e:?}"
                )));
            }
        }

        self.pipeline = Some(pipeline);
        self.apply_monitor_volume();

        let handle = SinkHandle(self.next_handle);
        self.next_handle += 1;
        Ok(handle)
    }

    fn close(&mut self, _handle: SinkHandle) -> Result<Duration, SinkError> {
        let Some(pipeline) = self.pipeline.take() else {
            return Err(SinkError::close("No recording pipeline is open"));
        };

        let position = pipeline
            .query_position::<gst::ClockTime>()
            .map(|t| Duration::from_nanos(t.nseconds()))
            .unwrap_or_default();

        // Send EOS downstream first so encoders/muxers can flush and finalize
        // their output. Without this, the tail of the recording (last few
        // seconds worth of buffered frames) may be truncated or corrupted.
        let eos_sent = pipeline.send_event(gst::event::Eos::new());
        if !eos_sent {
            tracing::warn!("Failed to send EOS event; output may be truncated");
        } else if let Some(bus) = pipeline.bus() {
            // Wait for EOS to propagate through the entire pipeline, polling
            // the bus with a deadline so we never block forever.
            let deadline = Duration::from_secs(PIPELINE_WAIT_SECS);
            let start = std::time::Instant::now();
            loop {
                let elapsed = start.elapsed();
                if elapsed >= deadline {
                    tracing::warn!("EOS drain timed out after {PIPELINE_WAIT_SECS}s");
                    break;
                }
                let timeout_ns =
                    gst::ClockTime::from_nseconds((deadline - elapsed).as_nanos() as u64);
                match bus.timed_pop(timeout_ns) {
                    Some(msg) => match msg.view() {
                        gst::MessageView::Eos(_) => {
                            tracing::debug!("EOS received; pipeline drained");
                            break;
                        }
                        gst::MessageView::Error(e) => {
                            tracing::warn!(error = %e.error(), "Pipeline error during EOS drain");
                            break;
                        }
                        _ => {}
                    },
                    None => {
                        tracing::warn!("EOS drain timed out after {PIPELINE_WAIT_SECS}s");
                        break;
                    }
                }
            }
        }

        pipeline
            .set_state(gst::State::Null)
            .map_err(|e| SinkError::close(format!("Failed to stop pipeline: {e:?}")))?;

        Ok(position)
    }

    fn set_monitor_volume(&mut self, volume: f32) {
        self.monitor_volume = volume;
        self.apply_monitor_volume();
    }
}

/// Build the parse-launch string for a recording.
///
/// At least one device must be present; the coordinator guarantees that, and
/// the builder re-checks it so a broken caller gets an `Open` error instead
/// of an invalid pipeline.
fn build_record_launch(
    video: Option<&DeviceInfo>,
    audio: Option<&DeviceInfo>,
    destination: &Path,
    sample_rate: u32,
) -> Result<String, SinkError> {
    if video.is_none() && audio.is_none() {
        return Err(SinkError::open("No capture device given"));
    }

    let path = escape_path(destination);
    let mut launch = format!("matroskamux name=mux ! filesink location=\"{path}\"");

    if let Some(device) = video {
        let source = video_source_fragment(device);
        let keyint = VIDEO_FPS.saturating_mul(2).max(2);
        // queue elements decouple the capture source from the encoder so that
        // encoder stalls don't cause dropped frames at the source.
        launch.push_str(&format!(
            " {source} ! queue max-size-buffers=200 leaky=downstream ! videoconvert ! videorate ! video/x-raw,framerate={VIDEO_FPS}/1 ! queue max-size-buffers=8 ! x264enc tune=zerolatency speed-preset=veryfast key-int-max={keyint} ! h264parse ! queue max-size-buffers=8 ! mux."
        ));
    }

    if let Some(device) = audio {
        let source = audio_source_fragment(device);
        // tee splits the audio into the encoded track and a local monitor
        // branch; the named volume element is what set_monitor_volume drives.
        launch.push_str(&format!(
            " {source} ! queue ! audioconvert ! audioresample ! audio/x-raw,rate={sample_rate} ! tee name=amon \
             amon. ! queue ! avenc_aac ! mux. \
             amon. ! queue leaky=downstream ! volume name=monitor-volume volume=0.0 ! autoaudiosink sync=false"
        ));
    }

    Ok(launch)
}

/// Source element for a video device.
///
/// v4l2 nodes are addressed directly; anything else falls back to the
/// autoplugged default source.
fn video_source_fragment(device: &DeviceInfo) -> String {
    debug_assert_eq!(device.kind, MediaKind::Video);
    let id = device.id.as_str();
    if id.starts_with("/dev/video") {
        format!("v4l2src device=\"{}\" do-timestamp=true", escape_quotes(id))
    } else {
        "autovideosrc".to_string()
    }
}

/// Source element for an audio device.
fn audio_source_fragment(device: &DeviceInfo) -> String {
    debug_assert_eq!(device.kind, MediaKind::Audio);
    let id = device.id.as_str();
    if id.starts_with("/dev/") || id.is_empty() {
        "autoaudiosrc".to_string()
    } else {
        format!("pulsesrc device=\"{}\" do-timestamp=true", escape_quotes(id))
    }
}

fn escape_path(path: &Path) -> String {
    path.to_string_lossy().replace('"', "\\\"")
}

fn escape_quotes(value: &str) -> String {
    value.replace('"', "\\\"")
}
