//! Start a recording session.

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context};
use movcap_capture_core::{DeviceId, DeviceInfo, MediaKind};
use movcap_capture_engine::RecordingSession;
use movcap_common::clock::format_hms;
use movcap_common::config::AppConfig;
use movcap_gst::{GstCaptureSink, GstDeviceProvider};

pub async fn run(
    config: &AppConfig,
    name: String,
    video: Option<String>,
    audio: Option<String>,
    output: Option<PathBuf>,
    volume: Option<f32>,
) -> anyhow::Result<()> {
    let provider = GstDeviceProvider::new()?;
    let sink = GstCaptureSink::new(config.recording.sample_rate);
    let mut session = RecordingSession::new(Box::new(provider), Box::new(sink));
    let mut events = session.take_device_events();

    select_device(
        &mut session,
        MediaKind::Video,
        video.as_deref().or(config.recording.video_device.as_deref()),
        video.is_some(),
    )?;
    select_device(
        &mut session,
        MediaKind::Audio,
        audio.as_deref().or(config.recording.audio_device.as_deref()),
        audio.is_some(),
    )?;

    if !session.has_recording_device() {
        bail!("No capture device available; run `movcap devices` to see what is connected");
    }

    let applied = session.set_volume(volume.unwrap_or(config.recording.monitor_volume));

    let destination = match output {
        Some(path) => path,
        None => {
            std::fs::create_dir_all(&config.captures_dir).with_context(|| {
                format!(
                    "Failed to create captures directory {}",
                    config.captures_dir.display()
                )
            })?;
            config
                .captures_dir
                .join(format!("{name}.{}", config.recording.container))
        }
    };

    println!("Starting recording: {name}");
    if let Some(device) = session.selected_video() {
        println!("  Video: {}", device.name);
    }
    if let Some(device) = session.selected_audio() {
        println!("  Audio: {}", device.name);
    }
    println!("  Output: {}", destination.display());
    println!("  Monitor volume: {applied:.2}");
    println!();

    session.start_recording(&destination)?;

    // Duration-display ticker; aborted as soon as the recording stops.
    let status = session.subscribe();
    let ticker = tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(1));
        loop {
            interval.tick().await;
            print!("\r  Recording {} ", format_hms(status.borrow().elapsed()));
            let _ = std::io::stdout().flush();
        }
    });

    println!("Press Ctrl+C to stop recording...");

    let mut disconnect: Option<anyhow::Error> = None;
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            maybe_event = recv_event(&mut events) => {
                let Some(event) = maybe_event else {
                    // Provider channel closed; keep recording until Ctrl+C.
                    events = None;
                    continue;
                };
                if let Err(e) = session.handle_device_event(event) {
                    disconnect = Some(e.into());
                    break;
                }
            }
        }
    }

    ticker.abort();
    println!();

    if let Some(error) = disconnect {
        // The session already forced itself back to idle.
        return Err(error.context("Recording aborted"));
    }

    let duration = session.stop_recording()?;
    println!(
        "Recorded {} to {}",
        format_hms(duration),
        destination.display()
    );

    Ok(())
}

async fn recv_event(
    events: &mut Option<tokio::sync::mpsc::UnboundedReceiver<movcap_capture_core::DeviceEvent>>,
) -> Option<movcap_capture_core::DeviceEvent> {
    match events {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}

/// Apply a device selection for one media kind.
///
/// `query` is a device index, id, or case-insensitive name fragment. An
/// explicit query that matches nothing is an error; a config default that
/// matches nothing is only a warning; no query at all picks the first
/// available device.
fn select_device(
    session: &mut RecordingSession,
    kind: MediaKind,
    query: Option<&str>,
    explicit: bool,
) -> anyhow::Result<()> {
    let devices = match kind {
        MediaKind::Video => session.video_devices()?,
        MediaKind::Audio => session.audio_devices()?,
    };

    let resolved = match query {
        Some(query) => {
            let found = resolve_device(&devices, query);
            if found.is_none() {
                if explicit {
                    bail!("No {} device matches '{query}'", kind.as_str());
                }
                tracing::warn!(
                    kind = kind.as_str(),
                    query,
                    "Configured default device not found"
                );
            }
            found
        }
        None => devices.first().map(|d| d.id.clone()),
    };

    if let Some(id) = resolved {
        match kind {
            MediaKind::Video => session.select_video_device(&id),
            MediaKind::Audio => session.select_audio_device(&id),
        }
    }
    Ok(())
}

/// Match a device by index, exact id, or case-insensitive name fragment.
fn resolve_device(devices: &[DeviceInfo], query: &str) -> Option<DeviceId> {
    if let Ok(index) = query.parse::<usize>() {
        return devices.get(index).map(|d| d.id.clone());
    }
    let lowered = query.to_lowercase();
    devices
        .iter()
        .find(|d| d.id.as_str() == query || d.name.to_lowercase().contains(&lowered))
        .map(|d| d.id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn devices() -> Vec<DeviceInfo> {
        vec![
            DeviceInfo {
                id: DeviceId::new("/dev/video0"),
                name: "Integrated Camera".to_string(),
                kind: MediaKind::Video,
            },
            DeviceInfo {
                id: DeviceId::new("/dev/video2"),
                name: "HD USB Webcam".to_string(),
                kind: MediaKind::Video,
            },
        ]
    }

    #[test]
    fn test_resolve_by_index() {
        assert_eq!(
            resolve_device(&devices(), "1"),
            Some(DeviceId::new("/dev/video2"))
        );
        assert_eq!(resolve_device(&devices(), "5"), None);
    }

    #[test]
    fn test_resolve_by_id_and_name_fragment() {
        assert_eq!(
            resolve_device(&devices(), "/dev/video0"),
            Some(DeviceId::new("/dev/video0"))
        );
        assert_eq!(
            resolve_device(&devices(), "webcam"),
            Some(DeviceId::new("/dev/video2"))
        );
        assert_eq!(resolve_device(&devices(), "missing"), None);
    }
}
