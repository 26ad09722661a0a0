//! List available capture devices.

use movcap_capture_core::{DeviceInfo, DeviceProvider, MediaKind};
use movcap_common::config::AppConfig;
use movcap_gst::GstDeviceProvider;

pub fn run(config: &AppConfig) -> anyhow::Result<()> {
    let provider = GstDeviceProvider::new()?;

    print_kind(
        "Video devices",
        &provider.enumerate(MediaKind::Video)?,
        config.recording.video_device.as_deref(),
    );
    println!();
    print_kind(
        "Audio devices",
        &provider.enumerate(MediaKind::Audio)?,
        config.recording.audio_device.as_deref(),
    );

    Ok(())
}

fn print_kind(heading: &str, devices: &[DeviceInfo], configured_default: Option<&str>) {
    println!("{heading}:");
    if devices.is_empty() {
        println!("  (none found)");
        return;
    }
    for (index, device) in devices.iter().enumerate() {
        let default_marker = if configured_default == Some(device.name.as_str()) {
            " [default]"
        } else {
            ""
        };
        println!("  [{index}] {}{default_marker}", device.name);
        println!("      id: {}", device.id);
    }
}
