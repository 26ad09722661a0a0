//! Check system capabilities.

use movcap_capture_core::{DeviceProvider, MediaKind};
use movcap_common::config::AppConfig;
use movcap_gst::GstDeviceProvider;

pub fn run(config: &AppConfig) -> anyhow::Result<()> {
    println!("movcap System Check");
    println!("{}", "=".repeat(50));

    // GStreamer and device monitor
    let provider = match GstDeviceProvider::new() {
        Ok(provider) => {
            println!("[OK] GStreamer device monitor running");
            provider
        }
        Err(e) => {
            println!("[FAIL] GStreamer unavailable: {e}");
            println!();
            println!("movcap cannot record on this system. Install GStreamer and retry.");
            return Ok(());
        }
    };

    for kind in [MediaKind::Video, MediaKind::Audio] {
        match provider.enumerate(kind) {
            Ok(devices) if devices.is_empty() => {
                println!("[WARN] No {} devices detected", kind.as_str());
            }
            Ok(devices) => {
                println!("[OK] {} devices detected: {}", kind.as_str(), devices.len());
                for device in &devices {
                    println!("     {} ({})", device.name, device.id);
                }
            }
            Err(e) => println!("[FAIL] {} enumeration failed: {e}", kind.as_str()),
        }
    }

    // Captures directory
    match std::fs::create_dir_all(&config.captures_dir) {
        Ok(()) => println!("[OK] Captures directory: {}", config.captures_dir.display()),
        Err(e) => println!(
            "[FAIL] Captures directory {} not writable: {e}",
            config.captures_dir.display()
        ),
    }

    println!();
    println!("Record with `movcap record`; stop with Ctrl+C.");
    Ok(())
}
