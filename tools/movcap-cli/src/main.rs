//! movcap CLI — record movies from camera and microphone devices.
//!
//! Usage:
//!   movcap record [OPTIONS]   Start a recording (Ctrl+C stops it)
//!   movcap devices            List available capture devices
//!   movcap check              Check system capabilities

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use movcap_common::config::AppConfig;
use movcap_common::logging::init_logging;

mod commands;

#[derive(Parser)]
#[command(
    name = "movcap",
    about = "Movie recording from capture devices",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a recording session
    Record {
        /// Recording name (used for the output file name)
        #[arg(short, long, default_value = "recording")]
        name: String,

        /// Video device to record (name fragment or index from `movcap devices`)
        #[arg(long)]
        video: Option<String>,

        /// Audio device to record (name fragment or index from `movcap devices`)
        #[arg(long)]
        audio: Option<String>,

        /// Output file path (defaults to the configured captures directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Monitor playback volume, clamped to [0.0, 1.0]
        #[arg(long)]
        volume: Option<f32>,
    },

    /// List available video and audio capture devices
    Devices,

    /// Check system capabilities
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load();
    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    init_logging(&logging);

    match cli.command {
        Commands::Record {
            name,
            video,
            audio,
            output,
            volume,
        } => commands::record::run(&config, name, video, audio, output, volume).await,
        Commands::Devices => commands::devices::run(&config),
        Commands::Check => commands::check::run(&config),
    }
}
