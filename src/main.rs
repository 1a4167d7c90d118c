// src/main.rs
//! GPS Tracker demo - read NMEA from a serial port and print positions

use clap::Parser;
use gps_tracker::{GpsTracker, TrackerConfig};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gps-tracker", about = "Read NMEA from a serial port and print positions")]
struct Args {
    /// Serial port (e.g. COM3 or /dev/ttyUSB0)
    #[arg(long)]
    port: String,

    #[arg(long, default_value_t = 9600)]
    baud: u32,

    /// Line read timeout in milliseconds
    #[arg(long, default_value_t = 1000)]
    timeout_ms: u64,

    /// Position history capacity
    #[arg(long, default_value_t = 1000)]
    history: usize,

    /// Write the history to this CSV file on exit
    #[arg(long)]
    export: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = TrackerConfig::new(args.port);
    config.baud_rate = args.baud;
    config.read_timeout_ms = args.timeout_ms;
    config.history_capacity = args.history;

    let tracker = GpsTracker::new(config);
    tracker.set_callback(|pos| println!("position: {}", pos));

    tracker.start().await?;
    println!("Tracking... press Ctrl-C to stop.");

    tokio::signal::ctrl_c().await?;
    tracker.stop().await;

    println!("Recorded {} positions.", tracker.snapshot().len());
    if let Some(path) = args.export {
        tracker.save_history_csv(&path)?;
        println!("History written to {}", path.display());
    }

    Ok(())
}
