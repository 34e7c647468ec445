//! Posture tracker over a recorded or piped landmark stream.

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use posture_tracker::{
    cli::{read_frames, Args},
    config::Config,
    monitor::PostureMonitor,
    sink::LogSink,
};
use std::{
    fs::File,
    io::{self, BufReader},
};

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logger
    if args.debug {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("debug"));
    } else {
        env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    }

    info!("Posture Tracker");

    // Load configuration if provided
    let mut config = if let Some(config_path) = &args.config {
        info!("Loading configuration from: {}", config_path);
        match Config::from_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!("Failed to load config file: {}. Using defaults.", e);
                Config::default()
            }
        }
    } else {
        Config::default()
    };
    args.apply_to(&mut config);

    let mut monitor = PostureMonitor::from_config(&config, LogSink).context("Invalid tracker configuration")?;

    let frames = if args.input == "-" {
        read_frames(io::stdin().lock())
    } else {
        let file = File::open(&args.input).with_context(|| format!("Failed to open {}", args.input))?;
        read_frames(BufReader::new(file))
    }
    .context("Failed to read landmark stream")?;

    info!("Processing {} frames at {} fps", frames.len(), config.timing.frame_rate);
    for frame in &frames {
        monitor.process(frame.as_ref());
    }

    let summary = monitor.summary();
    info!(
        "Session finished: {} good, {} bad, {} skipped frames",
        summary.good_frames, summary.bad_frames, summary.skipped_frames
    );
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
