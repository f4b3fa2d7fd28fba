use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use swarm_client::{load_script, load_settings, RunnerOptions, SwarmRunner};
use swarm_shared::SwarmSettings;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Headless particle swarm that spells words and icons",
    long_about = None
)]
struct Args {
    /// Number of frames to simulate
    #[arg(short, long, default_value_t = 3600)]
    ticks: u64,

    /// Particle count (clamped to 100..=2500); defaults to the settings file
    #[arg(short, long)]
    count: Option<usize>,

    /// Random seed; a fresh one is drawn when omitted
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value_t = 1280.0)]
    width: f32,

    #[arg(long, default_value_t = 720.0)]
    height: f32,

    /// Simulated milliseconds per frame
    #[arg(long, default_value_t = 1000.0 / 60.0)]
    frame_ms: f64,

    /// JSON settings file
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// JSON-lines file of scheduled commands
    #[arg(long)]
    script: Option<PathBuf>,

    /// Write frames here ('-' for stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write a frame every N ticks
    #[arg(long, default_value_t = 60)]
    frame_every: u64,

    /// Hour of day (0-23) for the colour palette; defaults to the UTC hour
    #[arg(long)]
    hour: Option<u32>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn current_hour() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| (d.as_secs() / 3600 % 24) as u32)
        .unwrap_or(0)
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.debug {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    let settings = match &args.settings {
        Some(path) => load_settings(path).context("Failed to load settings")?,
        None => SwarmSettings::default(),
    };
    let script = match &args.script {
        Some(path) => load_script(path)?,
        None => Vec::new(),
    };
    let seed = args.seed.unwrap_or_else(rand::random);

    log::info!("Swarm client starting...");
    log::info!("Canvas: {}x{}, seed {}", args.width, args.height, seed);

    let options = RunnerOptions {
        width: args.width,
        height: args.height,
        count: args.count,
        seed,
        frame_ms: args.frame_ms,
        hour: args.hour.unwrap_or_else(current_hour),
        settings,
    };
    let mut runner = SwarmRunner::new(&options);

    let output: Option<Box<dyn Write>> = match &args.output {
        Some(path) if path.as_os_str() == "-" => Some(Box::new(BufWriter::new(io::stdout()))),
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            Some(Box::new(BufWriter::new(file)))
        }
        None => None,
    };

    let summary = runner
        .run(args.ticks, &script, args.frame_every, output)
        .context("Simulation error")?;

    log::info!(
        "Finished {} ticks: {} commands, {} frames, ending {} '{}'",
        summary.ticks,
        summary.commands_applied,
        summary.frames_written,
        summary.status.phase,
        summary.status.shape
    );

    Ok(())
}
