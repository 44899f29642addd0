//! Text Watch CLI
//!
//! Terminal host for the word clock watch core.

use anyhow::{bail, Context, Result};
use chrono::{NaiveTime, Timelike};
use clap::{Parser, Subcommand};
use crossbeam_channel::RecvTimeoutError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use textwatch::{
    clock::{phrase, render_face, FaceStrings, SystemClock, TimeReading, TimeSource},
    config::Config,
    sensor::{SensorKind, SimulatedSensors, SimulationConfig},
    vitals::{Vitals, WindowTimer},
    WatchCore, WatchHandlers, VERSION,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "textwatch")]
#[command(version = VERSION)]
#[command(about = "Word clock watch face with step and pulse tracking", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the watch face in the terminal with simulated sensors
    Run {
        /// Low-power mode: tick once per minute and hide seconds
        #[arg(long)]
        ambient: bool,

        /// Battery level to display (defaults to the configured value)
        #[arg(long)]
        battery: Option<u8>,

        /// Stop after this many seconds
        #[arg(long)]
        seconds: Option<u64>,

        /// Override the heart-rate window period in seconds
        #[arg(long)]
        window_period: Option<u64>,
    },

    /// Print the phrase for a time of day (HH:MM)
    Phrase {
        time: String,
    },

    /// Render the face once
    Face {
        /// Date and time to render ("YYYY-MM-DD HH:MM[:SS]"), defaults to now
        #[arg(long)]
        at: Option<String>,

        /// Render in ambient mode
        #[arg(long)]
        ambient: bool,
    },

    /// Show configuration
    Config {
        /// Write the default configuration file
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            ambient,
            battery,
            seconds,
            window_period,
        } => cmd_run(ambient, battery, seconds, window_period),
        Commands::Phrase { time } => cmd_phrase(&time),
        Commands::Face { at, ambient } => cmd_face(at.as_deref(), ambient),
        Commands::Config { init } => cmd_config(init),
    }
}

fn load_config() -> Config {
    match Config::load() {
        Ok(config) => config,
        Err(e) => {
            warn!("could not load config, using defaults: {e}");
            Config::default()
        }
    }
}

fn cmd_run(
    ambient: bool,
    battery: Option<u8>,
    seconds: Option<u64>,
    window_period: Option<u64>,
) -> Result<()> {
    let mut config = load_config();
    if let Some(period) = window_period {
        config.hrm_window_period = Duration::from_secs(period);
    }
    if let Some(level) = battery {
        config.battery_percent = level;
    }
    config.validate()?;

    let tick_interval = if ambient {
        config.ambient_tick_interval
    } else {
        config.tick_interval
    };

    println!("Text Watch v{VERSION}");
    println!("  Mode: {}", if ambient { "ambient" } else { "interactive" });
    println!(
        "  Pulse window: every {}s, {} readings",
        config.hrm_window_period.as_secs(),
        config.required_hrm_samples
    );
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })
    .context("Error setting Ctrl+C handler")?;

    let sensors = SimulatedSensors::new(SimulationConfig::default());
    let receiver = sensors.receiver().clone();
    let clock = SystemClock;

    let mut watch = WatchCore::new(sensors, &config);
    info!("session {}", watch.stats().session_id());
    watch.on_create();

    let started = Instant::now();
    let deadline = seconds.map(|s| started + Duration::from_secs(s));
    let mut window_timer = WindowTimer::new(config.hrm_window_period, started);
    let mut last_tick: Option<Instant> = None;

    while running.load(Ordering::SeqCst) {
        let now = Instant::now();
        if deadline.is_some_and(|d| now >= d) {
            break;
        }

        if last_tick.map_or(true, |t| now.duration_since(t) >= tick_interval) {
            if let Some(face) = watch.on_tick(clock.now(), ambient, config.battery_percent) {
                print_face(&face);
            }
            last_tick = Some(now);
        }

        if window_timer.poll(now) {
            watch.on_window_timer_fired();
        }

        match receiver.recv_timeout(Duration::from_millis(100)) {
            Ok(event) => match event.kind {
                SensorKind::Pedometer => watch.on_pedometer_event(&event.values),
                SensorKind::HeartRate => watch.on_heart_rate_event(&event.values),
            },
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => {
                warn!("sensor simulator disconnected unexpectedly");
                break;
            }
        }
    }

    println!();
    println!("Stopping watch...");
    window_timer.cancel();
    watch.on_terminate();

    println!();
    println!("{}", watch.stats().summary());
    Ok(())
}

fn print_face(face: &FaceStrings) {
    println!("{face}");
    if face.theme_changed {
        println!("[background: {} ({})]", face.theme.name(), face.theme.id());
    }
    println!();
}

fn cmd_phrase(time: &str) -> Result<()> {
    let parsed = NaiveTime::parse_from_str(time.trim(), "%H:%M")
        .with_context(|| format!("expected HH:MM, got {time:?}"))?;

    let result = phrase(parsed.hour() as u8, parsed.minute() as u8);
    println!(
        "Es ist {} {} ({})",
        result.prefix_phrase(),
        result.hour_name(),
        result.background_theme.name()
    );
    Ok(())
}

fn cmd_face(at: Option<&str>, ambient: bool) -> Result<()> {
    let config = load_config();
    let reading = match at {
        Some(s) => TimeReading::parse(s)?,
        None => SystemClock.now()?,
    };

    let face = render_face(&reading, ambient, &Vitals::default(), config.battery_percent);
    print_face(&face);
    Ok(())
}

fn cmd_config(init: bool) -> Result<()> {
    let path = Config::config_path();

    if init {
        if path.exists() {
            bail!("config file already exists at {path:?}");
        }
        Config::default().save()?;
        println!("Wrote default configuration to {path:?}");
        return Ok(());
    }

    let config = Config::load()?;
    println!("Configuration");
    println!("=============");
    println!();
    println!("Config file: {path:?}");
    println!();
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
