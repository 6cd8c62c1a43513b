//! commlab - terminal filter laboratory
//!
//! Run with: cargo run -- --signal am --live

mod app;
mod ui;

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use clap::Parser;
use color_eyre::eyre::{Result as EyreResult, WrapErr};
use tracing::{info, warn, Level};

use app::App;
use commlab::{
    config::LabConfig,
    engine::Lab,
    io::{LiveCapture, OutputDevice},
    model::SignalKind,
};

#[derive(Parser)]
#[command(name = "commlab")]
#[command(about = "Realtime filter laboratory", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Initial signal kind (sine, square, triangle, composite, am, fm, noise, live)
    #[arg(short, long)]
    signal: Option<SignalKind>,

    /// Open the default capture device for live input
    #[arg(short, long)]
    live: bool,

    /// Where to write logs (the terminal belongs to the UI)
    #[arg(long, default_value = "commlab.log")]
    log_file: PathBuf,

    /// Log more (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    init_logging(&cli)?;

    let mut config = match &cli.config {
        Some(path) => LabConfig::load(path)
            .wrap_err_with(|| format!("failed to load {}", path.display()))?,
        None => LabConfig::default(),
    };
    if let Some(kind) = cli.signal {
        config.signal.kind = kind;
    }

    let output = OutputDevice::open_default().wrap_err("failed to open audio output")?;
    let sample_rate = output.sample_rate();
    let device_name = output.name();
    info!(device = %device_name, sample_rate, "output device");

    let mut builder = Lab::builder(sample_rate)
        .settings(config.audio)
        .signal(config.signal)
        .filter(config.filter);

    // Live input is optional: without it the lab still runs and reports the
    // source as unavailable. Selecting live input later opens the device then.
    let capture = if cli.live || config.audio.live_input {
        match LiveCapture::open_default(config.audio.ring_capacity()) {
            Ok((capture, feed)) => {
                app::check_capture_rate(&capture, sample_rate);
                builder = builder.live_feed(feed);
                Some(capture)
            }
            Err(err) => {
                warn!(%err, "continuing without live input");
                None
            }
        }
    } else {
        None
    };

    let mut lab = builder.build()?;
    let _stream = output
        .start(lab.renderer())
        .wrap_err("failed to start audio output")?;
    lab.start()?;

    let mut terminal = ratatui::init();
    let result = App::new(lab, device_name, capture).run(&mut terminal);
    ratatui::restore();

    result
}

fn init_logging(cli: &Cli) -> EyreResult<()> {
    let file = File::create(&cli.log_file)
        .wrap_err_with(|| format!("failed to create {}", cli.log_file.display()))?;
    let level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(level)
        .init();
    Ok(())
}
