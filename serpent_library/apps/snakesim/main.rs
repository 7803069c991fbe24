// Snake in the terminal
// Keyboard -> SnakeControlNode -> SnakeSimNode -> TerminalRenderNode, all on one scheduler.
// With --headless the simulation runs without a terminal UI for a fixed time.

mod terminal_render;

use anyhow::Context;
use clap::Parser;
use serpent::prelude::*;
use std::path::PathBuf;
use terminal_render::{playfield_for_terminal, TerminalRenderNode};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "snakesim")]
#[command(about = "Continuous-motion snake for the terminal")]
pub struct Args {
    /// Parameter file (YAML); defaults to .serpent/config/params.yaml when present
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Run the simulation only, without drawing or reading keys
    #[arg(long)]
    headless: bool,

    /// Stop after this many seconds (headless runs default to 10)
    #[arg(short, long)]
    duration: Option<f64>,

    /// Playfield width in pixels for headless runs
    #[arg(long, default_value = "400")]
    width: f64,

    /// Playfield height in pixels for headless runs
    #[arg(long, default_value = "400")]
    height: f64,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Frames per second
    #[arg(long)]
    tick_rate: Option<f64>,

    /// How trailing segments follow: spring or rigid
    #[arg(long, value_parser = ["spring", "rigid"])]
    follow_mode: Option<String>,

    /// Segment colouring: sine_wave, gradient or solid
    #[arg(long, value_parser = ["sine_wave", "gradient", "solid"])]
    shading: Option<String>,

    /// Milliseconds without repeats before a held key counts as released
    #[arg(long, default_value = "550")]
    release_ms: u64,
}

const HEADLESS_DEFAULT_SECS: f64 = 10.0;

fn load_params(args: &Args) -> anyhow::Result<RuntimeParams> {
    let params = match &args.config {
        Some(path) => RuntimeParams::from_file(path)
            .with_context(|| format!("loading parameters from {}", path.display()))?,
        None => RuntimeParams::init()?,
    };

    // Command line wins over the file
    if let Some(seed) = args.seed {
        params.set("seed", seed)?;
    }
    if let Some(rate) = args.tick_rate {
        params.set("tick_rate", rate)?;
    }
    if let Some(mode) = &args.follow_mode {
        params.set("follow_mode", mode)?;
    }
    if let Some(shading) = &args.shading {
        params.set("shading", shading)?;
    }
    Ok(params)
}

fn init_logging(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_headless(args: &Args, params: RuntimeParams) -> anyhow::Result<()> {
    let playfield = Playfield::new(args.width, args.height)?;
    let config = GameConfig::from_params(&params);
    let game = SnakeGame::new(playfield, config).context("invalid game configuration")?;
    let seconds = args.duration.unwrap_or(HEADLESS_DEFAULT_SECS);

    info!(" Starting snakesim - Headless Mode");
    info!("   {}x{} px for {:.1} s", args.width, args.height, seconds);

    let mut scheduler = Scheduler::new()
        .with_config(SchedulerConfig::from_params(&params))
        .with_params(params)
        .with_name("SnakesimHeadless");
    scheduler
        .add(Box::new(SnakeControlNode::new()?), 1, Some(true))
        .add(Box::new(SnakeSimNode::new(game)?), 2, Some(true));
    let frames: Hub<FrameSnapshot> = Hub::new(FRAME_TOPIC)?;

    scheduler.run_for(Duration::from_secs_f64(seconds))?;

    if let Some(frame) = frames.recv_latest(None) {
        info!(
            "Finished after {} ticks: length {}, longest {}, resets {}",
            frame.tick,
            frame.length(),
            frame.longest,
            frame.deaths
        );
    }
    Ok(())
}

fn run_terminal(args: &Args, params: RuntimeParams) -> anyhow::Result<()> {
    let playfield = playfield_for_terminal().context("terminal size unavailable")?;
    let config = GameConfig::from_params(&params);
    let game = SnakeGame::new(playfield, config).context("invalid game configuration")?;

    let mut scheduler = Scheduler::new()
        .with_config(SchedulerConfig::from_params(&params))
        .with_params(params)
        .with_name("SnakeScheduler");

    let keyboard = KeyboardInputNode::new()?
        .with_release_after(Duration::from_millis(args.release_ms))
        .with_stop_handle(scheduler.stop_handle());
    // The sim node sizes the frame topic, so it must exist before the renderer attaches
    let sim = SnakeSimNode::new(game)?;
    let render = TerminalRenderNode::new(&playfield)?;

    scheduler
        .add(Box::new(keyboard), 0, Some(false))
        .add(Box::new(SnakeControlNode::new()?), 1, Some(false))
        .add(Box::new(sim), 2, Some(false))
        .add(Box::new(render), 3, Some(false));

    match args.duration {
        Some(seconds) => scheduler.run_for(Duration::from_secs_f64(seconds))?,
        None => scheduler.run()?,
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Log lines would tear the terminal UI; keep it quiet unless asked
    init_logging(if args.headless { "info" } else { "warn" });

    let params = load_params(&args)?;
    if args.headless {
        run_headless(&args, params)
    } else {
        run_terminal(&args, params)
    }
}
