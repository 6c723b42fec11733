//! Quill CLI
//!
//! Simulate an infinite-scroll feed and inspect engine configuration.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod simulate;

use simulate::Simulation;

#[derive(Parser)]
#[command(name = "quill-scroll")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Quill infinite scroll simulator", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Engine configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scroll through a generated feed and report every load
    Simulate(SimulateArgs),

    /// Print the effective engine configuration as TOML
    Config {
        /// Override the trigger distance (px)
        #[arg(long)]
        distance: Option<f32>,
    },
}

#[derive(Args)]
struct SimulateArgs {
    /// Viewport height (px)
    #[arg(long, default_value = "600")]
    viewport: f32,

    /// Height of each feed item (px)
    #[arg(long, default_value = "48")]
    item_height: f32,

    /// Items appended per load
    #[arg(short, long, default_value = "10")]
    page_size: usize,

    /// Scroll distance per frame (px)
    #[arg(short, long, default_value = "120")]
    step: f32,

    /// Number of frames to simulate
    #[arg(short, long, default_value = "120")]
    frames: u32,

    /// Frame duration (ms)
    #[arg(long, default_value = "16")]
    frame_ms: u64,

    /// Place the feed in a scrolling container of this height instead of
    /// scrolling the window
    #[arg(short, long)]
    nested: Option<f32>,

    /// Stop producing items once the feed holds this many
    #[arg(long)]
    max_items: Option<usize>,

    /// Override the trigger distance (px)
    #[arg(long)]
    distance: Option<f32>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Simulate(args) => cmd_simulate(cli.config.as_deref(), args),
        Commands::Config { distance } => cmd_config(cli.config.as_deref(), distance),
    }
}

fn cmd_simulate(config_path: Option<&std::path::Path>, args: SimulateArgs) -> Result<()> {
    let config = config::load(config_path, args.distance)?;
    if args.item_height <= 0.0 {
        anyhow::bail!("--item-height must be positive, got {}", args.item_height);
    }
    if args.page_size == 0 {
        anyhow::bail!("--page-size must be at least 1");
    }

    let mut simulation = Simulation::new(
        config,
        simulate::Feed {
            viewport: args.viewport,
            item_height: args.item_height,
            page_size: args.page_size,
            nested: args.nested,
            max_items: args.max_items,
        },
    )?;
    let report = simulation.run(args.frames, args.step, args.frame_ms)?;

    println!();
    println!("Simulated {} frames", args.frames);
    println!("  loads:         {}", report.loads);
    println!("  items:         {}", report.items);
    println!(
        "  scroll:        {:.0} / {:.0} px",
        report.scroll_top, report.scroll_range
    );
    println!(
        "  fill mode:     {}",
        if report.filling { "active" } else { "finished" }
    );

    Ok(())
}

fn cmd_config(config_path: Option<&std::path::Path>, distance: Option<f32>) -> Result<()> {
    let config = config::load(config_path, distance)?;
    print!("{}", config::to_toml(&config)?);
    Ok(())
}
