use anyhow::Result;
use clap::Parser;
use log::info;
use std::path::PathBuf;

use intersection_sim::render;
use intersection_sim::simulation::{SimConfig, SimWorld};

#[derive(Parser)]
#[command(name = "intersection_sim")]
#[command(about = "Four-way signalized intersection simulator")]
struct Cli {
    /// Path to the key:value input specification
    config: PathBuf,

    /// Seed for the simulation RNG
    #[arg(long, default_value = "0")]
    seed: u64,

    /// Override the configured number of ticks
    #[arg(long)]
    ticks: Option<u32>,

    /// Wait for Enter between ticks
    #[arg(long)]
    step: bool,

    /// Skip frame drawing and only log the final summary
    #[arg(long)]
    quiet: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = SimConfig::from_file(&cli.config)?;
    let total_ticks = cli.ticks.unwrap_or(config.maximum_simulated_time);
    let mut world = SimWorld::new(config, cli.seed);

    for _ in 0..total_ticks {
        world.tick();
        if !cli.quiet {
            println!("{}", render::draw_frame(&world.frame()));
        }
        if cli.step {
            let mut pause = String::new();
            std::io::stdin().read_line(&mut pause)?;
        }
    }

    info!("Simulation complete. {}", world.stats.summary());
    Ok(())
}
