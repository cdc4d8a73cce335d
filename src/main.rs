//! Flood-It: a tile-flood puzzle.
//!
//! ## Usage
//!
//! - `flood-it` - Show a demo
//! - `flood-it play` - Play through the text command protocol on stdin/stdout
//! - `flood-it demo` - Let the greedy player solve a random board

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use flood_it::config::GameConfig;
use flood_it::console::Console;
use flood_it::constants::{DEFAULT_COLORS, DEFAULT_SIZE};
use flood_it::flood::{Connectivity, Topology};
use flood_it::game::new_game;
use flood_it::hint::{autoplay, step_budget};

/// Flood-It: capture the whole board in as few color choices as possible
#[derive(Parser)]
#[command(name = "flood-it")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play through the text command protocol
    Play(GameArgs),
    /// Watch the greedy player solve a random board
    Demo(GameArgs),
}

#[derive(Args, Clone)]
struct GameArgs {
    /// Board size (NxN)
    #[arg(long, default_value_t = DEFAULT_SIZE)]
    size: usize,
    /// Number of colors
    #[arg(long, default_value_t = DEFAULT_COLORS)]
    colors: usize,
    /// Whether the board edges wrap
    #[arg(long, value_enum, default_value_t = Topology::Plane)]
    topology: Topology,
    /// Whether diagonal cells are adjacent
    #[arg(long, value_enum, default_value_t = Connectivity::Orthogonal)]
    connectivity: Connectivity,
    /// Seed for a reproducible board
    #[arg(long)]
    seed: Option<u64>,
}

impl Default for GameArgs {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            colors: DEFAULT_COLORS,
            topology: Topology::Plane,
            connectivity: Connectivity::Orthogonal,
            seed: None,
        }
    }
}

impl From<GameArgs> for GameConfig {
    fn from(args: GameArgs) -> Self {
        GameConfig {
            size: args.size,
            num_colors: args.colors,
            topology: args.topology,
            connectivity: args.connectivity,
            seed: args.seed,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Play(args)) => {
            let mut console =
                Console::new(args.into()).context("failed to start a game")?;
            console.run()
        }
        Some(Commands::Demo(args)) => run_demo(args.into()),
        None => run_demo(GameArgs::default().into()),
    }
}

fn run_demo(config: GameConfig) -> anyhow::Result<()> {
    println!("Flood-It: tile-flood puzzle\n");

    let mut game = new_game(&config).context("failed to start a game")?;
    let center = config.size / 2;
    game.pick_initial_cell(center, center)?;
    println!(
        "{}x{} board, {} colors, {} / {}",
        config.size, config.size, config.num_colors, config.topology, config.connectivity
    );
    println!("Start at ({center}, {center}):");
    println!("{}", game.board());

    let played = autoplay(&mut game, step_budget(config.size))?;
    println!("Greedy player finished in {played} steps:");
    println!("{}", game.board());
    Ok(())
}
