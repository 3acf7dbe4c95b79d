use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use grid_snake::config::AppConfig;
use grid_snake::game::{GameConfig, GameEngine};
use grid_snake::modes::{HumanMode, Speed};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Grid snake with tiered food and timed rounds")]
struct Cli {
    /// JSON settings file; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Rule profile
    #[arg(long)]
    profile: Option<Profile>,

    /// Side length of the square grid
    #[arg(long)]
    grid_size: Option<usize>,

    /// Movement speed
    #[arg(long)]
    speed: Option<SpeedArg>,

    /// Round length in seconds
    #[arg(long)]
    duration: Option<u32>,

    /// Seed for reproducible food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs here (filtered by RUST_LOG); nothing is logged otherwise
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, ValueEnum)]
enum Profile {
    /// Wrap-around edges, normal/silver/golden food
    Tiered,
    /// Walls, normal food only
    Classic,
}

#[derive(Clone, ValueEnum)]
enum SpeedArg {
    Slow,
    Speedy,
    Rocket,
}

impl From<SpeedArg> for Speed {
    fn from(arg: SpeedArg) -> Self {
        match arg {
            SpeedArg::Slow => Speed::Slow,
            SpeedArg::Speedy => Speed::Speedy,
            SpeedArg::Rocket => Speed::Rocket,
        }
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create log file {:?}", path))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    if let Some(profile) = &cli.profile {
        let base = match profile {
            Profile::Tiered => GameConfig::tiered(),
            Profile::Classic => GameConfig::classic(),
        };
        config.game = base.with_grid_size(config.game.grid_size);
    }
    if let Some(grid_size) = cli.grid_size {
        config.game.grid_size = grid_size;
    }
    if let Some(speed) = &cli.speed {
        config.round.speed = speed.clone().into();
    }
    if let Some(duration) = cli.duration {
        config.round.duration_secs = duration;
    }

    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = resolve_config(&cli)?;
    tracing::info!(?config, seed = ?cli.seed, "starting");

    let engine = match cli.seed {
        Some(seed) => GameEngine::with_seed(config.game, seed),
        None => GameEngine::new(config.game),
    };

    let mut human_mode = HumanMode::new(engine, config.round);
    human_mode.run().await?;

    Ok(())
}
