use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{info, LevelFilter};
use simplelog::{Config, WriteLogger};
use wrap_snake::game::{Difficulty, GameConfig};
use wrap_snake::modes::HumanMode;

#[derive(Parser)]
#[command(name = "wrap_snake")]
#[command(version, about = "Snake on a wraparound grid")]
struct Cli {
    /// JSON config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Cells per side of the square grid
    #[arg(long)]
    grid_size: Option<u16>,

    /// Initial snake length, must be smaller than the grid size
    #[arg(long)]
    snake_size: Option<u16>,

    /// Speed preset
    #[arg(long)]
    difficulty: Option<DifficultyArg>,

    /// Exact tick interval in milliseconds, overrides --difficulty
    #[arg(long)]
    interval_ms: Option<f64>,

    /// Log file (the terminal itself is taken by the game)
    #[arg(long, default_value = "wrap_snake.log")]
    log_file: PathBuf,

    /// Log level: off, error, warn, info, debug or trace
    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

#[derive(Clone, Copy, ValueEnum)]
enum DifficultyArg {
    /// 8 ticks per second
    Easy,
    /// 15 ticks per second
    Medium,
    /// 30 ticks per second
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Medium => Difficulty::Medium,
            DifficultyArg::Hard => Difficulty::Hard,
        }
    }
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(grid_size) = self.grid_size {
            config.grid_size = grid_size;
        }
        if let Some(snake_size) = self.snake_size {
            config.snake_size = snake_size;
        }
        if let Some(difficulty) = self.difficulty {
            config = config.with_difficulty(difficulty.into());
        }
        if let Some(interval_ms) = self.interval_ms {
            config.interval_ms = interval_ms;
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_file = File::create(&cli.log_file)
        .with_context(|| format!("Failed to create log file {:?}", cli.log_file))?;
    WriteLogger::init(cli.log_level, Config::default(), log_file)
        .context("Failed to initialize logger")?;

    // Create game configuration from the config file and CLI arguments
    let config = cli.game_config()?;
    info!("starting with {:?}", config);

    let mut human_mode = HumanMode::new(config);
    human_mode.run().await?;

    Ok(())
}
