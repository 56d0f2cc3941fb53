use anyhow::{Context, Result};
use clap::Parser;
use eth_snake::game::GameConfig;
use eth_snake::modes::HumanMode;
use eth_snake::render::IconIndex;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "eth_snake")]
#[command(version, about = "Ethereum Snake: eat L2s, verify fraud proofs, beat the clock")]
struct Cli {
    /// JSON file overriding the game rules
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for reproducible food placement
    #[arg(long)]
    seed: Option<u64>,

    /// JSON object mapping L2 names to icon glyphs
    #[arg(long)]
    icons: Option<PathBuf>,

    /// Write logs here; the game owns the terminal
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Countdown length in seconds
    #[arg(long)]
    time_limit: Option<u32>,

    /// Grid side in cells
    #[arg(long)]
    grid_size: Option<usize>,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };
        if let Some(time_limit) = self.time_limit {
            config.time_limit_secs = time_limit;
        }
        if let Some(grid_size) = self.grid_size {
            config.grid_size = grid_size;
        }
        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "eth_snake=info".into()))
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.log_file.as_deref())?;

    let config = cli.game_config()?;
    let icons = IconIndex::load_or_empty(cli.icons.as_deref());
    info!(
        grid = config.grid_size,
        time_limit = config.time_limit_secs,
        seed = ?cli.seed,
        "starting Ethereum Snake"
    );

    let mut human_mode = HumanMode::new(config, icons, cli.seed);
    human_mode.run().await?;

    Ok(())
}
