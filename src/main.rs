use anyhow::{Context, Result};
use clap::Parser;
use snake::config::{BOARD_SIZE, INITIAL_LENGTH, TICK_INTERVAL_MS};
use snake::{CliRenderer, GameConfig, GameLoop};
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Instant;
use tracing::Level;

#[derive(Parser)]
#[command(name = "snake-cli")]
#[command(version, about = "Classic Snake in the terminal")]
struct Cli {
    /// Side length of the square board
    #[arg(long, default_value_t = BOARD_SIZE)]
    board_size: usize,

    /// Milliseconds between two moves
    #[arg(long = "tick-ms", default_value_t = TICK_INTERVAL_MS)]
    tick_interval_ms: u64,

    /// Starting length of the snake
    #[arg(long, default_value_t = INITIAL_LENGTH)]
    initial_length: usize,

    /// Write logs to this file (the terminal itself is used for the game)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level used with --log-file
    #[arg(long, default_value_t = Level::INFO)]
    log_level: Level,
}

fn init_logging(cli: &Cli) -> Result<()> {
    let Some(path) = &cli.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let config = GameConfig {
        board_size: cli.board_size,
        tick_interval_ms: cli.tick_interval_ms,
        initial_length: cli.initial_length,
    };
    config.validate().context("invalid game configuration")?;

    let renderer = CliRenderer::new(config.board_size);
    let mut game_loop = GameLoop::new(config, renderer);
    game_loop.init().context("failed to set up the terminal")?;

    let epoch = Instant::now();
    let result = loop {
        let now_ms = epoch.elapsed().as_secs_f64() * 1000.0;
        if let Err(e) = game_loop.frame(now_ms) {
            break Err(anyhow::Error::new(e).context("terminal I/O failed"));
        }
        if game_loop.should_quit() {
            break Ok(());
        }
    };

    game_loop.shutdown().context("failed to restore the terminal")?;
    result
}
