use anyhow::ensure;
use std::time::Duration;

pub const BOARD_SIZE: usize = 10;
pub const TICK_INTERVAL_MS: u64 = 100; // 10 moves/sec
pub const INITIAL_LENGTH: usize = 4;

/// Game settings. Fixed at compile time in the browser build; the terminal
/// build lets them be overridden from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Side length of the square board
    pub board_size: usize,
    /// Time between two moves of the snake
    pub tick_interval_ms: u64,
    /// Number of cells in the snake at the start of a game
    pub initial_length: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: BOARD_SIZE,
            tick_interval_ms: TICK_INTERVAL_MS,
            initial_length: INITIAL_LENGTH,
        }
    }
}

impl GameConfig {
    /// Default settings on a `board_size` board. The starting snake is
    /// shortened to fit boards narrower than `INITIAL_LENGTH`.
    pub fn new(board_size: usize) -> Self {
        Self {
            board_size,
            initial_length: INITIAL_LENGTH.min(board_size).max(1),
            ..Default::default()
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(
            self.board_size >= 2,
            "board size must be at least 2, got {}",
            self.board_size
        );
        ensure!(
            self.board_size <= i32::MAX as usize / self.board_size,
            "board size {} is too large",
            self.board_size
        );
        ensure!(
            self.initial_length >= 1 && self.initial_length <= self.board_size,
            "initial snake length must be between 1 and {}, got {}",
            self.board_size,
            self.initial_length
        );
        ensure!(self.tick_interval_ms > 0, "tick interval must be positive");
        Ok(())
    }
}
