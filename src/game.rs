use crate::board::{Board, Cell};
use crate::config::GameConfig;
use crate::entity::{Direction, Position};
use crate::event::{Collision, GameEvent};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::VecDeque;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// Before the first `start()`
    Idle,
    Running,
    GameOver,
}

/// What a single call to [`Game::on_tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Game not running, nothing changed
    Idle,
    Moved,
    Ate,
    Collided(Collision),
}

pub struct Game {
    config: GameConfig,
    board: Board,
    /// Tail at the front, head at the back
    snake: VecDeque<Position>,
    /// Direction the next tick will move in
    direction: Direction,
    /// Direction the last tick moved in
    heading: Direction,
    score: u32,
    state: GameState,
    food: Option<Position>,
    rng: StdRng,
    events: Vec<GameEvent>,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Same as [`Game::new`] but with reproducible food placement.
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: StdRng) -> Self {
        Self {
            board: Board::new(config.board_size),
            snake: VecDeque::with_capacity(config.board_size * config.board_size),
            direction: Direction::Right,
            heading: Direction::Right,
            score: 0,
            state: GameState::Idle,
            food: None,
            rng,
            events: Vec::new(),
            config,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn cell_at(&self, pos: Position) -> Option<Cell> {
        self.board.cell(pos)
    }

    /// Snake body from tail to head.
    pub fn snake(&self) -> impl Iterator<Item = Position> + '_ {
        self.snake.iter().copied()
    }

    pub fn head(&self) -> Option<Position> {
        self.snake.back().copied()
    }

    pub fn len(&self) -> usize {
        self.snake.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snake.is_empty()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == GameState::Running
    }

    pub fn food(&self) -> Option<Position> {
        self.food
    }

    /// Takes the notifications produced since the last call, oldest first.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Resets everything to the initial layout and starts a new game.
    /// Safe to call in any state, including mid-game.
    pub fn start(&mut self) {
        self.board.clear();
        self.snake.clear();
        self.food = None;
        self.direction = Direction::Right;
        self.heading = Direction::Right;

        // Anything not yet drawn belongs to the previous game.
        self.events.clear();
        self.events.push(GameEvent::BoardReset {
            size: self.config.board_size,
        });

        // Configs built by hand may skip validate(); stay on the board.
        let length = self.config.initial_length.min(self.config.board_size);
        for col in 0..length {
            let pos = Position::new(0, col as i32);
            self.snake.push_back(pos);
            self.mark(pos, Cell::Snake);
        }
        self.score = self.snake.len() as u32;

        self.place_food();
        self.events.push(GameEvent::ScoreChanged(self.score));
        self.state = GameState::Running;

        info!(
            board_size = self.config.board_size,
            score = self.score,
            "game started"
        );
    }

    /// Queues a turn for the next tick. Turning straight back onto the
    /// segment behind the head is ignored.
    pub fn set_direction(&mut self, direction: Direction) {
        if self.heading.is_opposite(direction) {
            return;
        }
        self.direction = direction;
    }

    /// Advances the snake by one cell.
    pub fn on_tick(&mut self) -> TickOutcome {
        if self.state != GameState::Running {
            return TickOutcome::Idle;
        }
        let Some(head) = self.head() else {
            return TickOutcome::Idle;
        };

        let next = head.moved(self.direction);

        if let Some(cause) = self.check_collision(next) {
            self.state = GameState::GameOver;
            self.events.push(GameEvent::GameOver { cause });
            info!(?cause, score = self.score, length = self.snake.len(), "game over");
            return TickOutcome::Collided(cause);
        }

        self.heading = self.direction;
        let ate = self.board.cell(next) == Some(Cell::Food);

        if ate {
            self.snake.push_back(next);
            self.board.set(next, Cell::Snake);
            self.food = None;
            self.score += 1;
            self.events.push(GameEvent::ScoreChanged(self.score));
            debug!(score = self.score, length = self.snake.len(), "food eaten");
            self.place_food();
        } else {
            // Vacate the tail first: the head may be moving into it.
            if let Some(tail) = self.snake.pop_front() {
                self.mark(tail, Cell::Empty);
            }
            self.snake.push_back(next);
            self.board.set(next, Cell::Snake);
        }

        self.events.push(GameEvent::CellChanged {
            position: next,
            cell: Cell::Snake,
        });

        if ate {
            TickOutcome::Ate
        } else {
            TickOutcome::Moved
        }
    }

    fn check_collision(&self, next: Position) -> Option<Collision> {
        match self.board.cell(next) {
            None => Some(Collision::Wall),
            // The tail is never food, so it is always vacated this tick.
            Some(Cell::Snake) if self.snake.front() != Some(&next) => Some(Collision::SelfCollision),
            _ => None,
        }
    }

    fn place_food(&mut self) {
        match self.board.random_empty(&mut self.rng) {
            Some(pos) => {
                self.food = Some(pos);
                self.mark(pos, Cell::Food);
                debug!(row = pos.row, col = pos.col, "food placed");
            }
            None => {
                self.food = None;
                warn!(length = self.snake.len(), "no empty cell left for food");
            }
        }
    }

    fn mark(&mut self, position: Position, cell: Cell) {
        self.board.set(position, cell);
        self.events.push(GameEvent::CellChanged { position, cell });
    }

    /// Replaces the running game with a hand-built layout.
    #[cfg(test)]
    pub(crate) fn arrange(&mut self, body: &[Position], heading: Direction, food: Option<Position>) {
        self.board.clear();
        self.snake = body.iter().copied().collect();
        for &pos in body {
            self.board.set(pos, Cell::Snake);
        }
        self.food = food;
        if let Some(pos) = food {
            self.board.set(pos, Cell::Food);
        }
        self.direction = heading;
        self.heading = heading;
        self.score = body.len() as u32;
        self.state = GameState::Running;
        self.events.clear();
    }
}
