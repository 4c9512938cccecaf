use crate::board::Cell;
use crate::entity::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    Wall,
    SelfCollision,
}

/// Notifications from the engine to whatever is drawing the game.
/// Renderers apply them in order; they never read engine state directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A new game began: redraw a `size × size` board of empty cells,
    /// hide the game-over sign and disable the start control.
    BoardReset { size: usize },
    CellChanged { position: Position, cell: Cell },
    ScoreChanged(u32),
    GameOver { cause: Collision },
}
