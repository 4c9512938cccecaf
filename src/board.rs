use crate::entity::Position;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Snake,
    Food,
}

/// Square grid of cells plus the set of currently empty positions.
///
/// The empty set is kept in a dense `Vec` with a per-cell back index so that
/// insert, remove and uniform random choice are all O(1).
#[derive(Debug, Clone)]
pub struct Board {
    size: i32,
    cells: Vec<Cell>,
    empty: Vec<Position>,
    empty_slot: Vec<Option<usize>>,
}

impl Board {
    pub fn new(size: usize) -> Self {
        let mut board = Self {
            size: size as i32,
            cells: Vec::new(),
            empty: Vec::new(),
            empty_slot: Vec::new(),
        };
        board.clear();
        board
    }

    /// Resets every cell to `Empty` and rebuilds the empty set.
    pub fn clear(&mut self) {
        let count = (self.size * self.size) as usize;
        self.cells.clear();
        self.cells.resize(count, Cell::Empty);
        self.empty.clear();
        self.empty.reserve(count);
        self.empty_slot.clear();
        self.empty_slot.resize(count, None);

        for row in 0..self.size {
            for col in 0..self.size {
                let idx = (row * self.size + col) as usize;
                self.empty_slot[idx] = Some(self.empty.len());
                self.empty.push(Position::new(row, col));
            }
        }
    }

    pub fn size(&self) -> i32 {
        self.size
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row >= 0 && pos.col >= 0 && pos.row < self.size && pos.col < self.size
    }

    fn index(&self, pos: Position) -> usize {
        (pos.row * self.size + pos.col) as usize
    }

    /// Cell state at `pos`, or `None` when outside the board.
    pub fn cell(&self, pos: Position) -> Option<Cell> {
        if !self.contains(pos) {
            return None;
        }
        Some(self.cells[self.index(pos)])
    }

    pub fn set(&mut self, pos: Position, cell: Cell) {
        debug_assert!(self.contains(pos), "{:?} is off the board", pos);
        let idx = self.index(pos);
        let previous = self.cells[idx];
        if previous == cell {
            return;
        }

        if previous == Cell::Empty {
            self.take_empty(idx);
        }
        if cell == Cell::Empty {
            self.empty_slot[idx] = Some(self.empty.len());
            self.empty.push(pos);
        }
        self.cells[idx] = cell;
    }

    fn take_empty(&mut self, idx: usize) {
        let Some(slot) = self.empty_slot[idx].take() else {
            debug_assert!(false, "empty cell missing from empty set");
            return;
        };
        self.empty.swap_remove(slot);
        if let Some(&moved) = self.empty.get(slot) {
            let moved_idx = self.index(moved);
            self.empty_slot[moved_idx] = Some(slot);
        }
    }

    pub fn empty_cells(&self) -> &[Position] {
        &self.empty
    }

    pub fn empty_count(&self) -> usize {
        self.empty.len()
    }

    /// Uniformly random empty position, or `None` when the board is full.
    pub fn random_empty<R: Rng>(&self, rng: &mut R) -> Option<Position> {
        if self.empty.is_empty() {
            return None;
        }
        Some(self.empty[rng.gen_range(0..self.empty.len())])
    }

    /// Every position on the board, row by row.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.size).flat_map(move |row| (0..self.size).map(move |col| Position::new(row, col)))
    }
}
