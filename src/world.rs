use tracing::debug;
use tracing::trace;

use crate::CellOffset;
use crate::board::BitBoard;
use crate::board::BoardError;
use crate::rules;
use crate::rules::RuleSet;

/// Compute the next generation of `board` under Conway's rules.
///
/// Returns the new board and its number of living cells.
pub fn step(board: &BitBoard) -> Result<(BitBoard, usize), BoardError> {
    step_with(board, &rules::B3S23)
}

/// Compute the next generation of `board` under `rules`.
///
/// Every cell is computed from `board` alone and written into a fresh board, so no cell ever sees
/// a neighbor that has already moved on to the next generation.
pub fn step_with(board: &BitBoard, rules: &RuleSet) -> Result<(BitBoard, usize), BoardError> {
    let mut next = BitBoard::new(board.rows(), board.columns())?;
    let mut live = 0;

    for y in 0..board.rows() {
        for x in 0..board.columns() {
            if next.set_cell(x, y, rules::next_state_with(rules, x, y, board)) {
                live += 1;
            }
        }
    }

    Ok((next, live))
}

/// The live board, along with everything needed to advance it.
pub struct World {
    board: BitBoard,

    /// Life rules
    rules: RuleSet,

    /// Number of generations since the board was last seeded or cleared
    generation: u64,

    /// Living cells on `board`
    population: usize,
}

impl World {
    /// Create a world with `live` living cells placed at random
    pub fn new(
        rows: CellOffset,
        columns: CellOffset,
        live: usize,
        rules: RuleSet,
    ) -> Result<Self, BoardError> {
        Ok(Self::from_board(BitBoard::create(rows, columns, live)?, rules))
    }

    pub fn from_board(board: BitBoard, rules: RuleSet) -> Self {
        let population = board.population();

        Self {
            board,
            rules,
            generation: 0,
            population,
        }
    }

    pub fn board(&self) -> &BitBoard {
        &self.board
    }

    pub fn rules(&self) -> RuleSet {
        self.rules
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn population(&self) -> usize {
        self.population
    }

    /// Advance one generation, returning the new number of living cells.
    ///
    /// The current board is left untouched until the next one is complete. If that fails, the
    /// world is unchanged.
    pub fn tick(&mut self) -> Result<usize, BoardError> {
        let (next, live) = step_with(&self.board, &self.rules)?;

        self.board = next;
        self.generation += 1;
        self.population = live;

        trace!(generation = self.generation, population = live, "Tick");

        Ok(live)
    }

    /// Replace the board with a fresh one of the same size holding `live` random living cells
    pub fn reseed(&mut self, live: usize) -> Result<(), BoardError> {
        self.board = BitBoard::create(self.board.rows(), self.board.columns(), live)?;
        self.generation = 0;
        self.population = live;

        debug!(live, "Reseeded world");

        Ok(())
    }

    /// Kill every cell
    pub fn clear(&mut self) {
        self.board.clear_all();
        self.generation = 0;
        self.population = 0;

        debug!("Cleared world");
    }
}
