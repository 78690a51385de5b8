use std::fmt;

use thiserror::Error;
use tracing::debug;

use crate::CellOffset;
use crate::random;
use crate::random::RandomSource;

/// Bytes taken by the board's dimensions, stored in front of the cells.
pub const HEADER_SIZE: usize = 2 * size_of::<CellOffset>();

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("Board dimensions must be positive, got {rows}x{columns}")]
    InvalidDimensions { rows: CellOffset, columns: CellOffset },

    #[error("Cannot place {live} living cells on a board of {cells} cells")]
    TooManyCells { live: usize, cells: usize },

    #[error("Failed to allocate {bytes} bytes for the board")]
    Allocation { bytes: usize },
}

/// Total storage footprint of a `rows` by `columns` board: the header plus one bit per cell,
/// rounded up to the byte.
pub fn byte_size(rows: CellOffset, columns: CellOffset) -> usize {
    HEADER_SIZE + grid_len(rows, columns)
}

/// Length of the packed cell buffer. Only ever called through [`byte_size`] or with dimensions
/// that already passed validation.
fn grid_len(rows: CellOffset, columns: CellOffset) -> usize {
    (rows.max(0) as usize * columns.max(0) as usize).div_ceil(8)
}

/// A rectangular board of cells, one bit per cell.
///
/// Cell `(x, y)` lives at bit `y * columns + x`, where bit `i` is bit `i % 8` of byte `i / 8`.
/// Any coordinate off the board reads as dead and ignores writes, so the board has hard edges.
#[derive(Clone, PartialEq, Eq)]
pub struct BitBoard {
    rows: CellOffset,
    columns: CellOffset,
    grid: Vec<u8>,
}

impl BitBoard {
    /// Create a board with every cell dead
    pub fn new(rows: CellOffset, columns: CellOffset) -> Result<Self, BoardError> {
        if rows <= 0 || columns <= 0 {
            return Err(BoardError::InvalidDimensions { rows, columns });
        }

        let len = byte_size(rows, columns) - HEADER_SIZE;

        let mut grid = Vec::new();
        grid.try_reserve_exact(len).map_err(|_| BoardError::Allocation {
            bytes: byte_size(rows, columns),
        })?;
        grid.resize(len, 0);

        Ok(Self {
            rows,
            columns,
            grid,
        })
    }

    /// Create a board with exactly `live` living cells, placed at random using the process-wide
    /// random source.
    pub fn create(rows: CellOffset, columns: CellOffset, live: usize) -> Result<Self, BoardError> {
        let mut board = Self::new(rows, columns)?;
        board.populate(live, random::uniform)?;

        Ok(board)
    }

    /// Like [`BitBoard::create`], drawing positions from `source`.
    pub fn create_with(
        rows: CellOffset,
        columns: CellOffset,
        live: usize,
        source: &mut RandomSource,
    ) -> Result<Self, BoardError> {
        let mut board = Self::new(rows, columns)?;
        board.populate(live, |n| source.uniform(n))?;

        Ok(board)
    }

    /// Create a board where exactly the listed cells are alive. Coordinates off the board are
    /// ignored.
    pub fn from_cells<I>(
        rows: CellOffset,
        columns: CellOffset,
        cells: I,
    ) -> Result<Self, BoardError>
    where
        I: IntoIterator<Item = (CellOffset, CellOffset)>,
    {
        let mut board = Self::new(rows, columns)?;

        for (x, y) in cells {
            board.set_cell(x, y, true);
        }

        Ok(board)
    }

    /// Bring `live` distinct dead cells to life. Expects an empty board.
    fn populate<F>(&mut self, live: usize, mut uniform: F) -> Result<(), BoardError>
    where
        F: FnMut(u64) -> u64,
    {
        let cells = self.cell_count();
        if live > cells {
            return Err(BoardError::TooManyCells { live, cells });
        }

        let mut placed = 0;
        while placed < live {
            let i = uniform(cells as u64) as usize;
            let (byte, mask) = Self::locate(i);

            // already alive, draw again
            if self.grid[byte] & mask != 0 {
                continue;
            }

            self.grid[byte] |= mask;
            placed += 1;
        }

        debug!(
            rows = self.rows,
            columns = self.columns,
            live,
            "Populated board"
        );

        Ok(())
    }

    pub fn rows(&self) -> CellOffset {
        self.rows
    }

    pub fn columns(&self) -> CellOffset {
        self.columns
    }

    /// Number of cells on the board, dead or alive
    pub fn cell_count(&self) -> usize {
        self.rows as usize * self.columns as usize
    }

    /// Storage footprint of this board, see [`byte_size`]
    pub fn byte_size(&self) -> usize {
        byte_size(self.rows, self.columns)
    }

    /// Whether `(x, y)` is on the board
    pub fn contains(&self, x: CellOffset, y: CellOffset) -> bool {
        x >= 0 && y >= 0 && x < self.columns && y < self.rows
    }

    /// Whether the cell at `(x, y)` is alive. Cells off the board are always dead.
    pub fn cell_state(&self, x: CellOffset, y: CellOffset) -> bool {
        let Some(i) = self.bit_index(x, y) else {
            return false;
        };

        let (byte, mask) = Self::locate(i);
        self.grid[byte] & mask != 0
    }

    /// Set the cell at `(x, y)` alive or dead, returning the state written. Writes off the board
    /// do nothing and return `false`.
    pub fn set_cell(&mut self, x: CellOffset, y: CellOffset, alive: bool) -> bool {
        let Some(i) = self.bit_index(x, y) else {
            return false;
        };

        let (byte, mask) = Self::locate(i);
        if alive {
            self.grid[byte] |= mask;
        } else {
            self.grid[byte] &= !mask;
        }

        alive
    }

    /// Kill every cell, keeping the allocation
    pub fn clear_all(&mut self) {
        self.grid.fill(0);
    }

    /// Number of living cells
    pub fn population(&self) -> usize {
        // bits past the last cell are never set, so they don't need masking out
        self.grid.iter().map(|b| b.count_ones() as usize).sum()
    }

    fn bit_index(&self, x: CellOffset, y: CellOffset) -> Option<usize> {
        if !self.contains(x, y) {
            return None;
        }

        Some(y as usize * self.columns as usize + x as usize)
    }

    /// Byte and mask of bit `i`
    const fn locate(i: usize) -> (usize, u8) {
        (i / 8, 1 << (i % 8))
    }
}

impl fmt::Display for BitBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.rows {
            if y > 0 {
                writeln!(f)?;
            }

            for x in 0..self.columns {
                let c = if self.cell_state(x, y) { '#' } else { '.' };
                write!(f, "{c}")?;
            }
        }

        Ok(())
    }
}

impl fmt::Debug for BitBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BitBoard {}x{}", self.rows, self.columns)?;
        write!(f, "{self}")
    }
}

#[cfg(test)]
mod test {
    use super::BitBoard;
    use super::BoardError;
    use super::HEADER_SIZE;
    use crate::random::RandomSource;

    #[test]
    fn byte_size_rounds_up() {
        assert_eq!(super::byte_size(1, 1), HEADER_SIZE + 1);
        assert_eq!(super::byte_size(2, 4), HEADER_SIZE + 1);
        assert_eq!(super::byte_size(3, 3), HEADER_SIZE + 2);
        assert_eq!(super::byte_size(4, 4), HEADER_SIZE + 2);
        assert_eq!(super::byte_size(10, 10), HEADER_SIZE + 13);
    }

    #[test]
    fn allocation_matches_byte_size() {
        for (rows, columns) in [(1, 1), (3, 3), (7, 9), (8, 8), (13, 1)] {
            let board = BitBoard::new(rows, columns).unwrap();

            assert_eq!(board.grid.len() + HEADER_SIZE, board.byte_size());
        }
    }

    #[test]
    fn rejects_empty_dimensions() {
        assert_eq!(
            BitBoard::new(0, 5),
            Err(BoardError::InvalidDimensions {
                rows: 0,
                columns: 5
            })
        );
        assert!(BitBoard::new(5, -1).is_err());
    }

    #[test]
    fn rejects_too_many_living_cells() {
        let mut source = RandomSource::from_seed(3);

        assert_eq!(
            BitBoard::create_with(2, 2, 5, &mut source),
            Err(BoardError::TooManyCells { live: 5, cells: 4 })
        );
    }

    #[test]
    fn bit_layout_is_row_major() {
        let mut board = BitBoard::new(2, 5).unwrap();

        // (3, 1) is bit 8, the first bit of the second byte
        board.set_cell(3, 1, true);
        assert_eq!(board.grid, [0b0000_0000, 0b0000_0001]);

        board.set_cell(2, 0, true);
        assert_eq!(board.grid, [0b0000_0100, 0b0000_0001]);
    }

    #[test]
    fn set_then_clear_cell() {
        let mut board = BitBoard::new(4, 4).unwrap();

        assert!(board.set_cell(1, 2, true));
        assert!(board.cell_state(1, 2));
        assert!(!board.set_cell(1, 2, false));
        assert!(!board.cell_state(1, 2));
    }

    #[test]
    fn off_board_is_dead_and_read_only() {
        let mut board = BitBoard::new(3, 4).unwrap();
        let before = board.clone();

        for (x, y) in [(-1, 0), (0, -1), (4, 0), (0, 3), (-5, 17)] {
            assert!(!board.set_cell(x, y, true));
            assert!(!board.cell_state(x, y));
        }

        assert_eq!(board, before);
    }

    #[test]
    fn create_places_exact_count() {
        let mut source = RandomSource::from_seed(11);

        for live in [0, 1, 17, 99, 100] {
            let board = BitBoard::create_with(10, 10, live, &mut source).unwrap();

            assert_eq!(board.population(), live);
        }
    }

    #[test]
    fn create_with_shared_source() {
        let board = BitBoard::create(6, 7, 20).unwrap();

        assert_eq!(board.population(), 20);
    }

    #[test]
    fn seed_board_past_u32_cells() {
        let mut source = RandomSource::from_seed(1);

        // 65536 * 65537 cells is more than u32::MAX
        let board = BitBoard::create_with(65536, 65537, 3, &mut source).unwrap();

        assert!(board.cell_count() > u32::MAX as usize);
        assert_eq!(board.population(), 3);
    }

    #[test]
    fn clear_all_kills_everything() {
        let mut source = RandomSource::from_seed(5);
        let mut board = BitBoard::create_with(9, 11, 60, &mut source).unwrap();

        board.clear_all();

        assert_eq!(board.population(), 0);
        assert_eq!(board.byte_size(), super::byte_size(9, 11));
    }

    #[test]
    fn display_draws_rows() {
        let board = BitBoard::from_cells(2, 3, [(0, 0), (2, 1), (9, 9)]).unwrap();

        assert_eq!(board.to_string(), "#..\n..#");
    }
}
