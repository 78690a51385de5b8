use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::CellOffset;
use crate::board::BitBoard;

/// Offsets of the Moore neighborhood
const NEIGHBORHOOD: [(CellOffset, CellOffset); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Rules of Conway's Game of Life.
pub const B3S23: RuleSet = RuleSet::new(0b1000, 0b1100);

/// Which neighbor counts bring a dead cell to life and which keep a living cell alive.
///
/// Both sets are 9 bit masks over the counts `0..=8`, packed in one word with the births in the
/// high half: `B3/S23` is `0x0008_000C`. Parsed from and displayed as a rulestring, see
/// <https://conwaylife.com/wiki/Rulestring>.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct RuleSet {
    rule: u32,
}

impl Default for RuleSet {
    fn default() -> Self {
        B3S23
    }
}

impl RuleSet {
    /// Bit `i` of `births` (`survivals`) set means a count of `i` living neighbors gives birth
    /// (keeps a cell alive). Counts past 8 are dropped.
    pub const fn new(births: u16, survivals: u16) -> Self {
        const COUNTS: u16 = 0x1FF;

        Self {
            rule: ((births & COUNTS) as u32) << 16 | (survivals & COUNTS) as u32,
        }
    }

    /// Neighbor counts that bring a dead cell to life
    pub fn births(&self) -> u16 {
        (self.rule >> 16) as u16
    }

    /// Neighbor counts that keep a living cell alive
    pub fn survivals(&self) -> u16 {
        self.rule as u16 & 0x1FF
    }

    /// State of a cell in the next generation given its current state and the number of living
    /// cells around it
    pub fn next(&self, alive: bool, neighbors: u8) -> bool {
        let mask = if alive {
            self.survivals()
        } else {
            self.births()
        };

        neighbors <= 8 && mask & (1 << neighbors) != 0
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = |mask: u16| -> String {
            (0..=8u8)
                .filter(|&n| mask & (1 << n) != 0)
                .map(|n| char::from(b'0' + n))
                .collect()
        };

        write!(f, "B{}/S{}", digits(self.births()), digits(self.survivals()))
    }
}

impl fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RuleSet({self})")
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleError {
    #[error("Expected 'b' or 'B' to start the births, got '{got}'")]
    NoBirths { got: char },

    #[error("Expected 's' or 'S' to start the survivals")]
    NoSurvivals,

    #[error("Neighbor counts are in 0..=8, got '{got}'")]
    InvalidCount { got: char },
}

/// Parses rulestrings such as `b3/s23`, `B36/S23` or `b3s23`.
impl FromStr for RuleSet {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        #[derive(Clone, Copy)]
        enum State {
            Birth,
            Survival,
        }

        let mut chars = s.trim().chars();

        match chars.next() {
            Some('b' | 'B') => {}
            got => {
                return Err(RuleError::NoBirths {
                    got: got.unwrap_or(' '),
                });
            }
        }

        let mut state = State::Birth;
        let (mut b, mut s) = (0u16, 0u16);
        let mut seen_survivals = false;

        for c in chars {
            match (c, state) {
                ('/', State::Birth) => {}
                ('s' | 'S', State::Birth) => {
                    state = State::Survival;
                    seen_survivals = true;
                }
                (n, state) => {
                    let n = n
                        .to_digit(10)
                        .filter(|&n| n <= 8)
                        .ok_or(RuleError::InvalidCount { got: n })?;

                    match state {
                        State::Birth => b |= 1 << n,
                        State::Survival => s |= 1 << n,
                    }
                }
            }
        }

        if !seen_survivals {
            return Err(RuleError::NoSurvivals);
        }

        Ok(RuleSet::new(b, s))
    }
}

/// Number of living cells in the Moore neighborhood of `(x, y)`. Cells off the board count as
/// dead.
pub fn living_neighbors(x: CellOffset, y: CellOffset, board: &BitBoard) -> u8 {
    NEIGHBORHOOD
        .iter()
        .filter(|&&(dx, dy)| board.cell_state(x + dx, y + dy))
        .count() as u8
}

/// State of the cell at `(x, y)` in the next generation under [`B3S23`]. Only reads `board`.
pub fn next_state(x: CellOffset, y: CellOffset, board: &BitBoard) -> bool {
    next_state_with(&B3S23, x, y, board)
}

/// Like [`next_state`], under an arbitrary rule.
pub fn next_state_with(rules: &RuleSet, x: CellOffset, y: CellOffset, board: &BitBoard) -> bool {
    rules.next(board.cell_state(x, y), living_neighbors(x, y, board))
}

#[cfg(test)]
mod test {
    use super::B3S23;
    use super::RuleError;
    use super::RuleSet;
    use crate::board::BitBoard;

    #[test]
    fn life_transitions() {
        for n in 0..=8 {
            assert_eq!(B3S23.next(false, n), n == 3, "birth with {n} neighbors");
            assert_eq!(B3S23.next(true, n), n == 2 || n == 3, "survival with {n} neighbors");
        }
    }

    #[test]
    fn parse_rulestrings() {
        assert_eq!("b3/s23".parse::<RuleSet>(), Ok(B3S23));
        assert_eq!("B3/S23".parse::<RuleSet>(), Ok(B3S23));
        assert_eq!("b3s23".parse::<RuleSet>(), Ok(B3S23));
        assert_eq!("B36/S23".parse::<RuleSet>(), Ok(RuleSet::new(0b100_1000, 0b1100)));
        assert_eq!("b/s".parse::<RuleSet>(), Ok(RuleSet::new(0, 0)));
    }

    #[test]
    fn reject_bad_rulestrings() {
        assert_eq!(
            "3/23".parse::<RuleSet>(),
            Err(RuleError::NoBirths { got: '3' })
        );
        assert_eq!("b3".parse::<RuleSet>(), Err(RuleError::NoSurvivals));
        assert_eq!(
            "b9/s23".parse::<RuleSet>(),
            Err(RuleError::InvalidCount { got: '9' })
        );
        assert_eq!(
            "b3/s2x".parse::<RuleSet>(),
            Err(RuleError::InvalidCount { got: 'x' })
        );
    }

    #[test]
    fn display_round_trips() {
        let rule = RuleSet::new(0b100_1000, 0b1100);

        assert_eq!(rule.to_string(), "B36/S23");
        assert_eq!(rule.to_string().parse::<RuleSet>(), Ok(rule));
    }

    #[test]
    fn neighbors_in_the_middle() {
        let board = BitBoard::from_cells(3, 3, [(0, 0), (1, 0), (2, 2), (1, 1)]).unwrap();

        assert_eq!(super::living_neighbors(1, 1, &board), 3);
        assert_eq!(super::living_neighbors(0, 1, &board), 3);
    }

    #[test]
    fn neighbors_do_not_wrap() {
        // every cell of the far column is alive, but (0, y) must not see it
        let cells = (0..4).map(|y| (3, y));
        let board = BitBoard::from_cells(4, 4, cells).unwrap();

        for y in 0..4 {
            assert_eq!(super::living_neighbors(0, y, &board), 0);
        }

        assert_eq!(super::living_neighbors(3, 0, &board), 1);
        assert_eq!(super::living_neighbors(2, 1, &board), 3);
    }

    #[test]
    fn full_neighborhood() {
        let cells = (0..3).flat_map(|x| (0..3).map(move |y| (x, y)));
        let board = BitBoard::from_cells(3, 3, cells).unwrap();

        assert_eq!(super::living_neighbors(1, 1, &board), 8);
        assert!(!super::next_state(1, 1, &board));
        assert!(super::next_state(0, 0, &board));
    }

    #[test]
    fn next_state_is_read_only() {
        let board = BitBoard::from_cells(3, 3, [(0, 1), (1, 1), (2, 1)]).unwrap();
        let before = board.clone();

        assert!(super::next_state(1, 0, &board));
        assert!(!super::next_state(0, 1, &board));
        assert!(super::next_state(1, 1, &board));
        assert_eq!(board, before);
    }
}
