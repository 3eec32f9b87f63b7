use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::{Disc, Result, RustelloError};

/// The 8 compass directions a capture run can extend in.
const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// An immutable snapshot of an Othello position: the grid, its size and the
/// side to move.
///
/// Applying a move or a pass never mutates a board, it produces a brand-new
/// value. Search can explore hypothetical futures freely while the host
/// keeps the live position untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: u8,
    turn: Disc,
    cells: Box<[Disc]>,
}

impl Board {
    /// Create a `size × size` board with the standard starting cross in the
    /// center and Black to move. `size` must be even and at least 2,
    /// otherwise the centered 2×2 cross doesn't exist.
    pub fn new(size: u8) -> Result<Board> {
        if size < 2 || size % 2 != 0 {
            return Err(RustelloError::InvalidSize(size));
        }

        let n = size as usize;
        let mut cells = vec![Disc::Empty; n * n];
        let h = n / 2;
        cells[(h - 1) * n + (h - 1)] = Disc::White;
        cells[(h - 1) * n + h] = Disc::Black;
        cells[h * n + (h - 1)] = Disc::Black;
        cells[h * n + h] = Disc::White;

        Ok(Board {
            size,
            turn: Disc::Black,
            cells: cells.into_boxed_slice(),
        })
    }

    /// The standard 8×8 board.
    pub fn standard() -> Board {
        Board::new(8).expect("8 is even and at least 2")
    }

    /// Rebuild a board from cells a host carried around, for example to
    /// resume a position. `turn` is the side to move.
    pub fn from_cells(size: u8, turn: Disc, cells: Vec<Disc>) -> Result<Board> {
        assert_ne!(turn, Disc::Empty);
        if size < 2 || size % 2 != 0 || cells.len() != (size as usize).pow(2) {
            return Err(RustelloError::InvalidSize(size));
        }
        Ok(Board {
            size,
            turn,
            cells: cells.into_boxed_slice(),
        })
    }

    #[inline]
    #[must_use]
    pub fn size(&self) -> u8 {
        self.size
    }

    /// The side to move, never `Disc::Empty`.
    #[inline]
    #[must_use]
    pub fn turn(&self) -> Disc {
        self.turn
    }

    /// All cells in row-major order, index = `row * size + col`.
    #[inline]
    #[must_use]
    pub fn cells(&self) -> &[Disc] {
        &self.cells
    }

    /// Get the disc located at those X and Y coordinates, check if the
    /// coordinates are in bounds.
    #[inline]
    #[must_use]
    pub fn disc(&self, (col, row): (u8, u8)) -> Disc {
        assert!(col < self.size);
        assert!(row < self.size);
        // UNSAFE: we checked that they are in bounds
        unsafe { self.disc_unchecked(col, row) }
    }

    /// Get the disc at those X and Y coordinates, don't check if they are in
    /// bounds or not.
    ///
    /// # Safety
    ///
    /// If either `col` or `row` are greater than the board size, it will get
    /// the wrong disc or read out of bounds. It is the responsability of the
    /// caller to check that the coordinates are valid.
    #[inline]
    #[must_use]
    pub unsafe fn disc_unchecked(&self, col: u8, row: u8) -> Disc {
        *self
            .cells
            .get_unchecked(row as usize * self.size as usize + col as usize)
    }

    /// Returns the scores of the current board, in the tuple, white's score
    /// is first, and black's score is second.
    pub fn scores(&self) -> (u32, u32) {
        let mut white = 0;
        let mut black = 0;
        for &disc in self.cells.iter() {
            match disc {
                Disc::White => white += 1,
                Disc::Black => black += 1,
                Disc::Empty => {}
            }
        }
        (white, black)
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|&&d| d == Disc::Empty).count()
    }

    /// Whether the side to move may place a disc at `index`: the cell is
    /// empty and at least one direction holds a run of opponent discs
    /// terminated by an own disc. Out-of-range indexes are simply not legal.
    pub fn is_legal(&self, index: usize) -> bool {
        self.is_legal_for(self.turn, index)
    }

    fn is_legal_for(&self, side: Disc, index: usize) -> bool {
        let n = self.size as i32;
        if index >= self.cells.len() || self.cells[index] != Disc::Empty {
            return false;
        }

        let x = (index as i32) % n;
        let y = (index as i32) / n;

        for (dx, dy) in DIRECTIONS {
            let mut nx = x + dx;
            let mut ny = y + dy;
            // whether a disc of the other color was seen in this direction
            let mut captured = false;

            while (0..n).contains(&nx) && (0..n).contains(&ny) {
                match self.cells[(ny * n + nx) as usize] {
                    Disc::Empty => break,
                    disc if disc == side => {
                        if captured {
                            return true;
                        }
                        break;
                    }
                    _ => captured = true,
                }
                nx += dx;
                ny += dy;
            }
        }

        false
    }

    /// Every opponent disc the side to move would outflank by playing at
    /// `index`, across all qualifying directions. The move cell itself and
    /// the terminating own discs are not included. Empty when the move is
    /// illegal.
    pub fn outflanks(&self, index: usize) -> Vec<usize> {
        let mut flipped = Vec::new();
        let n = self.size as i32;
        if index >= self.cells.len() || self.cells[index] != Disc::Empty {
            return flipped;
        }

        let x = (index as i32) % n;
        let y = (index as i32) / n;

        for (dx, dy) in DIRECTIONS {
            let mut nx = x + dx;
            let mut ny = y + dy;
            // opponent discs of this direction, flipped only if the run is
            // closed by an own disc before a gap or the edge
            let mut run = Vec::new();

            while (0..n).contains(&nx) && (0..n).contains(&ny) {
                let n_idx = (ny * n + nx) as usize;
                match self.cells[n_idx] {
                    Disc::Empty => break,
                    disc if disc == self.turn => {
                        flipped.extend_from_slice(&run);
                        break;
                    }
                    _ => run.push(n_idx),
                }
                nx += dx;
                ny += dy;
            }
        }

        flipped
    }

    /// Every legal move for `side`, in ascending cell-index order.
    pub fn legal_moves(&self, side: Disc) -> Vec<usize> {
        (0..self.cells.len())
            .filter(|&index| self.is_legal_for(side, index))
            .collect()
    }

    pub fn has_any_legal_move(&self, side: Disc) -> bool {
        (0..self.cells.len()).any(|index| self.is_legal_for(side, index))
    }

    /// Place the side to move's disc at `index`, flip every outflanked run
    /// and hand the turn over. An illegal `index` is a no-op: the returned
    /// board equals `self` in every field, which is how callers detect
    /// rejected input. Use [`Board::is_legal`] as the pre-check.
    #[must_use]
    pub fn apply_move(&self, index: usize) -> Board {
        let flipped = self.outflanks(index);
        if flipped.is_empty() {
            return self.clone();
        }

        let mut cells = self.cells.clone();
        cells[index] = self.turn;
        for idx in flipped {
            cells[idx] = self.turn;
        }

        Board {
            size: self.size,
            turn: !self.turn,
            cells,
        }
    }

    /// Hand the turn over without placing a disc. Callers must only pass
    /// when the side to move has no legal move.
    #[must_use]
    pub fn apply_pass(&self) -> Board {
        Board {
            size: self.size,
            turn: !self.turn,
            cells: self.cells.clone(),
        }
    }

    /// Termination independent of move availability: the grid is full, or
    /// one side has been wiped off the board.
    pub fn is_forced_end(&self) -> bool {
        let (white, black) = self.scores();
        white == 0 || black == 0 || self.empty_count() == 0
    }

    /// Strict disc-count comparison, `None` on a draw.
    pub fn winner_by_score(&self) -> Option<Disc> {
        let (white, black) = self.scores();
        match white.cmp(&black) {
            Ordering::Greater => Some(Disc::White),
            Ordering::Less => Some(Disc::Black),
            Ordering::Equal => None,
        }
    }
}

impl Default for Board {
    #[inline]
    fn default() -> Self {
        Board::standard()
    }
}
