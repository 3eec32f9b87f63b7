use std::{
    error::Error,
    fmt::{self, Display},
    io,
    ops::Not,
};

use serde::{Deserialize, Serialize};

pub mod board;
pub mod eval;
pub mod player;
pub mod search;
pub mod session;
pub mod style;

pub use board::Board;
pub use eval::evaluate;
pub use player::{HumanPlayer, Player, RandomPlayer};
pub use search::{select_move_alpha_beta, select_move_greedy};
pub use session::{Difficulty, GameEvent, GameOutcome, GameRecord, Session, SessionState};

pub const VERSION_AND_GIT_HASH: &str = env!("VERSION_AND_GIT_HASH");

pub const LICENSE: &str = include_str!("../LICENSE");

pub type Result<T, E = RustelloError> = std::result::Result<T, E>;

#[derive(Debug)]
pub enum RustelloError {
    InvalidSize(u8),
    InvalidDepth(u8),
    InvalidAlgebric(String),
    IllegalMove { row: u8, col: u8 },
    NotInProgress,
    Io(io::Error),
}

impl Error for RustelloError {}

impl Display for RustelloError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RustelloError::InvalidSize(size) => {
                write!(f, "invalid board size {size}, it must be even and at least 2")
            }
            RustelloError::InvalidDepth(depth) => {
                write!(f, "invalid search depth {depth}, it must be at least 1")
            }
            RustelloError::InvalidAlgebric(notation) => {
                write!(f, "invalid algebric notation {notation:?}, valid e.g: `a5`")
            }
            RustelloError::IllegalMove { row, col } => write!(
                f,
                "illegal move (row: {row}, col: {col}), you can't put your disc here"
            ),
            RustelloError::NotInProgress => write!(f, "the game is not in progress"),
            RustelloError::Io(err) => write!(f, "io error: {err}"),
        }
    }
}

impl From<io::Error> for RustelloError {
    fn from(err: io::Error) -> RustelloError {
        RustelloError::Io(err)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Disc {
    White,
    Black,
    Empty,
}

impl Not for Disc {
    type Output = Self;

    fn not(self) -> Self::Output {
        match self {
            Disc::White => Disc::Black,
            Disc::Black => Disc::White,
            // it shouldn't be called if `Disc` is `Empty` but if it did, don't
            // change because there is no opposite of `Empty`
            Disc::Empty => Disc::Empty,
        }
    }
}

impl Display for Disc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Disc::White => write!(f, "White"),
            Disc::Black => write!(f, "Black"),
            Disc::Empty => write!(f, "Empty"),
        }
    }
}

/// Converts an algebric notation like `a1`, `g8`, `b7` to a cell index on a
/// `size × size` board. The column letter is lowercase, rows count from 1.
pub fn algebric2idx(pos: &str, size: u8) -> Result<usize> {
    let invalid = || RustelloError::InvalidAlgebric(pos.to_string());

    let mut chars = pos.chars();
    let col_char = chars.next().ok_or_else(invalid)?;
    if !col_char.is_ascii_lowercase() {
        return Err(invalid());
    }
    let col = col_char as u8 - b'a';
    let row: u8 = chars.as_str().parse().map_err(|_| invalid())?;

    if col >= size || row < 1 || row > size {
        return Err(invalid());
    }

    Ok((row as usize - 1) * size as usize + col as usize)
}

/// The inverse of [`algebric2idx`].
pub fn idx2algebric(index: usize, size: u8) -> String {
    let col = (index % size as usize) as u8;
    let row = index / size as usize;
    format!("{}{}", (b'a' + col) as char, row + 1)
}
