use std::fmt::{self, Display};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    search::{select_move_alpha_beta, select_move_greedy},
    Board, Disc, Result, RustelloError,
};

/// How hard the computer side thinks: `Easy` only looks one move ahead,
/// the other two run the minimax search 3 and 5 plies deep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Ask the search engine for a move on `board`, for the side to move.
    /// `None` when that side has no legal move.
    pub fn choose(self, board: &Board) -> Result<Option<usize>> {
        match self {
            Difficulty::Easy => Ok(select_move_greedy(board)),
            Difficulty::Medium => select_move_alpha_beta(board, 3),
            Difficulty::Hard => select_move_alpha_beta(board, 5),
        }
    }
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Setup,
    InProgress,
    Ended,
}

/// A move or pass as it happened, timestamped for the game record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Move {
        side: Disc,
        index: usize,
        flipped: Vec<usize>,
        at: DateTime<Utc>,
    },
    Pass {
        side: Disc,
        at: DateTime<Utc>,
    },
}

/// Final result of a finished game. `winner` is `None` on a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub winner: Option<Disc>,
    pub white: u32,
    pub black: u32,
}

/// Serializable summary of a session, what the CLI `record` command prints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecord {
    pub size: u8,
    pub computer: Option<(Disc, Difficulty)>,
    pub started_at: Option<DateTime<Utc>>,
    pub events: Vec<GameEvent>,
    pub outcome: Option<GameOutcome>,
}

/// One owned game of Othello. The session is the authority on turn
/// alternation, automatic passing and end-of-game detection; it never
/// renders anything, so it can be driven headless or from any front-end.
///
/// State machine: `Setup → InProgress → Ended`, and back to `Setup` only
/// through [`Session::reset`].
#[derive(Debug, Clone)]
pub struct Session {
    state: SessionState,
    board: Board,
    computer: Option<(Disc, Difficulty)>,
    history: Vec<GameEvent>,
    started_at: Option<DateTime<Utc>>,
    outcome: Option<GameOutcome>,
}

impl Session {
    /// A game against the computer: the human holds `human`, the engine
    /// plays the other side at the given difficulty.
    pub fn solo(size: u8, human: Disc, difficulty: Difficulty) -> Result<Session> {
        assert_ne!(human, Disc::Empty);
        Ok(Session {
            state: SessionState::Setup,
            board: Board::new(size)?,
            computer: Some((!human, difficulty)),
            history: Vec::new(),
            started_at: None,
            outcome: None,
        })
    }

    /// Two humans sharing a keyboard.
    pub fn hotseat(size: u8) -> Result<Session> {
        Ok(Session {
            state: SessionState::Setup,
            board: Board::new(size)?,
            computer: None,
            history: Vec::new(),
            started_at: None,
            outcome: None,
        })
    }

    /// Resume play from a position a host carried around. The session
    /// starts `InProgress` and settles immediately, so it may already be
    /// `Ended` when the position has no playable future.
    pub fn from_board(board: Board, computer: Option<(Disc, Difficulty)>) -> Session {
        let mut session = Session {
            state: SessionState::InProgress,
            board,
            computer,
            history: Vec::new(),
            started_at: Some(Utc::now()),
            outcome: None,
        };
        session.settle();
        session
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[inline]
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The side to move.
    #[inline]
    #[must_use]
    pub fn turn(&self) -> Disc {
        self.board.turn()
    }

    /// The computer-assigned side and its difficulty, `None` in hotseat
    /// games.
    #[inline]
    #[must_use]
    pub fn computer(&self) -> Option<(Disc, Difficulty)> {
        self.computer
    }

    #[inline]
    #[must_use]
    pub fn history(&self) -> &[GameEvent] {
        &self.history
    }

    /// `Some` once the session has ended.
    #[inline]
    #[must_use]
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    #[inline]
    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Leave `Setup` with a fresh initial board.
    pub fn start(&mut self) {
        self.board = Board::new(self.board.size()).expect("size was validated at construction");
        self.history.clear();
        self.outcome = None;
        self.started_at = Some(Utc::now());
        self.state = SessionState::InProgress;
        // a 2×2 game is over before it begins, settle handles that
        self.settle();
    }

    /// Play the side to move at `index` and record the event. Returns the
    /// flipped cells. Unlike [`Board::apply_move`], a bad index here is an
    /// error, front-ends rely on it to re-prompt.
    pub fn play(&mut self, index: usize) -> Result<Vec<usize>> {
        if self.state != SessionState::InProgress {
            return Err(RustelloError::NotInProgress);
        }
        if !self.board.is_legal(index) {
            let n = self.board.size() as usize;
            return Err(RustelloError::IllegalMove {
                row: (index / n) as u8,
                col: (index % n) as u8,
            });
        }

        let side = self.board.turn();
        let flipped = self.board.outflanks(index);
        self.board = self.board.apply_move(index);
        self.history.push(GameEvent::Move {
            side,
            index,
            flipped: flipped.clone(),
            at: Utc::now(),
        });
        self.settle();
        Ok(flipped)
    }

    /// Whether the next action belongs to the engine.
    #[must_use]
    pub fn is_computer_turn(&self) -> bool {
        self.state == SessionState::InProgress
            && self
                .computer
                .map_or(false, |(side, _)| side == self.board.turn())
    }

    /// Let the engine take its turn. Returns the index it played, or
    /// `Ok(None)` when it is not the computer's move, so hosts may call
    /// this unconditionally on every iteration.
    pub fn computer_turn(&mut self) -> Result<Option<usize>> {
        if self.state != SessionState::InProgress {
            return Err(RustelloError::NotInProgress);
        }
        let Some((side, difficulty)) = self.computer else {
            return Ok(None);
        };
        if self.board.turn() != side {
            return Ok(None);
        }

        let index = difficulty
            .choose(&self.board)?
            // settle() guarantees the side to move has a legal move while
            // the game is in progress
            .expect("side to move has a legal move");
        self.play(index)?;
        Ok(Some(index))
    }

    /// Back to `Setup`, dropping the previous game.
    pub fn reset(&mut self) {
        self.board = Board::new(self.board.size()).expect("size was validated at construction");
        self.history.clear();
        self.outcome = None;
        self.started_at = None;
        self.state = SessionState::Setup;
    }

    #[must_use]
    pub fn record(&self) -> GameRecord {
        GameRecord {
            size: self.board.size(),
            computer: self.computer,
            started_at: self.started_at,
            events: self.history.clone(),
            outcome: self.outcome,
        }
    }

    // The turn/pass/termination machine, run after every board change.
    // Forced ends and double passes finish the game; a single stuck side
    // passes automatically and stays recorded in the history.
    fn settle(&mut self) {
        loop {
            if self.board.is_forced_end() {
                self.finish();
                return;
            }
            let side = self.board.turn();
            if self.board.has_any_legal_move(side) {
                return;
            }
            if self.board.has_any_legal_move(!side) {
                self.board = self.board.apply_pass();
                self.history.push(GameEvent::Pass {
                    side,
                    at: Utc::now(),
                });
            } else {
                // neither side can move: over, even with empty cells left
                self.finish();
                return;
            }
        }
    }

    fn finish(&mut self) {
        let (white, black) = self.board.scores();
        self.outcome = Some(GameOutcome {
            winner: self.board.winner_by_score(),
            white,
            black,
        });
        self.state = SessionState::Ended;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(turn: Disc, discs: &[(usize, Disc)]) -> Board {
        let mut cells = vec![Disc::Empty; 64];
        for &(index, disc) in discs {
            cells[index] = disc;
        }
        Board::from_cells(8, turn, cells).unwrap()
    }

    #[test]
    fn starts_in_setup() {
        let session = Session::hotseat(8).unwrap();
        assert_eq!(session.state(), SessionState::Setup);
        assert!(session.history().is_empty());
        assert!(session.outcome().is_none());
    }

    #[test]
    fn play_requires_a_running_game() {
        let mut session = Session::hotseat(8).unwrap();
        assert!(matches!(
            session.play(19),
            Err(RustelloError::NotInProgress)
        ));
        session.start();
        assert_eq!(session.state(), SessionState::InProgress);
        assert!(session.play(19).is_ok());
    }

    #[test]
    fn illegal_play_reports_and_changes_nothing() {
        let mut session = Session::hotseat(8).unwrap();
        session.start();
        let before = session.board().clone();
        let err = session.play(0).unwrap_err();
        assert!(matches!(err, RustelloError::IllegalMove { row: 0, col: 0 }));
        assert_eq!(session.board(), &before);
        assert!(session.history().is_empty());
    }

    #[test]
    fn play_records_the_move() {
        let mut session = Session::hotseat(8).unwrap();
        session.start();
        let flipped = session.play(19).unwrap();
        assert_eq!(flipped, vec![27]);
        assert_eq!(session.turn(), Disc::White);
        assert!(matches!(
            session.history(),
            [GameEvent::Move { side: Disc::Black, index: 19, .. }]
        ));
    }

    #[test]
    fn stuck_side_passes_automatically() {
        // after black plays c1, white has no reply and must pass, black
        // continues right away
        let board = board_with(
            Disc::Black,
            &[(0, Disc::Black), (1, Disc::White), (8, Disc::White)],
        );
        let mut session = Session::from_board(board, None);
        assert_eq!(session.state(), SessionState::InProgress);
        session.play(2).unwrap();
        assert_eq!(session.state(), SessionState::InProgress);
        assert_eq!(session.turn(), Disc::Black);
        assert!(session
            .history()
            .iter()
            .any(|event| matches!(event, GameEvent::Pass { side: Disc::White, .. })));
    }

    #[test]
    fn double_pass_ends_the_game() {
        // two frozen camps: black a1..c1 plus a2, white f1..h1; empty cells
        // remain but neither side has a single legal move
        let board = board_with(
            Disc::Black,
            &[
                (0, Disc::Black),
                (1, Disc::Black),
                (2, Disc::Black),
                (8, Disc::Black),
                (5, Disc::White),
                (6, Disc::White),
                (7, Disc::White),
            ],
        );
        assert!(!board.is_forced_end());
        assert!(!board.has_any_legal_move(Disc::Black));
        assert!(!board.has_any_legal_move(Disc::White));

        let session = Session::from_board(board, None);
        assert_eq!(session.state(), SessionState::Ended);
        let outcome = session.outcome().unwrap();
        assert_eq!(outcome.winner, Some(Disc::Black));
        assert_eq!((outcome.white, outcome.black), (3, 4));
    }

    #[test]
    fn wipeout_ends_the_game() {
        // black's only move devours white's last disc
        let board = board_with(Disc::Black, &[(0, Disc::Black), (1, Disc::White)]);
        let mut session = Session::from_board(board, None);
        session.play(2).unwrap();
        assert_eq!(session.state(), SessionState::Ended);
        assert_eq!(session.outcome().unwrap().winner, Some(Disc::Black));
    }

    #[test]
    fn full_board_ends_the_game() {
        let mut cells = vec![Disc::White; 64];
        for cell in cells.iter_mut().take(20) {
            *cell = Disc::Black;
        }
        let board = Board::from_cells(8, Disc::Black, cells).unwrap();
        let session = Session::from_board(board, None);
        assert_eq!(session.state(), SessionState::Ended);
        assert_eq!(session.outcome().unwrap().winner, Some(Disc::White));
    }

    #[test]
    fn computer_moves_only_on_its_turn() {
        // human is white, so the engine owns the opening move
        let mut session = Session::solo(8, Disc::White, Difficulty::Easy).unwrap();
        session.start();
        assert!(session.is_computer_turn());

        let played = session.computer_turn().unwrap();
        assert!(played.is_some());
        assert_eq!(session.turn(), Disc::White);
        assert!(!session.is_computer_turn());
        // not white's engine, nothing happens
        assert_eq!(session.computer_turn().unwrap(), None);
    }

    #[test]
    fn hotseat_has_no_computer() {
        let mut session = Session::hotseat(8).unwrap();
        session.start();
        assert!(!session.is_computer_turn());
        assert_eq!(session.computer_turn().unwrap(), None);
    }

    #[test]
    fn reset_goes_back_to_setup() {
        let mut session = Session::hotseat(8).unwrap();
        session.start();
        session.play(19).unwrap();
        session.reset();
        assert_eq!(session.state(), SessionState::Setup);
        assert!(session.history().is_empty());
        assert_eq!(session.board().scores(), (2, 2));
    }

    #[test]
    fn record_serializes() {
        let mut session = Session::solo(8, Disc::Black, Difficulty::Medium).unwrap();
        session.start();
        session.play(19).unwrap();
        session.computer_turn().unwrap();

        let json = serde_json::to_string(&session.record()).unwrap();
        let record: GameRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record.size, 8);
        assert_eq!(record.computer, Some((Disc::White, Difficulty::Medium)));
        assert_eq!(record.events.len(), session.history().len());
    }
}
