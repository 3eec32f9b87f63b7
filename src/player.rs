use std::fmt::Debug;
use std::io::Write;
use std::{borrow::Cow, io};

use rand::seq::IteratorRandom;
use termcolor::WriteColor;

use crate::{algebric2idx, style, Disc, Result, RustelloError, Session};

/// A player of the Othello game, it may be human or a bot. A player only
/// proposes a cell index; the session stays the single authority on
/// legality and turn order.
pub trait Player: Debug {
    /// Return the player's color (black / white), cannot be `Disc::Empty`.
    fn color(&self) -> Disc;

    /// Called when it is the turn of this player, or again when the
    /// previous proposal came back with an error (`err` arg), like an
    /// illegal move. Prompts go to `out`, never straight to stdout.
    fn think(
        &self,
        session: &Session,
        out: &mut dyn WriteColor,
        err: Option<&RustelloError>,
    ) -> Result<usize>;

    /// Return the name of the player.
    fn name(&self) -> Option<Cow<'static, str>>;

    /// Init the player color if the player stores its disc color.
    fn init_color(&mut self, color: Disc);

    /// Return the name of the player and if he has no name, his color.
    fn force_name(&self) -> Cow<'_, str> {
        match self.name() {
            Some(name) => name,
            None => match self.color() {
                Disc::White => "White",
                Disc::Black => "Black",
                Disc::Empty => unreachable!(),
            }
            .into(),
        }
    }

    /// Whether moves come from a keyboard; the front-end uses it to decide
    /// when a thinking pause makes the game easier to follow.
    fn is_human(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone)]
pub struct HumanPlayer {
    color: Disc,
    name: Option<String>,
}

impl HumanPlayer {
    pub fn new(name: impl Into<Option<String>>) -> HumanPlayer {
        let name = name.into().filter(|n| !n.is_empty());

        HumanPlayer {
            color: Disc::Empty,
            name,
        }
    }
}

impl Player for HumanPlayer {
    fn color(&self) -> Disc {
        self.color
    }

    fn think(
        &self,
        session: &Session,
        out: &mut dyn WriteColor,
        err: Option<&RustelloError>,
    ) -> Result<usize> {
        if let Some(err) = err {
            out.set_color(&style::ERROR)?;
            writeln!(out, "{err}")?;
            out.reset()?;
        }

        write!(out, "{}", session.turn())?;
        if let Some(name) = self.name() {
            write!(out, " ({name})")?;
        }
        write!(out, "'s turn: ")?;
        out.flush()?;

        let mut mov = String::new();
        io::stdin().read_line(&mut mov)?;
        // pop the newline char at the end
        mov.pop();

        algebric2idx(&mov, session.board().size())
    }

    fn name(&self) -> Option<Cow<'static, str>> {
        self.name.clone().map(Cow::Owned)
    }

    fn init_color(&mut self, color: Disc) {
        assert_eq!(self.color, Disc::Empty);
        assert_ne!(color, Disc::Empty);
        self.color = color;
    }

    fn is_human(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone)]
pub struct RandomPlayer {
    color: Disc,
}

impl Default for RandomPlayer {
    fn default() -> Self {
        RandomPlayer { color: Disc::Empty }
    }
}

impl Player for RandomPlayer {
    fn color(&self) -> Disc {
        self.color
    }

    fn think(
        &self,
        session: &Session,
        _out: &mut dyn WriteColor,
        err: Option<&RustelloError>,
    ) -> Result<usize> {
        // a random pick is never re-prompted for a correction
        assert!(err.is_none());

        let legal_moves = session.board().legal_moves(self.color);

        let mut rand = rand::thread_rng();

        // it's safe to unwrap, it only returns `None` if the iterator is
        // empty and the session only asks us to move when we can
        Ok(legal_moves.into_iter().choose(&mut rand).unwrap())
    }

    fn name(&self) -> Option<Cow<'static, str>> {
        Some(Cow::Borrowed("Random Bot"))
    }

    fn init_color(&mut self, color: Disc) {
        assert_eq!(self.color, Disc::Empty);
        assert_ne!(color, Disc::Empty);
        self.color = color;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Session;
    use termcolor::Buffer;

    #[test]
    fn random_player_proposes_a_legal_move() {
        let mut session = Session::hotseat(8).unwrap();
        session.start();

        let mut bot = RandomPlayer::default();
        bot.init_color(Disc::Black);

        let mut out = Buffer::no_color();
        for _ in 0..20 {
            let index = bot.think(&session, &mut out, None).unwrap();
            assert!(session.board().is_legal(index));
        }
    }

    #[test]
    fn force_name_falls_back_to_color() {
        let mut human = HumanPlayer::new(None);
        human.init_color(Disc::White);
        assert_eq!(human.force_name(), "White");

        let mut named = HumanPlayer::new("Ada".to_string());
        named.init_color(Disc::Black);
        assert_eq!(named.force_name(), "Ada");

        let mut bot = RandomPlayer::default();
        bot.init_color(Disc::Black);
        assert_eq!(bot.force_name(), "Random Bot");
    }
}
