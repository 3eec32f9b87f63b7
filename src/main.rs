use std::{
    error::Error,
    io::{self, Write},
    thread::sleep,
    time::Duration,
};

use chrono::Utc;
use rustello::{
    idx2algebric, style, Difficulty, Disc, GameEvent, GameRecord, HumanPlayer, Player,
    RandomPlayer, RustelloError, Session, SessionState, LICENSE, VERSION_AND_GIT_HASH,
};
use termcolor::{ColorChoice, StandardStream, WriteColor};

fn prompt(msg: &str) -> io::Result<String> {
    print!("{msg}");
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    // we pop the newline
    input.pop();
    Ok(input)
}

fn start_game() -> rustello::Result<GameRecord> {
    let mut s = StandardStream::stdout(ColorChoice::Auto);

    let choice = loop {
        let raw = prompt("Opponent: 1) human  2) random bot  3) easy  4) medium  5) hard: ")?;
        match raw.as_str() {
            "1" | "2" | "3" | "4" | "5" => break raw,
            _ => println!("Please answer with a number between 1 and 5."),
        }
    };

    let mut players: Vec<Box<dyn Player>> = Vec::new();

    let session = if choice == "1" {
        let black = prompt("Black player's name: ")?;
        let white = prompt("White player's name: ")?;
        let mut black = HumanPlayer::new(black);
        black.init_color(Disc::Black);
        let mut white = HumanPlayer::new(white);
        white.init_color(Disc::White);
        players.push(Box::new(black));
        players.push(Box::new(white));
        Session::hotseat(8)?
    } else {
        let name = prompt("Your name: ")?;
        let side = loop {
            match prompt("Play black or white? [b/w] ")?.as_str() {
                "b" | "B" => break Disc::Black,
                "w" | "W" => break Disc::White,
                _ => println!("Please answer `b` or `w`."),
            }
        };
        let mut human = HumanPlayer::new(name);
        human.init_color(side);
        players.push(Box::new(human));

        if choice == "2" {
            let mut bot = RandomPlayer::default();
            bot.init_color(!side);
            players.push(Box::new(bot));
            Session::hotseat(8)?
        } else {
            let difficulty = match choice.as_str() {
                "3" => Difficulty::Easy,
                "4" => Difficulty::Medium,
                _ => Difficulty::Hard,
            };
            Session::solo(8, side, difficulty)?
        }
    };

    run_game(session, players, &mut s)
}

fn run_game(
    mut session: Session,
    players: Vec<Box<dyn Player>>,
    s: &mut StandardStream,
) -> rustello::Result<GameRecord> {
    session.start();
    let mut seen_events = 0;
    let mut err: Option<RustelloError> = None;

    while session.state() == SessionState::InProgress {
        render(&session, s)?;

        if let Some(index) = session.computer_turn()? {
            let (_, difficulty) = session.computer().expect("a computer just played");
            let notation = idx2algebric(index, session.board().size());
            writeln!(s, "Computer ({difficulty}) plays {notation}.")?;
            // let the move sink in before the next render
            sleep(Duration::from_millis(800));
            announce_passes(&session, &mut seen_events, s)?;
            continue;
        }

        let mover = session.turn();
        let player = players
            .iter()
            .find(|player| player.color() == mover)
            .expect("a player controls this side");

        match player.think(&session, s, err.as_ref()) {
            Ok(index) => match session.play(index) {
                Ok(_) => {
                    if !player.is_human() {
                        let notation = idx2algebric(index, session.board().size());
                        writeln!(s, "{} plays {notation}.", player.force_name())?;
                        sleep(Duration::from_millis(800));
                    }
                    err = None;
                    announce_passes(&session, &mut seen_events, s)?;
                }
                Err(e @ RustelloError::IllegalMove { .. }) => err = Some(e),
                Err(e) => return Err(e),
            },
            Err(e @ RustelloError::InvalidAlgebric(_)) => err = Some(e),
            Err(e) => return Err(e),
        }
    }

    render(&session, s)?;
    let outcome = session.outcome().expect("the game just ended");

    s.set_color(&style::EMPHASIS)?;
    match outcome.winner {
        Some(side) => {
            let name = match players.iter().find(|player| player.color() == side) {
                Some(player) => player.force_name().into_owned(),
                None => match session.computer() {
                    Some((_, difficulty)) => format!("Computer ({difficulty})"),
                    None => side.to_string(),
                },
            };
            let (winner_score, loser_score) = match side {
                Disc::White => (outcome.white, outcome.black),
                _ => (outcome.black, outcome.white),
            };
            writeln!(s, "{side} ({name}) wins {winner_score}-{loser_score}!")?;
        }
        None => writeln!(s, "It's a draw, {} all!", outcome.white)?,
    }
    s.reset()?;

    if let Some(started) = session.started_at() {
        let moves = session
            .history()
            .iter()
            .filter(|event| matches!(event, GameEvent::Move { .. }))
            .count();
        let secs = (Utc::now() - started).num_seconds();
        writeln!(s, "{} moves in {}m{:02}s.", moves, secs / 60, secs % 60)?;
    }

    Ok(session.record())
}

fn announce_passes(
    session: &Session,
    seen: &mut usize,
    s: &mut StandardStream,
) -> io::Result<()> {
    for event in &session.history()[*seen..] {
        if let GameEvent::Pass { side, .. } = event {
            writeln!(s, "{side} has no legal move and passes.")?;
        }
    }
    *seen = session.history().len();
    Ok(())
}

/// Renders the board to the stream, with hints on the legal moves of the
/// side to move and the running score below.
fn render(session: &Session, s: &mut StandardStream) -> io::Result<()> {
    let board = session.board();
    let n = board.size();
    let legal = if session.state() == SessionState::InProgress {
        board.legal_moves(board.turn())
    } else {
        Vec::new()
    };

    let rule = "+---".repeat(n as usize) + "+";
    for row in 0..n {
        s.set_color(&style::BOARD_EDGES)?;
        writeln!(s, "{rule}")?;
        s.reset()?;

        for col in 0..n {
            let index = row as usize * n as usize + col as usize;
            s.set_color(&style::BOARD_EDGES)?;
            write!(s, "|")?;
            s.reset()?;
            match board.disc((col, row)) {
                Disc::White => {
                    s.set_color(&style::WHITE_DISC)?;
                    write!(s, " W ")?;
                    s.reset()?;
                }
                Disc::Black => {
                    s.set_color(&style::BLACK_DISC)?;
                    write!(s, " B ")?;
                    s.reset()?;
                }
                Disc::Empty if legal.contains(&index) => {
                    s.set_color(&style::LEGAL_MOVE)?;
                    write!(s, " . ")?;
                    s.reset()?;
                }
                Disc::Empty => write!(s, "   ")?,
            }
        }

        s.set_color(&style::BOARD_EDGES)?;
        write!(s, "|")?;
        s.reset()?;
        writeln!(s, " {}", row + 1)?;
    }
    s.set_color(&style::BOARD_EDGES)?;
    writeln!(s, "{rule}")?;
    s.reset()?;

    write!(s, " ")?;
    for col in 0..n {
        write!(s, " {}  ", (b'a' + col) as char)?;
    }
    writeln!(s)?;

    let (white, black) = board.scores();
    s.set_color(&style::EMPHASIS)?;
    writeln!(s, "Black {black} / White {white}")?;
    s.reset()?;

    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    println!("Welcome, in rustello!\n");
    let help = format!(
        "\
{} {}

COMMANDS:
    game, g             Start a new game
    record, r           Print the last finished game as JSON
    license             Prints the license of the program
    help, h             Prints this message
    quit, q             Quit of the program\
    ",
        env!("CARGO_PKG_NAME"),
        VERSION_AND_GIT_HASH,
    );

    let mut last_record: Option<GameRecord> = None;

    let mut cmd = String::new();
    loop {
        print!("Command (h for help): ");
        io::stdout().flush()?;
        cmd.clear();
        io::stdin().read_line(&mut cmd)?;
        // remove the newline
        cmd.pop();

        match cmd.as_str() {
            "game" | "g" => last_record = Some(start_game()?),
            "record" | "r" => match &last_record {
                Some(record) => println!("{}", serde_json::to_string_pretty(record)?),
                None => println!("No finished game yet, play one first."),
            },
            "license" => println!("{}", LICENSE),
            "help" | "h" => println!("{help}"),
            "quit" | "q" => break,
            unknown => println!(r#"Unknown command {unknown:?}, type "help" for help."#),
        }
        println!();
    }

    Ok(())
}
