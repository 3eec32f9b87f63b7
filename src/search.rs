use crate::{evaluate, Board, Disc, Result, RustelloError};

/// Pick the legal move whose immediate successor evaluates best for the
/// side to move, one ply deep. Ties go to the lowest cell index, so the
/// choice is reproducible. `None` when the side to move has no legal move.
pub fn select_move_greedy(board: &Board) -> Option<usize> {
    let side = board.turn();
    let mut best: Option<(usize, i32)> = None;

    for index in board.legal_moves(side) {
        let score = evaluate(&board.apply_move(index), side);
        // strict improvement only, equal scores keep the earlier index
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((index, score));
        }
    }

    best.map(|(index, _)| index)
}

/// Minimax over the legal-move tree to exactly `depth` plies, with
/// alpha-beta pruning, maximizing at the side to move's turns and
/// minimizing at the opponent's. A node whose side to move is stuck
/// continues as a forced pass without consuming depth, mirroring real play.
/// Ties at the root go to the lowest cell index. `None` when the side to
/// move has no legal move; fails with `InvalidDepth` when `depth < 1`.
pub fn select_move_alpha_beta(board: &Board, depth: u8) -> Result<Option<usize>> {
    if depth < 1 {
        return Err(RustelloError::InvalidDepth(depth));
    }

    let root = board.turn();
    let mut best: Option<(usize, i32)> = None;
    let mut alpha = i32::MIN;

    for index in board.legal_moves(root) {
        let score = alpha_beta(&board.apply_move(index), root, depth - 1, alpha, i32::MAX);
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((index, score));
        }
        alpha = alpha.max(score);
    }

    Ok(best.map(|(index, _)| index))
}

fn alpha_beta(board: &Board, root: Disc, depth: u8, mut alpha: i32, mut beta: i32) -> i32 {
    if depth == 0 || board.is_forced_end() {
        return evaluate(board, root);
    }

    let side = board.turn();
    let moves = board.legal_moves(side);

    if moves.is_empty() {
        if !board.has_any_legal_move(!side) {
            // neither side can move, the game ends right here
            return evaluate(board, root);
        }
        // forced pass, the depth budget carries over to the opponent
        return alpha_beta(&board.apply_pass(), root, depth, alpha, beta);
    }

    if side == root {
        let mut best = i32::MIN;
        for index in moves {
            let score = alpha_beta(&board.apply_move(index), root, depth - 1, alpha, beta);
            best = best.max(score);
            alpha = alpha.max(score);
            if alpha >= beta {
                break;
            }
        }
        best
    } else {
        let mut best = i32::MAX;
        for index in moves {
            let score = alpha_beta(&board.apply_move(index), root, depth - 1, alpha, beta);
            best = best.min(score);
            beta = beta.min(score);
            if alpha >= beta {
                break;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Board;

    fn board_with(turn: Disc, discs: &[(usize, Disc)]) -> Board {
        let mut cells = vec![Disc::Empty; 64];
        for &(index, disc) in discs {
            cells[index] = disc;
        }
        Board::from_cells(8, turn, cells).unwrap()
    }

    #[test]
    fn greedy_is_deterministic() {
        let board = Board::standard();
        let first = select_move_greedy(&board);
        for _ in 0..5 {
            assert_eq!(select_move_greedy(&board), first);
        }
    }

    #[test]
    fn greedy_breaks_ties_by_lowest_index() {
        // the opening is symmetric, all four moves evaluate alike, so the
        // lowest index must win
        let board = Board::standard();
        assert_eq!(select_move_greedy(&board), Some(19));
    }

    #[test]
    fn greedy_picks_a_legal_move() {
        let mut board = Board::standard();
        for _ in 0..10 {
            let Some(index) = select_move_greedy(&board) else {
                break;
            };
            assert!(board.is_legal(index));
            board = board.apply_move(index);
        }
    }

    #[test]
    fn greedy_returns_none_when_stuck() {
        let board = board_with(
            Disc::Black,
            &[
                (0, Disc::Black),
                (7, Disc::Black),
                (56, Disc::Black),
                (63, Disc::White),
            ],
        );
        assert!(!board.has_any_legal_move(Disc::Black));
        assert_eq!(select_move_greedy(&board), None);
    }

    #[test]
    fn alpha_beta_rejects_zero_depth() {
        let board = Board::standard();
        assert!(matches!(
            select_move_alpha_beta(&board, 0),
            Err(RustelloError::InvalidDepth(0))
        ));
    }

    #[test]
    fn alpha_beta_returns_none_when_stuck() {
        let board = board_with(
            Disc::Black,
            &[
                (0, Disc::Black),
                (7, Disc::Black),
                (56, Disc::Black),
                (63, Disc::White),
            ],
        );
        assert_eq!(select_move_alpha_beta(&board, 3).unwrap(), None);
    }

    #[test]
    fn depth_one_reduces_to_greedy() {
        let mut board = Board::standard();
        for _ in 0..12 {
            let greedy = select_move_greedy(&board);
            assert_eq!(select_move_alpha_beta(&board, 1).unwrap(), greedy);
            let Some(index) = greedy else { break };
            board = board.apply_move(index);
        }
    }

    #[test]
    fn alpha_beta_is_deterministic() {
        let board = Board::standard().apply_move(19);
        let first = select_move_alpha_beta(&board, 4).unwrap();
        assert_eq!(select_move_alpha_beta(&board, 4).unwrap(), first);
    }

    #[test]
    fn alpha_beta_picks_a_legal_move() {
        let mut board = Board::standard();
        for depth in 1..=4 {
            let index = select_move_alpha_beta(&board, depth).unwrap().unwrap();
            assert!(board.is_legal(index));
            board = board.apply_move(index);
        }
    }

    #[test]
    fn search_survives_a_forced_pass() {
        // after black plays c1 white is stuck and must pass, black then
        // continues from a3; deep search has to walk through that pass
        let board = board_with(
            Disc::Black,
            &[(0, Disc::Black), (1, Disc::White), (8, Disc::White)],
        );
        assert!(board.has_any_legal_move(Disc::Black));
        let index = select_move_alpha_beta(&board, 3).unwrap().unwrap();
        assert!(board.is_legal(index));
    }

    #[test]
    fn search_does_not_mutate_the_board() {
        let board = Board::standard();
        let copy = board.clone();
        let _ = select_move_greedy(&board);
        let _ = select_move_alpha_beta(&board, 3).unwrap();
        assert_eq!(board, copy);
    }
}
