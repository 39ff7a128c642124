//! Tic-tac-toe rules and a minimax opponent.

mod board;
mod selector;
mod team;

pub use self::{
    board::{
        Board,
        ChildrenIter,
        GameStatus,
        InvalidBoardStrError,
        InvalidMoveError,
        WinLine,
        WinType,
        WIN_LINES,
    },
    selector::{
        random_move,
        select_move,
        InvalidModeError,
        Mode,
    },
    team::{
        InvalidCharError,
        Team,
    },
};

/// The # of tic-tac-toe tiles
pub const NUM_TILES: u8 = 9;

/// The score of a win on the ply right after the searched move.
///
/// Each ply deeper costs 1 point, so faster wins and slower losses score better.
pub const WIN_SCORE: i8 = 10;

/// Run minimax on a board.
///
/// `turn` is the team to move, `maximizer` is the team the score is for.
/// `depth` is the number of plies below the move being evaluated.
///
/// # Returns
/// Returns `WIN_SCORE - depth` if `maximizer` won,
/// `depth - WIN_SCORE` if its opponent won,
/// and 0 for a draw.
pub fn minimax(board: Board, turn: Team, maximizer: Team, depth: i8) -> i8 {
    if board.has_won(maximizer) {
        return WIN_SCORE - depth;
    }

    if board.has_won(maximizer.inverse()) {
        return depth - WIN_SCORE;
    }

    if board.is_full() {
        return 0;
    }

    let scores = board
        .iter_children(turn)
        .map(|(_index, child)| minimax(child, turn.inverse(), maximizer, depth + 1));

    let score = if turn == maximizer {
        scores.max()
    } else {
        scores.min()
    };

    // A board that is not full has at least 1 child.
    score.unwrap_or(0)
}

/// Find the best move for `team` on a board.
///
/// The whole game tree is searched.
/// Ties go to the lowest tile index.
///
/// # Returns
/// Returns a tuple. The first element is the move. The second is the score.
/// Returns `None` if the game is already over.
pub fn best_move(board: Board, team: Team) -> Option<(u8, i8)> {
    if board.status().is_finished() {
        return None;
    }

    let mut best_score = i8::MIN;
    let mut best_index = None;
    for (index, child) in board.iter_children(team) {
        let score = minimax(child, team.inverse(), team, 0);
        if score > best_score {
            best_score = score;
            best_index = Some(index);
        }
    }

    best_index.map(|index| (index, best_score))
}
