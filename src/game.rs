use rand::{
    rngs::StdRng,
    SeedableRng,
};
use std::time::Instant;
use tic_tac_toe::{
    Board,
    GameStatus,
    InvalidMoveError,
    Mode,
    Team,
    WinLine,
};
use tracing::{
    debug,
    info,
};

/// The human's team. The human always moves first.
pub const HUMAN_TEAM: Team = Team::X;

/// The computer's team.
pub const ROBOT_TEAM: Team = Team::O;

/// How a finished game ended.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// A team completed a line.
    Winner(Team),

    /// The board filled up without a line.
    Draw,
}

impl Outcome {
    /// Get the outcome for a status, if the game is over.
    pub fn from_status(status: GameStatus) -> Option<Self> {
        match status {
            GameStatus::InProgress => None,
            GameStatus::Won(team) => Some(Self::Winner(team)),
            GameStatus::Draw => Some(Self::Draw),
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Winner(team) if *team == HUMAN_TEAM => write!(f, "human ({team}) wins"),
            Self::Winner(team) => write!(f, "robot ({team}) wins"),
            Self::Draw => write!(f, "draw"),
        }
    }
}

/// Whose turn it is.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TurnState {
    /// Waiting on the human.
    HumanTurn,

    /// Waiting on the computer.
    RobotTurn,

    /// The game is over. Only a reset starts a new one.
    Finished(Outcome),
}

/// An error applying a move to a [`Game`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// The tile cannot be played.
    #[error(transparent)]
    InvalidMove(#[from] InvalidMoveError),

    /// A human move was made on the computer's turn.
    #[error("it is not the human's turn")]
    NotHumanTurn,

    /// A computer move was requested on the human's turn.
    #[error("it is not the robot's turn")]
    NotRobotTurn,

    /// The game is over.
    #[error("the game is over: {0}")]
    GameOver(Outcome),
}

/// A move made by the computer.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RobotMove {
    /// The tile the computer played.
    pub index: u8,

    /// The status after the move.
    pub status: GameStatus,
}

/// A game between a human and the computer.
///
/// The status and turn are always derived from the board.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    mode: Mode,
    rng: StdRng,
}

impl Game {
    /// Make a new [`Game`] with an rng seeded from entropy.
    pub fn new(mode: Mode) -> Self {
        Self::with_rng(mode, StdRng::from_entropy())
    }

    /// Make a new [`Game`] with a seeded rng, so [`Mode::Random`] games can be replayed.
    pub fn with_seed(mode: Mode, seed: u64) -> Self {
        Self::with_rng(mode, StdRng::seed_from_u64(seed))
    }

    fn with_rng(mode: Mode, rng: StdRng) -> Self {
        Self {
            board: Board::new(),
            mode,
            rng,
        }
    }

    /// Get the board.
    pub fn board(&self) -> Board {
        self.board
    }

    /// Get the computer's mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Get the status.
    pub fn status(&self) -> GameStatus {
        self.board.status()
    }

    /// Get whose turn it is.
    pub fn turn_state(&self) -> TurnState {
        match Outcome::from_status(self.status()) {
            Some(outcome) => TurnState::Finished(outcome),
            None if self.board.get_turn() == HUMAN_TEAM => TurnState::HumanTurn,
            None => TurnState::RobotTurn,
        }
    }

    /// Get the line of the winner, if there is one.
    pub fn winning_line(&self) -> Option<WinLine> {
        let winner = self.board.get_winner()?;
        self.board.winning_line(winner)
    }

    /// Play a human move.
    ///
    /// On error, the game is left as it was.
    pub fn apply_human_move(&mut self, index: u8) -> Result<GameStatus, GameError> {
        match self.turn_state() {
            TurnState::HumanTurn => {}
            TurnState::RobotTurn => return Err(GameError::NotHumanTurn),
            TurnState::Finished(outcome) => return Err(GameError::GameOver(outcome)),
        }

        self.board.place(index, HUMAN_TEAM)?;
        debug!(index, team = %HUMAN_TEAM, "human moved");

        Ok(self.finish_move())
    }

    /// Let the computer pick and play a move.
    ///
    /// On error, the game is left as it was.
    pub fn apply_robot_move(&mut self) -> Result<RobotMove, GameError> {
        match self.turn_state() {
            TurnState::RobotTurn => {}
            TurnState::HumanTurn => return Err(GameError::NotRobotTurn),
            TurnState::Finished(outcome) => return Err(GameError::GameOver(outcome)),
        }

        let start = Instant::now();
        let index = tic_tac_toe::select_move(self.board, ROBOT_TEAM, self.mode, &mut self.rng)
            .expect("an in-progress board has an empty tile");
        self.board.place(index, ROBOT_TEAM)?;
        debug!(
            index,
            team = %ROBOT_TEAM,
            mode = %self.mode,
            elapsed = ?start.elapsed(),
            "robot moved"
        );

        Ok(RobotMove {
            index,
            status: self.finish_move(),
        })
    }

    fn finish_move(&self) -> GameStatus {
        let status = self.status();
        if let Some(outcome) = Outcome::from_status(status) {
            info!(%outcome, "game finished");
        }
        status
    }

    /// Change the computer's mode.
    ///
    /// This starts a new game.
    pub fn set_mode(&mut self, mode: Mode) {
        info!(%mode, "changing mode");
        self.mode = mode;
        self.reset();
    }

    /// Switch to the other mode, starting a new game.
    ///
    /// # Returns
    /// Returns the new mode.
    pub fn toggle_mode(&mut self) -> Mode {
        self.set_mode(self.mode.toggle());
        self.mode
    }

    /// Clear the board. The human moves first.
    pub fn reset(&mut self) {
        self.board.reset();
        info!("started a new game");
    }
}
