use crate::{
    config::Config,
    game::{
        Game,
        GameError,
        RobotMove,
        TurnState,
    },
};
use parking_lot::Mutex;
use std::{
    collections::HashMap,
    sync::{
        atomic::{
            AtomicU64,
            Ordering,
        },
        Arc,
    },
};
use tic_tac_toe::{
    Board,
    GameStatus,
    Mode,
    WinLine,
};
use tracing::info;

/// A game that can be shared between threads.
pub type ShareGame = Arc<Mutex<Game>>;

/// A handle to a game in a [`GameRegistry`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GameHandle(u64);

impl GameHandle {
    /// Get the raw id.
    pub fn id(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for GameHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An error using a [`GameRegistry`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// The handle does not refer to a live game.
    #[error("game {0} does not exist")]
    UnknownGame(GameHandle),

    /// The game rejected the request.
    #[error(transparent)]
    Game(#[from] GameError),
}

/// The running games, looked up by [`GameHandle`].
///
/// Every game sits behind its own lock,
/// so requests for one game are serialized while other games proceed.
#[derive(Debug)]
pub struct GameRegistry {
    games: Mutex<HashMap<GameHandle, ShareGame>>,
    next_id: AtomicU64,

    default_mode: Mode,
    seed: Option<u64>,
}

impl GameRegistry {
    /// Make a new [`GameRegistry`].
    pub fn new(default_mode: Mode) -> Self {
        Self {
            games: Default::default(),
            next_id: AtomicU64::new(0),

            default_mode,
            seed: None,
        }
    }

    /// Make a new [`GameRegistry`] from a [`Config`].
    ///
    /// If the config has a seed, each game gets its own rng seeded from it and the game id.
    pub fn from_config(config: &Config) -> Self {
        Self {
            seed: config.seed,
            ..Self::new(config.mode)
        }
    }

    /// Get the mode new games start in.
    pub fn default_mode(&self) -> Mode {
        self.default_mode
    }

    /// Start a game in the default mode.
    pub fn new_game(&self) -> GameHandle {
        self.new_game_with_mode(self.default_mode)
    }

    /// Start a game in the given mode.
    pub fn new_game_with_mode(&self, mode: Mode) -> GameHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let handle = GameHandle(id);

        let game = match self.seed {
            Some(seed) => Game::with_seed(mode, seed.wrapping_add(id)),
            None => Game::new(mode),
        };

        self.games.lock().insert(handle, Arc::new(Mutex::new(game)));
        info!(%handle, %mode, "created game");

        handle
    }

    /// Get a game.
    pub fn get_game(&self, handle: GameHandle) -> Option<ShareGame> {
        self.games.lock().get(&handle).cloned()
    }

    /// Remove a game. Returns the [`ShareGame`] if successful.
    pub fn remove_game(&self, handle: GameHandle) -> Option<ShareGame> {
        let game = self.games.lock().remove(&handle)?;
        info!(%handle, "removed game");
        Some(game)
    }

    /// Get the number of games.
    pub fn len(&self) -> usize {
        self.games.lock().len()
    }

    /// Check if there are no games.
    pub fn is_empty(&self) -> bool {
        self.games.lock().is_empty()
    }

    /// Run a closure with a locked game.
    ///
    /// The registry lock is released before the game is locked.
    fn with_game<F, T>(&self, handle: GameHandle, func: F) -> Result<T, RegistryError>
    where
        F: FnOnce(&mut Game) -> T,
    {
        let game = self
            .get_game(handle)
            .ok_or(RegistryError::UnknownGame(handle))?;
        let mut game = game.lock();
        Ok(func(&mut game))
    }

    /// Play a human move.
    pub fn apply_human_move(
        &self,
        handle: GameHandle,
        index: u8,
    ) -> Result<GameStatus, RegistryError> {
        Ok(self.with_game(handle, |game| game.apply_human_move(index))??)
    }

    /// Let the computer play a move.
    pub fn apply_robot_move(&self, handle: GameHandle) -> Result<RobotMove, RegistryError> {
        Ok(self.with_game(handle, Game::apply_robot_move)??)
    }

    /// Change a game's mode. This starts a new game under the same handle.
    pub fn set_mode(&self, handle: GameHandle, mode: Mode) -> Result<(), RegistryError> {
        self.with_game(handle, |game| game.set_mode(mode))
    }

    /// Switch a game to the other mode. This starts a new game under the same handle.
    pub fn toggle_mode(&self, handle: GameHandle) -> Result<Mode, RegistryError> {
        self.with_game(handle, Game::toggle_mode)
    }

    /// Clear a game's board.
    pub fn reset(&self, handle: GameHandle) -> Result<(), RegistryError> {
        self.with_game(handle, Game::reset)
    }

    /// Get a game's mode.
    pub fn mode(&self, handle: GameHandle) -> Result<Mode, RegistryError> {
        self.with_game(handle, |game| game.mode())
    }

    /// Get a game's board.
    pub fn board(&self, handle: GameHandle) -> Result<Board, RegistryError> {
        self.with_game(handle, |game| game.board())
    }

    /// Get a game's status.
    pub fn current_status(&self, handle: GameHandle) -> Result<GameStatus, RegistryError> {
        self.with_game(handle, |game| game.status())
    }

    /// Get whose turn it is in a game.
    pub fn turn_state(&self, handle: GameHandle) -> Result<TurnState, RegistryError> {
        self.with_game(handle, |game| game.turn_state())
    }

    /// Get the winning line of a game, if there is one.
    pub fn winning_line(&self, handle: GameHandle) -> Result<Option<WinLine>, RegistryError> {
        self.with_game(handle, |game| game.winning_line())
    }
}

impl Default for GameRegistry {
    fn default() -> Self {
        Self::new(Mode::default())
    }
}
