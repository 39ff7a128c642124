use crate::{
    best_move,
    Board,
    Team,
};
use rand::{
    seq::IteratorRandom,
    Rng,
};

/// Failed to parse a [`Mode`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a valid mode, expected 'optimal' or 'random'")]
pub struct InvalidModeError(pub String);

/// How the computer picks its moves.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Search the whole game tree. Never loses.
    #[default]
    #[serde(alias = "hard")]
    Optimal,

    /// Pick any empty tile.
    #[serde(alias = "easy")]
    Random,
}

impl Mode {
    /// Get the other mode.
    #[must_use]
    pub fn toggle(self) -> Self {
        match self {
            Self::Optimal => Self::Random,
            Self::Random => Self::Optimal,
        }
    }

    /// Get the name of this mode.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Optimal => "optimal",
            Self::Random => "random",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Mode {
    type Err = InvalidModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "optimal" | "hard" => Ok(Self::Optimal),
            "random" | "easy" => Ok(Self::Random),
            _ => Err(InvalidModeError(s.to_string())),
        }
    }
}

/// Pick a uniformly random empty tile.
///
/// Returns `None` if the board is full.
pub fn random_move<R>(board: Board, rng: &mut R) -> Option<u8>
where
    R: Rng + ?Sized,
{
    board.iter_empty().choose(rng)
}

/// Pick a move for `team` with the given [`Mode`].
///
/// Returns `None` if the game is over, as there is nothing left to pick.
pub fn select_move<R>(board: Board, team: Team, mode: Mode, rng: &mut R) -> Option<u8>
where
    R: Rng + ?Sized,
{
    if board.status().is_finished() {
        return None;
    }

    match mode {
        Mode::Optimal => best_move(board, team).map(|(index, _score)| index),
        Mode::Random => random_move(board, rng),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::{
        rngs::StdRng,
        SeedableRng,
    };

    #[test]
    fn random_picks_empty_tiles() {
        let board: Board = "X.O .X. O..".parse().expect("invalid board");
        let empty: Vec<u8> = board.iter_empty().collect();
        let mut rng = StdRng::seed_from_u64(7);

        let mut picked = [false; 9];
        for _ in 0..500 {
            let index = random_move(board, &mut rng).expect("missing move");
            assert_eq!(board.get(index), None);
            picked[usize::from(index)] = true;
        }

        for index in empty {
            assert!(picked[usize::from(index)], "tile {index} was never picked");
        }
    }

    #[test]
    fn random_last_tile() {
        let board: Board = "XOX OO. XXO".parse().expect("invalid board");
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(random_move(board, &mut rng), Some(5));
        assert_eq!(
            select_move(board, Team::X, Mode::Random, &mut rng),
            Some(5)
        );
    }

    #[test]
    fn no_move_when_finished() {
        let mut rng = StdRng::seed_from_u64(0);

        let full: Board = "XOX XOO OXX".parse().expect("invalid board");
        assert_eq!(random_move(full, &mut rng), None);

        let won: Board = "XXX OO. ...".parse().expect("invalid board");
        for mode in [Mode::Optimal, Mode::Random] {
            assert_eq!(select_move(full, Team::O, mode, &mut rng), None);
            assert_eq!(select_move(won, Team::O, mode, &mut rng), None);
        }
    }

    #[test]
    fn optimal_blocks() {
        let board: Board = "XX. .O. ...".parse().expect("invalid board");
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            select_move(board, Team::O, Mode::Optimal, &mut rng),
            Some(2)
        );
    }

    #[test]
    fn parse_mode() {
        assert_eq!("optimal".parse::<Mode>(), Ok(Mode::Optimal));
        assert_eq!("Hard".parse::<Mode>(), Ok(Mode::Optimal));
        assert_eq!("RANDOM".parse::<Mode>(), Ok(Mode::Random));
        assert_eq!("easy".parse::<Mode>(), Ok(Mode::Random));
        assert_eq!(
            "medium".parse::<Mode>(),
            Err(InvalidModeError("medium".to_string()))
        );
    }

    #[test]
    fn toggle() {
        assert_eq!(Mode::default(), Mode::Optimal);
        assert_eq!(Mode::Optimal.toggle(), Mode::Random);
        assert_eq!(Mode::Random.toggle().to_string(), "optimal");
    }
}
