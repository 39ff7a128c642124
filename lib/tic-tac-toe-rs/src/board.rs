use crate::{
    Team,
    NUM_TILES,
};

/// The win type
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum WinType {
    Horizontal,
    Vertical,
    Diagonal,
    AntiDiagonal,
}

/// A line of 3 tiles that wins the game for a team holding all of them.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct WinLine {
    /// The tile_indexes that are part of the line.
    ///
    /// Sorted from least to greatest.
    pub tile_indexes: [u8; 3],

    /// The win type
    pub win_type: WinType,
}

impl WinLine {
    const fn new(i0: u8, i1: u8, i2: u8, win_type: WinType) -> Self {
        Self {
            tile_indexes: [i0, i1, i2],
            win_type,
        }
    }

    /// The bitboard mask of this line.
    const fn mask(self) -> u16 {
        (1 << self.tile_indexes[0]) | (1 << self.tile_indexes[1]) | (1 << self.tile_indexes[2])
    }

    /// Get the least tile index
    pub fn start_tile_index(&self) -> u8 {
        self.tile_indexes[0]
    }

    /// Get the highest tile index
    pub fn end_tile_index(&self) -> u8 {
        self.tile_indexes[2]
    }

    /// Check if this line contains the given tile index.
    pub fn contains(&self, index: u8) -> bool {
        self.tile_indexes.contains(&index)
    }
}

/// Every win line.
///
/// The order is fixed: rows top to bottom, columns left to right, then the diagonal and anti-diagonal.
/// Lookups that return the first matching line rely on it.
pub const WIN_LINES: [WinLine; 8] = [
    WinLine::new(0, 1, 2, WinType::Horizontal),
    WinLine::new(3, 4, 5, WinType::Horizontal),
    WinLine::new(6, 7, 8, WinType::Horizontal),
    WinLine::new(0, 3, 6, WinType::Vertical),
    WinLine::new(1, 4, 7, WinType::Vertical),
    WinLine::new(2, 5, 8, WinType::Vertical),
    WinLine::new(0, 4, 8, WinType::Diagonal),
    WinLine::new(2, 4, 6, WinType::AntiDiagonal),
];

/// The status of a game, derived from a [`Board`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum GameStatus {
    /// Nobody has won and there are empty tiles left.
    InProgress,

    /// A team has a complete line.
    Won(Team),

    /// The board is full and nobody won.
    Draw,
}

impl GameStatus {
    /// Returns true if the game is over.
    pub fn is_finished(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InProgress => write!(f, "in progress"),
            Self::Won(team) => write!(f, "{team} wins"),
            Self::Draw => write!(f, "draw"),
        }
    }
}

/// An illegal placement.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidMoveError {
    /// The index is not a tile.
    #[error("tile {0} is out of range, tiles are numbered 0 to 8")]
    OutOfRange(u8),

    /// The tile is taken.
    #[error("tile {index} is already taken by {team}")]
    Occupied { index: u8, team: Team },
}

/// Failed to parse a [`Board`] from a [`str`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidBoardStrError {
    /// The wrong number of tiles were given.
    #[error("a tic-tac-toe board needs exactly 9 tiles, found {0}")]
    InvalidLength(usize),

    /// A char is not a tile.
    #[error("'{0}' is not a valid tic-tac-toe tile")]
    InvalidTile(char),
}

/// A Tic Tac Toe board
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    // the bitboard
    // 9 tiles, so it cannot fit in a u8 but can fit in a u16
    x_state: u16,
    o_state: u16,
}

impl Board {
    /// Make a new [`Board`].
    pub fn new() -> Self {
        Board {
            x_state: 0,
            o_state: 0,
        }
    }

    fn team_state(self, team: Team) -> u16 {
        match team {
            Team::X => self.x_state,
            Team::O => self.o_state,
        }
    }

    /// Get the team whos turn it is.
    ///
    /// X always moves first.
    pub fn get_turn(self) -> Team {
        let num_x = self.x_state.count_ones();
        let num_o = self.o_state.count_ones();

        if num_x > num_o {
            Team::O
        } else {
            Team::X
        }
    }

    /// Returns true if every tile is taken.
    pub fn is_full(self) -> bool {
        (self.x_state | self.o_state).count_ones() >= u32::from(NUM_TILES)
    }

    /// Returns true if it is a draw.
    ///
    /// A full board with a line on it is a win, not a draw.
    pub fn is_draw(self) -> bool {
        self.is_full() && self.get_winner().is_none()
    }

    /// Check if the given team won.
    ///
    /// This is designed to be fast.
    pub fn has_won(self, team: Team) -> bool {
        let state = self.team_state(team);
        WIN_LINES
            .iter()
            .any(|line| (state & line.mask()) == line.mask())
    }

    /// Get the first [`WinLine`] held by the given team, in [`WIN_LINES`] order.
    pub fn winning_line(self, team: Team) -> Option<WinLine> {
        let state = self.team_state(team);
        WIN_LINES
            .iter()
            .copied()
            .find(|line| (state & line.mask()) == line.mask())
    }

    /// Get the winner if they exist.
    ///
    /// X is checked first.
    pub fn get_winner(self) -> Option<Team> {
        if self.has_won(Team::X) {
            Some(Team::X)
        } else if self.has_won(Team::O) {
            Some(Team::O)
        } else {
            None
        }
    }

    /// Get the [`GameStatus`].
    ///
    /// Wins take precedence over draws.
    pub fn status(self) -> GameStatus {
        if let Some(winner) = self.get_winner() {
            GameStatus::Won(winner)
        } else if self.is_full() {
            GameStatus::Draw
        } else {
            GameStatus::InProgress
        }
    }

    /// Set the tile at the index.
    ///
    /// # Panics
    /// Panics if the index >= 9.
    #[must_use]
    pub fn set(mut self, index: u8, team: Option<Team>) -> Self {
        assert!(index < NUM_TILES);
        match team {
            Some(Team::X) => {
                self.x_state |= 1 << index;
                self.o_state &= !(1 << index);
            }
            Some(Team::O) => {
                self.x_state &= !(1 << index);
                self.o_state |= 1 << index;
            }
            None => {
                self.x_state &= !(1 << index);
                self.o_state &= !(1 << index);
            }
        }
        self
    }

    /// Get the tile at the index.
    ///
    /// # Panics
    /// Panics if the index >= 9.
    pub fn get(self, index: u8) -> Option<Team> {
        assert!(index < NUM_TILES);
        if self.x_state & (1 << index) != 0 {
            Some(Team::X)
        } else if self.o_state & (1 << index) != 0 {
            Some(Team::O)
        } else {
            None
        }
    }

    /// Place a team on an empty tile.
    ///
    /// On error, the board is left as it was.
    pub fn place(&mut self, index: u8, team: Team) -> Result<(), InvalidMoveError> {
        if index >= NUM_TILES {
            return Err(InvalidMoveError::OutOfRange(index));
        }

        if let Some(occupant) = self.get(index) {
            return Err(InvalidMoveError::Occupied {
                index,
                team: occupant,
            });
        }

        *self = self.set(index, Some(team));

        Ok(())
    }

    /// Clear every tile.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Get an iterator over the tiles.
    ///
    /// The iterator starts at 0 at the top left and ends at 8 at the bottom right.
    ///
    /// # Returns
    /// Returns a tuple pair, where the first element is the index and the second is the tile value.
    pub fn iter(self) -> impl Iterator<Item = (u8, Option<Team>)> {
        let mut index = 0;
        std::iter::from_fn(move || {
            if index >= NUM_TILES {
                return None;
            }

            let ret = Some((index, self.get(index)));
            index += 1;
            ret
        })
    }

    /// Get an iterator over child board states, where `team` moves next.
    ///
    /// # Returns
    /// Returns an Iterator where Items are tuples.
    /// The first item is the index of the placed tile.
    /// The second is the resulting board state.
    pub fn iter_children(self, team: Team) -> ChildrenIter {
        ChildrenIter::new(self, team)
    }

    /// Get an iterator over the indexes of empty tiles, from least to greatest.
    pub fn iter_empty(self) -> impl Iterator<Item = u8> {
        let taken = self.x_state | self.o_state;
        (0..NUM_TILES).filter(move |&index| taken & (1 << index) == 0)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// An iterator over the boards reachable with one move.
///
/// Children are yielded in ascending tile index order.
#[derive(Debug)]
pub struct ChildrenIter {
    board: Board,
    team: Team,
    index: u8,
}

impl ChildrenIter {
    fn new(board: Board, team: Team) -> Self {
        Self {
            board,
            team,
            index: 0,
        }
    }
}

impl Iterator for ChildrenIter {
    type Item = (u8, Board);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.index >= NUM_TILES {
                return None;
            }

            let index_mask = 1 << self.index;
            let tile_is_empty = ((self.board.x_state | self.board.o_state) & index_mask) == 0;

            if tile_is_empty {
                let board = self.board.set(self.index, Some(self.team));
                let item = Some((self.index, board));
                self.index += 1;
                return item;
            }
            self.index += 1;
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(usize::from(NUM_TILES - self.index)))
    }
}

impl std::iter::FusedIterator for ChildrenIter {}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, tile) in self.iter() {
            let c = tile.map_or('.', Team::as_char);
            write!(f, "{c}")?;

            match index % 3 {
                2 if index + 1 < NUM_TILES => writeln!(f)?,
                2 => {}
                _ => write!(f, "|")?,
            }
        }

        Ok(())
    }
}

impl std::str::FromStr for Board {
    type Err = InvalidBoardStrError;

    /// Parse a board from 9 tiles in row-major order.
    ///
    /// `X` and `O` are teams, `.`, `-` and `_` are empty tiles.
    /// Whitespace and `|` are skipped, so the output of [`Board`]'s `Display` impl parses.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tiles = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '|')
            .map(|c| match c {
                '.' | '-' | '_' => Ok(None),
                c => Team::from_char(c)
                    .map(Some)
                    .map_err(|e| InvalidBoardStrError::InvalidTile(e.0)),
            })
            .collect::<Result<Vec<_>, _>>()?;

        if tiles.len() != usize::from(NUM_TILES) {
            return Err(InvalidBoardStrError::InvalidLength(tiles.len()));
        }

        Ok((0..NUM_TILES)
            .zip(tiles)
            .fold(Self::new(), |board, (index, tile)| board.set(index, tile)))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// Decode a base-3 number into a board, least significant digit first.
    fn board_from_u16(mut n: u16) -> Board {
        let mut board = Board::new();
        for index in 0..NUM_TILES {
            let tile = match n % 3 {
                0 => None,
                1 => Some(Team::X),
                _ => Some(Team::O),
            };
            board = board.set(index, tile);
            n /= 3;
        }
        board
    }

    #[test]
    fn place_occupied() {
        let mut board: Board = "X........".parse().expect("invalid board");
        let before = board;

        let error = board.place(0, Team::O).expect_err("placed on a taken tile");
        assert_eq!(
            error,
            InvalidMoveError::Occupied {
                index: 0,
                team: Team::X
            }
        );
        assert_eq!(board, before);
    }

    #[test]
    fn place_out_of_range() {
        let mut board = Board::new();
        assert_eq!(
            board.place(9, Team::X),
            Err(InvalidMoveError::OutOfRange(9))
        );
        assert_eq!(board, Board::new());
    }

    #[test]
    fn place_sets_tile() {
        let mut board = Board::new();
        board.place(4, Team::X).expect("failed to place");
        assert_eq!(board.get(4), Some(Team::X));
        assert_eq!(board.get_turn(), Team::O);
        assert_eq!(board.iter_empty().count(), 8);
    }

    #[test]
    fn every_line_wins() {
        for line in WIN_LINES {
            let board = line
                .tile_indexes
                .iter()
                .fold(Board::new(), |board, &index| board.set(index, Some(Team::O)));

            assert!(board.has_won(Team::O));
            assert!(!board.has_won(Team::X));
            assert_eq!(board.winning_line(Team::O), Some(line));
            assert_eq!(board.status(), GameStatus::Won(Team::O));

            for index in 0..NUM_TILES {
                assert_eq!(line.contains(index), board.get(index).is_some());
            }
        }
    }

    #[test]
    fn winning_line_prefers_rows() {
        // X holds row 0 and column 0
        let board: Board = "XXX XOO XO.".parse().expect("invalid board");
        let line = board.winning_line(Team::X).expect("missing win");
        assert_eq!(line.tile_indexes, [0, 1, 2]);
        assert_eq!(line.win_type, WinType::Horizontal);

        // X holds column 2 and the anti-diagonal
        let board: Board = "O.X OXX XOX".parse().expect("invalid board");
        let line = board.winning_line(Team::X).expect("missing win");
        assert_eq!(line.tile_indexes, [2, 5, 8]);
        assert_eq!(line.win_type, WinType::Vertical);
        assert_eq!(line.start_tile_index(), 2);
        assert_eq!(line.end_tile_index(), 8);
    }

    #[test]
    fn full_board_without_line_is_draw() {
        let board: Board = "XOX XOO OXX".parse().expect("invalid board");
        assert!(board.is_full());
        assert!(board.is_draw());
        assert_eq!(board.get_winner(), None);
        assert_eq!(board.status(), GameStatus::Draw);
    }

    #[test]
    fn full_board_with_line_is_not_draw() {
        let board: Board = "XXX OOX XOO".parse().expect("invalid board");
        assert!(board.is_full());
        assert!(!board.is_draw());
        assert_eq!(board.status(), GameStatus::Won(Team::X));
    }

    #[test]
    fn win_and_draw_are_exclusive() {
        for n in 0..3u16.pow(9) {
            let board = board_from_u16(n);
            let won = board.has_won(Team::X) || board.has_won(Team::O);
            assert!(!(won && board.is_draw()), "{board:?}");

            match board.status() {
                GameStatus::InProgress => assert!(!won && !board.is_full()),
                GameStatus::Won(team) => assert!(board.has_won(team)),
                GameStatus::Draw => assert!(board.is_draw()),
            }
        }
    }

    #[test]
    fn children() {
        let board: Board = "X.. .O. ..X".parse().expect("invalid board");
        let children: Vec<_> = board.iter_children(Team::O).collect();

        let indexes: Vec<_> = children.iter().map(|(index, _)| *index).collect();
        assert_eq!(indexes, [1, 2, 3, 5, 6, 7]);
        assert_eq!(indexes, board.iter_empty().collect::<Vec<_>>());

        for (index, child) in children {
            assert_eq!(child.get(index), Some(Team::O));
            assert_eq!(child.set(index, None), board);
        }
    }

    #[test]
    fn reset() {
        let mut board: Board = "XO. .X. ..O".parse().expect("invalid board");
        board.reset();
        assert_eq!(board, Board::new());
        assert_eq!(board.status(), GameStatus::InProgress);
    }

    #[test]
    fn display_parses() {
        let board: Board = "XO. .X. ..O".parse().expect("invalid board");
        let rendered = board.to_string();
        assert_eq!(rendered, "X|O|.\n.|X|.\n.|.|O");
        assert_eq!(rendered.parse::<Board>(), Ok(board));
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            "XO".parse::<Board>(),
            Err(InvalidBoardStrError::InvalidLength(2))
        );
        assert_eq!(
            "XO.......Z".parse::<Board>(),
            Err(InvalidBoardStrError::InvalidTile('Z'))
        );
    }
}
