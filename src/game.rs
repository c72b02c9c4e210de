//! Core tic-tac-toe domain types: marks, the board, and move validation.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// A player's mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    /// Player X (goes first).
    X,
    /// Player O (goes second).
    O,
}

impl Mark {
    /// Returns the opposing mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

impl std::fmt::Display for Mark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mark::X => write!(f, "X"),
            Mark::O => write!(f, "O"),
        }
    }
}

impl std::str::FromStr for Mark {
    type Err = ParseMarkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "X" => Ok(Mark::X),
            "O" => Ok(Mark::O),
            _ => Err(ParseMarkError),
        }
    }
}

/// Error parsing a mark from its wire representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("bad player provided")]
pub struct ParseMarkError;

/// A square on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square taken by a player.
    Taken(Mark),
}

/// 3x3 tic-tac-toe board, squares in row-major order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Gets the square at the given cell (0-8).
    pub fn get(&self, cell: usize) -> Option<Square> {
        self.squares.get(cell).copied()
    }

    /// Checks whether a cell is empty. Out-of-range cells are not empty.
    pub fn is_empty_at(&self, cell: usize) -> bool {
        matches!(self.get(cell), Some(Square::Empty))
    }

    /// Checks whether every square is taken.
    pub fn is_full(&self) -> bool {
        self.squares.iter().all(|s| *s != Square::Empty)
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Checks the 8 lines (3 rows, 3 columns, 2 diagonals) for a winner.
    pub fn winner(&self) -> Option<Mark> {
        const LINES: [[usize; 3]; 8] = [
            // Rows
            [0, 1, 2],
            [3, 4, 5],
            [6, 7, 8],
            // Columns
            [0, 3, 6],
            [1, 4, 7],
            [2, 5, 8],
            // Diagonals
            [0, 4, 8],
            [2, 4, 6],
        ];

        for [a, b, c] in LINES {
            if let Square::Taken(mark) = self.squares[a] {
                if self.squares[b] == Square::Taken(mark) && self.squares[c] == Square::Taken(mark)
                {
                    return Some(mark);
                }
            }
        }

        None
    }

    fn set(&mut self, cell: usize, square: Square) {
        self.squares[cell] = square;
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when placing a mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum MoveError {
    /// Cell index is outside 0-8.
    #[display("cell index out of bounds, must be 0-8")]
    OutOfBounds,
    /// Cell is already taken.
    #[display("cell {cell} is already occupied")]
    CellOccupied {
        /// The contested cell index.
        cell: usize,
    },
    /// It is the other player's turn.
    #[display("not your turn, waiting for player {expected}")]
    NotYourTurn {
        /// The mark whose turn it is.
        expected: Mark,
    },
    /// The game has already ended.
    #[display("game is already over")]
    GameOver,
}

/// A single tic-tac-toe game: board, turn order, and terminal state.
///
/// Exactly one of {ongoing, won, drawn} holds at any time. Once the game
/// is over, every further [`Game::place`] fails with [`MoveError::GameOver`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    id: u32,
    board: Board,
    next_turn: Mark,
    over: bool,
    winner: Option<Mark>,
}

impl Game {
    /// Creates a new game with an empty board. X moves first.
    #[instrument]
    pub fn new(id: u32) -> Self {
        debug!(id, "Creating new game");
        Self {
            id,
            board: Board::new(),
            next_turn: Mark::X,
            over: false,
            winner: None,
        }
    }

    /// Returns the game's identifier, assigned at creation.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the mark that moves next.
    pub fn next_turn(&self) -> Mark {
        self.next_turn
    }

    /// Returns whether the game has ended.
    pub fn is_over(&self) -> bool {
        self.over
    }

    /// Returns the winner, if the game ended with one.
    pub fn winner(&self) -> Option<Mark> {
        self.winner
    }

    /// Places `player`'s mark at `cell` (0-8).
    ///
    /// On success the turn flips and the terminal state is recomputed:
    /// a completed line marks the game won, a full board without one
    /// marks it drawn.
    ///
    /// # Errors
    ///
    /// Fails without touching state when the game is over, the cell is
    /// out of range or occupied, or it is not `player`'s turn.
    #[instrument(skip(self), fields(id = self.id))]
    pub fn place(&mut self, player: Mark, cell: usize) -> Result<(), MoveError> {
        if self.over {
            return Err(MoveError::GameOver);
        }
        if cell >= 9 {
            return Err(MoveError::OutOfBounds);
        }
        if !self.board.is_empty_at(cell) {
            return Err(MoveError::CellOccupied { cell });
        }
        if player != self.next_turn {
            return Err(MoveError::NotYourTurn {
                expected: self.next_turn,
            });
        }

        self.board.set(cell, Square::Taken(player));
        self.next_turn = self.next_turn.opponent();

        if let Some(winner) = self.board.winner() {
            debug!(id = self.id, %winner, "Game won");
            self.over = true;
            self.winner = Some(winner);
        } else if self.board.is_full() {
            debug!(id = self.id, "Game drawn");
            self.over = true;
        }

        Ok(())
    }
}
