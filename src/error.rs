//! Error type shared by every game operation.
//!
//! All errors are local and recoverable: an operation that returns one has
//! left the board, the game state and the history exactly as they were.

use thiserror::Error;

use crate::board::{Color, Point};

/// Errors raised by the board, the flood engine, the game state and the history.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// Board size must be at least 1
    #[error("invalid board size: {0}")]
    InvalidSize(usize),
    /// Coordinates outside `[0, size)`
    #[error("point ({}, {}) is outside a {size}x{size} board", .point.0, .point.1)]
    OutOfBounds { point: Point, size: usize },
    /// Color outside the palette
    #[error("color {color} is outside the palette of {num_colors} colors")]
    InvalidColor { color: usize, num_colors: usize },
    /// Palette must hold between 2 and 256 colors
    #[error("invalid number of colors: {0}")]
    InvalidColorCount(usize),
    /// Action not allowed in the current phase of the game
    #[error("illegal move: {0}")]
    IllegalMove(&'static str),
    /// Undo or redo requested with no snapshot available
    #[error("no snapshot available")]
    EmptyHistory,
    /// A serialized game failed to parse or breaks a game invariant
    #[error("corrupt snapshot: {0}")]
    CorruptSnapshot(String),
}

/// Result alias for game operations.
pub type Result<T> = std::result::Result<T, GameError>;

impl GameError {
    pub(crate) fn invalid_color(color: Color, num_colors: usize) -> Self {
        GameError::InvalidColor {
            color: color as usize,
            num_colors,
        }
    }
}
