//! Flood-It: a single-player tile-flood puzzle engine.
//!
//! The board is a square grid of colored cells. After picking a starting cell,
//! the player repeatedly chooses a color; the captured region grows to every
//! cell of that color it touches. The goal is to capture the whole board in as
//! few choices as possible.
//!
//! ## Modules
//!
//! - [`constants`] - Default sizes and neighbor offsets
//! - [`board`] - Cells and the square grid
//! - [`flood`] - Region growth under plane/torus and 4/8-neighbor rules
//! - [`config`] - Settings for starting a game
//! - [`game`] - Game state, phases and serialization
//! - [`history`] - Snapshot stack for undo
//! - [`session`] - A game with undo/redo
//! - [`hint`] - Greedy move suggestion and auto-play
//! - [`console`] - Text command protocol
//! - [`error`] - The shared error type
//!
//! ## Example
//!
//! ```
//! use flood_it::board::Board;
//! use flood_it::flood::FloodRule;
//! use flood_it::game::GameState;
//!
//! let board = Board::from_colors(&[vec![0, 0], vec![1, 1]], 2).unwrap();
//! let mut game = GameState::from_board(board, FloodRule::default());
//!
//! game.pick_initial_cell(0, 0).unwrap();
//! game.choose_color(1).unwrap();
//! game.choose_color(0).unwrap();
//! assert!(game.is_finished());
//! assert_eq!(game.steps_played(), 2);
//! ```

pub mod board;
pub mod config;
pub mod console;
pub mod constants;
pub mod error;
pub mod flood;
pub mod game;
pub mod hint;
pub mod history;
pub mod session;

pub use error::{GameError, Result};
