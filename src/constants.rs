//! Default game parameters and neighbor offset tables.
//!
//! Board size and palette are chosen at runtime through
//! [`GameConfig`](crate::config::GameConfig); the values here are only the
//! defaults used when nothing else is specified.

// =============================================================================
// Game Defaults
// =============================================================================

/// Default board size (NxN).
pub const DEFAULT_SIZE: usize = 12;

/// Default number of colors in the palette.
pub const DEFAULT_COLORS: usize = 6;

/// Smallest palette a game can be finished with.
pub const MIN_COLORS: usize = 2;

/// Largest palette a board can carry (colors are stored as `u8`).
pub const MAX_COLORS: usize = u8::MAX as usize + 1;

/// Number of moves the greedy auto-player may spend before giving up,
/// per cell of the board.
pub const AUTOPLAY_STEPS_PER_CELL: usize = 1;

// =============================================================================
// Neighbor Offsets
// =============================================================================

/// Row/column offsets to the orthogonal neighbors.
/// Order: North, South, West, East
pub const ORTHOGONAL: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Row/column offsets to the diagonal neighbors.
/// Order: NW, NE, SW, SE
pub const DIAGONAL: [(isize, isize); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

// =============================================================================
// Display
// =============================================================================

/// Glyphs used when printing cell colors. Colors beyond the table print as `?`.
pub const COLOR_GLYPHS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Marker printed after a captured cell.
pub const CAPTURED_MARK: char = '*';
