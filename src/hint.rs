//! Greedy move suggestion and auto-play.
//!
//! Each candidate color is tried on a copy of the board and the one that
//! captures the most cells right away wins. This is a one-move lookahead,
//! not an optimal solver.

use tracing::debug;

use crate::board::Color;
use crate::constants::AUTOPLAY_STEPS_PER_CELL;
use crate::error::Result;
use crate::flood::flood;
use crate::game::{GameState, Phase};

/// Cells `color` would capture if chosen now.
pub fn gain(state: &GameState, color: Color) -> usize {
    let mut board = state.board().clone();
    flood(&mut board, state.current_color(), color, state.rule())
}

/// The color capturing the most cells this turn; ties go to the lowest color.
///
/// `None` unless the game is being played.
pub fn best_color(state: &GameState) -> Option<Color> {
    if state.phase() != Phase::Playing {
        return None;
    }
    let current = state.current_color();
    (0..state.num_colors())
        .map(|c| c as Color)
        .filter(|&c| Some(c) != current)
        .map(|c| (gain(state, c), c))
        // max_by_key keeps the last maximum, so rank lower colors higher on ties
        .max_by_key(|&(g, c)| (g, std::cmp::Reverse(c)))
        .map(|(_, c)| c)
}

/// Play greedy moves until the board is captured or `max_steps` moves were made.
///
/// Returns the number of moves played. A game still awaiting its initial pick
/// is not touched.
pub fn autoplay(state: &mut GameState, max_steps: usize) -> Result<usize> {
    let mut played = 0;
    while played < max_steps {
        let Some(color) = best_color(state) else { break };
        state.choose_color(color)?;
        played += 1;
    }
    debug!(played, finished = state.is_finished(), "autoplay stopped");
    Ok(played)
}

/// Move budget for [`autoplay`] that always suffices on a `size`x`size` board.
pub fn step_budget(size: usize) -> usize {
    size * size * AUTOPLAY_STEPS_PER_CELL
}
