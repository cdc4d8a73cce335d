//! Game state and move execution.
//!
//! A game moves through three phases:
//! - [`Phase::AwaitingInitialPick`]: the player chooses the cell the captured
//!   region starts from
//! - [`Phase::Playing`]: each color choice floods the region
//! - [`Phase::Finished`]: every cell is captured; only a reset leaves it
//!
//! [`GameState`] is also the unit of undo snapshots and of saved games. It is
//! plain owned data, so a `clone()` never shares cells with the original.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::board::{Board, Color};
use crate::config::GameConfig;
use crate::error::{GameError, Result};
use crate::flood::{self, Connectivity, FloodRule, Topology};

/// Where the game is in its lifecycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    AwaitingInitialPick,
    Playing,
    Finished,
}

/// Outcome of a color choice that was not rejected.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveResult {
    /// The color was already selected; nothing changed and no step was counted
    Unchanged,
    /// A step was counted; `captured` cells joined the region (possibly 0)
    Played { captured: usize },
}

impl MoveResult {
    pub fn is_played(&self) -> bool {
        matches!(self, MoveResult::Played { .. })
    }
}

/// A full game: the board plus the counters derived from play.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    /// Color of the whole captured region (`None` before the initial pick)
    current_color: Option<Color>,
    steps_played: usize,
    number_captured: usize,
    awaiting_initial_pick: bool,
    topology: Topology,
    connectivity: Connectivity,
}

/// Start a new game with a freshly generated board.
pub fn new_game(config: &GameConfig) -> Result<GameState> {
    config.validate()?;
    let board = Board::generate(config.size, config.num_colors, config.seed)?;
    Ok(GameState::from_board(board, config.rule()))
}

impl GameState {
    /// Start a game on an existing board. Any captured flags on `board` are
    /// cleared.
    pub fn from_board(mut board: Board, rule: FloodRule) -> Self {
        board.release_all();
        Self {
            board,
            current_color: None,
            steps_played: 0,
            number_captured: 0,
            awaiting_initial_pick: true,
            topology: rule.topology,
            connectivity: rule.connectivity,
        }
    }

    /// Regenerate the board from `config` and return to the initial pick.
    ///
    /// On error the current game is left untouched.
    pub fn reset(&mut self, config: &GameConfig) -> Result<()> {
        *self = new_game(config)?;
        info!(
            size = config.size,
            colors = config.num_colors,
            topology = %config.topology,
            connectivity = %config.connectivity,
            "game reset"
        );
        Ok(())
    }

    /// Capture the starting cell. Only legal once, before any color is chosen.
    pub fn pick_initial_cell(&mut self, row: usize, column: usize) -> Result<()> {
        if !self.awaiting_initial_pick {
            return Err(GameError::IllegalMove("initial cell already picked"));
        }
        let color = self.board.color_at(row, column)?;
        self.board.set_captured(row, column)?;
        self.current_color = Some(color);
        self.awaiting_initial_pick = false;
        self.number_captured = self.board.captured_count();
        debug!(row, column, color, "initial cell picked");
        if self.is_finished() {
            info!(steps = self.steps_played, "board captured");
        }
        Ok(())
    }

    /// Flood the captured region with `new_color`.
    ///
    /// Choosing the current color is accepted but changes nothing and does
    /// not count as a step.
    pub fn choose_color(&mut self, new_color: Color) -> Result<MoveResult> {
        if new_color as usize >= self.board.num_colors() {
            return Err(GameError::invalid_color(new_color, self.board.num_colors()));
        }
        match self.phase() {
            Phase::AwaitingInitialPick => {
                return Err(GameError::IllegalMove("no initial cell picked yet"));
            }
            Phase::Finished => return Err(GameError::IllegalMove("game is finished")),
            Phase::Playing => {}
        }
        if self.current_color == Some(new_color) {
            return Ok(MoveResult::Unchanged);
        }

        let rule = self.rule();
        let captured = flood::flood(&mut self.board, self.current_color, new_color, rule);
        self.current_color = Some(new_color);
        self.steps_played += 1;
        self.number_captured += captured;
        debug!(
            color = new_color,
            captured,
            total = self.number_captured,
            steps = self.steps_played,
            "color chosen"
        );
        if self.is_finished() {
            info!(steps = self.steps_played, "board captured");
        }
        Ok(MoveResult::Played { captured })
    }

    pub fn is_finished(&self) -> bool {
        self.number_captured == self.board.size() * self.board.size()
    }

    pub fn phase(&self) -> Phase {
        if self.awaiting_initial_pick {
            Phase::AwaitingInitialPick
        } else if self.is_finished() {
            Phase::Finished
        } else {
            Phase::Playing
        }
    }

    /// Change the wraparound setting. Applies to subsequent floods only.
    pub fn set_topology(&mut self, topology: Topology) {
        self.topology = topology;
    }

    /// Change the diagonal setting. Applies to subsequent floods only.
    pub fn set_connectivity(&mut self, connectivity: Connectivity) {
        self.connectivity = connectivity;
    }

    pub fn rule(&self) -> FloodRule {
        FloodRule::new(self.topology, self.connectivity)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn size(&self) -> usize {
        self.board.size()
    }

    pub fn num_colors(&self) -> usize {
        self.board.num_colors()
    }

    pub fn color_at(&self, row: usize, column: usize) -> Result<Color> {
        self.board.color_at(row, column)
    }

    pub fn is_captured(&self, row: usize, column: usize) -> Result<bool> {
        self.board.is_captured(row, column)
    }

    /// Color shown for the cell: the current color if captured, its own otherwise.
    pub fn displayed_color(&self, row: usize, column: usize) -> Result<Color> {
        let cell = self.board.cell(row, column)?;
        Ok(match (cell.captured, self.current_color) {
            (true, Some(current)) => current,
            _ => cell.color,
        })
    }

    pub fn current_color(&self) -> Option<Color> {
        self.current_color
    }

    pub fn steps_played(&self) -> usize {
        self.steps_played
    }

    pub fn number_captured(&self) -> usize {
        self.number_captured
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn connectivity(&self) -> Connectivity {
        self.connectivity
    }

    /// Serialize every field of the game.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| GameError::CorruptSnapshot(e.to_string()))
    }

    /// Restore a game written by [`to_json`](Self::to_json), rejecting data that
    /// breaks any game invariant.
    pub fn from_json(json: &str) -> Result<Self> {
        let state: GameState =
            serde_json::from_str(json).map_err(|e| GameError::CorruptSnapshot(e.to_string()))?;
        state.validate().map_err(GameError::CorruptSnapshot)?;
        Ok(state)
    }

    fn validate(&self) -> std::result::Result<(), String> {
        self.board.validate()?;
        let captured = self.board.captured_count();
        if captured != self.number_captured {
            return Err(format!(
                "{} cells captured but counter says {}",
                captured, self.number_captured
            ));
        }
        match (self.awaiting_initial_pick, self.current_color) {
            (true, None) if captured == 0 && self.steps_played == 0 => Ok(()),
            (true, _) => Err("game awaiting initial pick has progress".to_string()),
            (false, None) => Err("game in progress has no current color".to_string()),
            (false, Some(c)) if c as usize >= self.board.num_colors() => {
                Err(format!("current color {c} outside palette"))
            }
            (false, Some(_)) if captured == 0 => {
                Err("game in progress has nothing captured".to_string())
            }
            (false, Some(_)) => Ok(()),
        }
    }
}
